use super::error::PreconditionError;
use crate::core::models::layout::{MoleculeLayout, SITES_PER_MOLECULE};
use crate::core::models::snapshot::Snapshot;
use nalgebra::Vector3;

/// Facts about a snapshot established once, before any accumulation starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationContext {
    pub layout: MoleculeLayout,
    pub n_molecules: usize,
    pub cell_lengths: Vector3<f64>,
    pub pbc: [bool; 3],
}

impl EvaluationContext {
    /// Validates `snapshot` against `layout`.
    ///
    /// # Errors
    ///
    /// Fails on a non-orthorhombic cell, a periodic axis without a positive length, an atom
    /// count that is not a multiple of three, or the first atom out of sequence.
    pub fn prepare(
        snapshot: &Snapshot,
        layout: MoleculeLayout,
    ) -> Result<Self, PreconditionError> {
        let cell_lengths = snapshot.orthorhombic_lengths()?;
        layout.validate(snapshot.numbers(), 0)?;

        Ok(Self {
            layout,
            n_molecules: snapshot.n_molecules(),
            cell_lengths,
            pbc: snapshot.pbc(),
        })
    }

    pub fn n_atoms(&self) -> usize {
        self.n_molecules * SITES_PER_MOLECULE
    }

    pub fn is_periodic(&self) -> bool {
        self.pbc.iter().any(|&p| p)
    }

    /// Periodic axes shorter than twice `cutoff`, as `(axis, length)` pairs.
    ///
    /// On these axes a molecule can see more than one image of a partner within the cutoff,
    /// and only the nearest one is counted.
    pub fn short_periodic_axes(&self, cutoff: f64) -> Vec<(usize, f64)> {
        (0..3)
            .filter(|&axis| self.pbc[axis] && cutoff > self.cell_lengths[axis] / 2.0)
            .map(|axis| (axis, self.cell_lengths[axis]))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::layout::LayoutError;
    use crate::core::models::snapshot::SnapshotError;
    use nalgebra::{Matrix3, Point3};

    fn two_molecules(numbers: Vec<u8>) -> Snapshot {
        let positions = (0..numbers.len())
            .map(|i| Point3::new(i as f64, 0.0, 0.0))
            .collect();
        Snapshot::new(positions, numbers).unwrap()
    }

    #[test]
    fn prepare_accepts_valid_nitrogen_first_system() {
        let snapshot = two_molecules(vec![7, 6, 6, 7, 6, 6])
            .with_box(Vector3::new(20.0, 20.0, 20.0))
            .with_pbc([true, true, false]);
        let context = EvaluationContext::prepare(&snapshot, MoleculeLayout::NitrogenFirst).unwrap();
        assert_eq!(context.n_molecules, 2);
        assert_eq!(context.n_atoms(), 6);
        assert_eq!(context.cell_lengths, Vector3::new(20.0, 20.0, 20.0));
        assert!(context.is_periodic());
    }

    #[test]
    fn prepare_rejects_wrong_layout() {
        let snapshot = two_molecules(vec![7, 6, 6, 7, 6, 6]);
        let err = EvaluationContext::prepare(&snapshot, MoleculeLayout::MethylFirst).unwrap_err();
        assert!(matches!(
            err,
            PreconditionError::Layout(LayoutError::SequenceMismatch { atom_index: 0, .. })
        ));
    }

    #[test]
    fn prepare_rejects_partial_molecule() {
        let snapshot = two_molecules(vec![7, 6, 6, 7]);
        let err = EvaluationContext::prepare(&snapshot, MoleculeLayout::NitrogenFirst).unwrap_err();
        assert!(matches!(
            err,
            PreconditionError::Layout(LayoutError::AtomCountNotMultipleOfThree { count: 4 })
        ));
    }

    #[test]
    fn prepare_rejects_skewed_cell_before_sequence_check() {
        let mut cell = Matrix3::from_diagonal(&Vector3::new(10.0, 10.0, 10.0));
        cell[(1, 0)] = 1.0;
        let snapshot = two_molecules(vec![6, 6, 6]).with_cell(cell);
        let err = EvaluationContext::prepare(&snapshot, MoleculeLayout::NitrogenFirst).unwrap_err();
        assert_eq!(err, PreconditionError::Snapshot(SnapshotError::NonOrthorhombicCell));
    }

    #[test]
    fn short_periodic_axes_reports_only_periodic_short_axes() {
        let snapshot = two_molecules(vec![7, 6, 6])
            .with_box(Vector3::new(8.0, 20.0, 8.0))
            .with_pbc([true, true, false]);
        let context = EvaluationContext::prepare(&snapshot, MoleculeLayout::NitrogenFirst).unwrap();
        assert_eq!(context.short_periodic_axes(5.0), vec![(0, 8.0)]);
        assert!(context.short_periodic_axes(4.0).is_empty());
    }
}
