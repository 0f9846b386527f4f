use super::layout::SITES_PER_MOLECULE;
use nalgebra::{Matrix3, Point3, Vector3};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SnapshotError {
    #[error("Length mismatch for {field}: expected {expected} entries, found {found}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Cell is not orthorhombic: off-diagonal entries must be zero")]
    NonOrthorhombicCell,

    #[error("Periodic axis {axis} has non-positive or non-finite length {length}")]
    DegeneratePeriodicAxis { axis: usize, length: f64 },
}

/// The state of a system at one instant, as handed to the calculator.
///
/// A snapshot owns flat per-atom arrays: positions in Angstroms, atomic numbers, and partial
/// charges in elementary charge units. Atom `i` belongs to molecule `i / 3`. The cell is stored
/// as a 3x3 matrix whose rows are the cell vectors; only diagonal (orthorhombic) cells can be
/// evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Cartesian coordinates of every atom.
    positions: Vec<Point3<f64>>,
    /// Atomic number of every atom (the methyl united atom is labelled 6).
    numbers: Vec<u8>,
    /// Partial charge of every atom.
    charges: Vec<f64>,
    /// Cell vectors as matrix rows.
    cell: Matrix3<f64>,
    /// Periodicity flag per axis.
    pbc: [bool; 3],
}

impl Snapshot {
    /// Creates a non-periodic snapshot with zero charges and an empty cell.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::LengthMismatch`] if `positions` and `numbers` differ in length.
    pub fn new(positions: Vec<Point3<f64>>, numbers: Vec<u8>) -> Result<Self, SnapshotError> {
        if positions.len() != numbers.len() {
            return Err(SnapshotError::LengthMismatch {
                field: "numbers",
                expected: positions.len(),
                found: numbers.len(),
            });
        }
        let charges = vec![0.0; positions.len()];
        Ok(Self {
            positions,
            numbers,
            charges,
            cell: Matrix3::zeros(),
            pbc: [false; 3],
        })
    }

    /// Replaces the cell matrix (rows are cell vectors).
    pub fn with_cell(mut self, cell: Matrix3<f64>) -> Self {
        self.cell = cell;
        self
    }

    /// Sets an orthorhombic cell from its three edge lengths.
    pub fn with_box(self, lengths: Vector3<f64>) -> Self {
        self.with_cell(Matrix3::from_diagonal(&lengths))
    }

    pub fn with_pbc(mut self, pbc: [bool; 3]) -> Self {
        self.pbc = pbc;
        self
    }

    /// Replaces all partial charges.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::LengthMismatch`] unless there is exactly one charge per atom.
    pub fn with_charges(mut self, charges: Vec<f64>) -> Result<Self, SnapshotError> {
        self.set_charges(charges)?;
        Ok(self)
    }

    pub fn set_charges(&mut self, charges: Vec<f64>) -> Result<(), SnapshotError> {
        if charges.len() != self.positions.len() {
            return Err(SnapshotError::LengthMismatch {
                field: "charges",
                expected: self.positions.len(),
                found: charges.len(),
            });
        }
        self.charges = charges;
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Number of complete molecules (trailing atoms of a partial molecule are not counted).
    #[inline]
    pub fn n_molecules(&self) -> usize {
        self.positions.len() / SITES_PER_MOLECULE
    }

    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    pub fn positions_mut(&mut self) -> &mut [Point3<f64>] {
        &mut self.positions
    }

    pub fn numbers(&self) -> &[u8] {
        &self.numbers
    }

    pub fn charges(&self) -> &[f64] {
        &self.charges
    }

    pub fn charges_mut(&mut self) -> &mut [f64] {
        &mut self.charges
    }

    pub fn cell(&self) -> &Matrix3<f64> {
        &self.cell
    }

    pub fn pbc(&self) -> [bool; 3] {
        self.pbc
    }

    /// Returns the edge lengths of an axis-aligned cell.
    ///
    /// # Errors
    ///
    /// - [`SnapshotError::NonOrthorhombicCell`] if any off-diagonal entry is non-zero.
    /// - [`SnapshotError::DegeneratePeriodicAxis`] if a periodic axis has no usable length.
    pub fn orthorhombic_lengths(&self) -> Result<Vector3<f64>, SnapshotError> {
        let diagonal = self.cell.diagonal();
        if self.cell != Matrix3::from_diagonal(&diagonal) {
            return Err(SnapshotError::NonOrthorhombicCell);
        }
        for (axis, &periodic) in self.pbc.iter().enumerate() {
            let length = diagonal[axis];
            if periodic && !(length.is_finite() && length > 0.0) {
                return Err(SnapshotError::DegeneratePeriodicAxis { axis, length });
            }
        }
        Ok(diagonal)
    }
}
