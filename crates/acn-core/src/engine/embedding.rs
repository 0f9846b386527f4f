use super::error::PreconditionError;
use crate::core::forcefield::units::COULOMB_CONSTANT;
use nalgebra::{Point3, Vector3};

/// A fixed set of external point charges acting on the acetonitrile sites.
///
/// Positions are consumed by every evaluation and must be supplied again before the next one,
/// so a moved environment is never evaluated at stale coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PointChargePotential {
    charges: Vec<f64>,
    positions: Option<Vec<Point3<f64>>>,
    forces: Option<Vec<Vector3<f64>>>,
}

impl PointChargePotential {
    pub fn new(charges: Vec<f64>) -> Self {
        Self {
            charges,
            positions: None,
            forces: None,
        }
    }

    pub fn charges(&self) -> &[f64] {
        &self.charges
    }

    pub fn len(&self) -> usize {
        self.charges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charges.is_empty()
    }

    /// Supplies the external charge positions for the next evaluation.
    pub fn set_positions(&mut self, positions: Vec<Point3<f64>>) {
        self.positions = Some(positions);
    }

    /// Positions waiting to be consumed, if any.
    pub fn positions(&self) -> Option<&[Point3<f64>]> {
        self.positions.as_deref()
    }

    /// Reaction forces on the external charges from the last evaluation.
    pub fn forces(&self) -> Option<&[Vector3<f64>]> {
        self.forces.as_deref()
    }

    /// Checks that positions are present and match the charges.
    pub fn check_ready(&self) -> Result<(), PreconditionError> {
        let positions = self
            .positions
            .as_ref()
            .ok_or(PreconditionError::EmbeddingPositionsMissing)?;
        if positions.len() != self.charges.len() {
            return Err(PreconditionError::EmbeddingCountMismatch {
                charges: self.charges.len(),
                positions: positions.len(),
            });
        }
        Ok(())
    }

    /// Energy of the solute charges in the external field and the force on each solute site.
    ///
    /// The reaction on every external charge is stored for [`PointChargePotential::forces`].
    /// The supplied positions are cleared afterwards.
    pub fn calculate(
        &mut self,
        solute_charges: &[f64],
        solute_positions: &[Point3<f64>],
    ) -> Result<(f64, Vec<Vector3<f64>>), PreconditionError> {
        self.check_ready()?;
        let positions = self
            .positions
            .take()
            .ok_or(PreconditionError::EmbeddingPositionsMissing)?;

        let mut energy = 0.0;
        let mut solute_forces = vec![Vector3::zeros(); solute_positions.len()];
        let mut external_forces = Vec::with_capacity(positions.len());

        for (&c, r) in self.charges.iter().zip(&positions) {
            let mut reaction = Vector3::zeros();
            for ((&q, p), f) in solute_charges
                .iter()
                .zip(solute_positions)
                .zip(solute_forces.iter_mut())
            {
                let d = p - r;
                let r2 = d.norm_squared();
                let e = COULOMB_CONSTANT * c * q / r2.sqrt();
                energy += e;
                let force = d * (e / r2);
                *f += force;
                reaction -= force;
            }
            external_forces.push(reaction);
        }

        self.forces = Some(external_forces);
        Ok((energy, solute_forces))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-10;

    #[test]
    fn calculate_without_positions_fails() {
        let mut pc = PointChargePotential::new(vec![1.0]);
        let err = pc.calculate(&[1.0], &[Point3::origin()]).unwrap_err();
        assert_eq!(err, PreconditionError::EmbeddingPositionsMissing);
    }

    #[test]
    fn count_mismatch_is_reported() {
        let mut pc = PointChargePotential::new(vec![1.0, -1.0]);
        pc.set_positions(vec![Point3::origin()]);
        assert_eq!(
            pc.check_ready(),
            Err(PreconditionError::EmbeddingCountMismatch {
                charges: 2,
                positions: 1
            })
        );
    }

    #[test]
    fn single_pair_matches_coulomb_law() {
        let mut pc = PointChargePotential::new(vec![0.5]);
        pc.set_positions(vec![Point3::new(0.0, 0.0, 0.0)]);
        let (energy, forces) = pc
            .calculate(&[-0.4], &[Point3::new(2.0, 0.0, 0.0)])
            .unwrap();

        let expected = COULOMB_CONSTANT * 0.5 * -0.4 / 2.0;
        assert!((energy - expected).abs() < TOLERANCE);
        // Opposite charges attract: the solute is pulled towards the origin.
        assert!((forces[0].x - expected / 2.0).abs() < TOLERANCE);
        assert!(forces[0].x < 0.0);
        let reaction = pc.forces().unwrap()[0];
        assert!((reaction + forces[0]).norm() < TOLERANCE);
    }

    #[test]
    fn positions_are_consumed_by_calculate() {
        let mut pc = PointChargePotential::new(vec![1.0]);
        pc.set_positions(vec![Point3::new(0.0, 0.0, 5.0)]);
        pc.calculate(&[1.0], &[Point3::origin()]).unwrap();
        assert!(pc.positions().is_none());
        assert!(pc.forces().is_some());
        assert!(pc.calculate(&[1.0], &[Point3::origin()]).is_err());
    }

    #[test]
    fn total_force_vanishes_across_both_sides() {
        let mut pc = PointChargePotential::new(vec![0.3, -0.7]);
        pc.set_positions(vec![Point3::new(4.0, 1.0, 0.0), Point3::new(-3.0, 0.5, 2.0)]);
        let (_, solute) = pc
            .calculate(
                &[-0.453, 0.247, 0.206],
                &[
                    Point3::new(0.0, 0.0, 0.0),
                    Point3::new(0.0, 0.0, 1.157),
                    Point3::new(0.0, 0.0, 2.615),
                ],
            )
            .unwrap();
        let total: Vector3<f64> = solute.iter().chain(pc.forces().unwrap()).sum();
        assert!(total.norm() < TOLERANCE);
    }
}
