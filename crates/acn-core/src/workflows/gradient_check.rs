use crate::core::models::snapshot::Snapshot;
use crate::engine::calculator::AcnCalculator;
use crate::engine::config::ConfigError;
use crate::engine::error::EngineError;
use nalgebra::{Point3, Vector3};
use tracing::{debug, info, instrument};

pub const DEFAULT_DELTA: f64 = 1e-4;

#[derive(Debug, Clone, PartialEq)]
pub struct GradientReport {
    /// Forces before the rigid-body projection, as returned by the calculator.
    pub analytic: Vec<Vector3<f64>>,
    /// Central-difference estimate of `-dE/dr`.
    pub numeric: Vec<Vector3<f64>>,
    pub max_deviation: f64,
    pub worst_atom: Option<usize>,
}

impl GradientReport {
    pub fn passes(&self, tolerance: f64) -> bool {
        self.max_deviation <= tolerance
    }
}

/// Central-difference forces, two energy evaluations per Cartesian component.
///
/// If external point charges are attached, their current positions are supplied again before
/// every displaced evaluation.
pub fn numeric_forces(
    calculator: &mut AcnCalculator,
    snapshot: &Snapshot,
    delta: f64,
) -> Result<Vec<Vector3<f64>>, EngineError> {
    let external = pending_external_positions(calculator);
    numeric_forces_with(calculator, snapshot, delta, external.as_deref())
}

/// Compares the calculator's unconstrained forces with a central-difference gradient.
#[instrument(skip_all, name = "gradient_check", fields(atoms = snapshot.len(), delta = delta))]
pub fn check_forces(
    calculator: &mut AcnCalculator,
    snapshot: &Snapshot,
    delta: f64,
) -> Result<GradientReport, EngineError> {
    validate_delta(delta)?;
    let external = pending_external_positions(calculator);

    let analytic = calculator.calculate(snapshot)?.unconstrained_forces().to_vec();
    let numeric = numeric_forces_with(calculator, snapshot, delta, external.as_deref())?;

    let (worst_atom, max_deviation) = analytic
        .iter()
        .zip(&numeric)
        .map(|(a, n)| (a - n).norm())
        .enumerate()
        .fold((None, 0.0), |(worst, max), (i, dev)| {
            if dev > max { (Some(i), dev) } else { (worst, max) }
        });

    info!(
        max_deviation,
        worst_atom = ?worst_atom,
        "Gradient check finished"
    );
    Ok(GradientReport {
        analytic,
        numeric,
        max_deviation,
        worst_atom,
    })
}

fn numeric_forces_with(
    calculator: &mut AcnCalculator,
    snapshot: &Snapshot,
    delta: f64,
    external: Option<&[Point3<f64>]>,
) -> Result<Vec<Vector3<f64>>, EngineError> {
    validate_delta(delta)?;
    let mut displaced = snapshot.clone();
    let mut forces = vec![Vector3::zeros(); snapshot.len()];

    let mut energy_at = |displaced: &Snapshot| -> Result<f64, EngineError> {
        if let (Some(positions), Some(embedding)) = (external, calculator.embedding_mut()) {
            embedding.set_positions(positions.to_vec());
        }
        calculator.potential_energy(displaced)
    };

    for atom in 0..snapshot.len() {
        for axis in 0..3 {
            let original = displaced.positions()[atom][axis];
            displaced.positions_mut()[atom][axis] = original + delta;
            let plus = energy_at(&displaced)?;
            displaced.positions_mut()[atom][axis] = original - delta;
            let minus = energy_at(&displaced)?;
            displaced.positions_mut()[atom][axis] = original;
            forces[atom][axis] = -(plus - minus) / (2.0 * delta);
        }
        debug!(atom, force = ?forces[atom], "Numeric force");
    }
    Ok(forces)
}

fn pending_external_positions(calculator: &AcnCalculator) -> Option<Vec<Point3<f64>>> {
    calculator
        .embedding()
        .and_then(|embedding| embedding.positions())
        .map(<[Point3<f64>]>::to_vec)
}

fn validate_delta(delta: f64) -> Result<(), ConfigError> {
    if delta.is_finite() && delta > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter {
            name: "delta",
            reason: format!("must be a positive step, got {}", delta),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::forcefield::params::AcnParams;
    use crate::engine::charges::assign_acn_charges;
    use crate::engine::config::CalculatorConfig;

    fn skewed_pair() -> Snapshot {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.1, 0.05, 1.15),
            Point3::new(0.25, 0.12, 2.6),
            Point3::new(4.4, 0.3, 0.2),
            Point3::new(4.2, 1.4, 0.6),
            Point3::new(3.95, 2.8, 1.1),
        ];
        let mut snapshot = Snapshot::new(positions, vec![7, 6, 6, 7, 6, 6]).unwrap();
        assign_acn_charges(&mut snapshot, 0, &AcnParams::default()).unwrap();
        snapshot
    }

    fn calculator() -> AcnCalculator {
        AcnCalculator::new(CalculatorConfig::default()).unwrap()
    }

    #[test]
    fn analytic_forces_pass_gradient_check() {
        let report = check_forces(&mut calculator(), &skewed_pair(), DEFAULT_DELTA).unwrap();
        assert_eq!(report.analytic.len(), 6);
        assert!(report.passes(1e-5), "max deviation {}", report.max_deviation);
    }

    #[test]
    fn gradient_check_resupplies_external_positions() {
        let mut calc = calculator();
        calc.embed(vec![0.5, -0.5])
            .set_positions(vec![Point3::new(2.0, -3.0, 1.0), Point3::new(-2.5, 1.0, 0.5)]);
        let report = check_forces(&mut calc, &skewed_pair(), DEFAULT_DELTA).unwrap();
        assert!(report.passes(1e-5), "max deviation {}", report.max_deviation);
    }

    #[test]
    fn missing_external_positions_fail_the_check() {
        let mut calc = calculator();
        calc.embed(vec![1.0]);
        assert!(check_forces(&mut calc, &skewed_pair(), DEFAULT_DELTA).is_err());
    }

    #[test]
    fn non_positive_delta_is_rejected() {
        let err = numeric_forces(&mut calculator(), &skewed_pair(), 0.0).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Config(ConfigError::InvalidParameter { name: "delta", .. })
        ));
    }

    #[test]
    fn passes_compares_against_tolerance() {
        let report = GradientReport {
            analytic: vec![],
            numeric: vec![],
            max_deviation: 1e-3,
            worst_atom: Some(2),
        };
        assert!(report.passes(1e-2));
        assert!(!report.passes(1e-4));
    }
}
