use crate::core::models::layout::{MoleculeLayout, SITES_PER_MOLECULE};
use crate::core::models::snapshot::Snapshot;
use crate::engine::calculator::AcnCalculator;
use crate::engine::charges::assign_acn_charges;
use crate::engine::config::{ChargeAssignment, EvaluateConfig, LayoutSelection};
use crate::engine::error::{EngineError, PreconditionError};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::results::Results;
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct FrameResult {
    pub index: usize,
    pub results: Results,
}

#[derive(Debug, Clone)]
pub struct EvaluationOutcome {
    /// Layout every frame was evaluated with.
    pub layout: MoleculeLayout,
    pub frames: Vec<FrameResult>,
}

/// Evaluates every frame with one calculator.
///
/// The layout is resolved once, from the configuration or from the first frame. With
/// [`ChargeAssignment::Standard`] the frames' charges are overwritten in place before
/// evaluation. The first failing frame aborts the run.
#[instrument(skip_all, name = "evaluate_workflow", fields(frames = frames.len()))]
pub fn run(
    frames: &mut [Snapshot],
    config: &EvaluateConfig,
    reporter: &ProgressReporter,
) -> Result<EvaluationOutcome, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Preparation",
    });
    let layout = resolve_layout(frames, config)?;
    reporter.report(Progress::Message(match config.layout {
        LayoutSelection::Fixed(_) => format!("Using {} layout", layout),
        LayoutSelection::Detect => format!("Detected {} layout", layout),
    }));
    if let ChargeAssignment::Standard { offset } = config.charges {
        reporter.report(Progress::Message(format!(
            "Assigning standard charges from atom {}",
            offset
        )));
    }
    let mut calculator =
        AcnCalculator::with_params(config.calculator_config(layout), config.params.clone())?;
    info!(
        %layout,
        cutoff = config.cutoff,
        width = config.width,
        "Evaluating {} frame(s)",
        frames.len()
    );
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::FramesStart {
        total: frames.len() as u64,
    });
    let mut results = Vec::with_capacity(frames.len());
    for (index, frame) in frames.iter_mut().enumerate() {
        if let ChargeAssignment::Standard { offset } = config.charges {
            check_prefix(frame, offset, layout)?;
            assign_acn_charges(frame, offset, &config.params)?;
        }
        let frame_results = calculator.calculate(frame)?.clone();
        if frame_results.pairs_in_range() == 0 && frame.len() > SITES_PER_MOLECULE {
            reporter.report(Progress::Message(format!(
                "Frame {}: no molecule pairs within {} Å",
                index, config.cutoff
            )));
        }
        reporter.report(Progress::FrameDone {
            index,
            energy: *frame_results.energy_terms(),
            pairs_in_range: frame_results.pairs_in_range(),
        });
        results.push(FrameResult {
            index,
            results: frame_results,
        });
    }
    reporter.report(Progress::FramesFinish);

    info!("Evaluation finished");
    Ok(EvaluationOutcome {
        layout,
        frames: results,
    })
}

/// The calculator treats every atom as a molecule site, so atoms skipped by charge
/// assignment must still be acetonitrile in the same layout.
fn check_prefix(
    frame: &Snapshot,
    offset: usize,
    layout: MoleculeLayout,
) -> Result<(), PreconditionError> {
    match frame.numbers().get(..offset) {
        Some(prefix) => layout
            .validate(prefix, 0)
            .map_err(|source| PreconditionError::PrefixNotMolecular { offset, source }),
        None => Ok(()),
    }
}

fn resolve_layout(
    frames: &[Snapshot],
    config: &EvaluateConfig,
) -> Result<MoleculeLayout, EngineError> {
    match (config.layout, frames.first()) {
        (LayoutSelection::Fixed(layout), _) => Ok(layout),
        (LayoutSelection::Detect, Some(first)) => {
            Ok(MoleculeLayout::detect(first.numbers(), config.first_molecule_atom())?)
        }
        (LayoutSelection::Detect, None) => Ok(MoleculeLayout::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::layout::LayoutError;
    use crate::engine::config::EvaluateConfigBuilder;
    use nalgebra::Point3;
    use std::sync::Mutex;

    fn frame(numbers: [u8; 6], separation: f64) -> Snapshot {
        let column = |x: f64| {
            [
                Point3::new(x, 0.0, 0.0),
                Point3::new(x, 0.0, 1.157),
                Point3::new(x, 0.0, 2.615),
            ]
        };
        let positions = column(0.0)
            .into_iter()
            .chain(column(separation))
            .collect();
        Snapshot::new(positions, numbers.to_vec()).unwrap()
    }

    #[test]
    fn detects_layout_assigns_charges_and_reports_each_frame() {
        let mut frames = vec![frame([6, 6, 7, 6, 6, 7], 3.4), frame([6, 6, 7, 6, 6, 7], 3.8)];
        let config = EvaluateConfigBuilder::new().build().unwrap();
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            events.lock().unwrap().push(event);
        }));

        let outcome = run(&mut frames, &config, &reporter).unwrap();
        drop(reporter);

        assert_eq!(outcome.layout, MoleculeLayout::MethylFirst);
        assert_eq!(outcome.frames.len(), 2);
        assert_ne!(outcome.frames[0].results.energy(), outcome.frames[1].results.energy());
        assert!((frames[0].charges()[0] - 0.206).abs() < 1e-12);

        let events = events.into_inner().unwrap();
        assert!(events.contains(&Progress::FramesStart { total: 2 }));
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, Progress::FrameDone { .. }))
                .count(),
            2
        );
        assert_eq!(events.last(), Some(&Progress::FramesFinish));
        assert!(events.contains(&Progress::Message("Detected Me-C-N layout".to_string())));
        assert!(events.contains(&Progress::Message(
            "Assigning standard charges from atom 0".to_string()
        )));
        assert!(events.iter().any(|e| matches!(
            e,
            Progress::FrameDone {
                index: 1,
                pairs_in_range: 1,
                ..
            }
        )));
    }

    #[test]
    fn frames_without_pairs_in_range_are_noted() {
        let mut frames = vec![frame([7, 6, 6, 7, 6, 6], 9.0)];
        let config = EvaluateConfigBuilder::new()
            .layout(LayoutSelection::Fixed(MoleculeLayout::NitrogenFirst))
            .build()
            .unwrap();
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            events.lock().unwrap().push(event);
        }));

        let outcome = run(&mut frames, &config, &reporter).unwrap();
        drop(reporter);

        assert_eq!(outcome.frames[0].results.pairs_in_range(), 0);
        assert_eq!(outcome.frames[0].results.energy(), 0.0);
        let events = events.into_inner().unwrap();
        assert!(events.contains(&Progress::Message("Using N-C-Me layout".to_string())));
        assert!(events.contains(&Progress::Message(
            "Frame 0: no molecule pairs within 5 Å".to_string()
        )));
    }

    #[test]
    fn snapshot_charges_are_used_when_not_assigning() {
        let mut frames = vec![frame([7, 6, 6, 7, 6, 6], 3.4)];
        let config = EvaluateConfigBuilder::new()
            .charges(ChargeAssignment::FromSnapshot)
            .build()
            .unwrap();
        let outcome = run(&mut frames, &config, &ProgressReporter::new()).unwrap();
        assert_eq!(outcome.frames[0].results.energy_terms().coulomb, 0.0);
        assert!(outcome.frames[0].results.energy_terms().vdw != 0.0);
    }

    #[test]
    fn fixed_layout_mismatch_aborts_the_run() {
        let mut frames = vec![frame([7, 6, 6, 7, 6, 6], 3.4)];
        let config = EvaluateConfigBuilder::new()
            .layout(LayoutSelection::Fixed(MoleculeLayout::MethylFirst))
            .charges(ChargeAssignment::FromSnapshot)
            .build()
            .unwrap();
        let err = run(&mut frames, &config, &ProgressReporter::new()).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Precondition(PreconditionError::Layout(_))
        ));
    }

    #[test]
    fn empty_input_yields_no_frames() {
        let config = EvaluateConfigBuilder::new().build().unwrap();
        let outcome = run(&mut [], &config, &ProgressReporter::new()).unwrap();
        assert!(outcome.frames.is_empty());
        assert_eq!(outcome.layout, MoleculeLayout::NitrogenFirst);
    }

    #[test]
    fn foreign_atoms_before_charge_offset_are_rejected_untouched() {
        let mut snapshot = frame([7, 6, 6, 7, 6, 6], 3.4);
        let mut numbers = vec![8, 1, 1];
        numbers.extend_from_slice(snapshot.numbers());
        let mut positions = vec![Point3::new(-5.0, 0.0, 0.0); 3];
        positions.extend_from_slice(snapshot.positions());
        snapshot = Snapshot::new(positions, numbers).unwrap();
        let mut frames = vec![snapshot];
        let config = EvaluateConfigBuilder::new()
            .charges(ChargeAssignment::Standard { offset: 3 })
            .build()
            .unwrap();

        let err = run(&mut frames, &config, &ProgressReporter::new()).unwrap_err();

        assert!(matches!(
            err,
            EngineError::Precondition(PreconditionError::PrefixNotMolecular {
                offset: 3,
                source: LayoutError::SequenceMismatch { atom_index: 0, .. },
            })
        ));
        assert!(frames[0].charges().iter().all(|&q| q == 0.0));
    }

    #[test]
    fn molecular_prefix_keeps_its_charges() {
        let mut snapshot = frame([7, 6, 6, 7, 6, 6], 3.4);
        snapshot.charges_mut()[..3].copy_from_slice(&[-0.1, 0.05, 0.05]);
        let mut frames = vec![snapshot];
        let config = EvaluateConfigBuilder::new()
            .charges(ChargeAssignment::Standard { offset: 3 })
            .build()
            .unwrap();

        let outcome = run(&mut frames, &config, &ProgressReporter::new()).unwrap();

        assert_eq!(outcome.layout, MoleculeLayout::NitrogenFirst);
        assert_eq!(frames[0].charges()[0], -0.1);
        assert!((frames[0].charges()[3] + 0.453).abs() < 1e-12);
    }
}
