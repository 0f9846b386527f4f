use super::read_frames;
use crate::cli::CheckArgs;
use crate::config::PartialRunConfig;
use crate::error::{CliError, Result};
use crate::output::render_gradient_report;
use acnpot::core::models::layout::MoleculeLayout;
use acnpot::engine::calculator::AcnCalculator;
use acnpot::engine::charges::assign_acn_charges;
use acnpot::engine::config::{ChargeAssignment, LayoutSelection};
use acnpot::engine::error::EngineError;
use acnpot::workflows::gradient_check;
use tracing::{info, warn};

pub fn run(args: CheckArgs) -> Result<()> {
    let config = PartialRunConfig::load(&args.calculator)?.merge_with_cli(&args.calculator)?;

    let mut frames = read_frames(&args.input)?;
    let total = frames.len();
    let frame = frames.get_mut(args.frame).ok_or_else(|| {
        CliError::Argument(format!(
            "Frame {} requested but the input has {} frame(s)",
            args.frame, total
        ))
    })?;

    let layout = match config.layout {
        LayoutSelection::Fixed(layout) => layout,
        LayoutSelection::Detect => {
            MoleculeLayout::detect(frame.numbers(), config.first_molecule_atom())
                .map_err(EngineError::from)?
        }
    };
    if let ChargeAssignment::Standard { offset } = config.charges {
        assign_acn_charges(frame, offset, &config.params).map_err(EngineError::from)?;
    }

    let mut calculator =
        AcnCalculator::with_params(config.calculator_config(layout), config.params.clone())?;
    info!(
        "Checking forces of frame {} with step {} Å",
        args.frame, args.delta
    );
    let report = gradient_check::check_forces(&mut calculator, frame, args.delta)?;

    print!("{}", render_gradient_report(&report, args.tolerance));
    if report.passes(args.tolerance) {
        Ok(())
    } else {
        warn!(
            max_deviation = report.max_deviation,
            tolerance = args.tolerance,
            "Analytic forces disagree with the numerical gradient"
        );
        Err(CliError::GradientCheckFailed {
            deviation: report.max_deviation,
            tolerance: args.tolerance,
        })
    }
}
