use super::read_frames;
use crate::cli::EvaluateArgs;
use crate::config::PartialRunConfig;
use crate::error::{CliError, Result};
use crate::output::render_evaluation;
use crate::utils::progress::CliProgressHandler;
use acnpot::core::io::traits::{FrameRecord, SnapshotFile};
use acnpot::core::io::xyz::XyzFile;
use acnpot::engine::progress::ProgressReporter;
use acnpot::workflows;
use tracing::info;

pub fn run(args: EvaluateArgs) -> Result<()> {
    let partial_config = PartialRunConfig::load(&args.calculator)?;
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&args.calculator)?;

    let mut frames = read_frames(&args.input)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = if frames.len() > 1 {
        ProgressReporter::with_callback(progress_handler.get_callback())
    } else {
        ProgressReporter::new()
    };

    info!("Invoking the evaluation workflow...");
    let outcome = workflows::evaluate::run(&mut frames, &config, &reporter)?;

    if let Some(output) = &args.output {
        let records: Vec<FrameRecord> = frames
            .iter()
            .zip(&outcome.frames)
            .map(|(snapshot, frame)| {
                FrameRecord::new(snapshot)
                    .with_energy(frame.results.energy())
                    .with_forces(frame.results.forces())
            })
            .collect();
        XyzFile::write_frames_to_path(&records, output).map_err(|e| CliError::FileParsing {
            path: output.clone(),
            source: e.into(),
        })?;
        info!("Wrote {} frame(s) to {:?}", records.len(), output);
    }

    print!(
        "{}",
        render_evaluation(&outcome, args.format, args.forces)?
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{CalculatorArgs, OutputFormat};
    use std::fs;
    use tempfile::tempdir;

    const TWO_FRAMES: &str = "\
6
pbc=\"F F F\"
N 0.0 0.0 0.0
C 0.0 0.0 1.157
Me 0.0 0.0 2.615
N 3.3 0.0 0.0
C 3.3 0.0 1.157
Me 3.3 0.0 2.615
6
pbc=\"F F F\"
N 0.0 0.0 0.0
C 0.0 0.0 1.157
Me 0.0 0.0 2.615
N 3.6 0.2 0.0
C 3.6 0.2 1.157
Me 3.6 0.2 2.615
";

    #[test]
    fn evaluate_writes_frames_with_forces() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.xyz");
        let output = dir.path().join("out.xyz");
        fs::write(&input, TWO_FRAMES).unwrap();

        run(EvaluateArgs {
            input,
            output: Some(output.clone()),
            format: OutputFormat::Text,
            forces: false,
            calculator: CalculatorArgs::default(),
        })
        .unwrap();

        let written = fs::read_to_string(&output).unwrap();
        assert_eq!(written.matches("energy=").count(), 2);
        assert!(written.contains(":forces:R:3"));

        let frames = XyzFile::read_from_path(&output).unwrap();
        assert_eq!(frames.len(), 2);
        assert!((frames[0].charges()[0] + 0.453).abs() < 1e-6);
    }

    #[test]
    fn evaluate_rejects_empty_input() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("empty.xyz");
        fs::write(&input, "\n").unwrap();

        let result = run(EvaluateArgs {
            input,
            output: None,
            format: OutputFormat::Json,
            forces: false,
            calculator: CalculatorArgs::default(),
        });
        assert!(matches!(result, Err(CliError::Argument(_))));
    }

    #[test]
    fn evaluate_reports_sequence_errors() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("bad.xyz");
        fs::write(&input, "3\n\nN 0 0 0\nN 0 0 1.2\nMe 0 0 2.6\n").unwrap();

        let result = run(EvaluateArgs {
            input,
            output: None,
            format: OutputFormat::Text,
            forces: false,
            calculator: CalculatorArgs::default(),
        });
        assert!(matches!(result, Err(CliError::Core(_))));
    }
}
