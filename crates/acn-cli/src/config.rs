use crate::cli::CalculatorArgs;
use crate::error::{CliError, Result};
use acnpot::core::forcefield::params::AcnParams;
use acnpot::core::models::layout::MoleculeLayout;
use acnpot::engine::config as core_config;
use acnpot::engine::error::EngineError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialCalculatorConfig {
    cutoff: Option<f64>,
    width: Option<f64>,
    layout: Option<MoleculeLayout>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialChargesConfig {
    assign: Option<bool>,
    offset: Option<usize>,
}

/// Run configuration as read from a TOML file, every field optional.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialRunConfig {
    calculator: Option<PartialCalculatorConfig>,
    charges: Option<PartialChargesConfig>,
    parameters: Option<PathBuf>,
}

impl PartialRunConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Reads the file named by `--config`, if any.
    pub fn load(args: &CalculatorArgs) -> Result<Self> {
        match &args.config {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Combines file values with command-line overrides; the command line wins.
    ///
    /// A relative parameter path from the file is resolved against the file's directory.
    pub fn merge_with_cli(self, args: &CalculatorArgs) -> Result<core_config::EvaluateConfig> {
        let calculator = self.calculator.unwrap_or_default();
        let charges = self.charges.unwrap_or_default();

        let parameters_path = match (&args.parameters, self.parameters) {
            (Some(cli_path), _) => Some(cli_path.clone()),
            (None, Some(file_path)) => Some(resolve_relative(args.config.as_deref(), file_path)),
            (None, None) => None,
        };
        let params = match parameters_path {
            Some(path) => {
                debug!("Loading model parameters from {:?}", path);
                AcnParams::load(&path).map_err(EngineError::from)?
            }
            None => AcnParams::default(),
        };

        let assign = !args.keep_charges && charges.assign.unwrap_or(true);
        let charge_assignment = if assign {
            core_config::ChargeAssignment::Standard {
                offset: args.charge_offset.or(charges.offset).unwrap_or(0),
            }
        } else {
            core_config::ChargeAssignment::FromSnapshot
        };

        let layout = match args.layout.or(calculator.layout) {
            Some(layout) => core_config::LayoutSelection::Fixed(layout),
            None => core_config::LayoutSelection::Detect,
        };

        let mut builder = core_config::EvaluateConfigBuilder::new()
            .layout(layout)
            .charges(charge_assignment)
            .params(params);
        if let Some(cutoff) = args.cutoff.or(calculator.cutoff) {
            builder = builder.cutoff(cutoff);
        }
        if let Some(width) = args.width.or(calculator.width) {
            builder = builder.width(width);
        }

        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }
}

fn resolve_relative(config_path: Option<&Path>, path: PathBuf) -> PathBuf {
    match config_path.and_then(Path::parent) {
        Some(dir) if path.is_relative() => dir.join(path),
        _ => path,
    }
}
