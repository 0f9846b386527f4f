use acnpot::core::models::layout::MoleculeLayout;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "acnpot - energies and forces for rigid three-site acetonitrile.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate energies and forces for every frame of an XYZ file.
    Evaluate(EvaluateArgs),
    /// Compare analytic forces against a central-difference energy gradient.
    Check(CheckArgs),
}

/// Options shared by every command that builds a calculator.
#[derive(Args, Debug, Clone, Default)]
pub struct CalculatorArgs {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the molecule-pair cutoff radius (Å).
    #[arg(long, value_name = "FLOAT")]
    pub cutoff: Option<f64>,

    /// Override the width of the switching shell (Å).
    #[arg(long, value_name = "FLOAT")]
    pub width: Option<f64>,

    /// Fix the site ordering instead of detecting it ('nitrogen-first' or 'methyl-first').
    #[arg(long, value_name = "LAYOUT")]
    pub layout: Option<MoleculeLayout>,

    /// Index of the first atom that receives standard charges (a multiple of 3).
    /// Atoms before it keep their charges but must still be acetonitrile.
    #[arg(long, value_name = "INT")]
    pub charge_offset: Option<usize>,

    /// Use the charges from the input file instead of the standard model charges.
    #[arg(long)]
    pub keep_charges: bool,

    /// Override the model parameter file (TOML).
    #[arg(short, long, value_name = "PATH")]
    pub parameters: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Arguments for the `evaluate` subcommand.
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Path to the input extended XYZ file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Write the frames with their energies and forces to an extended XYZ file.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Report format printed to standard output.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Include per-atom forces in the report.
    #[arg(long)]
    pub forces: bool,

    #[command(flatten)]
    pub calculator: CalculatorArgs,
}

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the input extended XYZ file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Frame to check.
    #[arg(long, default_value_t = 0, value_name = "INT")]
    pub frame: usize,

    /// Finite-difference step (Å).
    #[arg(long, default_value_t = acnpot::workflows::gradient_check::DEFAULT_DELTA, value_name = "FLOAT")]
    pub delta: f64,

    /// Largest accepted deviation between analytic and numeric forces (eV/Å).
    #[arg(long, default_value_t = 1e-4, value_name = "FLOAT")]
    pub tolerance: f64,

    #[command(flatten)]
    pub calculator: CalculatorArgs,
}
