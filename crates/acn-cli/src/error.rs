use acnpot::engine::error::EngineError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] EngineError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error("Gradient check failed: max deviation {deviation:.3e} eV/Å exceeds tolerance {tolerance:.3e}")]
    GradientCheckFailed { deviation: f64, tolerance: f64 },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
