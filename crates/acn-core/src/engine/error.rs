use super::config::ConfigError;
use crate::core::forcefield::params::ParamLoadError;
use crate::core::models::layout::LayoutError;
use crate::core::models::snapshot::SnapshotError;
use thiserror::Error;

/// A violated input invariant. Evaluation aborts before any energy or force is accumulated.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PreconditionError {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error("Atoms before charge offset {offset} are not acetonitrile molecules: {source}")]
    PrefixNotMolecular { offset: usize, source: LayoutError },

    #[error("External point charges are attached but no positions were supplied")]
    EmbeddingPositionsMissing,

    #[error("External point charges: {charges} charges but {positions} positions")]
    EmbeddingCountMismatch { charges: usize, positions: usize },
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Precondition violated: {0}")]
    Precondition(#[from] PreconditionError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Parameter loading failed: {0}")]
    Params(#[from] ParamLoadError),
}

impl From<LayoutError> for EngineError {
    fn from(e: LayoutError) -> Self {
        EngineError::Precondition(e.into())
    }
}

impl From<SnapshotError> for EngineError {
    fn from(e: SnapshotError) -> Self {
        EngineError::Precondition(e.into())
    }
}
