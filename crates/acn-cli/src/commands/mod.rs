pub mod check;
pub mod evaluate;

use crate::error::{CliError, Result};
use acnpot::core::io::traits::SnapshotFile;
use acnpot::core::io::xyz::XyzFile;
use acnpot::core::models::snapshot::Snapshot;
use std::path::Path;
use tracing::info;

fn read_frames(path: &Path) -> Result<Vec<Snapshot>> {
    info!("Loading frames from {:?}", path);
    let frames = XyzFile::read_from_path(path).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    if frames.is_empty() {
        return Err(CliError::Argument(format!(
            "No frames found in '{}'",
            path.display()
        )));
    }
    info!("Loaded {} frame(s)", frames.len());
    Ok(frames)
}
