use crate::error::{CliError, Result};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::fmt::format::{DefaultFields, Format};
use tracing_subscriber::{fmt, prelude::*};

const OWN_TARGET: &str = "acnpot";

/// Logging choices taken from the global CLI flags.
#[derive(Debug, Clone, PartialEq)]
pub struct LogSettings {
    pub level: LevelFilter,
    pub file: Option<PathBuf>,
}

impl LogSettings {
    pub fn from_flags(verbosity: u8, quiet: bool, file: Option<PathBuf>) -> Self {
        let level = match (quiet, verbosity) {
            (true, _) => LevelFilter::ERROR,
            (false, 0) => LevelFilter::WARN,
            (false, 1) => LevelFilter::INFO,
            (false, 2) => LevelFilter::DEBUG,
            (false, _) => LevelFilter::TRACE,
        };
        Self { level, file }
    }

    /// acnpot events follow the chosen level; other crates never go below warnings.
    pub fn filter(&self) -> Targets {
        Targets::new()
            .with_target(OWN_TARGET, self.level)
            .with_default(self.level.min(LevelFilter::WARN))
    }

    /// Installs the global subscriber. Fails if one is already set.
    pub fn install(self) -> Result<()> {
        let stderr = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact();
        let file = self
            .file
            .as_ref()
            .map(|path| File::create(path).map(file_layer))
            .transpose()
            .map_err(CliError::Io)?;

        tracing_subscriber::registry()
            .with(self.filter())
            .with(stderr)
            .with(file)
            .try_init()
            .map_err(|e| CliError::Other(anyhow::anyhow!("Failed to install logger: {}", e)))
    }
}

fn file_layer<S>(file: File) -> fmt::Layer<S, DefaultFields, Format, Mutex<File>> {
    fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
}
