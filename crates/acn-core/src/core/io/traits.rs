use crate::core::models::snapshot::Snapshot;
use nalgebra::Vector3;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// A frame to be written, with optional evaluation results attached.
#[derive(Debug, Clone, Copy)]
pub struct FrameRecord<'a> {
    pub snapshot: &'a Snapshot,
    /// Total potential energy in eV.
    pub energy: Option<f64>,
    /// One force per atom in eV/Å.
    pub forces: Option<&'a [Vector3<f64>]>,
}

impl<'a> FrameRecord<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        Self {
            snapshot,
            energy: None,
            forces: None,
        }
    }

    pub fn with_energy(mut self, energy: f64) -> Self {
        self.energy = Some(energy);
        self
    }

    pub fn with_forces(mut self, forces: &'a [Vector3<f64>]) -> Self {
        self.forces = Some(forces);
        self
    }
}

/// Defines the interface for reading and writing multi-frame snapshot files.
pub trait SnapshotFile {
    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads every frame from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues.
    fn read_from(reader: &mut impl BufRead) -> Result<Vec<Snapshot>, Self::Error>;

    /// Writes one frame to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_frame(record: &FrameRecord<'_>, writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Reads every frame from a file path.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Snapshot>, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Writes a sequence of frames to a file path, replacing any existing file.
    fn write_frames_to_path<P: AsRef<Path>>(
        records: &[FrameRecord<'_>],
        path: P,
    ) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        for record in records {
            Self::write_frame(record, &mut writer)?;
        }
        writer.flush()?;
        Ok(())
    }
}
