//! # Core Module
//!
//! Fundamental building blocks of the acetonitrile potential: the snapshot data model,
//! force field physics and file I/O.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Species, molecule layouts and system snapshots
//! - **Force Field** ([`forcefield`]) - Parameters, pair potentials, cutoff switching, combining
//!   rules and the rigid linear-molecule force projection
//! - **Geometry Utilities** ([`utils`]) - Minimum-image wrapping for orthorhombic cells
//! - **File I/O** ([`io`]) - Extended XYZ reading and writing

pub mod forcefield;
pub mod io;
pub mod models;
pub mod utils;
