//! Provides input/output functionality for snapshot files.
//!
//! The calculator itself is a pure kernel and owns no file format. This module lets tools feed
//! it frames from extended XYZ files and write results back in the same format.

pub mod traits;
pub mod xyz;
