//! # Molecular Models Module
//!
//! Data structures describing an acetonitrile system at a single instant.
//!
//! ## Overview
//!
//! The calculator never builds per-molecule objects. A system is a flat list of atoms in which
//! atom `i` belongs to molecule `i / 3`, and every triplet follows the same [`layout::MoleculeLayout`].
//! The [`snapshot::Snapshot`] carries positions, atomic numbers, partial charges and the
//! orthorhombic cell for one evaluation.
//!
//! ## Example
//!
//! ```ignore
//! use acnpot::core::models::layout::MoleculeLayout;
//! use acnpot::core::models::snapshot::Snapshot;
//! use nalgebra::Point3;
//!
//! let snapshot = Snapshot::new(
//!     vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.157, 0.0, 0.0), Point3::new(2.615, 0.0, 0.0)],
//!     vec![7, 6, 6],
//! )?;
//! MoleculeLayout::NitrogenFirst.validate(snapshot.numbers(), 0)?;
//! ```

pub mod layout;
pub mod snapshot;
pub mod species;
