//! # Force Field Module
//!
//! Physics of the rigid three-site acetonitrile model.
//!
//! ## Overview
//!
//! Every molecule pair interacts through Coulomb and Lennard-Jones terms between all nine site
//! pairs. Both terms are scaled by a smooth cubic switch of the carbon-carbon distance so that
//! energies and forces vanish continuously at the cutoff. Forces computed as if the three sites
//! were free particles are finally projected onto the rigid linear geometry.
//!
//! ## Key Components
//!
//! - [`units`] - Physical constants and the working unit system
//! - [`params`] - Per-species charges, Lennard-Jones parameters, masses and bond lengths
//! - [`combining`] - Lorentz-Berthelot mixing of per-species Lennard-Jones parameters
//! - [`potentials`] - Pair energies together with their force prefactors
//! - [`switching`] - The smoothstep cutoff and its derivative
//! - [`constraint`] - Force redistribution for a rigid linear triatomic (Ciccotti et al., 1982)
//! - [`term`] - Energy term aggregation and reporting

pub mod combining;
pub mod constraint;
pub mod params;
pub mod potentials;
pub mod switching;
pub mod term;
pub mod units;
