//! # acnpot Core Library
//!
//! Potential energy and atomic forces for systems of rigid, linear three-site acetonitrile
//! (CH3-CN) molecules, following the model of Guardia et al. (Molecular Simulation, 2001).
//!
//! ## Architectural Philosophy
//!
//! The library keeps the same three-layer split throughout:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Snapshot`, `MoleculeLayout`), the
//!   pure mathematical pieces of the forcefield (pair potentials, the switching function, the
//!   Lorentz-Berthelot combining rule, the rigid-body force projection) and file I/O.
//!
//! - **[`engine`]: The Logic Core.** The stateful `AcnCalculator`, which owns the cached
//!   combining-rule matrices and rigid-body coefficients, validates each snapshot through an
//!   `EvaluationContext`, runs the molecule-pair loop and optionally couples the system to an
//!   external point-charge environment.
//!
//! - **[`workflows`]: The Public API.** End-to-end procedures built on the engine: evaluating a
//!   sequence of frames and checking analytic forces against a numerical energy gradient.
//!
//! All quantities use Å, eV, elementary charges and amu; forces are in eV/Å.

pub mod core;
pub mod engine;
pub mod workflows;
