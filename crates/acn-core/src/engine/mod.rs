//! # Engine Module
//!
//! The stateful part of the library: a calculator that turns snapshots into energies and forces.
//!
//! ## Overview
//!
//! An [`calculator::AcnCalculator`] is built once from a [`config::CalculatorConfig`] and a
//! parameter set. Construction derives everything that never changes between evaluations, the
//! Lorentz-Berthelot pair matrices and the rigid-body projection coefficients. Each call to
//! `calculate` then:
//!
//! 1. validates the snapshot into an [`context::EvaluationContext`] (cell shape, atom count,
//!    site sequence, external-charge readiness) before touching any accumulator,
//! 2. sums Coulomb and Lennard-Jones interactions over all molecule pairs with one
//!    minimum-image shift and one switching weight per pair,
//! 3. adds the external point-charge field when one is attached, and
//! 4. projects the forces onto the rigid linear molecules.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Cutoff, switching width, layout and workflow options
//! - **Error Handling** ([`error`]) - Precondition failures and engine errors
//! - **Evaluation Context** ([`context`]) - Validated per-evaluation facts about a snapshot
//! - **Charges** ([`charges`]) - Standard charge assignment over repeating triplets
//! - **Embedding** ([`embedding`]) - External point-charge environment
//! - **Results** ([`results`]) - Energies, forces and the property map
//! - **Progress Monitoring** ([`progress`]) - Callbacks for multi-frame workflows
//!
//! The calculator is not reentrant: it mutates its cached results and the attached
//! point-charge buffer. Evaluate independent snapshots in parallel with independent
//! calculators.

pub mod calculator;
pub mod charges;
pub mod config;
pub mod context;
pub mod embedding;
pub mod error;
pub(crate) mod pairwise;
pub mod progress;
pub mod results;
