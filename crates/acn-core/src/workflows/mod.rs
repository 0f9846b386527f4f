//! # Workflows Module
//!
//! End-to-end procedures built on [`crate::engine::calculator::AcnCalculator`].
//!
//! ## Overview
//!
//! Workflows are the entry points used by the command-line tool. Each one resolves its
//! configuration once, drives a single calculator over its input and reports progress through
//! a [`crate::engine::progress::ProgressReporter`].
//!
//! - **Evaluation** ([`evaluate`]) - Energies and forces for a sequence of frames, with layout
//!   detection and standard charge assignment.
//! - **Gradient Check** ([`gradient_check`]) - Central-difference forces compared against the
//!   analytic ones.

pub mod evaluate;
pub mod gradient_check;
