//! # Intrinsic Math
//!
//! Root-finding utilities for the Intrinsic credit analytics library.
//!
//! This crate provides the derivative-free scalar solvers used by curve
//! bootstrapping and hazard-rate calibration:
//!
//! - [`solvers::brent`]: robust method combining bisection, secant, and
//!   inverse quadratic interpolation - the default choice
//! - [`solvers::bisection`]: simple and reliable bracketing method
//! - [`solvers::secant`]: fast derivative-free method from two guesses
//!
//! ## Design Philosophy
//!
//! - **Numerical Stability**: careful handling of degenerate brackets
//! - **Deterministic**: no randomness, reproducible iteration paths

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod solvers;

pub use error::{MathError, MathResult};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::solvers::{bisection, brent, secant, SolverConfig, SolverResult};
}
