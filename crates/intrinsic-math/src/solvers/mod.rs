//! Root-finding algorithms.
//!
//! This module provides the derivative-free scalar solvers used by curve
//! bootstrapping and hazard-rate calibration:
//!
//! - [`brent`]: robust method combining bisection, secant, and inverse
//!   quadratic interpolation; guaranteed given a valid bracket
//! - [`bisection`]: simple and reliable bracketing method
//! - [`secant`]: superlinear method from two initial guesses; may diverge
//!
//! Root-finding iterations are inherently sequential - each trial depends
//! on the previous trial's objective value - so these functions are not
//! internally parallel.
//!
//! # Example: implied hazard rate
//!
//! ```rust
//! use intrinsic_math::solvers::{brent, SolverConfig};
//!
//! // Survival to 5Y observed at 0.905; solve exp(-5h) = 0.905 for h
//! let f = |h: f64| (-5.0 * h).exp() - 0.905;
//!
//! let result = brent(f, 0.0, 1.0, &SolverConfig::default()).unwrap();
//! assert!((f(result.root)).abs() < 1e-10);
//! ```

mod bisection;
mod brent;
mod secant;

pub use bisection::bisection;
pub use brent::brent;
pub use secant::secant;

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    /// Tolerance for convergence, applied to the objective value.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
}
