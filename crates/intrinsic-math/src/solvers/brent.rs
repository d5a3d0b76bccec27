//! Brent's root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Brent's root-finding algorithm.
///
/// Combines the reliability of bisection with the speed of the secant
/// method and inverse quadratic interpolation. This is the solver used by
/// the curve bootstrapper and the index hazard adjustment, where the
/// objective is monotonic but each evaluation is a full repricing pass.
///
/// Requires: `f(a) * f(b) <= 0` (opposite signs at endpoints).
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `a` - Lower bound of the bracket
/// * `b` - Upper bound of the bracket
/// * `config` - Solver configuration
///
/// # Returns
///
/// The root and iteration statistics, or an error if the bracket is
/// invalid or the iteration budget is exhausted.
///
/// # Example
///
/// ```rust
/// use intrinsic_math::solvers::{brent, SolverConfig};
///
/// // Implied flat hazard for a 90% five-year survival probability
/// let f = |h: f64| (-5.0 * h).exp() - 0.90;
///
/// let result = brent(f, 0.0, 1.0, &SolverConfig::default()).unwrap();
/// assert!(f(result.root).abs() < 1e-10);
/// ```
pub fn brent<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let mut a = a;
    let mut b = b;
    let mut fa = f(a);
    let mut fb = f(b);

    if fa * fb > 0.0 {
        return Err(MathError::InvalidBracket { a, b, fa, fb });
    }

    // Keep b as the best estimate: |f(a)| >= |f(b)|
    if fa.abs() < fb.abs() {
        std::mem::swap(&mut a, &mut b);
        std::mem::swap(&mut fa, &mut fb);
    }

    let mut c = a;
    let mut fc = fa;
    let mut d = b - a;
    let mut e = d;

    for iteration in 0..config.max_iterations {
        if fb.abs() < config.tolerance || (b - a).abs() < config.tolerance {
            return Ok(SolverResult {
                root: b,
                iterations: iteration,
                residual: fb,
            });
        }

        // Try inverse quadratic interpolation, falling back to secant,
        // falling back to bisection
        let mut use_bisection = true;
        let mut s = 0.0;

        if (fa - fc).abs() > 1e-15 && (fb - fc).abs() > 1e-15 {
            let r = fb / fc;
            let p = fa / fc;
            let q = fa / fb;

            s = b
                - (q * (q - r) * (b - a) + (1.0 - r) * (b - c) * p)
                    / ((q - 1.0) * (r - 1.0) * (p - 1.0));

            let m = 0.5 * (a + b);
            if s > m.min(b) && s < m.max(b) && (s - b).abs() < 0.5 * e.abs() {
                use_bisection = false;
            }
        } else if (fb - fa).abs() > 1e-15 {
            s = b - fb * (b - a) / (fb - fa);

            let m = 0.5 * (a + b);
            if s > m.min(b) && s < m.max(b) && (s - b).abs() < 0.5 * e.abs() {
                use_bisection = false;
            }
        }

        if use_bisection {
            s = 0.5 * (a + b);
            e = b - a;
            d = e;
        } else {
            e = d;
            d = s - b;
        }

        c = b;
        fc = fb;

        let fs = f(s);

        if fa * fs < 0.0 {
            b = s;
            fb = fs;
        } else {
            a = s;
            fa = fs;
        }

        if fa.abs() < fb.abs() {
            std::mem::swap(&mut a, &mut b);
            std::mem::swap(&mut fa, &mut fb);
        }
    }

    Err(MathError::convergence_failed(
        config.max_iterations,
        fb.abs(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sqrt_2() {
        let f = |x: f64| x * x - 2.0;

        let result = brent(f, 1.0, 2.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn test_implied_hazard() {
        // exp(-5h) = 0.75 has the closed form h = -ln(0.75)/5
        let f = |h: f64| (-5.0 * h).exp() - 0.75;

        let result = brent(f, 0.0, 2.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, -(0.75_f64.ln()) / 5.0, epsilon = 1e-10);
    }

    #[test]
    fn test_invalid_bracket() {
        let f = |x: f64| x * x - 2.0;

        let result = brent(f, 2.0, 3.0, &SolverConfig::default());

        assert!(matches!(result, Err(MathError::InvalidBracket { .. })));
    }

    #[test]
    fn test_faster_than_bisection() {
        let f = |x: f64| x * x - 2.0;
        let config = SolverConfig::default();

        let result = brent(f, 1.0, 2.0, &config).unwrap();

        // Bisection needs ~34 iterations for 1e-10 on a unit bracket
        assert!(result.iterations < 20);
    }

    #[test]
    fn test_root_at_lower_endpoint() {
        // Zero-spread quote: the root sits exactly at the bracket edge
        let f = |h: f64| 0.6 * h;

        let result = brent(f, 0.0, 5.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, 0.0, epsilon = 1e-10);
    }
}
