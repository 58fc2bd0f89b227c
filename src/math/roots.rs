//! Numeric root finders
//!
//! Small, bounded-iteration solvers: Newton for the catenary boundary
//! equation, bracketed bisection for the target-sag search, and analytic or
//! bracketed roots of low-degree polynomials for shear zero-crossings.

use crate::error::{SolverError, SolverResult};

use super::poly::Poly;

/// Iteration budget for every root finder
pub const MAX_ITERATIONS: usize = 100;

const TOL: f64 = 1e-10;

/// Newton's method from a single seed
///
/// Fails with `ConvergenceFailed` when the iterate stalls, diverges or
/// produces a non-finite value within the iteration budget.
pub fn newton<F, D>(f: F, df: D, seed: f64) -> SolverResult<f64>
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    let mut x = seed;
    for _ in 0..MAX_ITERATIONS {
        let fx = f(x);
        if !fx.is_finite() {
            return Err(SolverError::ConvergenceFailed(MAX_ITERATIONS));
        }
        if fx.abs() < TOL {
            return Ok(x);
        }
        let dfx = df(x);
        if !dfx.is_finite() || dfx.abs() < f64::MIN_POSITIVE {
            return Err(SolverError::ConvergenceFailed(MAX_ITERATIONS));
        }
        let next = x - fx / dfx;
        if !next.is_finite() {
            return Err(SolverError::ConvergenceFailed(MAX_ITERATIONS));
        }
        if (next - x).abs() < TOL * (1.0 + x.abs()) {
            return Ok(next);
        }
        x = next;
    }
    Err(SolverError::ConvergenceFailed(MAX_ITERATIONS))
}

/// Bisection on a bracketing interval `[a, b]`
///
/// `f(a)` and `f(b)` must have opposite signs; non-finite values count as
/// positive infinity so that a bracket end inside an overflow region still
/// orders correctly against the other end.
pub fn bisect<F>(f: F, mut a: f64, mut b: f64) -> SolverResult<f64>
where
    F: Fn(f64) -> f64,
{
    let clean = |v: f64| if v.is_finite() { v } else { f64::INFINITY };
    let mut fa = clean(f(a));
    let fb = clean(f(b));
    if fa == 0.0 {
        return Ok(a);
    }
    if fb == 0.0 {
        return Ok(b);
    }
    if fa.signum() == fb.signum() {
        return Err(SolverError::NoSolution(format!(
            "no sign change on [{a}, {b}]"
        )));
    }
    for _ in 0..MAX_ITERATIONS {
        let mid = 0.5 * (a + b);
        let fm = clean(f(mid));
        if fm == 0.0 || (b - a).abs() < TOL * (1.0 + mid.abs()) {
            return Ok(mid);
        }
        if fm.signum() == fa.signum() {
            a = mid;
            fa = fm;
        } else {
            b = mid;
        }
    }
    Ok(0.5 * (a + b))
}

/// Real roots of a polynomial inside `[a, b]`, ascending
///
/// Degree one and two are solved analytically; higher degrees fall back to a
/// sign-scan plus bisection. Constant polynomials report no roots.
pub fn poly_roots_in(poly: &Poly, a: f64, b: f64) -> Vec<f64> {
    let mut roots = match poly.degree() {
        None | Some(0) => Vec::new(),
        Some(1) => {
            let c = poly.coeffs();
            vec![-c[0] / c[1]]
        }
        Some(2) => {
            let c = poly.coeffs();
            let disc = c[1] * c[1] - 4.0 * c[2] * c[0];
            if disc < 0.0 {
                Vec::new()
            } else {
                let q = disc.sqrt();
                vec![(-c[1] - q) / (2.0 * c[2]), (-c[1] + q) / (2.0 * c[2])]
            }
        }
        Some(_) => scan_roots(poly, a, b),
    };
    roots.retain(|r| a - 1e-9 <= *r && *r <= b + 1e-9);
    roots.sort_by(|x, y| x.partial_cmp(y).unwrap());
    roots.dedup_by(|x, y| (*x - *y).abs() < 1e-9);
    roots
}

fn scan_roots(poly: &Poly, a: f64, b: f64) -> Vec<f64> {
    const CELLS: usize = 64;
    let mut roots = Vec::new();
    let step = (b - a) / CELLS as f64;
    for i in 0..CELLS {
        let lo = a + step * i as f64;
        let hi = lo + step;
        let (flo, fhi) = (poly.eval(lo), poly.eval(hi));
        if flo == 0.0 {
            roots.push(lo);
        } else if flo.signum() != fhi.signum() {
            if let Ok(r) = bisect(|x| poly.eval(x), lo, hi) {
                roots.push(r);
            }
        }
    }
    if poly.eval(b) == 0.0 {
        roots.push(b);
    }
    roots
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_newton_sqrt() {
        let root = newton(|x| x * x - 2.0, |x| 2.0 * x, 1.0).unwrap();
        assert_relative_eq!(root, 2.0_f64.sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn test_newton_flat_derivative_fails() {
        assert!(newton(|_| 1.0, |_| 0.0, 0.0).is_err());
    }

    #[test]
    fn test_bisect_bracket_required() {
        assert!(bisect(|x| x * x + 1.0, -1.0, 1.0).is_err());
    }

    #[test]
    fn test_bisect_finds_root() {
        let root = bisect(|x| x.cos() - x, 0.0, 1.0).unwrap();
        assert_relative_eq!(root, 0.739_085_133, epsilon = 1e-6);
    }

    #[test]
    fn test_quadratic_roots_in_window() {
        // (x - 1)(x - 5) with window [0, 4] keeps only x = 1
        let p = Poly::new(&[5.0, -6.0, 1.0]);
        let roots = poly_roots_in(&p, 0.0, 4.0);
        assert_eq!(roots.len(), 1);
        assert_relative_eq!(roots[0], 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_cubic_roots_by_scan() {
        // x^3 - x has roots -1, 0, 1
        let p = Poly::new(&[0.0, -1.0, 0.0, 1.0]);
        let roots = poly_roots_in(&p, -2.0, 2.0);
        assert_eq!(roots.len(), 3);
        assert_relative_eq!(roots[1], 0.0, epsilon = 1e-6);
    }
}
