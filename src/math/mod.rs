//! Mathematical utilities shared by the solvers

pub mod piecewise;
pub mod poly;
pub mod roots;

pub use piecewise::{Interval, Piece, PiecewisePoly};
pub use poly::Poly;
pub use roots::{bisect, newton, poly_roots_in, MAX_ITERATIONS};

/// `n` evenly spaced points over `[a, b]`, endpoints included
pub fn linspace(a: f64, b: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![a],
        _ => {
            let step = (b - a) / (n - 1) as f64;
            (0..n).map(|i| a + step * i as f64).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linspace_endpoints() {
        let grid = linspace(0.0, 6.0, 400);
        assert_eq!(grid.len(), 400);
        assert_relative_eq!(grid[0], 0.0);
        assert_relative_eq!(grid[399], 6.0);
    }
}
