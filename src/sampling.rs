//! Numeric grid evaluation of symbolic results
//!
//! Downstream collaborators (plots, tabular export) consume these arrays
//! read-only; the solvers fill them from the symbolic expressions.

use serde::{Deserialize, Serialize};

use crate::math::linspace;

/// Grid resolution used by every solver
pub const GRID_POINTS: usize = 400;

/// Location and signed value of a distinguished point on a sampled curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extremum {
    /// Position along the domain
    pub at: f64,
    /// Signed function value at `at`
    pub value: f64,
}

impl Extremum {
    /// Magnitude of the value
    pub fn magnitude(&self) -> f64 {
        self.value.abs()
    }
}

/// A function evaluated over a uniform grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Samples {
    /// Grid abscissae
    pub x: Vec<f64>,
    /// Function values at each abscissa
    pub y: Vec<f64>,
}

impl Samples {
    /// Evaluate `f` over `n` uniform points on `[a, b]`
    pub fn of<F: Fn(f64) -> f64>(f: F, a: f64, b: f64, n: usize) -> Self {
        let x = linspace(a, b, n);
        let y = x.iter().map(|&xi| f(xi)).collect();
        Self { x, y }
    }

    /// Point of largest magnitude over the grid
    pub fn max_abs(&self) -> Extremum {
        let mut best = Extremum {
            at: self.x.first().copied().unwrap_or(0.0),
            value: self.y.first().copied().unwrap_or(0.0),
        };
        for (&xi, &yi) in self.x.iter().zip(&self.y) {
            if yi.abs() > best.value.abs() {
                best = Extremum { at: xi, value: yi };
            }
        }
        best
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}
