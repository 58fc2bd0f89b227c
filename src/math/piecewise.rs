//! Domain-partitioned polynomial functions
//!
//! A `PiecewisePoly` is an ordered sequence of `(interval, polynomial)` pairs
//! evaluated by selecting the first pair whose interval contains the query
//! point. Outside all pieces the value is zero (policy choice, documented).
//! Overlapping pieces resolve by first-match precedence and are not rejected.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::poly::Poly;

/// Closed interval `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub start: f64,
    pub end: f64,
}

impl Interval {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, x: f64) -> bool {
        self.start <= x && x <= self.end
    }

    pub fn length(&self) -> f64 {
        self.end - self.start
    }
}

/// One `(expression, predicate)` pair of a piecewise function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    pub interval: Interval,
    pub poly: Poly,
}

/// Ordered piecewise polynomial with first-match evaluation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PiecewisePoly {
    pieces: Vec<Piece>,
}

impl PiecewisePoly {
    /// Build from ordered pieces
    pub fn new(pieces: Vec<Piece>) -> Self {
        Self { pieces }
    }

    /// The empty function (identically zero)
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Evaluate at `x`: first piece whose interval contains `x`, zero outside
    ///
    /// At a shared boundary of two contiguous pieces the earlier piece wins,
    /// which gives the value before a jump (Heaviside with H(0) = 0).
    pub fn eval(&self, x: f64) -> f64 {
        self.pieces
            .iter()
            .find(|p| p.interval.contains(x))
            .map_or(0.0, |p| p.poly.eval(x))
    }

    /// Sorted, deduplicated interval bounds of every piece
    pub fn breakpoints(&self) -> Vec<f64> {
        let mut points: Vec<f64> = self
            .pieces
            .iter()
            .flat_map(|p| [p.interval.start, p.interval.end])
            .collect();
        points.sort_by(|a, b| a.partial_cmp(b).unwrap());
        points.dedup_by(|a, b| (*a - *b).abs() < 1e-12);
        points
    }

    /// Re-partition onto a contiguous grid of sorted breakpoints
    ///
    /// Each output cell takes the polynomial of the first input piece that
    /// contains its midpoint, or zero. First-match precedence over any
    /// overlapping input pieces is preserved this way.
    pub fn resolve(&self, breaks: &[f64]) -> Self {
        let mut pieces = Vec::with_capacity(breaks.len().saturating_sub(1));
        for window in breaks.windows(2) {
            let (start, end) = (window[0], window[1]);
            if end - start < 1e-12 {
                continue;
            }
            let mid = 0.5 * (start + end);
            let poly = self
                .pieces
                .iter()
                .find(|p| p.interval.contains(mid))
                .map_or(Poly::zero(), |p| p.poly.clone());
            pieces.push(Piece {
                interval: Interval::new(start, end),
                poly,
            });
        }
        Self { pieces }
    }

    /// Running integral `x -> integral from `from` to x`, piece by piece
    ///
    /// Requires contiguous ordered pieces (the output of [`resolve`]); the
    /// result is continuous across piece boundaries.
    ///
    /// [`resolve`]: PiecewisePoly::resolve
    pub fn cumulative(&self, from: f64) -> Self {
        let mut acc = 0.0;
        let mut pieces = Vec::with_capacity(self.pieces.len());
        for piece in &self.pieces {
            let anti = piece.poly.antiderivative();
            let poly = anti.offset(acc - anti.eval(piece.interval.start.max(from)));
            acc = poly.eval(piece.interval.end);
            pieces.push(Piece {
                interval: piece.interval,
                poly,
            });
        }
        Self { pieces }
    }

    /// Definite integral over `[a, b]` under first-match resolution
    pub fn integral(&self, a: f64, b: f64) -> f64 {
        self.moment_about(a, b, None)
    }

    /// First moment `integral of x*f(x)` over `[a, b]`
    pub fn first_moment(&self, a: f64, b: f64) -> f64 {
        self.moment_about(a, b, Some(Poly::linear(0.0, 1.0)))
    }

    fn moment_about(&self, a: f64, b: f64, weight: Option<Poly>) -> f64 {
        let mut breaks = self.breakpoints();
        breaks.push(a);
        breaks.push(b);
        breaks.sort_by(|x, y| x.partial_cmp(y).unwrap());
        breaks.dedup_by(|x, y| (*x - *y).abs() < 1e-12);
        breaks.retain(|&x| a <= x && x <= b);

        let resolved = self.resolve(&breaks);
        resolved
            .pieces
            .iter()
            .map(|p| {
                let integrand = match &weight {
                    Some(w) => p.poly.mul(w),
                    None => p.poly.clone(),
                };
                integrand.integrate(p.interval.start, p.interval.end)
            })
            .sum()
    }
}

impl fmt::Display for PiecewisePoly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.pieces.is_empty() {
            return write!(f, "0");
        }
        for (i, p) in self.pieces.iter().enumerate() {
            if i > 0 {
                write!(f, ";  ")?;
            }
            write!(
                f,
                "{} for {} <= x <= {}",
                p.poly, p.interval.start, p.interval.end
            )?;
        }
        Ok(())
    }
}
