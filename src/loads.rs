//! Load definitions for the beam solver

use serde::{Deserialize, Serialize};

use crate::math::{Interval, Piece, PiecewisePoly, Poly};

/// A concentrated transverse load, positive downward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLoad {
    /// Magnitude [kN]
    pub p: f64,
    /// Position from the left support [m]
    pub at: f64,
}

impl PointLoad {
    pub fn new(p: f64, at: f64) -> Self {
        Self { p, at }
    }
}

/// A concentrated applied moment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AppliedMoment {
    /// Magnitude [kN*m]
    pub m: f64,
    /// Position from the left support [m]
    pub at: f64,
}

impl AppliedMoment {
    pub fn new(m: f64, at: f64) -> Self {
        Self { m, at }
    }
}

/// Shape of a distributed load over one segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DistributedShape {
    /// Constant intensity [kN/m]
    Uniform(f64),
    /// Intensity varying polynomially with the beam abscissa
    Varying(Poly),
}

impl DistributedShape {
    /// Map a textual load kind to a shape
    ///
    /// `"uniform"`/`"uniforme"` takes `coeffs[0]` as the constant intensity;
    /// `"triangular"` interprets `coeffs` as ascending polynomial
    /// coefficients (the original notation `2x+1` becomes `[1, 2]`).
    /// Unrecognized kinds return `None`; the beam solver records a
    /// diagnostic and skips such segments instead of aborting.
    pub fn from_keyword(kind: &str, coeffs: &[f64]) -> Option<Self> {
        match kind.to_ascii_lowercase().as_str() {
            "uniform" | "uniforme" => Some(Self::Uniform(coeffs.first().copied().unwrap_or(0.0))),
            "triangular" => Some(Self::Varying(Poly::new(coeffs))),
            _ => None,
        }
    }

    fn poly(&self) -> Poly {
        match self {
            Self::Uniform(w) => Poly::constant(*w),
            Self::Varying(p) => p.clone(),
        }
    }
}

/// One segment of a domain-partitioned distributed load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributedSegment {
    /// Segment bounds `[a, b]`, `a <= b`
    pub span: (f64, f64),
    /// Intensity over the segment
    pub shape: DistributedShape,
}

impl DistributedSegment {
    pub fn new(a: f64, b: f64, shape: DistributedShape) -> Self {
        Self { span: (a, b), shape }
    }

    /// Uniform intensity over `[a, b]`
    pub fn uniform(a: f64, b: f64, w: f64) -> Self {
        Self::new(a, b, DistributedShape::Uniform(w))
    }
}

/// Self-weight of the beam as an equivalent uniform load
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelfWeight {
    /// Unit weight [kN/m^3]
    pub unit_weight: f64,
    /// Section width [m]
    pub width: f64,
    /// Section height [m]
    pub height: f64,
}

impl SelfWeight {
    pub fn new(unit_weight: f64, width: f64, height: f64) -> Self {
        Self {
            unit_weight,
            width,
            height,
        }
    }

    /// Equivalent line load [kN/m]
    pub fn line_load(&self) -> f64 {
        self.unit_weight * self.width * self.height
    }
}

impl Default for SelfWeight {
    /// Reinforced concrete, 0.30 x 0.50 m section
    fn default() -> Self {
        Self::new(25.0, 0.3, 0.5)
    }
}

/// Assemble a piecewise load function from distributed segments
///
/// One closed predicate `a <= x <= b` per segment, paired with the segment's
/// expression, evaluated by first match. The caller is responsible for
/// keeping segments non-overlapping; overlaps silently resolve by first-match
/// precedence.
pub fn build_piecewise_load(segments: &[DistributedSegment]) -> PiecewisePoly {
    let pieces = segments
        .iter()
        .map(|s| Piece {
            interval: Interval::new(s.span.0, s.span.1),
            poly: s.shape.poly(),
        })
        .collect();
    PiecewisePoly::new(pieces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_keyword_mapping() {
        let uniform = DistributedShape::from_keyword("Uniforme", &[5.0]).unwrap();
        assert_eq!(uniform, DistributedShape::Uniform(5.0));

        // 2x + 1
        let tri = DistributedShape::from_keyword("triangular", &[1.0, 2.0]).unwrap();
        assert_eq!(tri, DistributedShape::Varying(Poly::new(&[1.0, 2.0])));

        assert!(DistributedShape::from_keyword("trapecial", &[1.0]).is_none());
    }

    #[test]
    fn test_build_piecewise_load() {
        let w = build_piecewise_load(&[
            DistributedSegment::uniform(0.0, 3.0, 5.0),
            DistributedSegment::new(
                3.0,
                6.0,
                DistributedShape::Varying(Poly::linear(1.0, 2.0)),
            ),
        ]);
        assert_relative_eq!(w.eval(1.0), 5.0);
        assert_relative_eq!(w.eval(4.0), 9.0);
        assert_relative_eq!(w.eval(7.0), 0.0);
    }

    #[test]
    fn test_self_weight_line_load() {
        assert_relative_eq!(SelfWeight::default().line_load(), 3.75);
    }
}
