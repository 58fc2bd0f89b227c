//! Simply-supported beam: reactions, shear and moment diagrams
//!
//! Two equilibrium equations give the support reactions; the shear and
//! moment functions are then assembled as piecewise polynomials over the
//! span, with point loads and applied moments contributing unit-step jumps
//! (value before the jump at the jump abscissa) and distributed loads
//! contributing running integrals.

use serde::{Deserialize, Serialize};

use crate::diagnostics::{raise, Diagnostic};
use crate::error::{SolverError, SolverResult};
use crate::loads::{
    build_piecewise_load, AppliedMoment, DistributedSegment, DistributedShape, PointLoad,
    SelfWeight,
};
use crate::math::{poly_roots_in, PiecewisePoly, Poly};
use crate::sampling::{Extremum, Samples, GRID_POINTS};
use crate::symbols::SymbolRegistry;
use crate::system::{Equation, EquationSystem};

const EQUILIBRIUM_TOL: f64 = 1e-3;

/// Support reactions of the simply-supported beam
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reactions {
    /// Left support reaction [kN]
    pub ra: f64,
    /// Right support reaction [kN]
    pub rb: f64,
}

/// A simply-supported beam with its applied loads
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BeamProblem {
    /// Span between supports [m]
    pub span: f64,
    /// Concentrated loads, positive downward
    pub point_loads: Vec<PointLoad>,
    /// Concentrated applied moments
    pub moments: Vec<AppliedMoment>,
    /// Distributed load segments
    pub distributed: Vec<DistributedSegment>,
    /// Optional self-weight term over the whole span
    pub self_weight: Option<SelfWeight>,
    /// Load kinds that could not be mapped to a shape (reported, skipped)
    skipped_kinds: Vec<String>,
}

impl BeamProblem {
    /// Create a beam of the given span with no loads
    pub fn new(span: f64) -> Self {
        Self {
            span,
            ..Self::default()
        }
    }

    /// Add a concentrated load `p` at distance `at` from the left support
    pub fn add_point_load(&mut self, p: f64, at: f64) -> &mut Self {
        self.point_loads.push(PointLoad::new(p, at));
        self
    }

    /// Add a concentrated moment `m` at distance `at` from the left support
    pub fn add_moment(&mut self, m: f64, at: f64) -> &mut Self {
        self.moments.push(AppliedMoment::new(m, at));
        self
    }

    /// Add a distributed load segment
    pub fn add_distributed(&mut self, segment: DistributedSegment) -> &mut Self {
        self.distributed.push(segment);
        self
    }

    /// Add a distributed segment from a textual load kind
    ///
    /// Unrecognized kinds are skipped; the solve reports them through the
    /// diagnostics channel rather than aborting.
    pub fn add_distributed_keyword(
        &mut self,
        a: f64,
        b: f64,
        kind: &str,
        coeffs: &[f64],
    ) -> &mut Self {
        match DistributedShape::from_keyword(kind, coeffs) {
            Some(shape) => {
                self.distributed.push(DistributedSegment::new(a, b, shape));
            }
            None => self.skipped_kinds.push(kind.to_string()),
        }
        self
    }

    /// Include the beam self-weight as a uniform load over the span
    pub fn include_self_weight(&mut self, weight: SelfWeight) -> &mut Self {
        self.self_weight = Some(weight);
        self
    }

    /// Solve reactions, diagrams, special points and run consistency checks
    pub fn solve(&self) -> SolverResult<BeamResult> {
        if self.span <= 0.0 {
            return Err(SolverError::InvalidInput(format!(
                "beam span must be positive, got {}",
                self.span
            )));
        }
        for seg in &self.distributed {
            if seg.span.0 > seg.span.1 {
                return Err(SolverError::InvalidInput(format!(
                    "distributed segment has inverted bounds [{}, {}]",
                    seg.span.0, seg.span.1
                )));
            }
        }

        let mut diagnostics = Vec::new();
        for kind in &self.skipped_kinds {
            raise(
                &mut diagnostics,
                Diagnostic::UnrecognizedLoadKind { kind: kind.clone() },
            );
        }
        let positions = self
            .point_loads
            .iter()
            .map(|p| p.at)
            .chain(self.moments.iter().map(|m| m.at))
            .chain(
                self.distributed
                    .iter()
                    .flat_map(|s| [s.span.0, s.span.1]),
            );
        for at in positions {
            if !(0.0..=self.span).contains(&at) {
                raise(
                    &mut diagnostics,
                    Diagnostic::LoadOutsideSpan {
                        position: at,
                        span: self.span,
                    },
                );
            }
        }

        // Distributed load function, self-weight appended after user segments
        // so first-match keeps user segments in front
        let mut segments = self.distributed.clone();
        if let Some(sw) = &self.self_weight {
            segments.push(DistributedSegment::uniform(0.0, self.span, sw.line_load()));
        }
        let w = build_piecewise_load(&segments);

        let reactions = self.solve_reactions(&w)?;
        log::debug!(
            "beam reactions: R_A = {:.4}, R_B = {:.4}",
            reactions.ra,
            reactions.rb
        );

        let (shear, moment) = self.build_diagrams(&w, reactions);
        let shear_zeros = shear_zero_crossings(&shear, self.span);
        let moment_extrema: Vec<Extremum> = shear_zeros
            .iter()
            .map(|&x| Extremum {
                at: x,
                value: moment.eval(x),
            })
            .collect();

        let shear_samples = Samples::of(|x| shear.eval(x), 0.0, self.span, GRID_POINTS);
        let moment_samples = Samples::of(|x| moment.eval(x), 0.0, self.span, GRID_POINTS);
        // The grid argmax misses maxima between grid points; sharpen it with
        // the exact values at piece boundaries (both sides of each jump) and,
        // for the moment, at the shear zero-crossings
        let max_shear = sharpen_max(shear_samples.max_abs(), piece_end_values(&shear));
        let max_moment = sharpen_max(
            moment_samples.max_abs(),
            moment_extrema
                .iter()
                .copied()
                .chain(piece_end_values(&moment)),
        );

        // Global equilibrium check; redundant with the positivity filter but
        // kept as an independent safety net
        let sum_loads: f64 = self.point_loads.iter().map(|p| p.p).sum::<f64>()
            + w.integral(0.0, self.span);
        let sum_reactions = reactions.ra + reactions.rb;
        if (sum_reactions - sum_loads).abs() > EQUILIBRIUM_TOL {
            raise(
                &mut diagnostics,
                Diagnostic::EquilibriumMismatch {
                    sum_reactions,
                    sum_loads,
                },
            );
        }
        if sum_reactions < 0.0 {
            raise(
                &mut diagnostics,
                Diagnostic::NegativeReactionSum { sum_reactions },
            );
        }

        Ok(BeamResult {
            reactions,
            shear,
            moment,
            shear_zeros,
            moment_extrema,
            shear_samples,
            moment_samples,
            max_shear,
            max_moment,
            diagnostics,
        })
    }

    /// Assemble and solve the two-equation statics system for R_A, R_B
    fn solve_reactions(&self, w: &PiecewisePoly) -> SolverResult<Reactions> {
        let mut registry = SymbolRegistry::new();
        let r = registry.declare("R_A R_B");
        let (ra, rb) = (r[0], r[1]);

        let sum_p: f64 = self.point_loads.iter().map(|p| p.p).sum();
        let sum_w = w.integral(0.0, self.span);
        let moment_p: f64 = self.point_loads.iter().map(|p| p.p * p.at).sum();
        let moment_w = w.first_moment(0.0, self.span);
        let sum_m: f64 = self.moments.iter().map(|m| m.m).sum();

        let mut system = EquationSystem::new();
        // Sum of vertical forces
        system.push(
            Equation::new()
                .term(ra, 1.0)
                .term(rb, 1.0)
                .equals(sum_p + sum_w),
        );
        // Sum of moments about the left support
        system.push(
            Equation::new()
                .term(rb, self.span)
                .equals(moment_p + moment_w + sum_m),
        );

        let solution = system.solve(registry.len())?;
        let (ra, rb) = (solution.value(ra), solution.value(rb));
        if !(ra.is_finite() && rb.is_finite() && ra > 0.0 && rb > 0.0) {
            return Err(SolverError::NoValidReaction(format!(
                "R_A = {ra:.4}, R_B = {rb:.4}"
            )));
        }
        Ok(Reactions { ra, rb })
    }

    /// Build V(x) and M(x) as piecewise polynomials over the span
    fn build_diagrams(
        &self,
        w: &PiecewisePoly,
        reactions: Reactions,
    ) -> (PiecewisePoly, PiecewisePoly) {
        let mut breaks = vec![0.0, self.span];
        breaks.extend(
            self.point_loads
                .iter()
                .map(|p| p.at)
                .chain(self.moments.iter().map(|m| m.at))
                .chain(w.breakpoints())
                .filter(|&x| 0.0 < x && x < self.span),
        );
        breaks.sort_by(|a, b| a.partial_cmp(b).unwrap());
        breaks.dedup_by(|a, b| (*a - *b).abs() < 1e-12);

        let resolved = w.resolve(&breaks);
        let w1 = resolved.cumulative(0.0); // running total of distributed load
        let w2 = w1.cumulative(0.0); // its second antiderivative

        let mut shear_pieces = Vec::with_capacity(w1.pieces().len());
        let mut moment_pieces = Vec::with_capacity(w1.pieces().len());
        for (p1, p2) in w1.pieces().iter().zip(w2.pieces()) {
            let start = p1.interval.start;
            // Point loads and moments whose step is active on this piece
            let active_p = self.point_loads.iter().filter(|p| p.at <= start + 1e-12);
            let (sum_p, sum_pa) = active_p.fold((0.0, 0.0), |(s, sa), p| (s + p.p, sa + p.p * p.at));
            let sum_m: f64 = self
                .moments
                .iter()
                .filter(|m| m.at <= start + 1e-12)
                .map(|m| m.m)
                .sum();

            let shear = Poly::constant(reactions.ra - sum_p).add(&p1.poly.scale(-1.0));
            let moment = Poly::linear(sum_pa - sum_m, reactions.ra - sum_p)
                .add(&p2.poly.scale(-1.0));

            shear_pieces.push(crate::math::Piece {
                interval: p1.interval,
                poly: shear,
            });
            moment_pieces.push(crate::math::Piece {
                interval: p1.interval,
                poly: moment,
            });
        }

        // A load or moment exactly at the left support jumps at x = 0, where
        // no earlier piece exists to carry the pre-jump value. A zero-width
        // leading piece supplies it, so V(0) = R_A and M(0) = 0.
        let jumps_at_origin = self
            .point_loads
            .iter()
            .map(|p| p.at)
            .chain(self.moments.iter().map(|m| m.at))
            .any(|at| at.abs() <= 1e-12);
        if jumps_at_origin {
            let origin = crate::math::Interval::new(0.0, 0.0);
            shear_pieces.insert(
                0,
                crate::math::Piece {
                    interval: origin,
                    poly: Poly::constant(reactions.ra),
                },
            );
            moment_pieces.insert(
                0,
                crate::math::Piece {
                    interval: origin,
                    poly: Poly::zero(),
                },
            );
        }

        (
            PiecewisePoly::new(shear_pieces),
            PiecewisePoly::new(moment_pieces),
        )
    }
}

/// Exact diagram values at the ends of every piece
///
/// Covers both the pre-jump and post-jump value at each interior boundary.
fn piece_end_values(f: &PiecewisePoly) -> impl Iterator<Item = Extremum> + '_ {
    f.pieces().iter().flat_map(|p| {
        [p.interval.start, p.interval.end].map(|x| Extremum {
            at: x,
            value: p.poly.eval(x),
        })
    })
}

/// Largest-magnitude extremum among a seed and exact candidates
fn sharpen_max(seed: Extremum, candidates: impl IntoIterator<Item = Extremum>) -> Extremum {
    candidates.into_iter().fold(seed, |best, c| {
        if c.value.abs() > best.value.abs() {
            c
        } else {
            best
        }
    })
}

/// Positions where the shear diagram crosses zero
///
/// Per-piece polynomial roots plus jump abscissae where the shear changes
/// sign across a point load.
fn shear_zero_crossings(shear: &PiecewisePoly, span: f64) -> Vec<f64> {
    let mut zeros = Vec::new();
    let pieces = shear.pieces();
    for piece in pieces {
        zeros.extend(poly_roots_in(
            &piece.poly,
            piece.interval.start,
            piece.interval.end,
        ));
    }
    for pair in pieces.windows(2) {
        let x = pair[0].interval.end;
        let left = pair[0].poly.eval(x);
        let right = pair[1].poly.eval(x);
        if left * right < 0.0 {
            zeros.push(x);
        }
    }
    zeros.retain(|&x| (0.0..=span).contains(&x));
    zeros.sort_by(|a, b| a.partial_cmp(b).unwrap());
    zeros.dedup_by(|a, b| (*a - *b).abs() < 1e-9);
    zeros
}

/// Full output of a beam solve
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeamResult {
    /// Support reactions, both strictly positive by contract
    pub reactions: Reactions,
    /// Shear diagram V(x) as a piecewise polynomial
    pub shear: PiecewisePoly,
    /// Moment diagram M(x) as a piecewise polynomial
    pub moment: PiecewisePoly,
    /// Zero-crossings of V(x) inside the span
    pub shear_zeros: Vec<f64>,
    /// Moment values at the shear zero-crossings
    pub moment_extrema: Vec<Extremum>,
    /// V(x) over the uniform grid
    pub shear_samples: Samples,
    /// M(x) over the uniform grid
    pub moment_samples: Samples,
    /// Location and value of max |V| over the span
    pub max_shear: Extremum,
    /// Location and value of max |M| over the span
    pub max_moment: Extremum,
    /// Non-fatal warnings collected during the solve
    pub diagnostics: Vec<Diagnostic>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_midspan_point_load() {
        let mut beam = BeamProblem::new(6.0);
        beam.add_point_load(10.0, 3.0);
        let result = beam.solve().unwrap();

        assert_relative_eq!(result.reactions.ra, 5.0, epsilon = 1e-9);
        assert_relative_eq!(result.reactions.rb, 5.0, epsilon = 1e-9);
        assert_relative_eq!(result.shear.eval(1.0), 5.0, epsilon = 1e-9);
        assert_relative_eq!(result.shear.eval(5.0), -5.0, epsilon = 1e-9);
        assert_relative_eq!(result.moment.eval(3.0), 15.0, epsilon = 1e-9);

        // The sign-changing jump at midspan is the moment extremum
        assert_eq!(result.shear_zeros.len(), 1);
        assert_relative_eq!(result.shear_zeros[0], 3.0, epsilon = 1e-9);
        assert_relative_eq!(result.moment_extrema[0].value, 15.0, epsilon = 1e-9);
        // The reported maximum is exact even though x = 3 is off-grid
        assert_relative_eq!(result.max_moment.at, 3.0, epsilon = 1e-9);
        assert_relative_eq!(result.max_moment.magnitude(), 15.0, epsilon = 1e-9);
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_load_at_left_support_keeps_end_values() {
        let mut beam = BeamProblem::new(6.0);
        beam.add_point_load(10.0, 0.0);
        beam.add_point_load(10.0, 3.0);
        let result = beam.solve().unwrap();

        // RB = 10*3/6 = 5, RA = 15
        assert_relative_eq!(result.reactions.ra, 15.0, epsilon = 1e-9);
        assert_relative_eq!(result.reactions.rb, 5.0, epsilon = 1e-9);
        // V(0) holds the value before the jump at the support
        assert_relative_eq!(result.shear.eval(0.0), 15.0, epsilon = 1e-9);
        assert_relative_eq!(result.shear.eval(1.0), 5.0, epsilon = 1e-9);
        assert_relative_eq!(result.shear.eval(4.0), -5.0, epsilon = 1e-9);
        assert_relative_eq!(result.moment.eval(0.0), 0.0, epsilon = 1e-9);
        assert_relative_eq!(result.moment.eval(3.0), 15.0, epsilon = 1e-9);
    }

    #[test]
    fn test_uniform_load() {
        let mut beam = BeamProblem::new(6.0);
        beam.add_distributed(DistributedSegment::uniform(0.0, 6.0, 2.0));
        let result = beam.solve().unwrap();

        // R = wL/2, V(x) = R - wx, M_max = wL^2/8 at midspan
        assert_relative_eq!(result.reactions.ra, 6.0, epsilon = 1e-9);
        assert_relative_eq!(result.reactions.rb, 6.0, epsilon = 1e-9);
        assert_relative_eq!(result.shear.eval(0.0), 6.0, epsilon = 1e-9);
        assert_relative_eq!(result.shear.eval(6.0), -6.0, epsilon = 1e-9);
        assert_eq!(result.shear_zeros.len(), 1);
        assert_relative_eq!(result.shear_zeros[0], 3.0, epsilon = 1e-9);
        assert_relative_eq!(result.moment.eval(3.0), 9.0, epsilon = 1e-9);
    }

    #[test]
    fn test_asymmetric_point_load() {
        let mut beam = BeamProblem::new(6.0);
        beam.add_point_load(12.0, 2.0);
        let result = beam.solve().unwrap();

        assert_relative_eq!(result.reactions.rb, 4.0, epsilon = 1e-9);
        assert_relative_eq!(result.reactions.ra, 8.0, epsilon = 1e-9);
        assert_relative_eq!(result.moment.eval(2.0), 16.0, epsilon = 1e-9);
        // End moments vanish for a simply supported beam
        assert_relative_eq!(result.moment.eval(0.0), 0.0, epsilon = 1e-9);
        assert_relative_eq!(result.moment.eval(6.0), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_applied_moment_shifts_reactions() {
        let mut beam = BeamProblem::new(4.0);
        beam.add_point_load(8.0, 2.0);
        beam.add_moment(4.0, 1.0);
        let result = beam.solve().unwrap();

        // RB = (8*2 + 4)/4 = 5, RA = 3
        assert_relative_eq!(result.reactions.rb, 5.0, epsilon = 1e-9);
        assert_relative_eq!(result.reactions.ra, 3.0, epsilon = 1e-9);
        // Moment diagram drops by the applied moment just past x = 1
        let before = result.moment.eval(1.0);
        let after = result.moment.eval(1.0 + 1e-9);
        assert_relative_eq!(before - after, 4.0, epsilon = 1e-6);
    }

    #[test]
    fn test_self_weight_only() {
        let mut beam = BeamProblem::new(6.0);
        beam.include_self_weight(SelfWeight::default());
        let result = beam.solve().unwrap();

        // w = 3.75 kN/m over 6 m
        assert_relative_eq!(result.reactions.ra + result.reactions.rb, 22.5, epsilon = 1e-9);
    }

    #[test]
    fn test_unrecognized_keyword_is_skipped() {
        let mut beam = BeamProblem::new(6.0);
        beam.add_point_load(10.0, 3.0);
        beam.add_distributed_keyword(0.0, 6.0, "trapecial", &[2.0]);
        let result = beam.solve().unwrap();

        assert!(result
            .diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::UnrecognizedLoadKind { .. })));
        // Segment was skipped, so reactions come from the point load alone
        assert_relative_eq!(result.reactions.ra, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_load_outside_span_flagged() {
        let mut beam = BeamProblem::new(6.0);
        beam.add_point_load(10.0, 3.0);
        beam.add_point_load(1.0, 7.5);
        let result = beam.solve().unwrap();

        assert!(result
            .diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::LoadOutsideSpan { .. })));
    }

    #[test]
    fn test_no_loads_has_no_valid_reactions() {
        let beam = BeamProblem::new(6.0);
        assert!(matches!(
            beam.solve(),
            Err(SolverError::NoValidReaction(_))
        ));
    }

    #[test]
    fn test_nonpositive_span_rejected() {
        let beam = BeamProblem::new(0.0);
        assert!(matches!(beam.solve(), Err(SolverError::InvalidInput(_))));
    }

    #[test]
    fn test_equilibrium_law() {
        let mut beam = BeamProblem::new(8.0);
        beam.add_point_load(7.0, 2.0);
        beam.add_point_load(3.0, 5.0);
        beam.add_distributed(DistributedSegment::uniform(1.0, 6.0, 1.5));
        let result = beam.solve().unwrap();

        let total = 7.0 + 3.0 + 1.5 * 5.0;
        assert_relative_eq!(
            result.reactions.ra + result.reactions.rb,
            total,
            epsilon = 1e-6
        );
    }
}
