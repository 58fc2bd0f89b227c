//! Catenary cable under self-weight: geometry, sag and end tensions
//!
//! The cable hangs between supports at `(0, 0)` and `(L, dh)` following
//! `y(x) = a*cosh((x - x0)/a) + c` with `a = H/w`. Depending on which datum
//! is known the solver either fixes `a` and root-finds the offset `x0`
//! (known horizontal tension), searches for `a` so the sag matches a target,
//! or renders an illustrative curve with fixed parameters.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::diagnostics::{raise, Diagnostic};
use crate::error::{SolverError, SolverResult};
use crate::math::{bisect, newton};
use crate::sampling::{Samples, GRID_POINTS};

const SAG_TOL: f64 = 1e-3;

/// The resolved cable geometry `y(x) = a*cosh((x - x0)/a) + c`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CatenaryProfile {
    /// Catenary parameter `a = H/w` [m]
    pub a: f64,
    /// Horizontal offset of the low point [m]
    pub x0: f64,
    /// Vertical offset [m]
    pub c: f64,
}

impl CatenaryProfile {
    /// Cable ordinate at `x`, measured from the left support
    pub fn eval(&self, x: f64) -> f64 {
        self.a * ((x - self.x0) / self.a).cosh() + self.c
    }

    /// The low point `(x0, y(x0))`
    pub fn low_point(&self) -> (f64, f64) {
        (self.x0, self.a + self.c)
    }
}

impl fmt::Display for CatenaryProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "y(x) = {:.4}*cosh((x - {:.4})/{:.4}) + {:.4}",
            self.a, self.x0, self.a, self.c
        )
    }
}

/// How the cable geometry was determined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatenaryMode {
    /// Horizontal tension given, offset solved
    KnownTension,
    /// Parameter searched so the sag matches a target
    TargetSag,
    /// Fixed representative parameters, no root finding
    Illustrative,
}

/// A suspended cable problem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatenaryProblem {
    /// Horizontal distance between supports [m]
    pub span: f64,
    /// Weight per unit horizontal length [kN/m]
    pub weight: f64,
    /// Height of the right support above the left [m]
    pub delta_h: f64,
    /// Horizontal tension at the low point, when known [kN]
    pub known_h: Option<f64>,
    /// Target maximum sag below the left support [m]
    pub target_sag: Option<f64>,
    /// Also sample the small-sag parabolic approximation
    pub with_parabola: bool,
}

impl CatenaryProblem {
    pub fn new(span: f64, weight: f64, delta_h: f64) -> Self {
        Self {
            span,
            weight,
            delta_h,
            known_h: None,
            target_sag: None,
            with_parabola: false,
        }
    }

    /// Fix the horizontal tension (takes precedence over a target sag)
    pub fn with_known_h(mut self, h: f64) -> Self {
        self.known_h = Some(h);
        self
    }

    /// Search for the geometry that reaches the given sag
    pub fn with_target_sag(mut self, sag: f64) -> Self {
        self.target_sag = Some(sag);
        self
    }

    /// Sample the parabolic comparison curve alongside the exact profile
    pub fn with_parabola(mut self) -> Self {
        self.with_parabola = true;
        self
    }

    /// Solve the cable geometry, sag and end tensions
    pub fn solve(&self) -> SolverResult<CatenaryResult> {
        if self.span <= 0.0 {
            return Err(SolverError::InvalidInput(format!(
                "support separation must be positive, got {}",
                self.span
            )));
        }
        if self.weight <= 0.0 {
            return Err(SolverError::InvalidInput(format!(
                "weight per unit length must be positive, got {}",
                self.weight
            )));
        }
        if let Some(h) = self.known_h {
            if h <= 0.0 {
                return Err(SolverError::InvalidInput(format!(
                    "horizontal tension must be positive, got {h}"
                )));
            }
        }
        if let Some(sag) = self.target_sag {
            if sag <= 0.0 {
                return Err(SolverError::InvalidInput(format!(
                    "target sag must be positive, got {sag}"
                )));
            }
        }

        let mut diagnostics = Vec::new();
        if self.delta_h.abs() > self.span {
            raise(
                &mut diagnostics,
                Diagnostic::SteepChord {
                    delta_h: self.delta_h,
                    span: self.span,
                },
            );
        }

        let (profile, mode) = if let Some(h) = self.known_h {
            let a = h / self.weight;
            let x0 = self.solve_offset(a)?;
            (self.profile_for(a, x0), CatenaryMode::KnownTension)
        } else if let Some(target) = self.target_sag {
            let a = self.search_parameter(target)?;
            let x0 = self.solve_offset(a)?;
            let profile = self.profile_for(a, x0);
            let achieved = sag_of(&profile);
            if !(achieved > 0.0 && achieved <= target + SAG_TOL) {
                raise(
                    &mut diagnostics,
                    Diagnostic::SagTargetMissed { target, achieved },
                );
            }
            (profile, CatenaryMode::TargetSag)
        } else {
            // Representative parameters, for plotting only
            let a = self.span / 4.0;
            let x0 = self.span / 2.0;
            (self.profile_for(a, x0), CatenaryMode::Illustrative)
        };

        let sag = sag_of(&profile);
        let h = profile.a * self.weight;
        let t_left = self.weight * profile.a * (profile.x0 / profile.a).cosh();
        let t_right = self.weight * profile.a * ((self.span - profile.x0) / profile.a).cosh();
        log::debug!(
            "catenary {mode:?}: a = {:.4}, x0 = {:.4}, sag = {:.4}",
            profile.a,
            profile.x0,
            sag
        );

        let samples = Samples::of(|x| profile.eval(x), 0.0, self.span, GRID_POINTS);
        let parabola = self.with_parabola.then(|| {
            let low = profile.low_point().1;
            let (span, dh) = (self.span, self.delta_h);
            Samples::of(
                |x| 4.0 * low / (span * span) * x * (span - x) + dh / span * x,
                0.0,
                span,
                GRID_POINTS,
            )
        });

        Ok(CatenaryResult {
            mode,
            profile,
            sag,
            h,
            t_left,
            t_right,
            samples,
            parabola,
            diagnostics,
        })
    }

    /// Root-find the offset `x0` for a fixed parameter `a`
    ///
    /// Boundary condition `y(L) - y(0) = dh` expands to
    /// `a*cosh((L - x0)/a) - a*cosh(x0/a) - dh = 0`; Newton from `L/2`.
    fn solve_offset(&self, a: f64) -> SolverResult<f64> {
        let (span, dh) = (self.span, self.delta_h);
        newton(
            |x0| a * ((span - x0) / a).cosh() - a * (x0 / a).cosh() - dh,
            |x0| -((span - x0) / a).sinh() - (x0 / a).sinh(),
            span / 2.0,
        )
    }

    /// Bracketed search for the parameter `a` that reaches the target sag
    ///
    /// The sag decreases monotonically with `a`; trial values whose inner
    /// offset solve overflows or fails count as infinite sag so the bracket
    /// still orders.
    fn search_parameter(&self, target: f64) -> SolverResult<f64> {
        let residual = |a: f64| match self.solve_offset(a) {
            Ok(x0) => sag_of(&self.profile_for(a, x0)) - target,
            Err(_) => f64::INFINITY,
        };
        bisect(residual, 0.01, 10.0 * self.span).map_err(|e| match e {
            SolverError::NoSolution(_) => SolverError::NoSolution(format!(
                "no cable parameter reaches sag {target} within (0.01, {})",
                10.0 * self.span
            )),
            other => other,
        })
    }

    fn profile_for(&self, a: f64, x0: f64) -> CatenaryProfile {
        CatenaryProfile {
            a,
            x0,
            c: -a * (x0 / a).cosh(),
        }
    }
}

/// Vertical distance between the low point and the left support
fn sag_of(profile: &CatenaryProfile) -> f64 {
    -profile.low_point().1
}

/// Full output of a catenary solve
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatenaryResult {
    /// Which datum determined the geometry
    pub mode: CatenaryMode,
    /// Resolved cable geometry
    pub profile: CatenaryProfile,
    /// Maximum sag below the left support [m]
    pub sag: f64,
    /// Horizontal tension `a*w` [kN]
    pub h: f64,
    /// Tension at the left support [kN]
    pub t_left: f64,
    /// Tension at the right support [kN]
    pub t_right: f64,
    /// Exact profile over the uniform grid
    pub samples: Samples,
    /// Small-sag parabolic approximation, when requested
    pub parabola: Option<Samples>,
    /// Non-fatal warnings collected during the solve
    pub diagnostics: Vec<Diagnostic>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_known_tension_boundary_roundtrip() {
        let result = CatenaryProblem::new(20.0, 1.0, 3.0)
            .with_known_h(15.0)
            .solve()
            .unwrap();
        assert_relative_eq!(result.profile.eval(0.0), 0.0, epsilon = 1e-6);
        assert_relative_eq!(result.profile.eval(20.0), 3.0, epsilon = 1e-6);
        assert_relative_eq!(result.h, 15.0, epsilon = 1e-9);
    }

    #[test]
    fn test_level_supports_low_point_at_midspan() {
        let result = CatenaryProblem::new(20.0, 1.0, 0.0)
            .with_known_h(15.0)
            .solve()
            .unwrap();
        assert_relative_eq!(result.profile.x0, 10.0, epsilon = 1e-6);
        assert_relative_eq!(result.t_left, result.t_right, epsilon = 1e-9);
        // Sag is the deepest excursion below the supports
        let min_y = result
            .samples
            .y
            .iter()
            .cloned()
            .fold(f64::INFINITY, f64::min);
        assert_relative_eq!(-min_y, result.sag, epsilon = 1e-4);
    }

    #[test]
    fn test_target_sag_idempotent() {
        let result = CatenaryProblem::new(20.0, 1.2, 0.0)
            .with_target_sag(2.5)
            .solve()
            .unwrap();
        assert!(result.profile.a > 0.0);
        assert!(result.h > 0.0);
        assert_relative_eq!(result.t_left, result.t_right, epsilon = 1e-6);
        assert_relative_eq!(result.sag, 2.5, epsilon = 1e-3);
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_unreachable_sag_has_no_solution() {
        // At a = 10L the sag is already above this tiny target
        let problem = CatenaryProblem::new(20.0, 1.0, 0.0).with_target_sag(1e-4);
        assert!(matches!(
            problem.solve(),
            Err(SolverError::NoSolution(_))
        ));
    }

    #[test]
    fn test_illustrative_mode_fixed_parameters() {
        let result = CatenaryProblem::new(8.0, 0.5, 0.0).solve().unwrap();
        assert_eq!(result.mode, CatenaryMode::Illustrative);
        assert_relative_eq!(result.profile.a, 2.0);
        assert_relative_eq!(result.profile.x0, 4.0);
    }

    #[test]
    fn test_parabola_matches_low_point_at_midspan() {
        let result = CatenaryProblem::new(20.0, 1.0, 0.0)
            .with_known_h(15.0)
            .with_parabola()
            .solve()
            .unwrap();
        let parabola = result.parabola.unwrap();
        let mid = GRID_POINTS / 2;
        // Both curves dip to roughly the low point near midspan
        assert_relative_eq!(
            parabola.y[mid],
            result.samples.y[mid],
            epsilon = result.sag * 0.05
        );
    }

    #[test]
    fn test_steep_chord_flagged() {
        let result = CatenaryProblem::new(5.0, 1.0, 8.0)
            .with_known_h(20.0)
            .solve()
            .unwrap();
        assert!(result
            .diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::SteepChord { .. })));
    }

    #[test]
    fn test_nonpositive_inputs_rejected() {
        assert!(CatenaryProblem::new(0.0, 1.0, 0.0).solve().is_err());
        assert!(CatenaryProblem::new(10.0, 0.0, 0.0).solve().is_err());
        assert!(CatenaryProblem::new(10.0, 1.0, 0.0)
            .with_known_h(-3.0)
            .solve()
            .is_err());
    }
}
