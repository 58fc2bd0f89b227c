//! Statics Solver - classical isostatic structural analysis
//!
//! This library computes closed-form and semi-analytic statics solutions for
//! three structural models:
//! - Simply-supported beam under combined loads (reactions, shear and moment
//!   diagrams, special points)
//! - Plane truss by the method of joints (bar forces, reactions,
//!   tension/compression classification)
//! - Catenary cable under self-weight (profile, sag, end tensions)
//!
//! Solves are synchronous, stateless pure functions over their inputs. Each
//! result carries both symbolic expressions (piecewise polynomials, cable
//! profile parameters) and numeric sample arrays for downstream plotting or
//! export, plus non-fatal diagnostics.
//!
//! ## Example
//! ```rust
//! use statics_solver::prelude::*;
//!
//! // 6 m beam, 10 kN at midspan
//! let mut beam = BeamProblem::new(6.0);
//! beam.add_point_load(10.0, 3.0);
//! let result = beam.solve().unwrap();
//!
//! assert!((result.reactions.ra - 5.0).abs() < 1e-9);
//! assert!((result.moment.eval(3.0) - 15.0).abs() < 1e-9);
//! ```

pub mod beam;
pub mod catenary;
pub mod diagnostics;
pub mod error;
pub mod loads;
pub mod math;
pub mod sampling;
pub mod symbols;
pub mod system;
pub mod truss;

// Re-export common types
pub mod prelude {
    pub use crate::beam::{BeamProblem, BeamResult, Reactions};
    pub use crate::catenary::{
        CatenaryMode, CatenaryProblem, CatenaryProfile, CatenaryResult,
    };
    pub use crate::diagnostics::Diagnostic;
    pub use crate::error::{SolverError, SolverResult};
    pub use crate::loads::{
        AppliedMoment, DistributedSegment, DistributedShape, PointLoad, SelfWeight,
    };
    pub use crate::math::{Interval, Piece, PiecewisePoly, Poly};
    pub use crate::sampling::{Extremum, Samples, GRID_POINTS};
    pub use crate::symbols::{SymbolRegistry, Unknown};
    pub use crate::system::{Equation, EquationSystem, Solution};
    pub use crate::truss::{
        Bar, BarForce, ForceNature, ReactionComponent, SupportKind, TrussNode, TrussProblem,
        TrussResult,
    };
}
