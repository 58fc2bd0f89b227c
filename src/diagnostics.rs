//! Non-fatal diagnostics raised alongside solver results
//!
//! Diagnostics never abort a solve. They are collected on the result for the
//! caller to display and mirrored through `log::warn!`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-fatal condition detected during a solve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Diagnostic {
    /// Global vertical equilibrium check failed beyond tolerance
    EquilibriumMismatch {
        sum_reactions: f64,
        sum_loads: f64,
    },
    /// Sum of reactions came out negative (should not happen after the
    /// positivity filter; checked independently anyway)
    NegativeReactionSum { sum_reactions: f64 },
    /// A point load or moment sits outside the beam span
    LoadOutsideSpan { position: f64, span: f64 },
    /// A distributed-load keyword was not recognized; the segment was skipped
    UnrecognizedLoadKind { kind: String },
    /// Equation count differs from unknown count (mechanism or indeterminacy)
    NonIsostatic { equations: usize, unknowns: usize },
    /// Cable support height difference exceeds the horizontal span
    SteepChord { delta_h: f64, span: f64 },
    /// Target-sag search finished but the achieved sag missed the target
    SagTargetMissed { target: f64, achieved: f64 },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::EquilibriumMismatch {
                sum_reactions,
                sum_loads,
            } => write!(
                f,
                "vertical equilibrium not satisfied exactly (sum R = {sum_reactions:.3}, sum loads = {sum_loads:.3})"
            ),
            Diagnostic::NegativeReactionSum { sum_reactions } => write!(
                f,
                "sum of reactions is negative ({sum_reactions:.3}); review the applied loads"
            ),
            Diagnostic::LoadOutsideSpan { position, span } => write!(
                f,
                "load or moment outside the span [0, {span}]: position {position}"
            ),
            Diagnostic::UnrecognizedLoadKind { kind } => {
                write!(f, "unrecognized distributed load kind: {kind}")
            }
            Diagnostic::NonIsostatic {
                equations,
                unknowns,
            } => write!(
                f,
                "system is not isostatic: equations = {equations}, unknowns = {unknowns}; there may be a mechanism or static indeterminacy"
            ),
            Diagnostic::SteepChord { delta_h, span } => write!(
                f,
                "height difference {delta_h} exceeds the horizontal span {span}; a physical solution may not exist"
            ),
            Diagnostic::SagTargetMissed { target, achieved } => write!(
                f,
                "target sag {target} not met (achieved {achieved:.4})"
            ),
        }
    }
}

/// Push a diagnostic and mirror it to the log
pub(crate) fn raise(list: &mut Vec<Diagnostic>, diag: Diagnostic) {
    log::warn!("{diag}");
    list.push(diag);
}
