//! Error types for the statics solvers

use thiserror::Error;

/// Main error type for solver operations
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Node '{0}' not found in model")]
    NodeNotFound(String),

    #[error("Duplicate name '{0}' already exists")]
    DuplicateName(String),

    #[error("No real, strictly positive reaction solution: {0}")]
    NoValidReaction(String),

    #[error("Equilibrium system has no solution: {0}")]
    UnsolvableSystem(String),

    #[error("No solution in the search interval: {0}")]
    NoSolution(String),

    #[error("Convergence failed after {0} iterations")]
    ConvergenceFailed(usize),
}

/// Result type for solver operations
pub type SolverResult<T> = Result<T, SolverError>;
