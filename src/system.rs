//! Linear equilibrium equation systems
//!
//! Each equation is `sum(coeff * unknown) = rhs`. Square systems solve by LU
//! decomposition; over/under-determined ones fall back to an SVD
//! least-squares solve whose residual is then checked, so an inconsistent
//! system still surfaces as `UnsolvableSystem` rather than a bogus answer.

use nalgebra::{DMatrix, DVector};

use crate::error::{SolverError, SolverResult};
use crate::symbols::Unknown;

const RESIDUAL_TOL: f64 = 1e-8;

/// One scalar linear equation over the session's unknowns
#[derive(Debug, Clone, Default)]
pub struct Equation {
    terms: Vec<(Unknown, f64)>,
    rhs: f64,
}

impl Equation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `coeff * unknown` to the left-hand side
    pub fn term(mut self, unknown: Unknown, coeff: f64) -> Self {
        self.terms.push((unknown, coeff));
        self
    }

    /// Set the right-hand side
    pub fn equals(mut self, rhs: f64) -> Self {
        self.rhs = rhs;
        self
    }
}

/// A set of linear equations assembled for one solve session
#[derive(Debug, Clone, Default)]
pub struct EquationSystem {
    equations: Vec<Equation>,
}

/// Values of the unknowns after a successful solve
#[derive(Debug, Clone)]
pub struct Solution {
    values: DVector<f64>,
}

impl Solution {
    /// Value of one unknown
    pub fn value(&self, unknown: Unknown) -> f64 {
        self.values[unknown.index()]
    }
}

impl EquationSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, equation: Equation) {
        self.equations.push(equation);
    }

    /// Number of equations assembled so far
    pub fn len(&self) -> usize {
        self.equations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.equations.is_empty()
    }

    /// Solve for `n_unknowns` unknowns
    pub fn solve(&self, n_unknowns: usize) -> SolverResult<Solution> {
        let n_eq = self.equations.len();
        if n_eq == 0 || n_unknowns == 0 {
            return Err(SolverError::UnsolvableSystem(
                "empty equation system".to_string(),
            ));
        }

        let mut a = DMatrix::<f64>::zeros(n_eq, n_unknowns);
        let mut b = DVector::<f64>::zeros(n_eq);
        for (row, eq) in self.equations.iter().enumerate() {
            for &(unknown, coeff) in &eq.terms {
                a[(row, unknown.index())] += coeff;
            }
            b[row] = eq.rhs;
        }

        let x = if n_eq == n_unknowns {
            a.clone().lu().solve(&b).ok_or_else(|| {
                SolverError::UnsolvableSystem(
                    "singular coefficient matrix (degenerate geometry?)".to_string(),
                )
            })?
        } else {
            // Rectangular: least squares, validated by residual below
            a.clone()
                .svd(true, true)
                .solve(&b, 1e-12)
                .map_err(|e| SolverError::UnsolvableSystem(e.to_string()))?
        };

        let residual = (&a * &x - &b).norm();
        if !residual.is_finite() || residual > RESIDUAL_TOL * (1.0 + b.norm()) {
            return Err(SolverError::UnsolvableSystem(format!(
                "residual {residual:.3e} exceeds tolerance"
            )));
        }

        log::debug!(
            "solved {n_eq}x{n_unknowns} system, residual {residual:.3e}"
        );
        Ok(Solution { values: x })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::SymbolRegistry;
    use approx::assert_relative_eq;

    #[test]
    fn test_two_by_two() {
        let mut reg = SymbolRegistry::new();
        let r = reg.declare("R_A R_B");

        let mut system = EquationSystem::new();
        // R_A + R_B = 10, 6 R_B = 30
        system.push(Equation::new().term(r[0], 1.0).term(r[1], 1.0).equals(10.0));
        system.push(Equation::new().term(r[1], 6.0).equals(30.0));

        let sol = system.solve(reg.len()).unwrap();
        assert_relative_eq!(sol.value(r[0]), 5.0);
        assert_relative_eq!(sol.value(r[1]), 5.0);
    }

    #[test]
    fn test_singular_system() {
        let mut reg = SymbolRegistry::new();
        let r = reg.declare("u v");

        let mut system = EquationSystem::new();
        system.push(Equation::new().term(r[0], 1.0).term(r[1], 1.0).equals(1.0));
        system.push(Equation::new().term(r[0], 2.0).term(r[1], 2.0).equals(3.0));

        assert!(matches!(
            system.solve(reg.len()),
            Err(SolverError::UnsolvableSystem(_))
        ));
    }

    #[test]
    fn test_inconsistent_rectangular_system() {
        let mut reg = SymbolRegistry::new();
        let u = reg.declare_one("u");

        let mut system = EquationSystem::new();
        system.push(Equation::new().term(u, 1.0).equals(1.0));
        system.push(Equation::new().term(u, 1.0).equals(2.0));

        assert!(system.solve(reg.len()).is_err());
    }

    #[test]
    fn test_consistent_overdetermined_system() {
        let mut reg = SymbolRegistry::new();
        let u = reg.declare_one("u");

        let mut system = EquationSystem::new();
        system.push(Equation::new().term(u, 1.0).equals(4.0));
        system.push(Equation::new().term(u, 2.0).equals(8.0));

        let sol = system.solve(reg.len()).unwrap();
        assert_relative_eq!(sol.value(u), 4.0);
    }
}
