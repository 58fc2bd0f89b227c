//! Dense univariate polynomials
//!
//! The symbolic layer of the crate: load expressions, shear and moment pieces
//! are polynomials in one variable, so differentiation, antiderivatives and
//! exact evaluation stay closed-form without a general CAS.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Polynomial with coefficients in ascending power order
///
/// `coeffs[i]` multiplies `x^i`. The zero polynomial has an empty vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poly {
    coeffs: Vec<f64>,
}

impl Poly {
    /// Build from ascending coefficients, trimming trailing zeros
    pub fn new(coeffs: &[f64]) -> Self {
        let mut coeffs = coeffs.to_vec();
        while coeffs.last().is_some_and(|c| *c == 0.0) {
            coeffs.pop();
        }
        Self { coeffs }
    }

    /// The zero polynomial
    pub fn zero() -> Self {
        Self { coeffs: Vec::new() }
    }

    /// A constant polynomial
    pub fn constant(c: f64) -> Self {
        Self::new(&[c])
    }

    /// The linear polynomial `c1*x + c0`
    pub fn linear(c0: f64, c1: f64) -> Self {
        Self::new(&[c0, c1])
    }

    /// Degree, or `None` for the zero polynomial
    pub fn degree(&self) -> Option<usize> {
        self.coeffs.len().checked_sub(1)
    }

    /// True when every coefficient is zero
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Coefficients in ascending power order
    pub fn coeffs(&self) -> &[f64] {
        &self.coeffs
    }

    /// Horner evaluation at `x`
    pub fn eval(&self, x: f64) -> f64 {
        self.coeffs.iter().rev().fold(0.0, |acc, c| acc * x + c)
    }

    /// First derivative
    pub fn derivative(&self) -> Self {
        let coeffs: Vec<f64> = self
            .coeffs
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, c)| c * i as f64)
            .collect();
        Self::new(&coeffs)
    }

    /// Antiderivative with integration constant zero
    pub fn antiderivative(&self) -> Self {
        if self.is_zero() {
            return Self::zero();
        }
        let mut coeffs = Vec::with_capacity(self.coeffs.len() + 1);
        coeffs.push(0.0);
        for (i, c) in self.coeffs.iter().enumerate() {
            coeffs.push(c / (i + 1) as f64);
        }
        Self::new(&coeffs)
    }

    /// Definite integral over `[a, b]`
    pub fn integrate(&self, a: f64, b: f64) -> f64 {
        let f = self.antiderivative();
        f.eval(b) - f.eval(a)
    }

    /// Sum of two polynomials
    pub fn add(&self, other: &Self) -> Self {
        let n = self.coeffs.len().max(other.coeffs.len());
        let coeffs: Vec<f64> = (0..n)
            .map(|i| {
                self.coeffs.get(i).copied().unwrap_or(0.0)
                    + other.coeffs.get(i).copied().unwrap_or(0.0)
            })
            .collect();
        Self::new(&coeffs)
    }

    /// Product of two polynomials
    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        let mut coeffs = vec![0.0; self.coeffs.len() + other.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            for (j, b) in other.coeffs.iter().enumerate() {
                coeffs[i + j] += a * b;
            }
        }
        Self::new(&coeffs)
    }

    /// Scale every coefficient
    pub fn scale(&self, k: f64) -> Self {
        let coeffs: Vec<f64> = self.coeffs.iter().map(|c| c * k).collect();
        Self::new(&coeffs)
    }

    /// Add a constant term
    pub fn offset(&self, c: f64) -> Self {
        self.add(&Self::constant(c))
    }
}

impl fmt::Display for Poly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        let mut first = true;
        for (i, &c) in self.coeffs.iter().enumerate() {
            if c == 0.0 {
                continue;
            }
            if first {
                if c < 0.0 {
                    write!(f, "-")?;
                }
                first = false;
            } else if c < 0.0 {
                write!(f, " - ")?;
            } else {
                write!(f, " + ")?;
            }
            let a = c.abs();
            match i {
                0 => write!(f, "{a}")?,
                1 if a == 1.0 => write!(f, "x")?,
                1 => write!(f, "{a}*x")?,
                _ if a == 1.0 => write!(f, "x^{i}")?,
                _ => write!(f, "{a}*x^{i}")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_eval_horner() {
        // 1 + 2x + 3x^2
        let p = Poly::new(&[1.0, 2.0, 3.0]);
        assert_relative_eq!(p.eval(2.0), 17.0);
    }

    #[test]
    fn test_antiderivative_roundtrip() {
        let p = Poly::new(&[4.0, -6.0]);
        assert_eq!(p.antiderivative().derivative(), p);
    }

    #[test]
    fn test_definite_integral() {
        // integral of 2x over [0, 3] = 9
        let p = Poly::linear(0.0, 2.0);
        assert_relative_eq!(p.integrate(0.0, 3.0), 9.0);
    }

    #[test]
    fn test_mul() {
        // (1 + x)(1 - x) = 1 - x^2
        let p = Poly::linear(1.0, 1.0).mul(&Poly::linear(1.0, -1.0));
        assert_eq!(p, Poly::new(&[1.0, 0.0, -1.0]));
    }

    #[test]
    fn test_display() {
        let p = Poly::new(&[5.0, -2.0, 0.5]);
        assert_eq!(p.to_string(), "5 - 2*x + 0.5*x^2");
    }
}
