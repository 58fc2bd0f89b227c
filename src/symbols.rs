//! Named scalar unknowns for equilibrium equations
//!
//! The registry is scoped to one solve invocation and passed explicitly;
//! declaring the same name twice returns the same handle.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Handle to a named scalar unknown (reaction component, bar force)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Unknown(pub(crate) usize);

impl Unknown {
    /// Column index of this unknown in the equation system
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Solve-session-scoped registry of unknowns, identified by name
#[derive(Debug, Default, Clone)]
pub struct SymbolRegistry {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl SymbolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a batch of unknowns from a whitespace/comma-separated list
    ///
    /// Returns one handle per distinct name, in order of first appearance.
    /// Re-declaring a name yields the handle created the first time.
    pub fn declare(&mut self, names: &str) -> Vec<Unknown> {
        names
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .map(|name| self.declare_one(name))
            .collect()
    }

    /// Declare a single unknown
    pub fn declare_one(&mut self, name: &str) -> Unknown {
        if let Some(&i) = self.index.get(name) {
            return Unknown(i);
        }
        let i = self.names.len();
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), i);
        Unknown(i)
    }

    /// Name of an unknown
    pub fn name(&self, u: Unknown) -> &str {
        &self.names[u.0]
    }

    /// Number of distinct unknowns declared
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True when no unknowns have been declared
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_declare() {
        let mut reg = SymbolRegistry::new();
        let unknowns = reg.declare("R_A R_B");
        assert_eq!(unknowns.len(), 2);
        assert_eq!(reg.name(unknowns[0]), "R_A");
        assert_eq!(reg.name(unknowns[1]), "R_B");
    }

    #[test]
    fn test_comma_separated() {
        let mut reg = SymbolRegistry::new();
        let unknowns = reg.declare("N_AB, N_AC, N_BC");
        assert_eq!(unknowns.len(), 3);
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn test_stable_handles() {
        let mut reg = SymbolRegistry::new();
        let first = reg.declare_one("R_A");
        let again = reg.declare_one("R_A");
        assert_eq!(first, again);
        assert_eq!(reg.len(), 1);
    }
}
