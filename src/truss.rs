//! Plane truss analysis by the method of joints
//!
//! Every node contributes one horizontal and one vertical force-balance
//! equation built from the direction cosines of its incident bars, the
//! reaction components of its support (if any) and its applied load. The
//! resulting linear system is solved exactly; each bar force is classified
//! by its sign.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::diagnostics::{raise, Diagnostic};
use crate::error::{SolverError, SolverResult};
use crate::symbols::{SymbolRegistry, Unknown};
use crate::system::{Equation, EquationSystem};

/// Support kinds at a truss node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SupportKind {
    /// Two reaction components (Rx, Ry)
    Pinned,
    /// One vertical reaction component (Ry)
    Roller,
}

/// A joint of the truss
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrussNode {
    pub name: String,
    pub x: f64,
    pub y: f64,
}

/// A bar connecting two joints, oriented from `i` to `j`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub name: String,
    pub i: String,
    pub j: String,
}

/// Nature of a bar's axial force
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForceNature {
    Tension,
    Compression,
    Null,
}

impl fmt::Display for ForceNature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForceNature::Tension => write!(f, "tension"),
            ForceNature::Compression => write!(f, "compression"),
            ForceNature::Null => write!(f, "null"),
        }
    }
}

/// Solved axial force in one bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarForce {
    pub bar: String,
    /// Signed axial force [kN]; positive is tension
    pub force: f64,
    pub nature: ForceNature,
}

/// Solved reaction component at a supported node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionComponent {
    /// Name of the component, e.g. `Rx_A`
    pub name: String,
    pub value: f64,
}

/// A plane truss with supports and nodal loads
#[derive(Debug, Clone, Default, Serialize)]
pub struct TrussProblem {
    nodes: Vec<TrussNode>,
    bars: Vec<Bar>,
    supports: Vec<(String, SupportKind)>,
    loads: HashMap<String, (f64, f64)>,
    #[serde(skip)]
    node_index: HashMap<String, usize>,
}

impl TrussProblem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a joint at `(x, y)`
    pub fn add_node(&mut self, name: &str, x: f64, y: f64) -> SolverResult<&mut Self> {
        if self.node_index.contains_key(name) {
            return Err(SolverError::DuplicateName(name.to_string()));
        }
        self.node_index.insert(name.to_string(), self.nodes.len());
        self.nodes.push(TrussNode {
            name: name.to_string(),
            x,
            y,
        });
        Ok(self)
    }

    /// Add a bar between two existing joints
    pub fn add_bar(&mut self, name: &str, i: &str, j: &str) -> SolverResult<&mut Self> {
        for node in [i, j] {
            if !self.node_index.contains_key(node) {
                return Err(SolverError::NodeNotFound(node.to_string()));
            }
        }
        if self.bars.iter().any(|b| b.name == name) {
            return Err(SolverError::DuplicateName(name.to_string()));
        }
        self.bars.push(Bar {
            name: name.to_string(),
            i: i.to_string(),
            j: j.to_string(),
        });
        Ok(self)
    }

    /// Add a support at an existing joint; a joint carries at most one
    pub fn add_support(&mut self, node: &str, kind: SupportKind) -> SolverResult<&mut Self> {
        if !self.node_index.contains_key(node) {
            return Err(SolverError::NodeNotFound(node.to_string()));
        }
        if self.supports.iter().any(|(n, _)| n == node) {
            return Err(SolverError::DuplicateName(node.to_string()));
        }
        self.supports.push((node.to_string(), kind));
        Ok(self)
    }

    /// Apply a load `(fx, fy)` at an existing joint
    pub fn add_load(&mut self, node: &str, fx: f64, fy: f64) -> SolverResult<&mut Self> {
        if !self.node_index.contains_key(node) {
            return Err(SolverError::NodeNotFound(node.to_string()));
        }
        self.loads.insert(node.to_string(), (fx, fy));
        Ok(self)
    }

    fn coords(&self, name: &str) -> (f64, f64) {
        let node = &self.nodes[self.node_index[name]];
        (node.x, node.y)
    }

    /// Solve bar forces and reactions by the method of joints
    pub fn solve(&self) -> SolverResult<TrussResult> {
        if self.nodes.len() < 2 || self.bars.is_empty() {
            return Err(SolverError::InvalidInput(
                "a truss needs at least two nodes and one bar".to_string(),
            ));
        }

        let mut diagnostics = Vec::new();
        let mut registry = SymbolRegistry::new();

        let bar_unknowns: Vec<Unknown> = self
            .bars
            .iter()
            .map(|b| registry.declare_one(&format!("N_{}", b.name)))
            .collect();

        let mut reaction_unknowns: Vec<(String, Unknown)> = Vec::new();
        for (node, kind) in &self.supports {
            if *kind == SupportKind::Pinned {
                let name = format!("Rx_{node}");
                let u = registry.declare_one(&name);
                reaction_unknowns.push((name, u));
            }
            let name = format!("Ry_{node}");
            let u = registry.declare_one(&name);
            reaction_unknowns.push((name, u));
        }
        let reaction_lookup: HashMap<&str, Unknown> = reaction_unknowns
            .iter()
            .map(|(name, u)| (name.as_str(), *u))
            .collect();

        // Two force-balance equations per node
        let mut system = EquationSystem::new();
        for node in &self.nodes {
            let mut eq_fx = Equation::new();
            let mut eq_fy = Equation::new();

            for (bar, unknown) in self.bars.iter().zip(&bar_unknowns) {
                if bar.i != node.name && bar.j != node.name {
                    continue;
                }
                let (xi, yi) = self.coords(&bar.i);
                let (xj, yj) = self.coords(&bar.j);
                let (dx, dy) = (xj - xi, yj - yi);
                let length = dx.hypot(dy);
                if length == 0.0 {
                    // Coincident endpoints contribute nothing to the joint
                    log::debug!("bar '{}' has zero length, skipped", bar.name);
                    continue;
                }
                // Direction from i to j, sign flipped at the head
                let sign = if bar.i == node.name { 1.0 } else { -1.0 };
                eq_fx = eq_fx.term(*unknown, sign * dx / length);
                eq_fy = eq_fy.term(*unknown, sign * dy / length);
            }

            if let Some(&rx) = reaction_lookup.get(format!("Rx_{}", node.name).as_str()) {
                eq_fx = eq_fx.term(rx, 1.0);
            }
            if let Some(&ry) = reaction_lookup.get(format!("Ry_{}", node.name).as_str()) {
                eq_fy = eq_fy.term(ry, 1.0);
            }

            let (fx, fy) = self.loads.get(&node.name).copied().unwrap_or((0.0, 0.0));
            system.push(eq_fx.equals(fx));
            system.push(eq_fy.equals(fy));
        }

        if system.len() != registry.len() {
            raise(
                &mut diagnostics,
                Diagnostic::NonIsostatic {
                    equations: system.len(),
                    unknowns: registry.len(),
                },
            );
        }

        let solution = system.solve(registry.len())?;

        let bar_forces: Vec<BarForce> = self
            .bars
            .iter()
            .zip(&bar_unknowns)
            .map(|(bar, unknown)| {
                let force = solution.value(*unknown);
                BarForce {
                    bar: bar.name.clone(),
                    force,
                    nature: classify(force),
                }
            })
            .collect();

        let reactions: Vec<ReactionComponent> = reaction_unknowns
            .iter()
            .map(|(name, u)| ReactionComponent {
                name: name.clone(),
                value: solution.value(*u),
            })
            .collect();

        let max_force = bar_forces
            .iter()
            .max_by(|a, b| a.force.abs().partial_cmp(&b.force.abs()).unwrap())
            .cloned();

        log::debug!(
            "truss solved: {} bars, {} reaction components",
            bar_forces.len(),
            reactions.len()
        );

        Ok(TrussResult {
            bar_forces,
            reactions,
            max_force,
            diagnostics,
        })
    }
}

fn classify(force: f64) -> ForceNature {
    const TOL: f64 = 1e-9;
    if force > TOL {
        ForceNature::Tension
    } else if force < -TOL {
        ForceNature::Compression
    } else {
        ForceNature::Null
    }
}

/// Full output of a truss solve
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrussResult {
    /// Signed axial force per bar, in bar insertion order
    pub bar_forces: Vec<BarForce>,
    /// Reaction components in support declaration order
    pub reactions: Vec<ReactionComponent>,
    /// Bar with the largest force magnitude
    pub max_force: Option<BarForce>,
    /// Non-fatal warnings collected during the solve
    pub diagnostics: Vec<Diagnostic>,
}

impl TrussResult {
    /// Signed force in a bar by name
    pub fn force_in(&self, bar: &str) -> Option<f64> {
        self.bar_forces
            .iter()
            .find(|b| b.bar == bar)
            .map(|b| b.force)
    }

    /// Reaction component value by name, e.g. `Ry_A`
    pub fn reaction(&self, name: &str) -> Option<f64> {
        self.reactions
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.value)
    }
}
