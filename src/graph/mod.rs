//! # Constraint Graph
//!
//! States and edges live in two arenas owned by [`ConstraintGraph`]; they
//! refer to each other by [`StateId`] / [`EdgeId`] only. The graph is
//! authored through `&mut self`, then frozen behind an `Arc` and shared
//! read-only by steering methods and validators.
//!
//! ```text
//!   states: [s0 free] [s1 grasped]          selector: s1, s0   (priority)
//!   edges:  [e0 pick s0→s1] [e1 place s1→s0]
//!   transitions: (s0,s1) → [e0], (s1,s0) → [e1]
//! ```

pub mod selector;

use std::fmt;
use std::sync::Arc;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::constraint::ConstraintSet;
use crate::model::{Configuration, Path};
use crate::steering::{SteeringMethod, StraightSteering};
use crate::{Error, Result};

pub use crate::model::{EdgeId, StateId};
pub use selector::{ClassificationError, StateSelector};

// ============================================================================
// State
// ============================================================================

/// A task mode: the region of configuration space where `constraints` hold.
#[derive(Debug, Clone)]
pub struct State {
    pub id: StateId,
    pub name: String,
    pub constraints: ConstraintSet,
    /// Edges leaving this state, in authoring order.
    pub out_edges: Vec<EdgeId>,
}

impl State {
    pub fn new(id: StateId, name: impl Into<String>, constraints: ConstraintSet) -> Self {
        Self {
            id,
            name: name.into(),
            constraints,
            out_edges: Vec::new(),
        }
    }

    pub fn contains(&self, q: &Configuration) -> bool {
        self.constraints.is_satisfied(q)
    }
}

// ============================================================================
// Edge
// ============================================================================

/// A directed transition between two states.
#[derive(Clone)]
pub struct Edge {
    pub id: EdgeId,
    pub name: String,
    pub from: StateId,
    pub to: StateId,
    /// State whose region the paths of this edge run through.
    pub path_state: StateId,
    /// Constraints every path of this edge satisfies.
    pub constraints: Arc<ConstraintSet>,
    steering: Arc<dyn SteeringMethod>,
}

impl Edge {
    /// Build a path from `q1` to `q2` under this edge's constraints.
    ///
    /// Returns `None` when either endpoint violates the path constraints or
    /// the local steering method fails. The endpoints of a built path are not
    /// checked against `from` / `to`.
    pub fn build(&self, q1: &Configuration, q2: &Configuration) -> Option<Path> {
        if !self.constraints.is_satisfied(q1) || !self.constraints.is_satisfied(q2) {
            tracing::trace!(edge = %self.name, "endpoints violate the path constraints");
            return None;
        }
        self.steering.compute(q1, q2).map(|path| path.with_edge(self.id))
    }

    pub fn steering(&self) -> &Arc<dyn SteeringMethod> {
        &self.steering
    }
}

impl fmt::Debug for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Edge")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("from", &self.from)
            .field("to", &self.to)
            .field("path_state", &self.path_state)
            .field("constraints", &self.constraints.name())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// ConstraintGraph
// ============================================================================

/// Arena of states and edges.
#[derive(Debug, Clone)]
pub struct ConstraintGraph {
    name: String,
    states: Vec<State>,
    edges: Vec<Edge>,
    selector: StateSelector,
    /// (from, to) → parallel edges, in authoring order
    transitions: HashMap<(StateId, StateId), SmallVec<[EdgeId; 2]>>,
}

impl ConstraintGraph {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            states: Vec::new(),
            edges: Vec::new(),
            selector: StateSelector::new(),
            transitions: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // ========================================================================
    // Authoring
    // ========================================================================

    /// Add a state at the lowest classification priority so far.
    pub fn add_state(&mut self, name: impl Into<String>, constraints: ConstraintSet) -> StateId {
        let id = StateId(self.states.len() as u32);
        self.states.push(State::new(id, name, constraints));
        self.selector.push(id);
        id
    }

    /// Add an edge whose paths are straight interpolations projected onto
    /// `constraints`.
    pub fn add_edge(
        &mut self,
        name: impl Into<String>,
        from: StateId,
        to: StateId,
        constraints: ConstraintSet,
    ) -> Result<EdgeId> {
        let constraints = Arc::new(constraints);
        let steering = Arc::new(StraightSteering::constrained(constraints.clone()));
        self.insert_edge(name.into(), from, to, constraints, steering)
    }

    /// Add an edge with its own local steering method.
    pub fn add_edge_with_steering(
        &mut self,
        name: impl Into<String>,
        from: StateId,
        to: StateId,
        constraints: ConstraintSet,
        steering: Arc<dyn SteeringMethod>,
    ) -> Result<EdgeId> {
        self.insert_edge(name.into(), from, to, Arc::new(constraints), steering)
    }

    fn insert_edge(
        &mut self,
        name: String,
        from: StateId,
        to: StateId,
        constraints: Arc<ConstraintSet>,
        steering: Arc<dyn SteeringMethod>,
    ) -> Result<EdgeId> {
        self.check_state(from)?;
        self.check_state(to)?;

        let id = EdgeId(self.edges.len() as u32);
        self.edges.push(Edge {
            id,
            name,
            from,
            to,
            path_state: from,
            constraints,
            steering,
        });
        self.states[from.index()].out_edges.push(id);
        self.transitions.entry((from, to)).or_default().push(id);
        Ok(id)
    }

    pub fn set_path_state(&mut self, edge: EdgeId, state: StateId) -> Result<()> {
        self.check_state(state)?;
        let edge = self
            .edges
            .get_mut(edge.index())
            .ok_or_else(|| Error::NotFound(format!("Edge {edge}")))?;
        edge.path_state = state;
        Ok(())
    }

    fn check_state(&self, id: StateId) -> Result<()> {
        if id.index() < self.states.len() {
            Ok(())
        } else {
            Err(Error::NotFound(format!("State {id} in graph '{}'", self.name)))
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// The state `config` belongs to.
    pub fn classify(&self, config: &Configuration) -> std::result::Result<StateId, ClassificationError> {
        self.selector.classify(&self.name, &self.states, config)
    }

    /// Edges from `from` to `to`, in authoring order. Empty if unreachable.
    pub fn edges_between(&self, from: StateId, to: StateId) -> &[EdgeId] {
        self.transitions
            .get(&(from, to))
            .map(|edges| edges.as_slice())
            .unwrap_or(&[])
    }

    pub fn state(&self, id: StateId) -> Option<&State> {
        self.states.get(id.index())
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.index())
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn selector(&self) -> &StateSelector {
        &self.selector
    }

    pub fn state_by_name(&self, name: &str) -> Option<&State> {
        self.states.iter().find(|s| s.name == name)
    }

    pub fn edge_by_name(&self, name: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.name == name)
    }

    /// Display name of a state, for diagnostics.
    pub fn state_name(&self, id: StateId) -> &str {
        self.state(id).map_or("<unknown state>", |s| s.name.as_str())
    }
}

// ============================================================================
// Tests
// ============================================================================
