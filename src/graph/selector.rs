//! State classification.
//!
//! Constraint sets of different states may overlap, so a configuration can
//! belong to several of them. States are therefore kept in priority order
//! and a configuration is assigned to the first state that accepts it.

use serde::{Deserialize, Serialize};

use super::State;
use crate::model::{Configuration, StateId};

/// No state of the graph accepts a configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("No state of graph '{graph}' contains configuration {config}")]
pub struct ClassificationError {
    pub graph: String,
    pub config: Configuration,
}

/// Priority-ordered list of the states considered for classification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSelector {
    ordered: Vec<StateId>,
}

impl StateSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append at the lowest priority.
    pub fn push(&mut self, state: StateId) {
        self.ordered.push(state);
    }

    pub fn states(&self) -> &[StateId] {
        &self.ordered
    }

    /// First state, by priority, whose constraints hold at `config`.
    ///
    /// `states` is the arena `StateId`s index into.
    pub fn classify(
        &self,
        graph: &str,
        states: &[State],
        config: &Configuration,
    ) -> Result<StateId, ClassificationError> {
        self.ordered
            .iter()
            .copied()
            .find(|id| states.get(id.index()).is_some_and(|s| s.contains(config)))
            .ok_or_else(|| ClassificationError {
                graph: graph.to_string(),
                config: config.clone(),
            })
    }
}
