//! Steering through the constraint graph.
//!
//! Both configurations are classified; the edges between the two states are
//! then asked, one at a time, to build a path. The first path built wins.

use std::sync::Arc;

use super::SteeringMethod;
use crate::config::{EdgeOrder, SteeringConfig};
use crate::graph::{ConstraintGraph, EdgeId, StateId};
use crate::model::{Configuration, Path};

#[derive(Debug, Clone)]
pub struct GraphSteeringMethod {
    graph: Arc<ConstraintGraph>,
    config: SteeringConfig,
}

impl GraphSteeringMethod {
    pub fn new(graph: Arc<ConstraintGraph>) -> Self {
        Self::with_config(graph, SteeringConfig::default())
    }

    pub fn with_config(graph: Arc<ConstraintGraph>, config: SteeringConfig) -> Self {
        Self { graph, config }
    }

    pub fn graph(&self) -> &Arc<ConstraintGraph> {
        &self.graph
    }

    pub fn config(&self) -> &SteeringConfig {
        &self.config
    }

    fn classify(&self, q: &Configuration, role: &'static str) -> Option<StateId> {
        match self.graph.classify(q) {
            Ok(state) => Some(state),
            Err(e) => {
                tracing::debug!(graph = %self.graph.name(), role, error = %e, "classification failed");
                None
            }
        }
    }

    fn try_edge(&self, id: EdgeId, q1: &Configuration, q2: &Configuration) -> Option<Path> {
        let edge = self.graph.edge(id)?;
        let path = edge.build(q1, q2);
        if path.is_none() {
            tracing::trace!(edge = %edge.name, "edge failed to build a path");
        }
        path
    }
}

impl SteeringMethod for GraphSteeringMethod {
    fn compute(&self, q1: &Configuration, q2: &Configuration) -> Option<Path> {
        let from = self.classify(q1, "start")?;
        let to = self.classify(q2, "goal")?;

        let candidates = self.graph.edges_between(from, to);
        if candidates.is_empty() {
            tracing::debug!(
                from = %self.graph.state_name(from),
                to = %self.graph.state_name(to),
                "no edge found"
            );
            return None;
        }

        match self.config.edge_order {
            EdgeOrder::LastFirst => candidates
                .iter()
                .rev()
                .find_map(|id| self.try_edge(*id, q1, q2)),
            EdgeOrder::FirstFirst => candidates
                .iter()
                .find_map(|id| self.try_edge(*id, q1, q2)),
        }
    }
}
