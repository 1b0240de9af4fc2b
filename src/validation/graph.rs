//! Path validation aware of the constraint graph.
//!
//! Collision checking alone may cut a path in the middle of a transition.
//! The collision-free part is only kept when its endpoints fall into the
//! same states as the endpoints of the path it was cut from; otherwise it
//! would stand for a different transition than the one that built the
//! path, and the result degrades to a zero-length path at the start.
//!
//! ```text
//!   path         q0 ─────────────────────── q1        free → grasped
//!   collision    q0 ──────────── qc ╳╳╳╳╳╳╳╳          valid part [q0, qc]
//!   reconcile    state(q0) == free, state(qc) == grasped ?  keep : [q0, q0]
//! ```

use std::sync::Arc;

use super::{Obstacle, PathValidation, Validation};
use crate::graph::{ClassificationError, ConstraintGraph};
use crate::model::{Configuration, LeafPath, Path, PathVector, TimeRange, TIME_EPS};
use crate::{Error, Result};

/// Wraps a low-level validator `V`.
#[derive(Debug, Clone)]
pub struct GraphPathValidation<V> {
    inner: V,
    graph: Arc<ConstraintGraph>,
}

impl<V: PathValidation> GraphPathValidation<V> {
    pub fn new(inner: V, graph: Arc<ConstraintGraph>) -> Self {
        Self { inner, graph }
    }

    pub fn inner(&self) -> &V {
        &self.inner
    }

    pub fn graph(&self) -> &Arc<ConstraintGraph> {
        &self.graph
    }

    fn validate_path(&self, path: &Path, reverse: bool) -> Result<Validation> {
        match path {
            Path::Leaf(leaf) => self.validate_leaf(path, leaf, reverse),
            Path::Composite(vector) => self.validate_composite(path, vector, reverse),
        }
    }

    /// Sub-paths are validated in order (reverse order when `reverse`) and
    /// the first one that is not fully valid truncates the result.
    ///
    /// In reverse, a zero-length part of the failing sub-path is moved to
    /// that sub-path's end so the kept suffix stays contiguous.
    fn validate_composite(&self, path: &Path, vector: &PathVector, reverse: bool) -> Result<Validation> {
        let subs = vector.paths();
        if subs.is_empty() {
            return Err(Error::InvalidPath("cannot validate an empty path vector".into()));
        }
        if reverse {
            for (i, sub) in subs.iter().enumerate().rev() {
                let outcome = self.validate_path(sub, true)?;
                if !outcome.valid {
                    let head = if outcome.valid_part.length() <= TIME_EPS {
                        sub.extract(TimeRange::point(sub.time_range().end))?
                    } else {
                        outcome.valid_part
                    };
                    let part = PathVector::from_paths(
                        vector.output_size(),
                        std::iter::once(head).chain(subs[i + 1..].iter().cloned()),
                    )?;
                    return Ok(Validation::truncated(part.into(), outcome.report));
                }
            }
        } else {
            for (i, sub) in subs.iter().enumerate() {
                let outcome = self.validate_path(sub, false)?;
                if !outcome.valid {
                    let part = PathVector::from_paths(
                        vector.output_size(),
                        subs[..i].iter().cloned().chain(std::iter::once(outcome.valid_part)),
                    )?;
                    return Ok(Validation::truncated(part.into(), outcome.report));
                }
            }
        }
        Ok(Validation::accepted(path.clone()))
    }

    fn validate_leaf(&self, path: &Path, leaf: &LeafPath, reverse: bool) -> Result<Validation> {
        let checked = self.inner.validate(path, reverse)?;
        if checked.valid {
            return Ok(Validation::accepted(path.clone()));
        }
        let collision_free = checked.valid_part;
        let report = checked.report;
        let range = path.time_range();
        let part_range = collision_free.time_range();

        let q = eval_endpoint(&collision_free, part_range.start, "initial configuration of the valid part")?;
        let orig_state = self.graph.classify(&q)?;
        let q = eval_endpoint(&collision_free, part_range.end, "end configuration of the valid part")?;
        // Path constraints looser than state constraints can leave a
        // collision-free configuration outside every state.
        let dest_state = match self.graph.classify(&q) {
            Ok(state) => state,
            Err(e) => {
                self.log_relaxed_constraints(leaf, &e);
                let empty = path.extract(TimeRange::point(range.start))?;
                return Ok(Validation::truncated(empty, report));
            }
        };

        let q = eval_endpoint(path, range.start, "initial configuration of the path to be validated")?;
        let old_orig = self.graph.classify(&q)?;
        let q = eval_endpoint(path, range.end, "end configuration of the path to be validated")?;
        let old_dest = self.graph.classify(&q)?;

        if orig_state == old_orig && dest_state == old_dest {
            return Ok(Validation::truncated(collision_free, report));
        }

        tracing::debug!(
            graph = %self.graph.name(),
            expected = %format!("{} -> {}", self.graph.state_name(old_orig), self.graph.state_name(old_dest)),
            found = %format!("{} -> {}", self.graph.state_name(orig_state), self.graph.state_name(dest_state)),
            "valid part belongs to another transition"
        );
        let empty = path.extract(TimeRange::point(range.start))?;
        Ok(Validation::truncated(empty, report))
    }

    fn log_relaxed_constraints(&self, leaf: &LeafPath, error: &ClassificationError) {
        match leaf.edge().and_then(|id| self.graph.edge(id)) {
            Some(edge) => {
                tracing::error!(edge = %edge.name, %error, "edge generated an error");
                tracing::error!(
                    edge = %edge.name,
                    state = %self.graph.state_name(edge.path_state),
                    "likely, the constraints for paths are relaxed; if this problem occurs often, \
                     use the same constraints for the state and the paths of this edge"
                );
            }
            None => {
                tracing::error!(%error, "valid part of a path not built by any edge cannot be classified");
            }
        }
    }

    /// Both ends of a returned part must classify.
    #[cfg(debug_assertions)]
    fn check_endpoints(&self, part: &Path) {
        for (end, q) in [("start", part.initial()), ("end", part.end())] {
            let classified = q.as_ref().is_ok_and(|q| self.graph.classify(q).is_ok());
            if !classified {
                tracing::error!(graph = %self.graph.name(), end, "valid part cannot be classified");
            }
        }
    }
}

impl<V: PathValidation> PathValidation for GraphPathValidation<V> {
    fn validate(&self, path: &Path, reverse: bool) -> Result<Validation> {
        let outcome = self.validate_path(path, reverse)?;
        #[cfg(debug_assertions)]
        self.check_endpoints(&outcome.valid_part);
        Ok(outcome)
    }

    fn add_obstacle(&mut self, obstacle: Arc<dyn Obstacle>) -> Result<()> {
        self.inner.add_obstacle(obstacle)
    }
}

/// Evaluate `path` at `t`, labelling projection failures with `what`.
fn eval_endpoint(path: &Path, t: f64, what: &str) -> Result<Configuration> {
    path.eval(t).map_err(|e| match e {
        Error::Projection { time, context } => Error::Projection {
            time,
            context: format!("{what} cannot be projected: {context}"),
        },
        other => other,
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::{ConstraintSet, JointRange};
    use crate::graph::StateId;
    use crate::validation::{BoxObstacle, DiscretizedValidation};

    /// `right` (x >= 0.5) has priority over the catch-all `left`.
    fn graph() -> (Arc<ConstraintGraph>, StateId, StateId) {
        let mut graph = ConstraintGraph::new("halves");
        let right = graph.add_state("right", ConstraintSet::new("right").with(JointRange::new(0, 0.5, 10.0)));
        let left = graph.add_state("left", ConstraintSet::new("left"));
        (Arc::new(graph), left, right)
    }

    fn leaf(from: [f64; 2], to: [f64; 2]) -> Path {
        LeafPath::over(from.into(), to.into(), TimeRange::new(0.0, 1.0)).into()
    }

    fn wall(lo: f64, hi: f64) -> Arc<dyn Obstacle> {
        Arc::new(BoxObstacle::new("wall", [lo, -1.0].into(), [hi, 1.0].into()))
    }

    #[test]
    fn test_collision_free_leaf_is_returned_unchanged() {
        let (graph, _, _) = graph();
        let validation = GraphPathValidation::new(DiscretizedValidation::new(0.1), graph);
        let path = leaf([0.0, 0.0], [1.0, 0.0]);
        let outcome = validation.validate(&path, false).unwrap();
        assert!(outcome.valid);
        assert_eq!(outcome.valid_part, path);
    }

    #[test]
    fn test_prefix_in_same_states_is_kept() {
        let (graph, _, _) = graph();
        let mut validation = GraphPathValidation::new(DiscretizedValidation::new(0.25), graph);
        validation.add_obstacle(wall(0.2, 0.3)).unwrap();

        // left → left all the way; samples 0, .25, .5 → x = 0.2 collides
        let path = leaf([0.0, 0.0], [0.4, 0.0]);
        let outcome = validation.validate(&path, false).unwrap();
        assert!(!outcome.valid);
        assert_eq!(outcome.valid_part.time_range(), TimeRange::new(0.0, 0.25));
        assert_eq!(outcome.report.unwrap().obstacle, "wall");
    }

    #[test]
    fn test_prefix_kept_only_for_same_transition() {
        let (graph, _, _) = graph();
        let mut validation = GraphPathValidation::new(DiscretizedValidation::new(0.25), graph);
        validation.add_obstacle(wall(0.7, 0.8)).unwrap();

        // left → right; collision-free prefix ends at x = 0.5 which is right,
        // so the prefix is left → right as well and is kept.
        let path = leaf([0.0, 0.0], [1.0, 0.0]);
        let outcome = validation.validate(&path, false).unwrap();
        assert!(!outcome.valid);
        assert_eq!(outcome.valid_part.time_range(), TimeRange::new(0.0, 0.5));

        // Wall earlier: prefix ends at x = 0.25, left → left ≠ left → right.
        let mut validation = GraphPathValidation::new(DiscretizedValidation::new(0.25), validation.graph().clone());
        validation.add_obstacle(wall(0.45, 0.55)).unwrap();
        let outcome = validation.validate(&path, false).unwrap();
        assert!(!outcome.valid);
        assert_eq!(outcome.valid_part.time_range(), TimeRange::point(0.0));
    }

    #[test]
    fn test_add_obstacle_forwards() {
        let (graph, _, _) = graph();
        let mut validation = GraphPathValidation::new(DiscretizedValidation::new(0.1), graph);
        validation.add_obstacle(wall(0.0, 0.1)).unwrap();
        assert_eq!(validation.inner().obstacles().len(), 1);
    }

    #[test]
    fn test_empty_composite_is_rejected() {
        let (graph, _, _) = graph();
        let validation = GraphPathValidation::new(DiscretizedValidation::new(0.1), graph);
        let path: Path = PathVector::new(2).into();
        for reverse in [false, true] {
            let err = validation.validate(&path, reverse).unwrap_err();
            assert!(matches!(err, Error::InvalidPath(_)), "got {err:?}");
        }
    }

    #[test]
    fn test_eval_endpoint_labels_projection_errors() {
        let constraints = Arc::new(ConstraintSet::new("tight").with(JointRange::new(0, 5.0, 6.0)));
        let path: Path = LeafPath::over([0.0].into(), [1.0].into(), TimeRange::new(0.0, 1.0))
            .with_constraints(constraints)
            .into();
        let err = eval_endpoint(&path, 0.0, "initial configuration").unwrap_err();
        assert!(err.is_fatal());
        assert!(err.to_string().contains("initial configuration cannot be projected"));
    }
}
