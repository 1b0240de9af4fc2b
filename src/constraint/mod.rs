//! # Constraints
//!
//! A [`Constraint`] answers two questions about a configuration: is it
//! satisfied, and can the configuration be moved onto it. States use the
//! first to classify configurations; paths use the second to stay on their
//! edge's manifold while being evaluated.
//!
//! ## Built-in constraints
//!
//! | Constraint | Kind | Projection |
//! |------------|------|------------|
//! | [`LockedJoint`] | equality `q[dof] = value` | sets the coordinate |
//! | [`JointRange`] | inequality `min <= q[dof] <= max` | succeeds only if already satisfied |
//! | [`FnConstraint`] | arbitrary predicate | succeeds only if already satisfied |

pub mod kinds;

use std::fmt::Debug;
use std::sync::Arc;

use crate::model::Configuration;

pub use kinds::{FnConstraint, JointRange, LockedJoint};

// ============================================================================
// Constraint Trait
// ============================================================================

pub trait Constraint: Debug + Send + Sync {
    fn name(&self) -> &str;

    fn is_satisfied(&self, q: &Configuration) -> bool;

    /// Move `q` onto the constraint. Returns `false` when that is not
    /// possible; `q` may have been partially modified in that case.
    fn project(&self, q: &mut Configuration) -> bool {
        self.is_satisfied(q)
    }
}

// ============================================================================
// ConstraintSet
// ============================================================================

/// Named conjunction of constraints. The empty set is satisfied everywhere.
#[derive(Debug, Clone, Default)]
pub struct ConstraintSet {
    name: String,
    constraints: Vec<Arc<dyn Constraint>>,
}

impl ConstraintSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), constraints: Vec::new() }
    }

    pub fn with(mut self, constraint: impl Constraint + 'static) -> Self {
        self.constraints.push(Arc::new(constraint));
        self
    }

    pub fn push(&mut self, constraint: Arc<dyn Constraint>) {
        self.constraints.push(constraint);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Constraint>> {
        self.constraints.iter()
    }

    pub fn is_satisfied(&self, q: &Configuration) -> bool {
        self.constraints.iter().all(|c| c.is_satisfied(q))
    }

    /// Project onto each constraint in order, then re-check the whole set:
    /// a later projection may break an earlier constraint.
    pub fn project(&self, q: &mut Configuration) -> bool {
        for constraint in &self.constraints {
            if !constraint.project(q) {
                return false;
            }
        }
        self.is_satisfied(q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set_is_always_satisfied() {
        let set = ConstraintSet::new("free");
        let mut q = Configuration::from([3.0, -7.0]);
        assert!(set.is_satisfied(&q));
        assert!(set.project(&mut q));
        assert_eq!(q, Configuration::from([3.0, -7.0]));
    }

    #[test]
    fn test_conjunction() {
        let set = ConstraintSet::new("box")
            .with(JointRange::new(0, 0.0, 1.0))
            .with(JointRange::new(1, 0.0, 1.0));
        assert!(set.is_satisfied(&Configuration::from([0.5, 0.5])));
        assert!(!set.is_satisfied(&Configuration::from([0.5, 1.5])));
    }

    #[test]
    fn test_project_locks_then_checks() {
        let set = ConstraintSet::new("placement")
            .with(LockedJoint::new(1, 0.2))
            .with(JointRange::new(0, 0.0, 1.0));
        let mut q = Configuration::from([0.5, 0.9]);
        assert!(set.project(&mut q));
        assert_eq!(q[1], 0.2);

        let mut out = Configuration::from([2.0, 0.9]);
        assert!(!set.project(&mut out));
    }
}
