//! Straight-line interpolation.

use std::sync::Arc;

use super::SteeringMethod;
use crate::constraint::ConstraintSet;
use crate::model::{Configuration, LeafPath, Path};

/// Interpolates linearly, parametrised by Euclidean distance. With
/// constraints, each evaluated configuration is projected onto them.
#[derive(Debug, Clone, Default)]
pub struct StraightSteering {
    constraints: Option<Arc<ConstraintSet>>,
}

impl StraightSteering {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn constrained(constraints: Arc<ConstraintSet>) -> Self {
        Self { constraints: Some(constraints) }
    }
}

impl SteeringMethod for StraightSteering {
    fn compute(&self, q1: &Configuration, q2: &Configuration) -> Option<Path> {
        if q1.dim() != q2.dim() {
            tracing::debug!(dim1 = q1.dim(), dim2 = q2.dim(), "dimension mismatch");
            return None;
        }
        let leaf = LeafPath::straight(q1.clone(), q2.clone());
        Some(match &self.constraints {
            Some(constraints) => leaf.with_constraints(constraints.clone()).into(),
            None => leaf.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::LockedJoint;

    #[test]
    fn test_unconstrained() {
        let path = StraightSteering::new()
            .compute(&Configuration::from([0.0, 0.0]), &Configuration::from([0.0, 2.0]))
            .unwrap();
        assert_eq!(path.length(), 2.0);
        assert_eq!(path.end().unwrap(), Configuration::from([0.0, 2.0]));
        assert!(path.as_leaf().unwrap().constraints().is_none());
    }

    #[test]
    fn test_constrained_projects_on_eval() {
        let lock = Arc::new(ConstraintSet::new("lock").with(LockedJoint::new(1, 0.5)));
        let path = StraightSteering::constrained(lock)
            .compute(&Configuration::from([0.0, 0.0]), &Configuration::from([1.0, 1.0]))
            .unwrap();
        let mid = path.eval(path.length() / 2.0).unwrap();
        assert_eq!(mid[1], 0.5);
    }

    #[test]
    fn test_dimension_mismatch() {
        let path = StraightSteering::new()
            .compute(&Configuration::from([0.0]), &Configuration::from([0.0, 1.0]));
        assert!(path.is_none());
    }
}
