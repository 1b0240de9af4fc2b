//! Built-in constraint kinds.

use std::fmt;
use std::sync::Arc;

use super::Constraint;
use crate::model::Configuration;

/// Default tolerance of equality constraints.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Equality `q[dof] = value`, e.g. a closed gripper or a locked object pose.
#[derive(Debug, Clone)]
pub struct LockedJoint {
    name: String,
    pub dof: usize,
    pub value: f64,
    pub tolerance: f64,
}

impl LockedJoint {
    pub fn new(dof: usize, value: f64) -> Self {
        Self {
            name: format!("locked q[{dof}] = {value}"),
            dof,
            value,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

impl Constraint for LockedJoint {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_satisfied(&self, q: &Configuration) -> bool {
        q.get(self.dof).is_some_and(|x| (x - self.value).abs() <= self.tolerance)
    }

    fn project(&self, q: &mut Configuration) -> bool {
        match q.get_mut(self.dof) {
            Some(x) => {
                *x = self.value;
                true
            }
            None => false,
        }
    }
}

/// Inequality `min <= q[dof] <= max`.
#[derive(Debug, Clone)]
pub struct JointRange {
    name: String,
    pub dof: usize,
    pub min: f64,
    pub max: f64,
}

impl JointRange {
    pub fn new(dof: usize, min: f64, max: f64) -> Self {
        Self {
            name: format!("{min} <= q[{dof}] <= {max}"),
            dof,
            min,
            max,
        }
    }
}

impl Constraint for JointRange {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_satisfied(&self, q: &Configuration) -> bool {
        q.get(self.dof).is_some_and(|x| *x >= self.min && *x <= self.max)
    }
}

/// Named predicate over configurations.
#[derive(Clone)]
pub struct FnConstraint {
    name: String,
    predicate: Arc<dyn Fn(&Configuration) -> bool + Send + Sync>,
}

impl FnConstraint {
    pub fn new(
        name: impl Into<String>,
        predicate: impl Fn(&Configuration) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self { name: name.into(), predicate: Arc::new(predicate) }
    }
}

impl fmt::Debug for FnConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnConstraint").field("name", &self.name).finish_non_exhaustive()
    }
}

impl Constraint for FnConstraint {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_satisfied(&self, q: &Configuration) -> bool {
        (self.predicate)(q)
    }
}
