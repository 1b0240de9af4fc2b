//! # Steering Methods
//!
//! A steering method proposes a path between two configurations, or
//! nothing. Two implementations:
//!
//! | Method | Module | Description |
//! |--------|--------|-------------|
//! | `StraightSteering` | `straight` | local primitive used inside edges |
//! | `GraphSteeringMethod` | `graph` | picks the edge of the constraint graph |

pub mod straight;
pub mod graph;

use crate::model::{Configuration, Path};

pub use graph::GraphSteeringMethod;
pub use straight::StraightSteering;

/// Path proposal between two configurations.
///
/// `None` is an expected outcome ("not connected"), not an error.
pub trait SteeringMethod: Send + Sync {
    fn compute(&self, q1: &Configuration, q2: &Configuration) -> Option<Path>;
}
