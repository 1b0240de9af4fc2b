//! # manip-graph — constraint-graph steering and path validation
//!
//! Manipulation planning moves a robot between *states* of a constraint
//! graph ("object on the table", "object in gripper A", ...). Each state is a
//! region of configuration space defined by a constraint set, and each
//! directed *edge* knows how to build a path that respects its own
//! constraints.
//!
//! This crate provides the two pieces that make such a graph usable from a
//! sampling planner:
//!
//! 1. [`GraphSteeringMethod`]: classify two configurations into states and
//!    try the edges between them until one builds a path.
//! 2. [`GraphPathValidation`]: wrap a low-level collision validator and make
//!    sure a truncated, collision-free part of a path still represents the
//!    same transition as the path it was cut from.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use manip_graph::{
//!     BoxObstacle, Configuration, ConstraintGraph, ConstraintSet, DiscretizedValidation,
//!     GraphPathValidation, GraphSteeringMethod, JointRange, PathValidation, SteeringMethod,
//! };
//!
//! # fn example() -> manip_graph::Result<()> {
//! let mut graph = ConstraintGraph::new("pick");
//! let grasped = graph.add_state(
//!     "grasped",
//!     ConstraintSet::new("grasped").with(JointRange::new(1, 0.9, 1.1)),
//! );
//! let free = graph.add_state("free", ConstraintSet::new("free"));
//! graph.add_edge("pick", free, grasped, ConstraintSet::new("pick"))?;
//! let graph = Arc::new(graph);
//!
//! let steering = GraphSteeringMethod::new(graph.clone());
//! let q1 = Configuration::from([0.0, 0.0]);
//! let q2 = Configuration::from([1.0, 1.0]);
//! let path = steering.compute(&q1, &q2).expect("pick edge builds");
//!
//! let mut validation = GraphPathValidation::new(DiscretizedValidation::new(0.05), graph);
//! validation.add_obstacle(Arc::new(BoxObstacle::new(
//!     "crate",
//!     Configuration::from([0.4, -1.0]),
//!     Configuration::from([0.6, 2.0]),
//! )))?;
//! let outcome = validation.validate(&path, false)?;
//! assert!(!outcome.valid);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Collaborators
//!
//! | Seam | Trait | Reference implementation |
//! |------|-------|--------------------------|
//! | State membership | [`Constraint`] | [`LockedJoint`], [`JointRange`], [`FnConstraint`] |
//! | Local steering | [`SteeringMethod`] | [`StraightSteering`] |
//! | Collision checking | [`PathValidation`] | [`DiscretizedValidation`] |
//! | Obstacles | [`Obstacle`] | [`BoxObstacle`] |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod constraint;
pub mod graph;
pub mod steering;
pub mod validation;
pub mod config;
pub mod export;

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{Configuration, LeafPath, Path, PathVector, TimeRange};

// ============================================================================
// Re-exports: Constraints and graph
// ============================================================================

pub use constraint::{Constraint, ConstraintSet, FnConstraint, JointRange, LockedJoint};
pub use graph::{ClassificationError, ConstraintGraph, Edge, EdgeId, State, StateId, StateSelector};

// ============================================================================
// Re-exports: Steering and validation
// ============================================================================

pub use steering::{GraphSteeringMethod, SteeringMethod, StraightSteering};
pub use validation::{
    BoxObstacle, DiscretizedValidation, GraphPathValidation, Obstacle, PathValidation,
    Validation, ValidationReport,
};
pub use config::{EdgeOrder, PlannerConfig, SteeringConfig, ValidationConfig};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No state of the graph matches a configuration. Recoverable.
    #[error(transparent)]
    Classification(#[from] ClassificationError),

    /// A path could not be evaluated at `time`. Signals a malformed path and
    /// is never absorbed by this crate.
    #[error("Projection error at time {time}: {context}")]
    Projection { time: f64, context: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Projection failures mean the path itself is corrupt; everything else
    /// has a recovery path at the graph level or is a caller mistake.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Projection { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
