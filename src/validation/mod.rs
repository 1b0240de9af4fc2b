//! # Path Validation
//!
//! A [`PathValidation`] checks a path and returns the part of it that can
//! be trusted: the whole path, or the longest collision-free prefix (suffix
//! when validating in reverse).
//!
//! ## Implementations
//!
//! | Validator | Module | Description |
//! |-----------|--------|-------------|
//! | `DiscretizedValidation` | `discretized` | samples the path against obstacles |
//! | `GraphPathValidation` | `graph` | wraps another validator, re-checks graph states |

pub mod discretized;
pub mod graph;

use std::fmt::{self, Debug};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::model::{Configuration, Path};
use crate::Result;

pub use discretized::DiscretizedValidation;
pub use graph::GraphPathValidation;

// ============================================================================
// Obstacles
// ============================================================================

/// Forbidden region of configuration space.
pub trait Obstacle: Debug + Send + Sync {
    fn name(&self) -> &str;

    fn collides(&self, q: &Configuration) -> bool;
}

/// Axis-aligned box `min <= q <= max` in configuration space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxObstacle {
    pub name: String,
    pub min: Configuration,
    pub max: Configuration,
}

impl BoxObstacle {
    pub fn new(name: impl Into<String>, min: Configuration, max: Configuration) -> Self {
        Self { name: name.into(), min, max }
    }
}

impl Obstacle for BoxObstacle {
    fn name(&self) -> &str {
        &self.name
    }

    fn collides(&self, q: &Configuration) -> bool {
        q.dim() == self.min.dim()
            && q.iter()
                .zip(self.min.iter().zip(self.max.iter()))
                .all(|(x, (lo, hi))| x >= lo && x <= hi)
    }
}

// ============================================================================
// Validation result
// ============================================================================

/// Why a path was truncated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub obstacle: String,
    /// Path time of the first colliding configuration found.
    pub time: f64,
    pub config: Configuration,
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "collision with '{}' at t = {} ({})", self.obstacle, self.time, self.config)
    }
}

/// Outcome of validating one path.
#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    /// The whole path was accepted.
    pub valid: bool,
    /// The accepted part. Equal to the input when `valid`.
    pub valid_part: Path,
    pub report: Option<ValidationReport>,
}

impl Validation {
    pub fn accepted(path: Path) -> Self {
        Self { valid: true, valid_part: path, report: None }
    }

    pub fn truncated(valid_part: Path, report: Option<ValidationReport>) -> Self {
        Self { valid: false, valid_part, report }
    }
}

// ============================================================================
// PathValidation Trait
// ============================================================================

pub trait PathValidation {
    /// Validate `path`, from its start, or from its end when `reverse`.
    fn validate(&self, path: &Path, reverse: bool) -> Result<Validation>;

    /// Register an obstacle for all later validations.
    fn add_obstacle(&mut self, obstacle: Arc<dyn Obstacle>) -> Result<()>;
}
