//! # Planning Model
//!
//! Plain values that cross every boundary of the crate: configurations,
//! arena identifiers and paths.
//!
//! Design rule: no graph lookups and no collision checking here. A path
//! knows the constraints it projects onto and the edge that built it, and
//! nothing else.

pub mod configuration;
pub mod id;
pub mod path;

pub use configuration::Configuration;
pub use id::{EdgeId, StateId};
pub use path::{LeafPath, Path, PathVector, TimeRange, TIME_EPS};
