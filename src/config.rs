//! Planner configuration.
//!
//! Every field has a default, so an empty JSON object is a valid
//! configuration:
//!
//! ```json
//! { "steering": { "edge_order": "last_first" }, "validation": { "step": 0.01 } }
//! ```

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Order in which parallel edges between two states are attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeOrder {
    /// Most recently authored edge first.
    #[default]
    LastFirst,
    /// Edges in authoring order.
    FirstFirst,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringConfig {
    pub edge_order: EdgeOrder,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Sampling step, in path time, of the discretized collision check.
    pub step: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self { step: 0.01 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub steering: SteeringConfig,
    pub validation: ValidationConfig,
}

impl PlannerConfig {
    /// Parse and check a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: PlannerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let step = self.validation.step;
        if !step.is_finite() || step <= 0.0 {
            return Err(Error::Config(format!(
                "validation.step must be a positive number, got {step}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_object_gives_defaults() {
        let config = PlannerConfig::from_json("{}").unwrap();
        assert_eq!(config, PlannerConfig::default());
        assert_eq!(config.steering.edge_order, EdgeOrder::LastFirst);
        assert_eq!(config.validation.step, 0.01);
    }

    #[test]
    fn test_parse_full() {
        let config = PlannerConfig::from_json(
            r#"{ "steering": { "edge_order": "first_first" }, "validation": { "step": 0.05 } }"#,
        )
        .unwrap();
        assert_eq!(config.steering.edge_order, EdgeOrder::FirstFirst);
        assert_eq!(config.validation.step, 0.05);
    }

    #[test]
    fn test_rejects_non_positive_step() {
        let err = PlannerConfig::from_json(r#"{ "validation": { "step": 0.0 } }"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_rejects_unknown_edge_order() {
        let err = PlannerConfig::from_json(r#"{ "steering": { "edge_order": "random" } }"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
