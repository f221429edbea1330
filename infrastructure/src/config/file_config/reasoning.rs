//! Reasoning service configuration from TOML (`[reasoning]` section)
//!
//! When no endpoint is configured the engine runs fully offline and every
//! rationale uses the deterministic template.

use pacekeeper_domain::GoalLimits;
use serde::{Deserialize, Serialize};

/// `[reasoning]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReasoningConfig {
    /// Base URL of the reasoning service; None means offline
    pub endpoint: Option<String>,
    /// Bound on the goal-safety call
    pub goal_timeout_ms: u64,
    /// HTTP request timeout per call
    pub request_timeout_ms: u64,

    // Heuristic goal-screen limits (also the service-down fallback)
    pub max_loss_kg_per_week: f64,
    pub max_gain_kg_per_week: f64,
    pub min_sleep_hours: f64,
}

impl Default for FileReasoningConfig {
    fn default() -> Self {
        let limits = GoalLimits::default();
        Self {
            endpoint: None,
            goal_timeout_ms: 3000,
            request_timeout_ms: 2000,
            max_loss_kg_per_week: limits.max_loss_kg_per_week,
            max_gain_kg_per_week: limits.max_gain_kg_per_week,
            min_sleep_hours: limits.min_sleep_hours,
        }
    }
}

impl FileReasoningConfig {
    pub fn goal_limits(&self) -> GoalLimits {
        GoalLimits {
            max_loss_kg_per_week: self.max_loss_kg_per_week,
            max_gain_kg_per_week: self.max_gain_kg_per_week,
            min_sleep_hours: self.min_sleep_hours,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_offline() {
        let config = FileReasoningConfig::default();
        assert!(config.endpoint.is_none());
        assert_eq!(config.goal_limits(), GoalLimits::default());
    }

    #[test]
    fn test_endpoint_override() {
        let config: FileReasoningConfig =
            toml::from_str(r#"endpoint = "http://localhost:8600""#).unwrap();
        assert_eq!(config.endpoint.as_deref(), Some("http://localhost:8600"));
    }
}
