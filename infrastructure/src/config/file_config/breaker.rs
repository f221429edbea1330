//! Circuit breaker configuration from TOML (`[breaker]` section)
//!
//! Example:
//!
//! ```toml
//! [[breaker.rules]]
//! all_of = ["critical_sleep", "high_stress"]
//! block = ["fitness"]
//! reason = "critical sleep debt combined with high stress"
//! ```

use super::engine::{parse_constraint, parse_domain};
use crate::config::ConfigError;
use pacekeeper_domain::{BreakerRule, CircuitBreaker};
use serde::{Deserialize, Serialize};

/// One breaker rule as written in TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileBreakerRule {
    pub all_of: Vec<String>,
    pub block: Vec<String>,
    pub reason: String,
}

/// `[breaker]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FileBreakerConfig {
    /// Empty means the built-in rules apply
    pub rules: Vec<FileBreakerRule>,
}

impl FileBreakerConfig {
    pub fn rules(&self) -> Result<Vec<BreakerRule>, ConfigError> {
        if self.rules.is_empty() {
            return Ok(CircuitBreaker::standard().rules().to_vec());
        }

        let mut rules = Vec::new();
        for rule in &self.rules {
            rules.push(BreakerRule {
                all_of: rule
                    .all_of
                    .iter()
                    .map(|c| parse_constraint(c))
                    .collect::<Result<Vec<_>, _>>()?,
                block: rule
                    .block
                    .iter()
                    .map(|d| parse_domain(d))
                    .collect::<Result<Vec<_>, _>>()?,
                reason: rule.reason.clone(),
            });
        }
        Ok(rules)
    }
}
