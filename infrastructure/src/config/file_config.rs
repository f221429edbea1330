//! TOML configuration schema
//!
//! Every engine tunable has a `[section]` here with serde defaults, so an
//! empty file (or no file at all) yields the documented default engine.
//!
//! Example configuration:
//!
//! ```toml
//! [engine]
//! critical_sleep_hours = 5.0
//! prioritize_threshold = 0.35
//!
//! [engine.base_weights]
//! recovery = 0.30
//! nutrition = 0.25
//! fitness = 0.25
//! mindfulness = 0.10
//! productivity = 0.10
//!
//! [scorer]
//! stress_coeff = 50.0
//!
//! [temporal]
//! window_days = 7
//! decay = 0.85
//!
//! [reasoning]
//! endpoint = "http://localhost:8600"
//! ```

pub mod breaker;
pub mod council;
pub mod engine;
pub mod reasoning;
pub mod schedule;
pub mod scorer;

pub use breaker::FileBreakerConfig;
pub use council::FileCouncilConfig;
pub use engine::FileEngineConfig;
pub use reasoning::FileReasoningConfig;
pub use schedule::FileScheduleConfig;
pub use scorer::{FileScorerConfig, FileTemporalConfig};

use super::ConfigError;
use pacekeeper_application::EngineConfig;
use pacekeeper_domain::Task;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root of the TOML configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    pub engine: FileEngineConfig,
    pub scorer: FileScorerConfig,
    pub temporal: FileTemporalConfig,
    pub council: FileCouncilConfig,
    pub breaker: FileBreakerConfig,
    pub schedule: FileScheduleConfig,
    pub reasoning: FileReasoningConfig,
}

impl FileConfig {
    /// Convert the file schema into the engine configuration.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] when a domain or constraint name does not parse, or
    /// the base weights cannot be normalized.
    pub fn into_engine_config(&self) -> Result<EngineConfig, ConfigError> {
        Ok(EngineConfig {
            thresholds: self.engine.thresholds(),
            base_weights: self.engine.base_weights()?,
            modifiers: self.engine.modifiers()?,
            tradeoff: self.engine.tradeoff()?,
            scorer: self.scorer.to_scorer_config(),
            temporal: self.temporal.to_temporal_config(),
            profiles: self.council.profiles(),
            breaker_rules: self.breaker.rules()?,
            substitutions: self.schedule.substitutions()?,
            goal_limits: self.reasoning.goal_limits(),
            rationale_timeout: Duration::from_millis(self.council.rationale_timeout_ms),
            goal_timeout: Duration::from_millis(self.reasoning.goal_timeout_ms),
        })
    }

    /// The configured day schedule
    pub fn day_tasks(&self) -> Result<Vec<Task>, ConfigError> {
        self.schedule.day_tasks()
    }
}
