//! Engine configuration
//!
//! Aggregates every tunable the decision engine consumes. The documented
//! defaults come straight from the domain constructors; the infrastructure
//! layer overrides them from TOML.

use pacekeeper_domain::{
    BreakerRule, CircuitBreaker, ConstraintThresholds, EvaluatorProfile, GoalLimits,
    ModifierTable, PriorityWeights, ScorerConfig, SubstitutionTable, TemporalConfig,
    TradeOffConfig,
};
use std::time::Duration;

/// Complete engine configuration for one session
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub thresholds: ConstraintThresholds,
    pub base_weights: PriorityWeights,
    pub modifiers: ModifierTable,
    pub tradeoff: TradeOffConfig,
    pub scorer: ScorerConfig,
    pub temporal: TemporalConfig,
    pub profiles: Vec<EvaluatorProfile>,
    pub breaker_rules: Vec<BreakerRule>,
    pub substitutions: SubstitutionTable,
    pub goal_limits: GoalLimits,
    /// Bound on each per-profile rationale refinement call
    pub rationale_timeout: Duration,
    /// Bound on the goal-safety service call
    pub goal_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            thresholds: ConstraintThresholds::default(),
            base_weights: PriorityWeights::standard(),
            modifiers: ModifierTable::standard(),
            tradeoff: TradeOffConfig::default(),
            scorer: ScorerConfig::default(),
            temporal: TemporalConfig::default(),
            profiles: EvaluatorProfile::standard_four(),
            breaker_rules: CircuitBreaker::standard().rules().to_vec(),
            substitutions: SubstitutionTable::standard(),
            goal_limits: GoalLimits::default(),
            rationale_timeout: Duration::from_millis(2000),
            goal_timeout: Duration::from_millis(3000),
        }
    }
}
