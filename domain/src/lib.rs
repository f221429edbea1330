//! Domain layer for pacekeeper
//!
//! This crate contains the decision engine's core logic and entities. It has
//! no dependencies on infrastructure or presentation concerns, no I/O, and
//! no async runtime.
//!
//! # Decision cycle
//!
//! Data flows one way per cycle:
//!
//! snapshot → constraints → priority matrix → council → circuit breaker →
//! plan adjuster
//!
//! The risk scorer runs alongside over the snapshot and decision history;
//! its output (adaptive signals, prior risk band) feeds the *next* cycle's
//! constraint and priority inputs, closing an adaptive loop without
//! instantaneous feedback.

pub mod breaker;
pub mod constraint;
pub mod core;
pub mod council;
pub mod decision;
pub mod goal;
pub mod priority;
pub mod risk;
pub mod schedule;
pub mod state;

// Re-export commonly used types
pub use breaker::{BreakerRule, BreakerVerdict, CircuitBreaker, DomainBlock};
pub use constraint::{
    ActiveConstraint, ConstraintEvaluator, ConstraintKind, ConstraintRule, ConstraintRuleTable,
    ConstraintSet, ConstraintThresholds, Trigger,
};
pub use core::{current_timestamp, ActivityDomain, DomainError};
pub use council::{
    AgentVote, ConsensusResult, CouncilVote, EvaluatorProfile, ProfileReading, ProfileThresholds,
    SignalWeights,
};
pub use decision::{Decision, DecisionAction, DecisionHistory};
pub use goal::{screen as screen_goal, GoalAssessment, GoalLimits, GoalStatus};
pub use priority::{
    DomainAction, ForcedSkip, ModifierTable, PriorityWeights, SkipReason, TradeOffConfig,
    TradeOffDecision, TradeOffEngine, WEIGHT_EPSILON,
};
pub use risk::{
    scan as scan_patterns, weekday_name, AdaptiveSignal, ComputedMetrics, PatternScan, RiskBand,
    ScorerConfig, TemporalConfig,
};
pub use schedule::{PlanAdjuster, Substitute, SubstitutionTable, Task};
pub use state::{HealthState, StressLevel};
