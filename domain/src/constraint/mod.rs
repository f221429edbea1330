//! Constraint detection
//!
//! Turns a [`HealthState`](crate::state::HealthState) into the set of named,
//! severity-scored constraints that drive the rest of the cycle. The rules
//! live in an explicit ordered table so evaluation order is deterministic.

pub mod evaluator;
pub mod kind;
pub mod rule;

pub use evaluator::ConstraintEvaluator;
pub use kind::{ActiveConstraint, ConstraintKind, ConstraintSet};
pub use rule::{ConstraintRule, ConstraintRuleTable, ConstraintThresholds, Trigger};
