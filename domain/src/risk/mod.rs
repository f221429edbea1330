//! Burnout and temporal risk scoring
//!
//! Composite [0,100] risk metrics from the current snapshot, plus pattern
//! detection over decision history whose signals adapt the next cycle.

pub mod score;
pub mod temporal;

pub use score::{ComputedMetrics, RiskBand, ScorerConfig};
pub use temporal::{scan, weekday_name, AdaptiveSignal, PatternScan, TemporalConfig};
