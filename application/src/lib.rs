//! Application layer for pacekeeper
//!
//! This crate contains use cases, port definitions, and the aggregated
//! engine configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::EngineConfig;
pub use ports::{
    audit::{AuditEvent, AuditSink, NoAudit},
    progress::{CyclePhase, CycleProgress, NoProgress},
    reasoning::{RationaleRefinement, RationaleRequest, ReasoningError, ReasoningGateway},
};
pub use use_cases::negotiate_goal::NegotiateGoalUseCase;
pub use use_cases::run_cycle::{CycleInput, CycleOutcome, ProposedActivity, RunCycleUseCase};
