//! Ports: interfaces implemented by outer layers

pub mod audit;
pub mod progress;
pub mod reasoning;

pub use audit::{AuditEvent, AuditSink, NoAudit};
pub use progress::{CyclePhase, CycleProgress, NoProgress};
pub use reasoning::{RationaleRefinement, RationaleRequest, ReasoningError, ReasoningGateway};
