//! Audit sink port
//!
//! Cycle events for the append-only audit trail. The JSONL implementation
//! lives in the infrastructure layer; a sink failure must never affect the
//! cycle, so the interface is fire-and-forget.

use serde_json::Value;

/// One audit event: a type tag plus a JSON payload
#[derive(Debug, Clone)]
pub struct AuditEvent {
    pub event_type: String,
    pub payload: Value,
}

impl AuditEvent {
    pub fn new(event_type: impl Into<String>, payload: Value) -> Self {
        Self {
            event_type: event_type.into(),
            payload,
        }
    }
}

/// Receives audit events
pub trait AuditSink: Send + Sync {
    fn record(&self, event: AuditEvent);
}

/// Discards everything
pub struct NoAudit;

impl AuditSink for NoAudit {
    fn record(&self, _event: AuditEvent) {}
}
