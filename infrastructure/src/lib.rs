//! Infrastructure layer for pacekeeper
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer, plus configuration file loading and the in-memory
//! session store.

pub mod config;
pub mod logging;
pub mod reasoning;
pub mod session;

// Re-export commonly used types
pub use config::{ConfigError, ConfigLoader, FileConfig};
pub use logging::JsonlAuditLogger;
pub use reasoning::{HttpReasoningGateway, OfflineReasoning};
pub use session::{SessionSnapshot, SessionStore};
