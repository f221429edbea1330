//! Core domain primitives shared by every engine component

pub mod domain;
pub mod error;

pub use domain::ActivityDomain;
pub use error::DomainError;

/// Get current timestamp in milliseconds
pub fn current_timestamp() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
