//! Schedule entries
//!
//! Blocking is per task instance, never per domain globally. A block can
//! only be cleared by recording an override with a non-empty justification
//! on that specific instance; the original block reason stays on record.

use crate::core::{ActivityDomain, DomainError};
use serde::{Deserialize, Serialize};

/// One entry in the day's schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub title: String,
    pub domain: ActivityDomain,
    pub duration_minutes: u32,
    pub is_blocked: bool,
    pub block_reason: Option<String>,
    pub override_reason: Option<String>,
    /// Substitution or adjustment note from the plan adjuster
    pub note: Option<String>,
}

impl Task {
    pub fn new(title: impl Into<String>, domain: ActivityDomain, duration_minutes: u32) -> Self {
        Self {
            title: title.into(),
            domain,
            duration_minutes,
            is_blocked: false,
            block_reason: None,
            override_reason: None,
            note: None,
        }
    }

    /// Block this instance, recording why
    pub fn block(&mut self, reason: impl Into<String>) {
        self.is_blocked = true;
        self.block_reason = Some(reason.into());
    }

    /// Clear a block with a recorded justification.
    ///
    /// The justification must be non-empty; the block reason is kept for
    /// audit rather than silently erased. Applies to this instance only.
    ///
    /// # Errors
    ///
    /// [`DomainError::Validation`] when the task is not blocked or the
    /// justification is empty.
    pub fn record_override(&mut self, justification: &str) -> Result<(), DomainError> {
        if !self.is_blocked {
            return Err(DomainError::validation(
                "override",
                format!("task '{}' is not blocked", self.title),
            ));
        }
        let justification = justification.trim();
        if justification.is_empty() {
            return Err(DomainError::validation(
                "override",
                "justification must not be empty",
            ));
        }

        self.is_blocked = false;
        self.override_reason = Some(justification.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_and_override() {
        let mut task = Task::new("Morning run", ActivityDomain::Fitness, 45);
        task.block("burnout warning active");
        assert!(task.is_blocked);

        task.record_override("cleared by physician, light jog only").unwrap();
        assert!(!task.is_blocked);
        // The block reason stays on record
        assert_eq!(task.block_reason.as_deref(), Some("burnout warning active"));
        assert!(task.override_reason.is_some());
    }

    #[test]
    fn test_empty_justification_rejected() {
        let mut task = Task::new("Morning run", ActivityDomain::Fitness, 45);
        task.block("burnout warning active");

        assert!(task.record_override("").is_err());
        assert!(task.record_override("   ").is_err());
        assert!(task.is_blocked);
    }

    #[test]
    fn test_override_requires_block() {
        let mut task = Task::new("Lunch", ActivityDomain::Nutrition, 30);
        assert!(task.record_override("why not").is_err());
    }
}
