//! Health snapshot types
//!
//! [`HealthState`] is the validated, self-reported snapshot every decision
//! cycle starts from. Construction goes through [`HealthState::new`], which
//! rejects out-of-range input before any session state is touched.

use crate::core::DomainError;
use serde::{Deserialize, Serialize};

/// Self-reported stress level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StressLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl StressLevel {
    /// Numeric weight used by the risk scorer: Low=0, Medium=0.5, High=1.0
    pub fn weight(&self) -> f64 {
        match self {
            StressLevel::Low => 0.0,
            StressLevel::Medium => 0.5,
            StressLevel::High => 1.0,
        }
    }
}

impl std::fmt::Display for StressLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StressLevel::Low => write!(f, "low"),
            StressLevel::Medium => write!(f, "medium"),
            StressLevel::High => write!(f, "high"),
        }
    }
}

impl std::str::FromStr for StressLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(StressLevel::Low),
            "medium" | "moderate" => Ok(StressLevel::Medium),
            "high" => Ok(StressLevel::High),
            _ => Err(format!("unknown stress level: {}. Valid: low, medium, high", s)),
        }
    }
}

/// Validated health snapshot
///
/// Raw fields only; derived metrics live in
/// [`ComputedMetrics`](crate::risk::ComputedMetrics) and are re-derived
/// whenever any raw field changes, never edited independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthState {
    /// Hours slept last night (>= 0)
    pub sleep_hours: f64,
    /// Self-reported energy, 1 to 10
    pub energy_level: u8,
    /// Self-reported stress level
    pub stress_level: StressLevel,
    /// Hours available for activities today (>= 0)
    pub available_hours: f64,
}

impl HealthState {
    /// Validate and construct a snapshot
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] when any field is out of range.
    /// No partial state is produced on failure.
    pub fn new(
        sleep_hours: f64,
        energy_level: u8,
        stress_level: StressLevel,
        available_hours: f64,
    ) -> Result<Self, DomainError> {
        if !sleep_hours.is_finite() || sleep_hours < 0.0 {
            return Err(DomainError::validation(
                "sleep_hours",
                format!("must be a non-negative number, got {}", sleep_hours),
            ));
        }
        if sleep_hours > 24.0 {
            return Err(DomainError::validation(
                "sleep_hours",
                format!("cannot exceed 24, got {}", sleep_hours),
            ));
        }
        if !(1..=10).contains(&energy_level) {
            return Err(DomainError::validation(
                "energy_level",
                format!("must be between 1 and 10, got {}", energy_level),
            ));
        }
        if !available_hours.is_finite() || available_hours < 0.0 {
            return Err(DomainError::validation(
                "available_hours",
                format!("must be a non-negative number, got {}", available_hours),
            ));
        }
        if available_hours > 24.0 {
            return Err(DomainError::validation(
                "available_hours",
                format!("cannot exceed 24, got {}", available_hours),
            ));
        }

        Ok(Self {
            sleep_hours,
            energy_level,
            stress_level,
            available_hours,
        })
    }

    /// Available capacity in whole minutes
    pub fn available_minutes(&self) -> u32 {
        (self.available_hours * 60.0).floor() as u32
    }
}
