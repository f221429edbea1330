//! Ordered constraint rule table
//!
//! The threshold ladder is expressed as an explicit table evaluated in fixed
//! order, so activation is deterministic and each rule is testable on its
//! own. Thresholds come from [`ConstraintThresholds`]; none are hard-coded
//! at the call sites.

use super::kind::ConstraintKind;
use crate::state::{HealthState, StressLevel};
use serde::{Deserialize, Serialize};

/// Configurable thresholds for constraint detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintThresholds {
    /// Below this, sleep is critical
    pub critical_sleep_hours: f64,
    /// Below this (and at or above critical), sleep is low
    pub low_sleep_hours: f64,
    /// At or below this, energy is critical
    pub critical_energy: u8,
    /// At or below this (and above critical), energy is low
    pub low_energy: u8,
    /// Below this many available hours, time is critical
    pub min_available_hours: f64,
    /// This many simultaneously active constraints raise a burnout warning
    pub burnout_factor_count: usize,
    /// Severity added to sub-critical constraints when the previous cycle
    /// ended in the high risk band
    pub carryover_severity_boost: f64,
}

impl Default for ConstraintThresholds {
    fn default() -> Self {
        Self {
            critical_sleep_hours: 5.0,
            low_sleep_hours: 6.0,
            critical_energy: 2,
            low_energy: 4,
            min_available_hours: 0.5,
            burnout_factor_count: 3,
            carryover_severity_boost: 0.2,
        }
    }
}

/// Condition that activates a rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Trigger {
    /// sleep_hours < limit
    SleepBelow { limit: f64 },
    /// lo <= sleep_hours < hi
    SleepBetween { lo: f64, hi: f64 },
    /// energy_level <= limit
    EnergyAtMost { limit: u8 },
    /// lo < energy_level <= hi
    EnergyBetween { lo: u8, hi: u8 },
    /// stress_level == level
    StressIs { level: StressLevel },
    /// available_hours < limit
    AvailableBelow { limit: f64 },
    /// At least `count` earlier rules in the table already fired
    ActiveCount { count: usize },
}

impl Trigger {
    /// Evaluate against a snapshot; `fired_so_far` counts earlier rules that
    /// matched this cycle (for compound triggers).
    pub fn matches(&self, state: &HealthState, fired_so_far: usize) -> bool {
        match self {
            Trigger::SleepBelow { limit } => state.sleep_hours < *limit,
            Trigger::SleepBetween { lo, hi } => {
                state.sleep_hours >= *lo && state.sleep_hours < *hi
            }
            Trigger::EnergyAtMost { limit } => state.energy_level <= *limit,
            Trigger::EnergyBetween { lo, hi } => {
                state.energy_level > *lo && state.energy_level <= *hi
            }
            Trigger::StressIs { level } => state.stress_level == *level,
            Trigger::AvailableBelow { limit } => state.available_hours < *limit,
            Trigger::ActiveCount { count } => fired_so_far >= *count,
        }
    }

    /// Render the trigger with the observed value, for the audit trail
    pub fn describe(&self, state: &HealthState) -> String {
        match self {
            Trigger::SleepBelow { limit } => {
                format!("sleep_hours {:.1} < {:.1}", state.sleep_hours, limit)
            }
            Trigger::SleepBetween { lo, hi } => format!(
                "sleep_hours {:.1} in [{:.1}, {:.1})",
                state.sleep_hours, lo, hi
            ),
            Trigger::EnergyAtMost { limit } => {
                format!("energy_level {} <= {}", state.energy_level, limit)
            }
            Trigger::EnergyBetween { lo, hi } => format!(
                "energy_level {} in ({}, {}]",
                state.energy_level, lo, hi
            ),
            Trigger::StressIs { level } => format!("stress_level is {}", level),
            Trigger::AvailableBelow { limit } => {
                format!("available_hours {:.1} < {:.1}", state.available_hours, limit)
            }
            Trigger::ActiveCount { count } => {
                format!("{} or more constraints simultaneously active", count)
            }
        }
    }
}

/// One row of the rule table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintRule {
    pub kind: ConstraintKind,
    pub severity: f64,
    pub trigger: Trigger,
}

/// The full ordered table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintRuleTable {
    rules: Vec<ConstraintRule>,
}

impl ConstraintRuleTable {
    /// Build the standard table from thresholds
    ///
    /// Order matters: the compound burnout rule is last so it can count the
    /// rows above it.
    pub fn standard(t: &ConstraintThresholds) -> Self {
        let rules = vec![
            ConstraintRule {
                kind: ConstraintKind::CriticalSleep,
                severity: 1.0,
                trigger: Trigger::SleepBelow {
                    limit: t.critical_sleep_hours,
                },
            },
            ConstraintRule {
                kind: ConstraintKind::LowSleep,
                severity: 0.5,
                trigger: Trigger::SleepBetween {
                    lo: t.critical_sleep_hours,
                    hi: t.low_sleep_hours,
                },
            },
            ConstraintRule {
                kind: ConstraintKind::CriticalEnergy,
                severity: 1.0,
                trigger: Trigger::EnergyAtMost {
                    limit: t.critical_energy,
                },
            },
            ConstraintRule {
                kind: ConstraintKind::LowEnergy,
                severity: 0.5,
                trigger: Trigger::EnergyBetween {
                    lo: t.critical_energy,
                    hi: t.low_energy,
                },
            },
            ConstraintRule {
                kind: ConstraintKind::HighStress,
                severity: 0.7,
                trigger: Trigger::StressIs {
                    level: StressLevel::High,
                },
            },
            ConstraintRule {
                kind: ConstraintKind::TimeCritical,
                severity: 1.0,
                trigger: Trigger::AvailableBelow {
                    limit: t.min_available_hours,
                },
            },
            ConstraintRule {
                kind: ConstraintKind::BurnoutWarning,
                severity: 1.0,
                trigger: Trigger::ActiveCount {
                    count: t.burnout_factor_count,
                },
            },
        ];

        Self { rules }
    }

    pub fn rules(&self) -> &[ConstraintRule] {
        &self.rules
    }
}
