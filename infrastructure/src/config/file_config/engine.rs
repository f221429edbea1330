//! Engine configuration from TOML (`[engine]` section)
//!
//! Covers constraint thresholds, base priority weights, constraint modifier
//! overrides, and the trade-off allocator tunables.

use crate::config::ConfigError;
use pacekeeper_domain::{
    ActivityDomain, ConstraintKind, ConstraintThresholds, ForcedSkip, ModifierTable,
    PriorityWeights, TradeOffConfig,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A forced-skip rule as written in TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileForcedSkip {
    pub when: String,
    pub domains: Vec<String>,
}

/// `[engine]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEngineConfig {
    // Constraint thresholds
    pub critical_sleep_hours: f64,
    pub low_sleep_hours: f64,
    pub critical_energy: u8,
    pub low_energy: u8,
    pub min_available_hours: f64,
    pub burnout_factor_count: usize,
    pub carryover_severity_boost: f64,

    // Trade-off allocator
    pub prioritize_threshold: f64,
    pub min_viable_minutes: u32,
    pub reserved_recovery_minutes: u32,
    /// Empty means the built-in forced-skip rules apply
    pub forced_skips: Vec<FileForcedSkip>,

    /// Empty means the standard base weights apply
    pub base_weights: BTreeMap<String, f64>,
    /// Per-constraint modifier overrides; unlisted constraints keep the
    /// built-in vectors
    pub modifiers: BTreeMap<String, BTreeMap<String, f64>>,
}

impl Default for FileEngineConfig {
    fn default() -> Self {
        let thresholds = ConstraintThresholds::default();
        let tradeoff = TradeOffConfig::default();
        Self {
            critical_sleep_hours: thresholds.critical_sleep_hours,
            low_sleep_hours: thresholds.low_sleep_hours,
            critical_energy: thresholds.critical_energy,
            low_energy: thresholds.low_energy,
            min_available_hours: thresholds.min_available_hours,
            burnout_factor_count: thresholds.burnout_factor_count,
            carryover_severity_boost: thresholds.carryover_severity_boost,
            prioritize_threshold: tradeoff.prioritize_threshold,
            min_viable_minutes: tradeoff.min_viable_minutes,
            reserved_recovery_minutes: tradeoff.reserved_recovery_minutes,
            forced_skips: Vec::new(),
            base_weights: BTreeMap::new(),
            modifiers: BTreeMap::new(),
        }
    }
}

impl FileEngineConfig {
    pub fn thresholds(&self) -> ConstraintThresholds {
        ConstraintThresholds {
            critical_sleep_hours: self.critical_sleep_hours,
            low_sleep_hours: self.low_sleep_hours,
            critical_energy: self.critical_energy,
            low_energy: self.low_energy,
            min_available_hours: self.min_available_hours,
            burnout_factor_count: self.burnout_factor_count,
            carryover_severity_boost: self.carryover_severity_boost,
        }
    }

    pub fn base_weights(&self) -> Result<PriorityWeights, ConfigError> {
        if self.base_weights.is_empty() {
            return Ok(PriorityWeights::standard());
        }

        let mut entries = Vec::new();
        for (name, weight) in &self.base_weights {
            let domain = parse_domain(name)?;
            entries.push((domain, *weight));
        }
        PriorityWeights::from_entries(entries)
            .map_err(|e| ConfigError::InvalidValue(format!("base_weights: {}", e)))
    }

    pub fn modifiers(&self) -> Result<ModifierTable, ConfigError> {
        let mut table = ModifierTable::standard();
        for (constraint, deltas) in &self.modifiers {
            let kind = parse_constraint(constraint)?;
            let mut vector = Vec::new();
            for (name, delta) in deltas {
                vector.push((parse_domain(name)?, *delta));
            }
            table.set(kind, vector);
        }
        Ok(table)
    }

    pub fn tradeoff(&self) -> Result<TradeOffConfig, ConfigError> {
        let forced_skips = if self.forced_skips.is_empty() {
            TradeOffConfig::default().forced_skips
        } else {
            let mut rules = Vec::new();
            for rule in &self.forced_skips {
                let when = parse_constraint(&rule.when)?;
                let domains = rule
                    .domains
                    .iter()
                    .map(|d| parse_domain(d))
                    .collect::<Result<Vec<_>, _>>()?;
                rules.push(ForcedSkip { when, domains });
            }
            rules
        };

        Ok(TradeOffConfig {
            prioritize_threshold: self.prioritize_threshold,
            min_viable_minutes: self.min_viable_minutes,
            reserved_recovery_minutes: self.reserved_recovery_minutes,
            forced_skips,
        })
    }
}

pub(crate) fn parse_domain(name: &str) -> Result<ActivityDomain, ConfigError> {
    name.parse()
        .map_err(|e: String| ConfigError::InvalidValue(e))
}

pub(crate) fn parse_constraint(name: &str) -> Result<ConstraintKind, ConfigError> {
    name.parse()
        .map_err(|e: String| ConfigError::InvalidValue(e))
}
