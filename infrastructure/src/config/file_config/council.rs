//! Council configuration from TOML (`[council]` section)
//!
//! Profiles are data records, so the whole council is reconfigurable from
//! the file. An empty profile list keeps the standard four.
//!
//! Example:
//!
//! ```toml
//! [council]
//! rationale_timeout_ms = 1500
//!
//! [[council.profiles]]
//! id = "recovery"
//! name = "Recovery Sentinel"
//! sleep_weight = 0.8
//! energy_weight = 0.2
//! ```

use pacekeeper_domain::{EvaluatorProfile, ProfileThresholds, SignalWeights};
use serde::{Deserialize, Serialize};

/// One profile as written in TOML; unspecified fields fall back to the
/// standard thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProfile {
    pub id: String,
    pub name: String,
    pub sleep_weight: f64,
    pub energy_weight: f64,
    pub stress_weight: f64,
    pub consistency_weight: f64,
    pub min_sleep_hours: f64,
    pub critical_sleep_hours: f64,
    pub energy_ref: f64,
    pub energy_floor: f64,
    pub skip_rate_floor: f64,
    pub consistency_cap: f64,
    pub modify_threshold: f64,
    pub skip_threshold: f64,
}

impl Default for FileProfile {
    fn default() -> Self {
        let t = ProfileThresholds::default();
        Self {
            id: String::new(),
            name: String::new(),
            sleep_weight: 0.0,
            energy_weight: 0.0,
            stress_weight: 0.0,
            consistency_weight: 0.0,
            min_sleep_hours: t.min_sleep_hours,
            critical_sleep_hours: t.critical_sleep_hours,
            energy_ref: t.energy_ref,
            energy_floor: t.energy_floor,
            skip_rate_floor: t.skip_rate_floor,
            consistency_cap: t.consistency_cap,
            modify_threshold: t.modify_threshold,
            skip_threshold: t.skip_threshold,
        }
    }
}

impl FileProfile {
    fn to_profile(&self) -> EvaluatorProfile {
        EvaluatorProfile {
            id: self.id.clone(),
            name: self.name.clone(),
            weights: SignalWeights {
                sleep: self.sleep_weight,
                energy: self.energy_weight,
                stress: self.stress_weight,
                consistency: self.consistency_weight,
            },
            thresholds: ProfileThresholds {
                min_sleep_hours: self.min_sleep_hours,
                critical_sleep_hours: self.critical_sleep_hours,
                energy_ref: self.energy_ref,
                energy_floor: self.energy_floor,
                skip_rate_floor: self.skip_rate_floor,
                consistency_cap: self.consistency_cap,
                modify_threshold: self.modify_threshold,
                skip_threshold: self.skip_threshold,
            },
        }
    }
}

/// `[council]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCouncilConfig {
    /// Bound on each per-profile rationale refinement call
    pub rationale_timeout_ms: u64,
    /// Empty means the standard four profiles
    pub profiles: Vec<FileProfile>,
}

impl Default for FileCouncilConfig {
    fn default() -> Self {
        Self {
            rationale_timeout_ms: 2000,
            profiles: Vec::new(),
        }
    }
}

impl FileCouncilConfig {
    pub fn profiles(&self) -> Vec<EvaluatorProfile> {
        if self.profiles.is_empty() {
            EvaluatorProfile::standard_four()
        } else {
            self.profiles.iter().map(FileProfile::to_profile).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_keeps_standard_four() {
        let config = FileCouncilConfig::default();
        let profiles = config.profiles();
        assert_eq!(profiles.len(), 4);
        assert_eq!(profiles[0].id, "recovery");
    }

    #[test]
    fn test_configured_profiles_replace_standard() {
        let toml_str = r#"
rationale_timeout_ms = 800

[[profiles]]
id = "cautious"
name = "Cautious Reviewer"
sleep_weight = 0.5
stress_weight = 0.5
skip_threshold = 0.5
"#;
        let config: FileCouncilConfig = toml::from_str(toml_str).unwrap();
        let profiles = config.profiles();

        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].id, "cautious");
        assert_eq!(profiles[0].thresholds.skip_threshold, 0.5);
        // unspecified threshold falls back to the standard value
        assert_eq!(profiles[0].thresholds.modify_threshold, 0.35);
    }
}
