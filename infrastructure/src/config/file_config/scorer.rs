//! Risk scorer configuration from TOML (`[scorer]` and `[temporal]`
//! sections)

use pacekeeper_domain::{ScorerConfig, TemporalConfig};
use serde::{Deserialize, Serialize};

/// `[scorer]` section: composite score coefficients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileScorerConfig {
    pub target_sleep_hours: f64,
    pub oversleep_hours: f64,
    pub oversleep_penalty: f64,
    pub stress_coeff: f64,
    pub energy_coeff: f64,
    pub sleep_coeff: f64,
    pub readiness_energy_share: f64,
    pub readiness_sleep_share: f64,
    pub stress_penalty_high: f64,
    pub stress_penalty_medium: f64,
    pub readiness_base: f64,
    pub stable_factor_floor: f64,
    pub high_band: f64,
    pub moderate_band: f64,
}

impl Default for FileScorerConfig {
    fn default() -> Self {
        let c = ScorerConfig::default();
        Self {
            target_sleep_hours: c.target_sleep_hours,
            oversleep_hours: c.oversleep_hours,
            oversleep_penalty: c.oversleep_penalty,
            stress_coeff: c.stress_coeff,
            energy_coeff: c.energy_coeff,
            sleep_coeff: c.sleep_coeff,
            readiness_energy_share: c.readiness_energy_share,
            readiness_sleep_share: c.readiness_sleep_share,
            stress_penalty_high: c.stress_penalty_high,
            stress_penalty_medium: c.stress_penalty_medium,
            readiness_base: c.readiness_base,
            stable_factor_floor: c.stable_factor_floor,
            high_band: c.high_band,
            moderate_band: c.moderate_band,
        }
    }
}

impl FileScorerConfig {
    pub fn to_scorer_config(&self) -> ScorerConfig {
        ScorerConfig {
            target_sleep_hours: self.target_sleep_hours,
            oversleep_hours: self.oversleep_hours,
            oversleep_penalty: self.oversleep_penalty,
            stress_coeff: self.stress_coeff,
            energy_coeff: self.energy_coeff,
            sleep_coeff: self.sleep_coeff,
            readiness_energy_share: self.readiness_energy_share,
            readiness_sleep_share: self.readiness_sleep_share,
            stress_penalty_high: self.stress_penalty_high,
            stress_penalty_medium: self.stress_penalty_medium,
            readiness_base: self.readiness_base,
            stable_factor_floor: self.stable_factor_floor,
            high_band: self.high_band,
            moderate_band: self.moderate_band,
        }
    }
}

/// `[temporal]` section: pattern-detection window and decay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTemporalConfig {
    pub window_days: u32,
    pub decay: f64,
    pub skip_threshold: f64,
    pub weight_delta: f64,
}

impl Default for FileTemporalConfig {
    fn default() -> Self {
        let c = TemporalConfig::default();
        Self {
            window_days: c.window_days,
            decay: c.decay,
            skip_threshold: c.skip_threshold,
            weight_delta: c.weight_delta,
        }
    }
}

impl FileTemporalConfig {
    pub fn to_temporal_config(&self) -> TemporalConfig {
        TemporalConfig {
            window_days: self.window_days,
            decay: self.decay,
            skip_threshold: self.skip_threshold,
            weight_delta: self.weight_delta,
        }
    }
}
