//! Composite risk scoring
//!
//! Readiness, sleep, and burnout scores derived from the raw snapshot.
//! Every coefficient lives in [`ScorerConfig`]; the documented defaults are
//! starting points, not constants baked into the formulas.

use crate::state::{HealthState, StressLevel};
use serde::{Deserialize, Serialize};

/// Burnout risk band derived from the composite score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskBand {
    Low,
    Moderate,
    High,
}

impl RiskBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskBand::Low => "Low",
            RiskBand::Moderate => "Moderate",
            RiskBand::High => "High",
        }
    }
}

impl std::fmt::Display for RiskBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Scoring coefficients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorerConfig {
    /// Sleep hours treated as a full night
    pub target_sleep_hours: f64,
    /// Above this, the oversleep penalty applies
    pub oversleep_hours: f64,
    pub oversleep_penalty: f64,
    /// Multiplies the stress weight (Low=0, Medium=0.5, High=1.0)
    pub stress_coeff: f64,
    /// Multiplies (10 - energy_level)
    pub energy_coeff: f64,
    /// Multiplies the sleep deficit against the target
    pub sleep_coeff: f64,
    pub readiness_energy_share: f64,
    pub readiness_sleep_share: f64,
    pub stress_penalty_high: f64,
    pub stress_penalty_medium: f64,
    pub readiness_base: f64,
    /// Below this, no single factor is called out as primary
    pub stable_factor_floor: f64,
    /// Band boundaries: score above `high_band` is High, above
    /// `moderate_band` is Moderate
    pub high_band: f64,
    pub moderate_band: f64,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            target_sleep_hours: 8.0,
            oversleep_hours: 9.0,
            oversleep_penalty: 10.0,
            stress_coeff: 50.0,
            energy_coeff: 3.0,
            sleep_coeff: 5.0,
            readiness_energy_share: 0.4,
            readiness_sleep_share: 0.4,
            stress_penalty_high: 30.0,
            stress_penalty_medium: 10.0,
            readiness_base: 20.0,
            stable_factor_floor: 10.0,
            high_band: 70.0,
            moderate_band: 40.0,
        }
    }
}

/// Derived metrics block
///
/// Re-derived whenever any raw field of the snapshot changes; never edited
/// independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputedMetrics {
    pub readiness_score: u8,
    pub sleep_score: u8,
    pub burnout_risk_score: u8,
    pub burnout_risk_label: RiskBand,
    pub primary_factor: String,
}

impl ComputedMetrics {
    /// Derive all metrics from the snapshot
    pub fn derive(state: &HealthState, config: &ScorerConfig) -> Self {
        let sleep_score = Self::sleep_score(state, config);

        // Burnout: stress, depleted energy, and sleep deficit, each with its
        // own coefficient.
        let stress_term = config.stress_coeff * state.stress_level.weight();
        let energy_term = config.energy_coeff * (10.0 - f64::from(state.energy_level));
        let sleep_term =
            config.sleep_coeff * (config.target_sleep_hours - state.sleep_hours).max(0.0);

        let burnout = (stress_term + energy_term + sleep_term).clamp(0.0, 100.0);
        let burnout_risk_label = if burnout > config.high_band {
            RiskBand::High
        } else if burnout > config.moderate_band {
            RiskBand::Moderate
        } else {
            RiskBand::Low
        };

        let factors = [
            ("High Stress Load", stress_term),
            ("Low Energy Reserves", energy_term),
            ("Sleep Debt", sleep_term),
        ];
        let (label, share) = factors
            .iter()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .copied()
            .unwrap_or(("Sleep Debt", 0.0));
        let primary_factor = if share < config.stable_factor_floor {
            "None (Stable)".to_string()
        } else {
            label.to_string()
        };

        // Readiness: energy and sleep shares, minus a stress penalty, plus
        // the base bump.
        let stress_penalty = match state.stress_level {
            StressLevel::High => config.stress_penalty_high,
            StressLevel::Medium => config.stress_penalty_medium,
            StressLevel::Low => 0.0,
        };
        let readiness = (f64::from(state.energy_level) * 10.0 * config.readiness_energy_share
            + f64::from(sleep_score) * config.readiness_sleep_share
            - stress_penalty
            + config.readiness_base)
            .clamp(0.0, 100.0);

        Self {
            readiness_score: readiness.round() as u8,
            sleep_score,
            burnout_risk_score: burnout.round() as u8,
            burnout_risk_label,
            primary_factor,
        }
    }

    /// Piecewise sleep score: linear up to the target, penalized above the
    /// oversleep ceiling.
    fn sleep_score(state: &HealthState, config: &ScorerConfig) -> u8 {
        let mut score =
            (state.sleep_hours / config.target_sleep_hours * 100.0).min(100.0);
        if state.sleep_hours > config.oversleep_hours {
            score -= config.oversleep_penalty;
        }
        score.clamp(0.0, 100.0).round() as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(sleep: f64, energy: u8, stress: StressLevel) -> HealthState {
        HealthState::new(sleep, energy, stress, 2.0).unwrap()
    }

    #[test]
    fn test_exhausted_state_is_high_risk() {
        // Scenario A: 50 + 3*(10-2) + 5*(8-4) = 94
        let metrics =
            ComputedMetrics::derive(&state(4.0, 2, StressLevel::High), &ScorerConfig::default());

        assert_eq!(metrics.burnout_risk_score, 94);
        assert_eq!(metrics.burnout_risk_label, RiskBand::High);
        assert_eq!(metrics.primary_factor, "High Stress Load");
    }

    #[test]
    fn test_rested_state_is_low_risk() {
        // Scenario B: 0 + 3*(10-8) + 0 = 6
        let metrics =
            ComputedMetrics::derive(&state(8.0, 8, StressLevel::Low), &ScorerConfig::default());

        assert_eq!(metrics.burnout_risk_score, 6);
        assert_eq!(metrics.burnout_risk_label, RiskBand::Low);
        assert_eq!(metrics.primary_factor, "None (Stable)");
        assert_eq!(metrics.sleep_score, 100);
    }

    #[test]
    fn test_sleep_debt_dominates_when_stress_is_low() {
        let metrics =
            ComputedMetrics::derive(&state(4.0, 7, StressLevel::Low), &ScorerConfig::default());
        assert_eq!(metrics.primary_factor, "Sleep Debt");
    }

    #[test]
    fn test_oversleep_penalty() {
        let config = ScorerConfig::default();
        let long = ComputedMetrics::derive(&state(10.0, 7, StressLevel::Low), &config);
        let full = ComputedMetrics::derive(&state(8.0, 7, StressLevel::Low), &config);
        assert!(long.sleep_score < full.sleep_score);
    }

    #[test]
    fn test_scores_stay_in_bounds() {
        let config = ScorerConfig::default();
        for (sleep, energy, stress) in [
            (0.0, 1, StressLevel::High),
            (12.0, 10, StressLevel::Low),
            (6.0, 5, StressLevel::Medium),
        ] {
            let m = ComputedMetrics::derive(&state(sleep, energy, stress), &config);
            assert!(m.readiness_score <= 100);
            assert!(m.burnout_risk_score <= 100);
            assert!(m.sleep_score <= 100);
        }
    }

    #[test]
    fn test_band_boundaries() {
        let config = ScorerConfig::default();
        // stress Medium (25) + energy term 3*(10-5)=15 -> 40, exactly on the
        // moderate boundary stays Low
        let m = ComputedMetrics::derive(&state(8.0, 5, StressLevel::Medium), &config);
        assert_eq!(m.burnout_risk_score, 40);
        assert_eq!(m.burnout_risk_label, RiskBand::Low);
    }

    #[test]
    fn test_coefficients_are_configurable() {
        let config = ScorerConfig {
            stress_coeff: 0.0,
            ..ScorerConfig::default()
        };
        let m = ComputedMetrics::derive(&state(8.0, 10, StressLevel::High), &config);
        assert_eq!(m.burnout_risk_score, 0);
    }
}
