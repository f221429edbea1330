//! Evaluator profiles
//!
//! The four council members are not distinct types: each is a data record of
//! weights and thresholds fed through one generic scoring function. The
//! numeric vote and confidence never depend on anything outside this module,
//! so the council keeps working when the reasoning service is down.

use super::vote::{AgentVote, CouncilVote};
use crate::state::HealthState;
use serde::{Deserialize, Serialize};

/// How much each signal contributes to a profile's pressure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SignalWeights {
    pub sleep: f64,
    pub energy: f64,
    pub stress: f64,
    /// Weight on decision-history consistency (decayed skip rate)
    pub consistency: f64,
}

/// Per-profile thresholds the pressure signals are measured against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileThresholds {
    /// Sleep at or above this is comfortable
    pub min_sleep_hours: f64,
    /// Sleep at or below this maxes out the sleep signal
    pub critical_sleep_hours: f64,
    /// Energy at or above this is comfortable
    pub energy_ref: f64,
    /// Energy at this level maxes out the energy signal
    pub energy_floor: f64,
    /// Skip rate below this carries no consistency pressure
    pub skip_rate_floor: f64,
    /// Consistency pressure never exceeds this (keeps the momentum profile
    /// in the modify band rather than vetoing)
    pub consistency_cap: f64,
    /// Pressure at or above this votes MODIFY
    pub modify_threshold: f64,
    /// Pressure at or above this votes SKIP
    pub skip_threshold: f64,
}

impl Default for ProfileThresholds {
    fn default() -> Self {
        Self {
            min_sleep_hours: 7.0,
            critical_sleep_hours: 4.0,
            energy_ref: 7.0,
            energy_floor: 1.0,
            skip_rate_floor: 0.3,
            consistency_cap: 0.6,
            modify_threshold: 0.35,
            skip_threshold: 0.65,
        }
    }
}

/// Reference span used to spread confidence over boundary distance
const CONFIDENCE_SPAN: f64 = 0.35;

/// One council member: a named set of weights and thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatorProfile {
    pub id: String,
    pub name: String,
    pub weights: SignalWeights,
    pub thresholds: ProfileThresholds,
}

/// The deterministic part of a profile's vote, before any rationale
/// refinement
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileReading {
    pub vote: CouncilVote,
    pub confidence: f64,
    pub pressure: f64,
    /// Signal contributing the largest weighted share
    pub dominant_signal: &'static str,
    /// Deterministic template rationale
    pub template: String,
}

impl EvaluatorProfile {
    /// The standard council: recovery, performance, wellness, momentum
    pub fn standard_four() -> Vec<EvaluatorProfile> {
        vec![
            EvaluatorProfile {
                id: "recovery".to_string(),
                name: "Recovery Sentinel".to_string(),
                weights: SignalWeights {
                    sleep: 0.7,
                    energy: 0.2,
                    stress: 0.1,
                    consistency: 0.0,
                },
                thresholds: ProfileThresholds::default(),
            },
            EvaluatorProfile {
                id: "performance".to_string(),
                name: "Performance Coach".to_string(),
                weights: SignalWeights {
                    sleep: 0.25,
                    energy: 0.6,
                    stress: 0.15,
                    consistency: 0.0,
                },
                thresholds: ProfileThresholds {
                    min_sleep_hours: 6.5,
                    ..ProfileThresholds::default()
                },
            },
            EvaluatorProfile {
                id: "wellness".to_string(),
                name: "Wellness Guardian".to_string(),
                weights: SignalWeights {
                    sleep: 0.15,
                    energy: 0.15,
                    stress: 0.7,
                    consistency: 0.0,
                },
                thresholds: ProfileThresholds::default(),
            },
            EvaluatorProfile {
                id: "momentum".to_string(),
                name: "Momentum Keeper".to_string(),
                weights: SignalWeights {
                    sleep: 0.0,
                    energy: 0.0,
                    stress: 0.0,
                    consistency: 1.0,
                },
                thresholds: ProfileThresholds::default(),
            },
        ]
    }

    /// Score the snapshot through this profile's lens.
    ///
    /// `skip_rate` is the decayed skip frequency for the proposed activity's
    /// domain, taken from the history snapshot at cycle start.
    pub fn evaluate(&self, state: &HealthState, skip_rate: f64) -> ProfileReading {
        let t = &self.thresholds;

        let sleep_span = (t.min_sleep_hours - t.critical_sleep_hours).max(f64::EPSILON);
        let sleep_p = ((t.min_sleep_hours - state.sleep_hours) / sleep_span).clamp(0.0, 1.0);

        let energy_span = (t.energy_ref - t.energy_floor).max(f64::EPSILON);
        let energy_p =
            ((t.energy_ref - f64::from(state.energy_level)) / energy_span).clamp(0.0, 1.0);

        let stress_p = state.stress_level.weight();

        let cons_span = (1.0 - t.skip_rate_floor).max(f64::EPSILON);
        let cons_p = (((skip_rate - t.skip_rate_floor) / cons_span).clamp(0.0, 1.0))
            .min(t.consistency_cap);

        let w = &self.weights;
        let total = w.sleep + w.energy + w.stress + w.consistency;
        let contributions = [
            ("sleep", w.sleep * sleep_p),
            ("energy", w.energy * energy_p),
            ("stress", w.stress * stress_p),
            ("consistency", w.consistency * cons_p),
        ];
        let pressure = if total > 0.0 {
            contributions.iter().map(|(_, c)| c).sum::<f64>() / total
        } else {
            0.0
        };

        let vote = if pressure >= t.skip_threshold {
            CouncilVote::Skip
        } else if pressure >= t.modify_threshold {
            CouncilVote::Modify
        } else {
            CouncilVote::Proceed
        };

        let boundary_distance = (pressure - t.modify_threshold)
            .abs()
            .min((pressure - t.skip_threshold).abs());
        let confidence = (0.55 + 0.40 * boundary_distance / CONFIDENCE_SPAN).clamp(0.0, 1.0);

        let dominant_signal = contributions
            .iter()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(name, _)| *name)
            .unwrap_or("sleep");

        let template = self.template_rationale(state, skip_rate, vote, dominant_signal, pressure);

        ProfileReading {
            vote,
            confidence,
            pressure,
            dominant_signal,
            template,
        }
    }

    /// Deterministic rationale naming the triggering threshold
    fn template_rationale(
        &self,
        state: &HealthState,
        skip_rate: f64,
        vote: CouncilVote,
        dominant: &str,
        pressure: f64,
    ) -> String {
        let t = &self.thresholds;
        let detail = match dominant {
            "sleep" => format!(
                "sleep at {:.1}h against a {:.1}h floor",
                state.sleep_hours, t.min_sleep_hours
            ),
            "energy" => format!(
                "energy at {}/10 against a reference of {:.0}",
                state.energy_level, t.energy_ref
            ),
            "stress" => format!("stress reported {}", state.stress_level),
            _ => format!("recent skip rate at {:.0}%", skip_rate * 100.0),
        };

        match vote {
            CouncilVote::Proceed => format!(
                "{}: {}; pressure {:.2} stays under the {:.2} caution threshold.",
                self.name, detail, pressure, t.modify_threshold
            ),
            CouncilVote::Modify => format!(
                "{}: {}; pressure {:.2} calls for a lighter version.",
                self.name, detail, pressure
            ),
            CouncilVote::Skip => format!(
                "{}: {}; pressure {:.2} crosses the {:.2} skip threshold.",
                self.name, detail, pressure, t.skip_threshold
            ),
        }
    }

    /// Convenience: evaluate and wrap into an [`AgentVote`] carrying the
    /// template rationale, marked degraded until a service refinement lands.
    pub fn cast_vote(&self, state: &HealthState, skip_rate: f64) -> AgentVote {
        let reading = self.evaluate(state, skip_rate);
        AgentVote::new(&self.id, reading.vote, reading.confidence, reading.template).degraded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StressLevel;

    fn state(sleep: f64, energy: u8, stress: StressLevel) -> HealthState {
        HealthState::new(sleep, energy, stress, 2.0).unwrap()
    }

    fn profile(id: &str) -> EvaluatorProfile {
        EvaluatorProfile::standard_four()
            .into_iter()
            .find(|p| p.id == id)
            .unwrap()
    }

    #[test]
    fn test_rested_state_proceeds_everywhere() {
        for p in EvaluatorProfile::standard_four() {
            let reading = p.evaluate(&state(8.0, 8, StressLevel::Low), 0.0);
            assert_eq!(reading.vote, CouncilVote::Proceed, "profile {}", p.id);
            assert!(reading.confidence > 0.9);
        }
    }

    #[test]
    fn test_recovery_profile_skips_on_critical_sleep() {
        let reading = profile("recovery").evaluate(&state(4.0, 2, StressLevel::High), 0.0);
        assert_eq!(reading.vote, CouncilVote::Skip);
        assert!(reading.confidence > 0.85);
        assert_eq!(reading.dominant_signal, "sleep");
    }

    #[test]
    fn test_wellness_profile_reacts_to_stress() {
        let reading = profile("wellness").evaluate(&state(7.5, 7, StressLevel::High), 0.0);
        assert_ne!(reading.vote, CouncilVote::Proceed);
        assert_eq!(reading.dominant_signal, "stress");
    }

    #[test]
    fn test_momentum_ignores_physiology() {
        let bad_night = profile("momentum").evaluate(&state(4.0, 2, StressLevel::High), 0.0);
        assert_eq!(bad_night.vote, CouncilVote::Proceed);
    }

    #[test]
    fn test_momentum_modifies_on_high_skip_rate() {
        let reading = profile("momentum").evaluate(&state(8.0, 8, StressLevel::Low), 0.8);
        assert_eq!(reading.vote, CouncilVote::Modify);
        assert!(reading.template.contains("skip rate"));
    }

    #[test]
    fn test_momentum_never_vetoes() {
        // The consistency cap keeps even a 100% skip rate in the modify band
        let reading = profile("momentum").evaluate(&state(8.0, 8, StressLevel::Low), 1.0);
        assert_ne!(reading.vote, CouncilVote::Skip);
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let p = profile("performance");
        let s = state(5.5, 4, StressLevel::Medium);
        assert_eq!(p.evaluate(&s, 0.2), p.evaluate(&s, 0.2));
    }

    #[test]
    fn test_template_names_threshold() {
        let reading = profile("recovery").evaluate(&state(4.0, 6, StressLevel::Low), 0.0);
        assert!(reading.template.contains("4.0h"));
        assert!(reading.template.contains("7.0h floor"));
    }

    #[test]
    fn test_cast_vote_is_degraded_until_refined() {
        let vote = profile("recovery").cast_vote(&state(8.0, 8, StressLevel::Low), 0.0);
        assert!(vote.degraded);
        assert_eq!(vote.profile, "recovery");
    }
}
