//! Constraint evaluation
//!
//! Pure function from a health snapshot to the set of active constraints.
//! Always produces a result (possibly empty); there is no failure mode.

use super::kind::{ActiveConstraint, ConstraintSet};
use super::rule::{ConstraintRuleTable, ConstraintThresholds};
use crate::risk::RiskBand;
use crate::state::HealthState;

/// Evaluates the ordered rule table against a snapshot
#[derive(Debug, Clone)]
pub struct ConstraintEvaluator {
    thresholds: ConstraintThresholds,
    table: ConstraintRuleTable,
}

impl ConstraintEvaluator {
    pub fn new(thresholds: ConstraintThresholds) -> Self {
        let table = ConstraintRuleTable::standard(&thresholds);
        Self { thresholds, table }
    }

    pub fn thresholds(&self) -> &ConstraintThresholds {
        &self.thresholds
    }

    /// Evaluate all rules in table order.
    ///
    /// `prior_risk` is the previous cycle's burnout band: when it was High,
    /// sub-critical constraints are escalated by the configured severity
    /// boost. This is the adaptive feedback loop — the boost applies on the
    /// next cycle, never retroactively.
    pub fn evaluate(&self, state: &HealthState, prior_risk: Option<RiskBand>) -> ConstraintSet {
        let mut set = ConstraintSet::new();
        let boost = match prior_risk {
            Some(RiskBand::High) => self.thresholds.carryover_severity_boost,
            _ => 0.0,
        };

        for rule in self.table.rules() {
            let fired_so_far = set.len();
            if !rule.trigger.matches(state, fired_so_far) {
                continue;
            }

            let severity = if rule.severity < 1.0 {
                rule.severity + boost
            } else {
                rule.severity
            };

            set.push(ActiveConstraint::new(
                rule.kind,
                severity,
                rule.trigger.describe(state),
            ));
        }

        set
    }

    /// Human-readable summary, ordered by severity
    pub fn summarize(set: &ConstraintSet) -> String {
        if set.is_empty() {
            return "No active constraints - full adherence possible".to_string();
        }

        let mut ordered: Vec<_> = set.iter().collect();
        ordered.sort_by(|a, b| {
            b.severity
                .partial_cmp(&a.severity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut lines = vec!["Active constraints:".to_string()];
        for c in ordered {
            let label = if c.severity >= 0.8 {
                "CRITICAL"
            } else if c.severity >= 0.6 {
                "HIGH"
            } else {
                "MODERATE"
            };
            lines.push(format!("  [{}] {}: {}", label, c.kind, c.kind.description()));
        }
        lines.join("\n")
    }
}

impl Default for ConstraintEvaluator {
    fn default() -> Self {
        Self::new(ConstraintThresholds::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::kind::ConstraintKind;
    use crate::state::StressLevel;

    fn state(sleep: f64, energy: u8, stress: StressLevel, time: f64) -> HealthState {
        HealthState::new(sleep, energy, stress, time).unwrap()
    }

    #[test]
    fn test_no_constraints_when_rested() {
        let evaluator = ConstraintEvaluator::default();
        let set = evaluator.evaluate(&state(8.0, 8, StressLevel::Low, 3.0), None);
        assert!(set.is_empty());
    }

    #[test]
    fn test_single_low_sleep() {
        let evaluator = ConstraintEvaluator::default();
        let set = evaluator.evaluate(&state(5.5, 7, StressLevel::Low, 2.0), None);

        assert_eq!(set.len(), 1);
        assert!(set.has(ConstraintKind::LowSleep));
        assert_eq!(set.severity(ConstraintKind::LowSleep), 0.5);
    }

    #[test]
    fn test_compound_burnout_warning() {
        // Scenario A inputs: three factors fire, so the compound rule does too
        let evaluator = ConstraintEvaluator::default();
        let set = evaluator.evaluate(&state(4.0, 2, StressLevel::High, 2.0), None);

        assert!(set.has(ConstraintKind::CriticalSleep));
        assert!(set.has(ConstraintKind::CriticalEnergy));
        assert!(set.has(ConstraintKind::HighStress));
        assert!(set.has(ConstraintKind::BurnoutWarning));
        assert_eq!(set.severity(ConstraintKind::BurnoutWarning), 1.0);
    }

    #[test]
    fn test_two_factors_do_not_warn() {
        let evaluator = ConstraintEvaluator::default();
        let set = evaluator.evaluate(&state(4.0, 8, StressLevel::High, 2.0), None);

        assert!(set.has(ConstraintKind::CriticalSleep));
        assert!(set.has(ConstraintKind::HighStress));
        assert!(!set.has(ConstraintKind::BurnoutWarning));
    }

    #[test]
    fn test_time_critical_boundary() {
        let evaluator = ConstraintEvaluator::default();

        let set = evaluator.evaluate(&state(8.0, 8, StressLevel::Low, 0.4), None);
        assert!(set.has(ConstraintKind::TimeCritical));

        // Exactly at the boundary the constraint stays off (Scenario C)
        let set = evaluator.evaluate(&state(8.0, 8, StressLevel::Low, 0.5), None);
        assert!(!set.has(ConstraintKind::TimeCritical));
    }

    #[test]
    fn test_prior_high_risk_escalates_subcritical_severity() {
        let evaluator = ConstraintEvaluator::default();
        let snapshot = state(5.5, 3, StressLevel::Low, 2.0);

        let baseline = evaluator.evaluate(&snapshot, None);
        assert_eq!(baseline.severity(ConstraintKind::LowSleep), 0.5);

        let escalated = evaluator.evaluate(&snapshot, Some(RiskBand::High));
        assert_eq!(escalated.severity(ConstraintKind::LowSleep), 0.7);
        assert_eq!(escalated.severity(ConstraintKind::LowEnergy), 0.7);
    }

    #[test]
    fn test_critical_severity_not_boosted() {
        let evaluator = ConstraintEvaluator::default();
        let set = evaluator.evaluate(&state(4.0, 8, StressLevel::Low, 2.0), Some(RiskBand::High));
        assert_eq!(set.severity(ConstraintKind::CriticalSleep), 1.0);
    }

    #[test]
    fn test_summary_mentions_severity_labels() {
        let evaluator = ConstraintEvaluator::default();
        let set = evaluator.evaluate(&state(4.0, 2, StressLevel::High, 2.0), None);
        let summary = ConstraintEvaluator::summarize(&set);

        assert!(summary.contains("[CRITICAL] critical_sleep"));
        assert!(summary.contains("[HIGH] high_stress"));
    }
}
