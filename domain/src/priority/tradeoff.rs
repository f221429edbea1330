//! Trade-off engine: capacity allocation over ranked domains
//!
//! Allocates the day's available minutes greedily top-down over the
//! adjusted priority ranking. Every domain ends up with exactly one action;
//! a SKIP always states whether capacity or safety forced it.

use super::weights::PriorityWeights;
use crate::constraint::{ConstraintKind, ConstraintSet};
use crate::core::{ActivityDomain, DomainError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-domain outcome of the trade-off pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainAction {
    /// Full requested duration granted, domain is a top priority today
    Prioritize,
    /// Full requested duration granted, unchanged
    Maintain,
    /// Partial grant; a lower-intensity substitute applies
    Downgrade,
    /// Zero allocation
    Skip,
}

impl DomainAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            DomainAction::Prioritize => "prioritize",
            DomainAction::Maintain => "maintain",
            DomainAction::Downgrade => "downgrade",
            DomainAction::Skip => "skip",
        }
    }
}

impl std::fmt::Display for DomainAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a domain was skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkipReason {
    /// Capacity exhausted or weight share below the viable minimum
    Capacity,
    /// An explicit blocking constraint forced the skip
    Safety,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::Capacity => "capacity",
            SkipReason::Safety => "safety",
        }
    }
}

/// One domain's allocation decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeOffDecision {
    pub domain: ActivityDomain,
    pub action: DomainAction,
    pub requested_minutes: u32,
    pub granted_minutes: u32,
    /// Adjusted weight the decision was ranked by
    pub weight: f64,
    pub skip_reason: Option<SkipReason>,
    pub reasoning: String,
}

/// A constraint that forces named domains to SKIP for safety
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForcedSkip {
    pub when: ConstraintKind,
    pub domains: Vec<ActivityDomain>,
}

/// Trade-off engine tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeOffConfig {
    /// Adjusted weight at or above which a fully granted domain is
    /// PRIORITIZE instead of MAINTAIN
    pub prioritize_threshold: f64,
    /// A weight share below this many minutes is not worth scheduling
    pub min_viable_minutes: u32,
    /// Non-negotiable recovery minimum reserved when critical_sleep is active
    pub reserved_recovery_minutes: u32,
    pub forced_skips: Vec<ForcedSkip>,
}

impl Default for TradeOffConfig {
    fn default() -> Self {
        Self {
            prioritize_threshold: 0.35,
            min_viable_minutes: 15,
            reserved_recovery_minutes: 20,
            forced_skips: vec![ForcedSkip {
                when: ConstraintKind::BurnoutWarning,
                domains: vec![ActivityDomain::Fitness],
            }],
        }
    }
}

/// Greedy allocator over the adjusted priority ranking
#[derive(Debug, Clone, Default)]
pub struct TradeOffEngine {
    config: TradeOffConfig,
}

impl TradeOffEngine {
    pub fn new(config: TradeOffConfig) -> Self {
        Self { config }
    }

    /// Allocate `budget_minutes` across domains.
    ///
    /// `demand` holds the requested minutes per domain (sum of that domain's
    /// scheduled tasks). Returns one decision per weighted domain, in rank
    /// order.
    ///
    /// # Errors
    ///
    /// [`DomainError::Invariant`] when the weight mapping is not normalized
    /// or the domain list is empty.
    pub fn decide(
        &self,
        weights: &PriorityWeights,
        demand: &BTreeMap<ActivityDomain, u32>,
        budget_minutes: u32,
        constraints: &ConstraintSet,
    ) -> Result<Vec<TradeOffDecision>, DomainError> {
        weights.assert_normalized()?;
        let ranked = weights.ranked();
        if ranked.is_empty() {
            return Err(DomainError::invariant("domain ranking is empty"));
        }

        let time_critical = constraints.has(ConstraintKind::TimeCritical);
        let recovery_floor = if constraints.has(ConstraintKind::CriticalSleep) {
            self.config.reserved_recovery_minutes.min(budget_minutes)
        } else {
            0
        };
        let top_domain = ranked[0].0;

        let mut remaining = budget_minutes;
        let mut decisions = Vec::with_capacity(ranked.len());

        for (rank, (domain, weight)) in ranked.iter().enumerate() {
            let domain = *domain;
            let weight = *weight;
            let requested = demand.get(&domain).copied().unwrap_or(0);
            let has_floor = domain == ActivityDomain::Recovery && recovery_floor > 0;

            // Explicit blocking constraints win over everything but the
            // recovery floor.
            if let Some(kind) = self.forced_skip_for(domain, constraints)
                && !has_floor
            {
                decisions.push(TradeOffDecision {
                    domain,
                    action: DomainAction::Skip,
                    requested_minutes: requested,
                    granted_minutes: 0,
                    weight,
                    skip_reason: Some(SkipReason::Safety),
                    reasoning: format!("{} forces {} to stand down today", kind, domain),
                });
                continue;
            }

            if time_critical && rank > 0 && !has_floor {
                decisions.push(TradeOffDecision {
                    domain,
                    action: DomainAction::Skip,
                    requested_minutes: requested,
                    granted_minutes: 0,
                    weight,
                    skip_reason: Some(SkipReason::Safety),
                    reasoning: format!(
                        "time_critical leaves capacity for {} only",
                        top_domain
                    ),
                });
                continue;
            }

            let share = (weight * budget_minutes as f64).floor() as u32;

            if rank > 0 && share < self.config.min_viable_minutes && !has_floor {
                decisions.push(TradeOffDecision {
                    domain,
                    action: DomainAction::Skip,
                    requested_minutes: requested,
                    granted_minutes: 0,
                    weight,
                    skip_reason: Some(SkipReason::Capacity),
                    reasoning: format!(
                        "weight share of {}min is below the {}min viable minimum",
                        share, self.config.min_viable_minutes
                    ),
                });
                continue;
            }

            // The top-ranked domain may consume whatever is left; everyone
            // else is capped at their weight share.
            let mut cap = if rank == 0 { remaining } else { share.min(remaining) };
            if has_floor {
                cap = cap.max(recovery_floor.min(remaining));
            }

            let granted = requested.min(cap);
            remaining -= granted;

            let decision = if requested == 0 {
                TradeOffDecision {
                    domain,
                    action: DomainAction::Maintain,
                    requested_minutes: 0,
                    granted_minutes: 0,
                    weight,
                    skip_reason: None,
                    reasoning: "no scheduled demand in this domain".to_string(),
                }
            } else if granted == 0 {
                TradeOffDecision {
                    domain,
                    action: DomainAction::Skip,
                    requested_minutes: requested,
                    granted_minutes: 0,
                    weight,
                    skip_reason: Some(SkipReason::Capacity),
                    reasoning: "capacity exhausted before this domain".to_string(),
                }
            } else if granted < requested {
                TradeOffDecision {
                    domain,
                    action: DomainAction::Downgrade,
                    requested_minutes: requested,
                    granted_minutes: granted,
                    weight,
                    skip_reason: None,
                    reasoning: format!(
                        "granted {} of {} requested minutes, substituting lighter work",
                        granted, requested
                    ),
                }
            } else {
                let action = if weight >= self.config.prioritize_threshold {
                    DomainAction::Prioritize
                } else {
                    DomainAction::Maintain
                };
                let reasoning = match action {
                    DomainAction::Prioritize => format!(
                        "adjusted weight {:.2} puts {} at the front of today's plan",
                        weight, domain
                    ),
                    _ => "conditions favorable, plan unchanged".to_string(),
                };
                TradeOffDecision {
                    domain,
                    action,
                    requested_minutes: requested,
                    granted_minutes: granted,
                    weight,
                    skip_reason: None,
                    reasoning,
                }
            };

            decisions.push(decision);
        }

        Ok(decisions)
    }

    fn forced_skip_for(
        &self,
        domain: ActivityDomain,
        constraints: &ConstraintSet,
    ) -> Option<ConstraintKind> {
        self.config
            .forced_skips
            .iter()
            .find(|rule| constraints.has(rule.when) && rule.domains.contains(&domain))
            .map(|rule| rule.when)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::ActiveConstraint;

    fn demand_all(minutes: u32) -> BTreeMap<ActivityDomain, u32> {
        ActivityDomain::CANONICAL
            .iter()
            .map(|d| (*d, minutes))
            .collect()
    }

    fn find(decisions: &[TradeOffDecision], domain: ActivityDomain) -> &TradeOffDecision {
        decisions.iter().find(|d| d.domain == domain).unwrap()
    }

    #[test]
    fn test_ample_capacity_maintains_everything() {
        let engine = TradeOffEngine::default();
        let decisions = engine
            .decide(
                &PriorityWeights::standard(),
                &demand_all(20),
                300,
                &ConstraintSet::new(),
            )
            .unwrap();

        for d in &decisions {
            assert!(
                matches!(d.action, DomainAction::Maintain | DomainAction::Prioritize),
                "{} got {:?}",
                d.domain,
                d.action
            );
            assert_eq!(d.granted_minutes, 20);
        }
    }

    #[test]
    fn test_zero_budget_skips_everything_for_capacity() {
        let engine = TradeOffEngine::default();
        let decisions = engine
            .decide(
                &PriorityWeights::standard(),
                &demand_all(30),
                0,
                &ConstraintSet::new(),
            )
            .unwrap();

        for d in &decisions {
            assert_eq!(d.action, DomainAction::Skip);
            assert_eq!(d.skip_reason, Some(SkipReason::Capacity));
        }
    }

    #[test]
    fn test_half_hour_feeds_only_top_domain() {
        // Scenario C: 0.5h available, no critical constraints
        let engine = TradeOffEngine::default();
        let decisions = engine
            .decide(
                &PriorityWeights::standard(),
                &demand_all(30),
                30,
                &ConstraintSet::new(),
            )
            .unwrap();

        let nonzero: Vec<_> = decisions
            .iter()
            .filter(|d| d.granted_minutes > 0)
            .collect();
        assert_eq!(nonzero.len(), 1);
        assert_eq!(nonzero[0].domain, ActivityDomain::Recovery);

        for d in decisions.iter().filter(|d| d.granted_minutes == 0) {
            assert_eq!(d.skip_reason, Some(SkipReason::Capacity));
        }
    }

    #[test]
    fn test_forced_skip_is_marked_safety() {
        let engine = TradeOffEngine::default();
        let mut constraints = ConstraintSet::new();
        constraints.push(ActiveConstraint::new(
            ConstraintKind::BurnoutWarning,
            1.0,
            "",
        ));

        let decisions = engine
            .decide(&PriorityWeights::standard(), &demand_all(30), 180, &constraints)
            .unwrap();

        let fitness = find(&decisions, ActivityDomain::Fitness);
        assert_eq!(fitness.action, DomainAction::Skip);
        assert_eq!(fitness.skip_reason, Some(SkipReason::Safety));
    }

    #[test]
    fn test_critical_sleep_reserves_recovery_minimum() {
        let engine = TradeOffEngine::default();
        let mut constraints = ConstraintSet::new();
        constraints.push(ActiveConstraint::new(
            ConstraintKind::CriticalSleep,
            1.0,
            "",
        ));
        constraints.push(ActiveConstraint::new(ConstraintKind::TimeCritical, 1.0, ""));

        // Recovery ranks first under critical sleep after modifiers; build
        // weights reflecting that.
        let mut weights = PriorityWeights::standard();
        weights
            .apply_constraints(&constraints, &crate::priority::ModifierTable::standard())
            .unwrap();

        let decisions = engine
            .decide(&weights, &demand_all(30), 25, &constraints)
            .unwrap();

        let recovery = find(&decisions, ActivityDomain::Recovery);
        assert!(recovery.granted_minutes >= 20);
    }

    #[test]
    fn test_partial_grant_downgrades() {
        let engine = TradeOffEngine::default();
        let mut demand = BTreeMap::new();
        demand.insert(ActivityDomain::Recovery, 30);
        demand.insert(ActivityDomain::Nutrition, 90);

        let weights = PriorityWeights::from_entries([
            (ActivityDomain::Recovery, 0.6),
            (ActivityDomain::Nutrition, 0.4),
        ])
        .unwrap();

        let decisions = engine
            .decide(&weights, &demand, 120, &ConstraintSet::new())
            .unwrap();

        let nutrition = find(&decisions, ActivityDomain::Nutrition);
        assert_eq!(nutrition.action, DomainAction::Downgrade);
        assert_eq!(nutrition.granted_minutes, 48); // floor(0.4 * 120)
    }

    #[test]
    fn test_decisions_follow_rank_order() {
        let engine = TradeOffEngine::default();
        let decisions = engine
            .decide(
                &PriorityWeights::standard(),
                &demand_all(20),
                300,
                &ConstraintSet::new(),
            )
            .unwrap();

        assert_eq!(decisions[0].domain, ActivityDomain::Recovery);
        let weights: Vec<f64> = decisions.iter().map(|d| d.weight).collect();
        let mut sorted = weights.clone();
        sorted.sort_by(|a, b| b.partial_cmp(a).unwrap());
        assert_eq!(weights, sorted);
    }
}
