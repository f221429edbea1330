//! Domain priority weights
//!
//! The weight mapping is the invariant-bearing heart of the trade-off
//! engine: weights are non-negative and sum to 1.0 within epsilon after
//! every adjustment. A mapping that cannot be renormalized is an
//! [`DomainError::Invariant`], resolved conservatively by the caller.

use crate::core::{ActivityDomain, DomainError};
use crate::constraint::ConstraintSet;
use crate::priority::modifier::ModifierTable;
use crate::risk::AdaptiveSignal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tolerance for the sum-to-one invariant
pub const WEIGHT_EPSILON: f64 = 1e-6;

/// Priority weight per activity domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityWeights {
    weights: BTreeMap<ActivityDomain, f64>,
}

impl PriorityWeights {
    /// Standard base weights: recovery 0.30, nutrition 0.25, fitness 0.25,
    /// mindfulness 0.10, productivity 0.10.
    pub fn standard() -> Self {
        Self::from_entries([
            (ActivityDomain::Recovery, 0.30),
            (ActivityDomain::Nutrition, 0.25),
            (ActivityDomain::Fitness, 0.25),
            (ActivityDomain::Mindfulness, 0.10),
            (ActivityDomain::Productivity, 0.10),
        ])
        .expect("standard weights are valid")
    }

    /// Build from configured entries; normalizes so configuration does not
    /// have to sum to exactly 1.0.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (ActivityDomain, f64)>,
    ) -> Result<Self, DomainError> {
        let weights: BTreeMap<ActivityDomain, f64> = entries.into_iter().collect();
        if weights.is_empty() {
            return Err(DomainError::invariant("domain weight list is empty"));
        }
        for (domain, w) in &weights {
            if !w.is_finite() || *w < 0.0 {
                return Err(DomainError::invariant(format!(
                    "base weight for {} is not a non-negative number: {}",
                    domain, w
                )));
            }
        }

        let mut this = Self { weights };
        this.normalize()?;
        Ok(this)
    }

    pub fn get(&self, domain: ActivityDomain) -> f64 {
        self.weights.get(&domain).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ActivityDomain, f64)> + '_ {
        self.weights.iter().map(|(d, w)| (*d, *w))
    }

    /// Apply adaptive base-priority deltas from the previous cycle's
    /// temporal scan, then renormalize.
    pub fn apply_signals(&mut self, signals: &[AdaptiveSignal]) -> Result<(), DomainError> {
        for signal in signals {
            if let Some(w) = self.weights.get_mut(&signal.domain) {
                *w += signal.weight_delta;
            }
        }
        self.normalize()
    }

    /// Apply the modifier vector of every active constraint, scaled by the
    /// constraint's severity, then renormalize.
    pub fn apply_constraints(
        &mut self,
        constraints: &ConstraintSet,
        modifiers: &ModifierTable,
    ) -> Result<(), DomainError> {
        for constraint in constraints.iter() {
            for (domain, delta) in modifiers.deltas(constraint.kind) {
                if let Some(w) = self.weights.get_mut(domain) {
                    *w += delta * constraint.severity;
                }
            }
        }
        self.normalize()
    }

    /// Clamp negatives to zero and rescale to sum 1.0
    fn normalize(&mut self) -> Result<(), DomainError> {
        for w in self.weights.values_mut() {
            if !w.is_finite() {
                return Err(DomainError::invariant("weight is not finite"));
            }
            *w = w.max(0.0);
        }

        let total: f64 = self.weights.values().sum();
        if total <= WEIGHT_EPSILON {
            return Err(DomainError::invariant(
                "weights sum to zero, cannot renormalize",
            ));
        }

        // Already within tolerance: leave exact values untouched
        if (total - 1.0).abs() > WEIGHT_EPSILON {
            for w in self.weights.values_mut() {
                *w /= total;
            }
        }
        Ok(())
    }

    /// Check the sum-to-one invariant without mutating
    pub fn assert_normalized(&self) -> Result<(), DomainError> {
        let total: f64 = self.weights.values().sum();
        if (total - 1.0).abs() > WEIGHT_EPSILON {
            return Err(DomainError::invariant(format!(
                "weights sum to {} instead of 1.0",
                total
            )));
        }
        Ok(())
    }

    /// Domains ranked by descending adjusted weight; ties broken by the
    /// canonical domain order (stable, never random).
    pub fn ranked(&self) -> Vec<(ActivityDomain, f64)> {
        let mut ranked: Vec<(ActivityDomain, f64)> = self.iter().collect();
        ranked.sort_by(|(da, wa), (db, wb)| {
            wb.partial_cmp(wa)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(da.canonical_index().cmp(&db.canonical_index()))
        });
        ranked
    }
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::{ActiveConstraint, ConstraintKind};

    #[test]
    fn test_standard_sums_to_one() {
        let weights = PriorityWeights::standard();
        assert!(weights.assert_normalized().is_ok());
        assert_eq!(weights.get(ActivityDomain::Recovery), 0.30);
    }

    #[test]
    fn test_from_entries_normalizes() {
        let weights = PriorityWeights::from_entries([
            (ActivityDomain::Recovery, 3.0),
            (ActivityDomain::Fitness, 1.0),
        ])
        .unwrap();
        assert!((weights.get(ActivityDomain::Recovery) - 0.75).abs() < WEIGHT_EPSILON);
    }

    #[test]
    fn test_empty_entries_is_invariant_violation() {
        let err = PriorityWeights::from_entries([]).unwrap_err();
        assert!(err.is_invariant());
    }

    #[test]
    fn test_negative_base_weight_rejected() {
        let result =
            PriorityWeights::from_entries([(ActivityDomain::Recovery, -0.5)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_constraint_adjustment_keeps_invariant() {
        let mut weights = PriorityWeights::standard();
        let mut set = ConstraintSet::new();
        set.push(ActiveConstraint::new(ConstraintKind::CriticalSleep, 1.0, ""));
        set.push(ActiveConstraint::new(ConstraintKind::HighStress, 0.7, ""));

        weights
            .apply_constraints(&set, &ModifierTable::standard())
            .unwrap();

        assert!(weights.assert_normalized().is_ok());
        // Recovery rises, fitness falls
        assert!(weights.get(ActivityDomain::Recovery) > 0.30);
        assert!(weights.get(ActivityDomain::Fitness) < 0.25);
    }

    #[test]
    fn test_modifiers_scaled_by_severity() {
        let modifiers = ModifierTable::standard();

        let mut full = PriorityWeights::standard();
        let mut set = ConstraintSet::new();
        set.push(ActiveConstraint::new(ConstraintKind::LowSleep, 1.0, ""));
        full.apply_constraints(&set, &modifiers).unwrap();

        let mut half = PriorityWeights::standard();
        let mut set = ConstraintSet::new();
        set.push(ActiveConstraint::new(ConstraintKind::LowSleep, 0.5, ""));
        half.apply_constraints(&set, &modifiers).unwrap();

        let full_shift = full.get(ActivityDomain::Recovery) - 0.30;
        let half_shift = half.get(ActivityDomain::Recovery) - 0.30;
        assert!(full_shift > half_shift);
        assert!(half_shift > 0.0);
    }

    #[test]
    fn test_ranked_ties_use_canonical_order() {
        let weights = PriorityWeights::from_entries([
            (ActivityDomain::Fitness, 0.5),
            (ActivityDomain::Productivity, 0.5),
        ])
        .unwrap();
        let ranked = weights.ranked();
        assert_eq!(ranked[0].0, ActivityDomain::Fitness);
        assert_eq!(ranked[1].0, ActivityDomain::Productivity);
    }

    #[test]
    fn test_adaptive_signal_lowers_base_priority() {
        let mut weights = PriorityWeights::standard();
        let before = weights.get(ActivityDomain::Fitness);

        weights
            .apply_signals(&[AdaptiveSignal {
                domain: ActivityDomain::Fitness,
                skip_rate: 0.8,
                weight_delta: -0.05,
            }])
            .unwrap();

        assert!(weights.get(ActivityDomain::Fitness) < before);
        assert!(weights.assert_normalized().is_ok());
    }
}
