//! Constraint modifier vectors
//!
//! Each constraint carries a vector of per-domain weight deltas. The deltas
//! are scaled by the constraint's severity before being added to the base
//! weights, so a half-severity constraint shifts priorities half as far.

use crate::constraint::ConstraintKind;
use crate::core::ActivityDomain;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use ActivityDomain::{Fitness, Mindfulness, Nutrition, Productivity, Recovery};

/// Map from constraint kind to its domain deltas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierTable {
    entries: BTreeMap<ConstraintKind, Vec<(ActivityDomain, f64)>>,
}

impl ModifierTable {
    /// Standard modifier vectors
    pub fn standard() -> Self {
        let mut entries = BTreeMap::new();

        entries.insert(
            ConstraintKind::CriticalSleep,
            vec![
                (Recovery, 0.25),
                (Fitness, -0.20),
                (Mindfulness, 0.05),
                (Productivity, -0.10),
            ],
        );
        entries.insert(
            ConstraintKind::LowSleep,
            vec![(Recovery, 0.15), (Fitness, -0.10)],
        );
        entries.insert(
            ConstraintKind::CriticalEnergy,
            vec![
                (Recovery, 0.20),
                (Fitness, -0.25),
                (Mindfulness, 0.10),
                (Productivity, -0.10),
            ],
        );
        entries.insert(
            ConstraintKind::LowEnergy,
            vec![(Recovery, 0.10), (Fitness, -0.15)],
        );
        entries.insert(
            ConstraintKind::HighStress,
            vec![
                (Mindfulness, 0.20),
                (Fitness, -0.10),
                (Recovery, 0.10),
                (Productivity, -0.10),
            ],
        );
        entries.insert(
            ConstraintKind::TimeCritical,
            vec![(Nutrition, 0.10), (Fitness, -0.15)],
        );
        entries.insert(
            ConstraintKind::BurnoutWarning,
            vec![
                (Recovery, 0.25),
                (Fitness, -0.25),
                (Mindfulness, 0.15),
                (Nutrition, -0.10),
                (Productivity, -0.15),
            ],
        );

        Self { entries }
    }

    /// Build from configured entries, falling back to nothing for unlisted
    /// constraints.
    pub fn from_entries(
        entries: BTreeMap<ConstraintKind, Vec<(ActivityDomain, f64)>>,
    ) -> Self {
        Self { entries }
    }

    /// Replace the vector for one constraint (configuration override)
    pub fn set(&mut self, kind: ConstraintKind, deltas: Vec<(ActivityDomain, f64)>) {
        self.entries.insert(kind, deltas);
    }

    /// Deltas for a constraint; empty when none are configured
    pub fn deltas(&self, kind: ConstraintKind) -> &[(ActivityDomain, f64)] {
        self.entries.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl Default for ModifierTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_covers_every_kind() {
        let table = ModifierTable::standard();
        for kind in [
            ConstraintKind::CriticalSleep,
            ConstraintKind::LowSleep,
            ConstraintKind::CriticalEnergy,
            ConstraintKind::LowEnergy,
            ConstraintKind::HighStress,
            ConstraintKind::TimeCritical,
            ConstraintKind::BurnoutWarning,
        ] {
            assert!(!table.deltas(kind).is_empty(), "missing deltas for {}", kind);
        }
    }

    #[test]
    fn test_burnout_pulls_away_from_fitness() {
        let table = ModifierTable::standard();
        let deltas = table.deltas(ConstraintKind::BurnoutWarning);

        let fitness = deltas.iter().find(|(d, _)| *d == Fitness).unwrap().1;
        let recovery = deltas.iter().find(|(d, _)| *d == Recovery).unwrap().1;
        assert!(fitness < 0.0);
        assert!(recovery > 0.0);
    }

    #[test]
    fn test_override_replaces_vector() {
        let mut table = ModifierTable::standard();
        table.set(ConstraintKind::LowSleep, vec![(Recovery, 0.3)]);
        assert_eq!(table.deltas(ConstraintKind::LowSleep), &[(Recovery, 0.3)]);
    }
}
