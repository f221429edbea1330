//! Constraint kinds and the active-constraint set

use serde::{Deserialize, Serialize};

/// A named condition limiting full adherence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    CriticalSleep,
    LowSleep,
    CriticalEnergy,
    LowEnergy,
    HighStress,
    TimeCritical,
    BurnoutWarning,
}

impl ConstraintKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConstraintKind::CriticalSleep => "critical_sleep",
            ConstraintKind::LowSleep => "low_sleep",
            ConstraintKind::CriticalEnergy => "critical_energy",
            ConstraintKind::LowEnergy => "low_energy",
            ConstraintKind::HighStress => "high_stress",
            ConstraintKind::TimeCritical => "time_critical",
            ConstraintKind::BurnoutWarning => "burnout_warning",
        }
    }

    /// Short human description of what the constraint signals
    pub fn description(&self) -> &'static str {
        match self {
            ConstraintKind::CriticalSleep => "severely sleep deprived, rest takes priority",
            ConstraintKind::LowSleep => "sleep below minimum threshold, recovery impaired",
            ConstraintKind::CriticalEnergy => "energy critically low, only essential activities",
            ConstraintKind::LowEnergy => "energy depleted, reduced capacity for effort",
            ConstraintKind::HighStress => "elevated stress, cognitive load impaired",
            ConstraintKind::TimeCritical => "minimal time available, only the top priority fits",
            ConstraintKind::BurnoutWarning => "multiple risk factors indicate burnout risk",
        }
    }
}

impl std::fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ConstraintKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "critical_sleep" => Ok(ConstraintKind::CriticalSleep),
            "low_sleep" => Ok(ConstraintKind::LowSleep),
            "critical_energy" => Ok(ConstraintKind::CriticalEnergy),
            "low_energy" => Ok(ConstraintKind::LowEnergy),
            "high_stress" => Ok(ConstraintKind::HighStress),
            "time_critical" => Ok(ConstraintKind::TimeCritical),
            "burnout_warning" => Ok(ConstraintKind::BurnoutWarning),
            _ => Err(format!("unknown constraint kind: {}", s)),
        }
    }
}

/// A constraint currently in force, with severity in [0, 1]
///
/// Ephemeral: recomputed from the current [`HealthState`] every cycle and
/// never persisted standalone.
///
/// [`HealthState`]: crate::state::HealthState
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveConstraint {
    pub kind: ConstraintKind,
    pub severity: f64,
    /// What fired the rule, e.g. "sleep_hours 4.0 < 5.0"
    pub trigger: String,
}

impl ActiveConstraint {
    pub fn new(kind: ConstraintKind, severity: f64, trigger: impl Into<String>) -> Self {
        Self {
            kind,
            severity: severity.clamp(0.0, 1.0),
            trigger: trigger.into(),
        }
    }
}

/// The set of constraints active for one cycle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstraintSet {
    constraints: Vec<ActiveConstraint>,
}

impl ConstraintSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, constraint: ActiveConstraint) {
        self.constraints.push(constraint);
    }

    pub fn has(&self, kind: ConstraintKind) -> bool {
        self.constraints.iter().any(|c| c.kind == kind)
    }

    /// Severity of the named constraint, or 0.0 when inactive
    pub fn severity(&self, kind: ConstraintKind) -> f64 {
        self.constraints
            .iter()
            .find(|c| c.kind == kind)
            .map(|c| c.severity)
            .unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveConstraint> {
        self.constraints.iter()
    }

    /// Constraint names, for decision-record snapshots
    pub fn names(&self) -> Vec<String> {
        self.constraints
            .iter()
            .map(|c| c.kind.as_str().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_is_clamped() {
        let c = ActiveConstraint::new(ConstraintKind::HighStress, 1.7, "stress high");
        assert_eq!(c.severity, 1.0);
    }

    #[test]
    fn test_set_lookup() {
        let mut set = ConstraintSet::new();
        set.push(ActiveConstraint::new(
            ConstraintKind::LowSleep,
            0.5,
            "sleep_hours 5.5 < 6.0",
        ));

        assert!(set.has(ConstraintKind::LowSleep));
        assert!(!set.has(ConstraintKind::HighStress));
        assert_eq!(set.severity(ConstraintKind::LowSleep), 0.5);
        assert_eq!(set.severity(ConstraintKind::HighStress), 0.0);
    }

    #[test]
    fn test_names_snapshot() {
        let mut set = ConstraintSet::new();
        set.push(ActiveConstraint::new(
            ConstraintKind::CriticalSleep,
            1.0,
            "",
        ));
        set.push(ActiveConstraint::new(ConstraintKind::HighStress, 0.7, ""));

        assert_eq!(set.names(), vec!["critical_sleep", "high_stress"]);
    }
}
