//! Activity domains competing for daily capacity

use serde::{Deserialize, Serialize};

/// An activity domain the engine allocates capacity to
///
/// The set is closed: every task, priority weight, and adaptive signal is
/// keyed by one of these five domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityDomain {
    Recovery,
    Nutrition,
    Fitness,
    Mindfulness,
    Productivity,
}

impl ActivityDomain {
    /// Canonical domain order, used for deterministic tie-breaking when two
    /// domains carry the same adjusted weight.
    pub const CANONICAL: [ActivityDomain; 5] = [
        ActivityDomain::Recovery,
        ActivityDomain::Nutrition,
        ActivityDomain::Fitness,
        ActivityDomain::Mindfulness,
        ActivityDomain::Productivity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityDomain::Recovery => "recovery",
            ActivityDomain::Nutrition => "nutrition",
            ActivityDomain::Fitness => "fitness",
            ActivityDomain::Mindfulness => "mindfulness",
            ActivityDomain::Productivity => "productivity",
        }
    }

    /// Position in the canonical order
    pub fn canonical_index(&self) -> usize {
        Self::CANONICAL
            .iter()
            .position(|d| d == self)
            .unwrap_or(usize::MAX)
    }
}

impl std::fmt::Display for ActivityDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ActivityDomain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "recovery" => Ok(ActivityDomain::Recovery),
            "nutrition" => Ok(ActivityDomain::Nutrition),
            "fitness" => Ok(ActivityDomain::Fitness),
            "mindfulness" => Ok(ActivityDomain::Mindfulness),
            "productivity" => Ok(ActivityDomain::Productivity),
            _ => Err(format!(
                "unknown domain: {}. Valid: recovery, nutrition, fitness, mindfulness, productivity",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_domain() {
        assert_eq!(
            "fitness".parse::<ActivityDomain>().ok(),
            Some(ActivityDomain::Fitness)
        );
        assert_eq!(
            "Recovery".parse::<ActivityDomain>().ok(),
            Some(ActivityDomain::Recovery)
        );
        assert!("cardio".parse::<ActivityDomain>().is_err());
    }

    #[test]
    fn test_canonical_order_is_stable() {
        assert_eq!(ActivityDomain::Recovery.canonical_index(), 0);
        assert_eq!(ActivityDomain::Productivity.canonical_index(), 4);
    }

    #[test]
    fn test_display_round_trip() {
        for domain in ActivityDomain::CANONICAL {
            assert_eq!(
                domain.to_string().parse::<ActivityDomain>().ok(),
                Some(domain)
            );
        }
    }
}
