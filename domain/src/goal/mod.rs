//! Heuristic goal-safety screening
//!
//! Deterministic fallback for the external goal-negotiation capability:
//! plain text pattern matching against configured safety limits. No I/O,
//! no regex machinery — the same conservative screen always runs when the
//! reasoning service is unreachable.

use crate::state::{HealthState, StressLevel};
use serde::{Deserialize, Serialize};

/// Verdict categories for a proposed goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GoalStatus {
    Accepted,
    Negotiate,
    Rejected,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Accepted => "ACCEPTED",
            GoalStatus::Negotiate => "NEGOTIATE",
            GoalStatus::Rejected => "REJECTED",
        }
    }
}

impl std::fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Assessment of a free-text goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalAssessment {
    pub status: GoalStatus,
    pub reasoning: String,
    pub counter_proposal: Option<String>,
    /// 0.0 (harmless) to 1.0 (dangerous)
    pub risk_score: f64,
}

/// Safety limits the screen measures goals against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalLimits {
    pub max_loss_kg_per_week: f64,
    pub max_gain_kg_per_week: f64,
    pub min_sleep_hours: f64,
}

impl Default for GoalLimits {
    fn default() -> Self {
        Self {
            max_loss_kg_per_week: 1.0,
            max_gain_kg_per_week: 0.5,
            min_sleep_hours: 6.0,
        }
    }
}

/// Screen a goal against the limits.
///
/// Checks, in order: sleep-reduction goals (rejected outright), unsafe
/// weight-change velocity (negotiated down), and no-rest-day training
/// schedules (negotiated to five days a week).
pub fn screen(goal: &str, state: &HealthState, limits: &GoalLimits) -> GoalAssessment {
    let lower = goal.to_lowercase();
    let words: Vec<&str> = lower.split_whitespace().collect();

    if let Some(assessment) = screen_sleep(&lower, &words, limits) {
        return assessment;
    }
    if let Some(assessment) = screen_weight_velocity(&words, limits) {
        return assessment;
    }
    if let Some(assessment) = screen_no_rest(goal, &lower) {
        return assessment;
    }

    // Default: accept, slightly warier when the current snapshot is already
    // strained.
    if state.stress_level == StressLevel::High {
        GoalAssessment {
            status: GoalStatus::Accepted,
            reasoning: "Goal looks sustainable, but current stress is high; pace the start."
                .to_string(),
            counter_proposal: None,
            risk_score: 0.2,
        }
    } else {
        GoalAssessment {
            status: GoalStatus::Accepted,
            reasoning: "Goal appears ambitious yet sustainable.".to_string(),
            counter_proposal: None,
            risk_score: 0.05,
        }
    }
}

/// Reject goals that cut sleep below the floor
fn screen_sleep(lower: &str, words: &[&str], limits: &GoalLimits) -> Option<GoalAssessment> {
    let mentions_sleep = lower.contains("sleep");
    if !mentions_sleep {
        return None;
    }

    let explicit_reduction = lower.contains("sleep less") || lower.contains("less sleep");
    let low_hours = words.windows(2).any(|pair| {
        let hours_word = matches!(pair[1], "hours" | "hour" | "h" | "hrs");
        hours_word
            && parse_number(pair[0])
                .map(|n| n < limits.min_sleep_hours)
                .unwrap_or(false)
    });

    if explicit_reduction || low_hours {
        return Some(GoalAssessment {
            status: GoalStatus::Rejected,
            reasoning: format!(
                "Cutting sleep below {:.0}h per night degrades every other domain.",
                limits.min_sleep_hours
            ),
            counter_proposal: Some("Improve sleep quality at 8h total instead".to_string()),
            risk_score: 0.9,
        });
    }
    None
}

/// Negotiate weight-change goals whose weekly rate exceeds the safe limit
fn screen_weight_velocity(words: &[&str], limits: &GoalLimits) -> Option<GoalAssessment> {
    let (direction, kg) = parse_weight_change(words)?;
    let weeks = parse_duration_weeks(words)?;
    if weeks <= 0.0 {
        return None;
    }

    let rate = kg / weeks;
    let limit = match direction {
        "lose" => limits.max_loss_kg_per_week,
        _ => limits.max_gain_kg_per_week,
    };
    if rate <= limit {
        return None;
    }

    let recommended_weeks = (kg / (limit * 0.8)).ceil() as u32;
    Some(GoalAssessment {
        status: GoalStatus::Negotiate,
        reasoning: format!(
            "That pace means {:.1}kg per week; the safe limit is about {:.1}kg per week.",
            rate, limit
        ),
        counter_proposal: Some(format!(
            "{} {:.0}kg over {} weeks instead",
            direction, kg, recommended_weeks
        )),
        risk_score: 0.6,
    })
}

/// Negotiate every-day training schedules down to five days a week
fn screen_no_rest(original: &str, lower: &str) -> Option<GoalAssessment> {
    let daily = lower.contains("every day") || lower.contains("everyday") || lower.contains("daily");
    let training = ["run", "train", "gym", "workout", "exercise", "lift"]
        .iter()
        .any(|w| lower.contains(w));
    if !(daily && training) {
        return None;
    }

    let counter = if lower.contains("every day") {
        lower.replace("every day", "5 days/week")
    } else {
        format!("{} (5 days/week, with rest days)", original)
    };

    Some(GoalAssessment {
        status: GoalStatus::Negotiate,
        reasoning: "Training without rest days leads to overtraining; adaptation happens during recovery."
            .to_string(),
        counter_proposal: Some(counter),
        risk_score: 0.5,
    })
}

/// Find "lose|gain <amount> <kg|lbs>" and normalize to kilograms
fn parse_weight_change(words: &[&str]) -> Option<(&'static str, f64)> {
    for (i, word) in words.iter().enumerate() {
        let direction = match *word {
            "lose" => "lose",
            "gain" => "gain",
            _ => continue,
        };
        let rest = words.get(i + 1)?;

        // Amount and unit may be one token ("10kg") or two ("10 kg")
        let (amount, unit) = if let Some(stripped) = rest.strip_suffix("kg") {
            (parse_number(stripped)?, "kg")
        } else if let Some(stripped) = rest.strip_suffix("lbs") {
            (parse_number(stripped)?, "lbs")
        } else {
            let amount = parse_number(rest)?;
            match words.get(i + 2).copied() {
                Some("kg") | Some("kilos") | Some("kilograms") => (amount, "kg"),
                Some("lbs") | Some("pounds") => (amount, "lbs"),
                _ => continue,
            }
        };

        let kg = if unit == "lbs" { amount * 0.4536 } else { amount };
        return Some((direction, kg));
    }
    None
}

/// Find "in <n> <days|weeks|months>" and normalize to weeks
fn parse_duration_weeks(words: &[&str]) -> Option<f64> {
    for (i, word) in words.iter().enumerate() {
        if *word != "in" {
            continue;
        }
        let Some(amount) = words.get(i + 1).and_then(|w| parse_number(w)) else {
            continue;
        };
        let Some(period) = words.get(i + 2) else {
            continue;
        };
        let weeks = if period.starts_with("day") {
            amount / 7.0
        } else if period.starts_with("week") {
            amount
        } else if period.starts_with("month") {
            amount * 4.0
        } else {
            continue;
        };
        return Some(weeks);
    }
    None
}

fn parse_number(word: &str) -> Option<f64> {
    word.trim_matches(|c: char| !c.is_ascii_digit() && c != '.')
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> HealthState {
        HealthState::new(7.5, 7, StressLevel::Low, 2.0).unwrap()
    }

    #[test]
    fn test_reasonable_goal_accepted() {
        let result = screen("lose 4kg in 8 weeks", &state(), &GoalLimits::default());
        assert_eq!(result.status, GoalStatus::Accepted);
        assert!(result.risk_score < 0.1);
    }

    #[test]
    fn test_crash_diet_negotiated() {
        let result = screen("lose 10 kg in 3 weeks", &state(), &GoalLimits::default());
        assert_eq!(result.status, GoalStatus::Negotiate);
        assert!(result.counter_proposal.is_some());
        assert!(result.reasoning.contains("kg per week"));
    }

    #[test]
    fn test_pounds_are_normalized() {
        // 22 lbs ~ 10kg in 2 weeks: well over the loss limit
        let result = screen("lose 22lbs in 2 weeks", &state(), &GoalLimits::default());
        assert_eq!(result.status, GoalStatus::Negotiate);
    }

    #[test]
    fn test_rapid_gain_uses_gain_limit() {
        let result = screen("gain 3kg in 2 weeks", &state(), &GoalLimits::default());
        assert_eq!(result.status, GoalStatus::Negotiate);
    }

    #[test]
    fn test_sleep_reduction_rejected() {
        let result = screen(
            "sleep less so I can work more",
            &state(),
            &GoalLimits::default(),
        );
        assert_eq!(result.status, GoalStatus::Rejected);
        assert!(result.risk_score > 0.8);

        let result = screen(
            "get by on 4 hours of sleep",
            &state(),
            &GoalLimits::default(),
        );
        assert_eq!(result.status, GoalStatus::Rejected);
    }

    #[test]
    fn test_no_rest_days_negotiated() {
        let result = screen("run every day this month", &state(), &GoalLimits::default());
        assert_eq!(result.status, GoalStatus::Negotiate);
        assert!(result.counter_proposal.unwrap().contains("5 days/week"));
    }

    #[test]
    fn test_high_stress_raises_accepted_risk() {
        let stressed = HealthState::new(7.5, 7, StressLevel::High, 2.0).unwrap();
        let result = screen("read more books", &stressed, &GoalLimits::default());
        assert_eq!(result.status, GoalStatus::Accepted);
        assert!(result.risk_score > 0.1);
    }

    #[test]
    fn test_screen_is_deterministic() {
        let limits = GoalLimits::default();
        let a = screen("lose 10kg in 2 weeks", &state(), &limits);
        let b = screen("lose 10kg in 2 weeks", &state(), &limits);
        assert_eq!(a, b);
    }
}
