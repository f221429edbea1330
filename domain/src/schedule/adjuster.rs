//! Plan adjuster
//!
//! Applies the trade-off actions and circuit-breaker blocks to the day's
//! task list. Nothing is ever deleted: skipped and blocked tasks stay in
//! the schedule, flagged with their reason.

use super::task::Task;
use crate::breaker::BreakerVerdict;
use crate::core::ActivityDomain;
use crate::priority::{DomainAction, SkipReason, TradeOffDecision};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lower-intensity stand-in for a downgraded task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Substitute {
    pub title: String,
    pub duration_minutes: u32,
}

/// Configuration-driven substitution table, one entry per domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubstitutionTable {
    entries: BTreeMap<ActivityDomain, Substitute>,
}

impl SubstitutionTable {
    pub fn standard() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(
            ActivityDomain::Fitness,
            Substitute {
                title: "Light stretching".to_string(),
                duration_minutes: 10,
            },
        );
        entries.insert(
            ActivityDomain::Recovery,
            Substitute {
                title: "Power nap".to_string(),
                duration_minutes: 20,
            },
        );
        entries.insert(
            ActivityDomain::Mindfulness,
            Substitute {
                title: "Box breathing".to_string(),
                duration_minutes: 5,
            },
        );
        entries.insert(
            ActivityDomain::Nutrition,
            Substitute {
                title: "Simple prepared meal".to_string(),
                duration_minutes: 10,
            },
        );
        entries.insert(
            ActivityDomain::Productivity,
            Substitute {
                title: "Single focused task".to_string(),
                duration_minutes: 15,
            },
        );
        Self { entries }
    }

    pub fn from_entries(entries: BTreeMap<ActivityDomain, Substitute>) -> Self {
        Self { entries }
    }

    pub fn get(&self, domain: ActivityDomain) -> Option<&Substitute> {
        self.entries.get(&domain)
    }
}

impl Default for SubstitutionTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Finalizes the schedule from engine outputs
#[derive(Debug, Clone, Default)]
pub struct PlanAdjuster {
    substitutions: SubstitutionTable,
}

impl PlanAdjuster {
    pub fn new(substitutions: SubstitutionTable) -> Self {
        Self { substitutions }
    }

    /// Produce the finalized schedule.
    ///
    /// Prioritize/Maintain tasks pass through unchanged; Downgrade tasks are
    /// replaced with the domain's substitute and the reason recorded; Skip
    /// and breaker-blocked tasks are flagged, not removed. Breaker blocks
    /// take precedence over trade-off outcomes.
    pub fn finalize(
        &self,
        tasks: &[Task],
        decisions: &[TradeOffDecision],
        breaker: &BreakerVerdict,
    ) -> Vec<Task> {
        tasks
            .iter()
            .map(|task| {
                let mut task = task.clone();
                let decision = decisions.iter().find(|d| d.domain == task.domain);

                if let Some(decision) = decision {
                    match decision.action {
                        DomainAction::Prioritize | DomainAction::Maintain => {}
                        DomainAction::Downgrade => {
                            let original = task.title.clone();
                            if let Some(substitute) = self.substitutions.get(task.domain) {
                                task.title = substitute.title.clone();
                                task.duration_minutes =
                                    substitute.duration_minutes.min(decision.granted_minutes.max(1));
                            } else {
                                task.duration_minutes =
                                    task.duration_minutes.min(decision.granted_minutes.max(1));
                            }
                            task.note = Some(format!(
                                "substituted for '{}': {}",
                                original, decision.reasoning
                            ));
                        }
                        DomainAction::Skip => {
                            let reason = match decision.skip_reason {
                                Some(SkipReason::Safety) => {
                                    format!("skipped for safety: {}", decision.reasoning)
                                }
                                _ => format!("skipped for capacity: {}", decision.reasoning),
                            };
                            task.block(reason);
                        }
                    }
                }

                if let Some(block) = breaker.block_for(task.domain) {
                    task.block(format!("circuit breaker: {}", block.reason));
                }

                task
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breaker::DomainBlock;

    fn decision(domain: ActivityDomain, action: DomainAction, granted: u32) -> TradeOffDecision {
        TradeOffDecision {
            domain,
            action,
            requested_minutes: 45,
            granted_minutes: granted,
            weight: 0.25,
            skip_reason: match action {
                DomainAction::Skip => Some(SkipReason::Capacity),
                _ => None,
            },
            reasoning: "test".to_string(),
        }
    }

    #[test]
    fn test_maintain_passes_through() {
        let adjuster = PlanAdjuster::default();
        let tasks = vec![Task::new("Meal prep", ActivityDomain::Nutrition, 30)];
        let decisions = vec![decision(ActivityDomain::Nutrition, DomainAction::Maintain, 30)];

        let schedule = adjuster.finalize(&tasks, &decisions, &BreakerVerdict::default());
        assert_eq!(schedule[0], tasks[0]);
    }

    #[test]
    fn test_downgrade_substitutes_same_domain() {
        let adjuster = PlanAdjuster::default();
        let tasks = vec![Task::new("HIIT session", ActivityDomain::Fitness, 45)];
        let decisions = vec![decision(ActivityDomain::Fitness, DomainAction::Downgrade, 20)];

        let schedule = adjuster.finalize(&tasks, &decisions, &BreakerVerdict::default());
        assert_eq!(schedule[0].title, "Light stretching");
        assert_eq!(schedule[0].domain, ActivityDomain::Fitness);
        assert!(schedule[0].note.as_ref().unwrap().contains("HIIT session"));
        assert!(!schedule[0].is_blocked);
    }

    #[test]
    fn test_skip_flags_instead_of_deleting() {
        let adjuster = PlanAdjuster::default();
        let tasks = vec![Task::new("Deep work", ActivityDomain::Productivity, 90)];
        let decisions = vec![decision(ActivityDomain::Productivity, DomainAction::Skip, 0)];

        let schedule = adjuster.finalize(&tasks, &decisions, &BreakerVerdict::default());
        assert_eq!(schedule.len(), 1);
        assert!(schedule[0].is_blocked);
        assert!(
            schedule[0]
                .block_reason
                .as_ref()
                .unwrap()
                .contains("capacity")
        );
    }

    #[test]
    fn test_breaker_block_wins_over_maintain() {
        let adjuster = PlanAdjuster::default();
        let tasks = vec![Task::new("Evening run", ActivityDomain::Fitness, 40)];
        let decisions = vec![decision(ActivityDomain::Fitness, DomainAction::Maintain, 40)];
        let breaker = BreakerVerdict {
            engaged: true,
            blocks: vec![DomainBlock {
                domain: ActivityDomain::Fitness,
                reason: "burnout warning active".to_string(),
            }],
        };

        let schedule = adjuster.finalize(&tasks, &decisions, &breaker);
        assert!(schedule[0].is_blocked);
        assert!(
            schedule[0]
                .block_reason
                .as_ref()
                .unwrap()
                .contains("circuit breaker")
        );
    }

    #[test]
    fn test_tasks_without_decisions_survive() {
        let adjuster = PlanAdjuster::default();
        let tasks = vec![Task::new("Journaling", ActivityDomain::Mindfulness, 10)];

        let schedule = adjuster.finalize(&tasks, &[], &BreakerVerdict::default());
        assert_eq!(schedule[0], tasks[0]);
    }
}
