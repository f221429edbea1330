//! Output formatter trait

use pacekeeper_application::CycleOutcome;
use pacekeeper_domain::GoalAssessment;

/// Trait for formatting engine results
pub trait OutputFormatter {
    /// Format the complete cycle outcome
    fn format(&self, outcome: &CycleOutcome) -> String;

    /// Format as JSON
    fn format_json(&self, outcome: &CycleOutcome) -> String;

    /// Format the decision and schedule flags only (concise output)
    fn format_summary(&self, outcome: &CycleOutcome) -> String;

    /// Format a goal-safety assessment
    fn format_goal(&self, assessment: &GoalAssessment) -> String;
}
