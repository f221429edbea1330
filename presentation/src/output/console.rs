//! Console output formatter for cycle results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use pacekeeper_application::CycleOutcome;
use pacekeeper_domain::{weekday_name, DomainAction, GoalAssessment, GoalStatus, RiskBand};

/// Formats cycle results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    fn section_header(title: &str) -> String {
        format!("\n{}\n", format!("=== {} ===", title).cyan().bold())
    }

    fn risk_colored(band: RiskBand) -> String {
        let label = band.to_string();
        match band {
            RiskBand::Low => label.green().to_string(),
            RiskBand::Moderate => label.yellow().to_string(),
            RiskBand::High => label.red().bold().to_string(),
        }
    }

    fn action_colored(action: DomainAction) -> String {
        let label = action.as_str().to_uppercase();
        match action {
            DomainAction::Prioritize => label.green().bold().to_string(),
            DomainAction::Maintain => label.normal().to_string(),
            DomainAction::Downgrade => label.yellow().to_string(),
            DomainAction::Skip => label.red().to_string(),
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, outcome: &CycleOutcome) -> String {
        let mut out = String::new();

        if outcome.conservative {
            out.push_str(&format!(
                "{}\n",
                "! engine fell back to its conservative safety posture"
                    .red()
                    .bold()
            ));
        }

        // Metrics
        out.push_str(&Self::section_header("Snapshot Metrics"));
        out.push_str(&format!(
            "Readiness {}  Sleep {}  Burnout risk {} ({})\n",
            outcome.metrics.readiness_score.to_string().bold(),
            outcome.metrics.sleep_score,
            outcome.metrics.burnout_risk_score,
            Self::risk_colored(outcome.metrics.burnout_risk_label),
        ));
        out.push_str(&format!(
            "Primary factor: {}\n",
            outcome.metrics.primary_factor
        ));

        // Constraints
        out.push_str(&Self::section_header("Active Constraints"));
        if outcome.constraints.is_empty() {
            out.push_str(&format!("{}\n", "none - full adherence possible".green()));
        } else {
            for c in outcome.constraints.iter() {
                out.push_str(&format!(
                    "  {} (severity {:.2}): {}\n",
                    c.kind.to_string().yellow().bold(),
                    c.severity,
                    c.trigger
                ));
            }
        }

        // Adherence patterns from history
        if !outcome.patterns.signals.is_empty() {
            out.push_str(&Self::section_header("Adherence Patterns"));
            for signal in &outcome.patterns.signals {
                out.push_str(&format!(
                    "  {} skipped {:.0}% of the time recently; base priority {:+.2}\n",
                    signal.domain.to_string().yellow(),
                    signal.skip_rate * 100.0,
                    signal.weight_delta
                ));
            }
            let (peak_day, peak_rate) = outcome
                .patterns
                .weekday_skip_rates
                .iter()
                .enumerate()
                .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
                .map(|(i, rate)| (i, *rate))
                .unwrap_or((0, 0.0));
            if peak_rate > 0.0 {
                out.push_str(&format!(
                    "  Hardest day: {} ({:.0}% skipped)\n",
                    weekday_name(peak_day),
                    peak_rate * 100.0
                ));
            }
        }

        // Trade-offs
        out.push_str(&Self::section_header("Capacity Trade-Offs"));
        for d in &outcome.tradeoffs {
            out.push_str(&format!(
                "  {:<13} {:<11} {:>3}min of {:>3}min (weight {:.2})  {}\n",
                d.domain.to_string(),
                Self::action_colored(d.action),
                d.granted_minutes,
                d.requested_minutes,
                d.weight,
                d.reasoning.dimmed()
            ));
        }

        // Council
        out.push_str(&Self::section_header("Council"));
        out.push_str(&format!(
            "{} {} at {:.0}% confidence{}\n",
            outcome.consensus.vote_summary(),
            outcome.consensus.vote.to_string().bold(),
            outcome.consensus.aggregate_confidence * 100.0,
            if outcome.consensus.degraded {
                " (degraded: template rationales)".yellow().to_string()
            } else {
                String::new()
            }
        ));
        for vote in &outcome.consensus.votes {
            out.push_str(&format!(
                "  {} {} ({:.0}%): {}\n",
                vote.vote.glyph(),
                vote.profile.bold(),
                vote.confidence * 100.0,
                vote.rationale
            ));
        }

        // Circuit breaker
        if outcome.breaker.engaged {
            out.push_str(&Self::section_header("Circuit Breaker"));
            out.push_str(&format!("{}\n", "ENGAGED".red().bold()));
            for block in &outcome.breaker.blocks {
                out.push_str(&format!("  {} blocked: {}\n", block.domain, block.reason));
            }
        }

        // Schedule
        out.push_str(&Self::section_header("Finalized Schedule"));
        out.push_str(&self.format_schedule(outcome));

        // Decision
        out.push_str(&Self::section_header("Decision"));
        out.push_str(&format!(
            "{} {}\n{}\n",
            outcome.decision.action.to_string().bold(),
            outcome.decision.activity,
            outcome.decision.reasoning.dimmed()
        ));

        out
    }

    fn format_json(&self, outcome: &CycleOutcome) -> String {
        serde_json::to_string_pretty(outcome).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_summary(&self, outcome: &CycleOutcome) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{} {} {} at {:.0}% confidence\n",
            outcome.decision.action.to_string().bold(),
            outcome.decision.activity,
            outcome.consensus.vote_summary(),
            outcome.consensus.aggregate_confidence * 100.0,
        ));
        if outcome.breaker.engaged {
            out.push_str(&format!("{}\n", "circuit breaker engaged".red().bold()));
        }
        out.push_str(&self.format_schedule(outcome));
        out
    }

    fn format_goal(&self, assessment: &GoalAssessment) -> String {
        let status = match assessment.status {
            GoalStatus::Accepted => assessment.status.to_string().green().bold().to_string(),
            GoalStatus::Negotiate => assessment.status.to_string().yellow().bold().to_string(),
            GoalStatus::Rejected => assessment.status.to_string().red().bold().to_string(),
        };

        let mut out = format!(
            "{} (risk {:.2})\n{}\n",
            status, assessment.risk_score, assessment.reasoning
        );
        if let Some(counter) = &assessment.counter_proposal {
            out.push_str(&format!("{} {}\n", "Counter-proposal:".cyan().bold(), counter));
        }
        out
    }
}

impl ConsoleFormatter {
    fn format_schedule(&self, outcome: &CycleOutcome) -> String {
        let mut out = String::new();
        for task in &outcome.schedule {
            let flag = if task.is_blocked {
                "x".red().to_string()
            } else {
                "v".green().to_string()
            };
            out.push_str(&format!(
                "  {} {:<24} {:<13} {:>3}min",
                flag, task.title, task.domain.to_string(), task.duration_minutes
            ));
            if let Some(reason) = &task.block_reason
                && task.is_blocked
            {
                out.push_str(&format!("  {}", reason.dimmed()));
            }
            if let Some(note) = &task.note {
                out.push_str(&format!("  {}", note.dimmed()));
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pacekeeper_application::{CycleInput, EngineConfig, ProposedActivity, RunCycleUseCase};
    use pacekeeper_application::ports::reasoning::{
        RationaleRefinement, RationaleRequest, ReasoningError, ReasoningGateway,
    };
    use pacekeeper_domain::{ActivityDomain, HealthState, StressLevel, Task};
    use std::sync::Arc;

    struct DownGateway;

    #[async_trait::async_trait]
    impl ReasoningGateway for DownGateway {
        async fn refine_rationale(
            &self,
            _request: &RationaleRequest,
        ) -> Result<RationaleRefinement, ReasoningError> {
            Err(ReasoningError::Unavailable("down".into()))
        }

        async fn evaluate_goal(
            &self,
            _goal: &str,
            _state: &HealthState,
        ) -> Result<pacekeeper_domain::GoalAssessment, ReasoningError> {
            Err(ReasoningError::Unavailable("down".into()))
        }
    }

    async fn outcome() -> CycleOutcome {
        colored::control::set_override(false);
        let state = HealthState::new(4.0, 2, StressLevel::High, 2.0).unwrap();
        let input = CycleInput::new(
            state,
            ProposedActivity::new("Strength training", ActivityDomain::Fitness, 45),
        )
        .with_tasks(vec![Task::new(
            "Strength training",
            ActivityDomain::Fitness,
            45,
        )])
        .at(0);

        RunCycleUseCase::new(Arc::new(DownGateway), EngineConfig::default())
            .execute(input)
            .await
    }

    #[tokio::test]
    async fn test_full_format_names_every_stage() {
        let formatter = ConsoleFormatter;
        let text = formatter.format(&outcome().await);

        assert!(text.contains("Snapshot Metrics"));
        assert!(text.contains("Active Constraints"));
        assert!(text.contains("burnout_warning"));
        assert!(text.contains("Council"));
        assert!(text.contains("Circuit Breaker"));
        assert!(text.contains("Finalized Schedule"));
        assert!(text.contains("REJECTED"));
    }

    #[tokio::test]
    async fn test_json_format_is_valid() {
        let formatter = ConsoleFormatter;
        let json = formatter.format_json(&outcome().await);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(parsed.get("consensus").is_some());
        assert!(parsed.get("schedule").is_some());
    }

    #[test]
    fn test_goal_format_shows_counter() {
        colored::control::set_override(false);
        let formatter = ConsoleFormatter;
        let text = formatter.format_goal(&GoalAssessment {
            status: GoalStatus::Negotiate,
            reasoning: "too fast".to_string(),
            counter_proposal: Some("slower plan".to_string()),
            risk_score: 0.6,
        });

        assert!(text.contains("NEGOTIATE"));
        assert!(text.contains("slower plan"));
    }
}
