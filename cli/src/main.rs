//! CLI entrypoint for pacekeeper
//!
//! Wires together all layers using dependency injection: config from the
//! infrastructure loader, a reasoning gateway (HTTP or offline), the session
//! store, and the run-cycle use case.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use pacekeeper_application::ports::reasoning::ReasoningGateway;
use pacekeeper_application::{
    CycleInput, NegotiateGoalUseCase, ProposedActivity, RunCycleUseCase,
};
use pacekeeper_domain::{ActivityDomain, StressLevel};
use pacekeeper_infrastructure::{
    ConfigLoader, HttpReasoningGateway, JsonlAuditLogger, OfflineReasoning, SessionStore,
};
use pacekeeper_presentation::{
    Cli, ConsoleFormatter, OutputFormat, OutputFormatter, ProgressReporter,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    // === Configuration ===
    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("failed to load configuration: {}", e))?
    };
    let engine_config = file_config
        .into_engine_config()
        .context("invalid configuration")?;

    // === Dependency injection ===
    let gateway: Arc<dyn ReasoningGateway> = match &file_config.reasoning.endpoint {
        Some(endpoint) => {
            info!(%endpoint, "using HTTP reasoning service");
            Arc::new(
                HttpReasoningGateway::new(
                    endpoint.as_str(),
                    Duration::from_millis(file_config.reasoning.request_timeout_ms),
                )
                .context("failed to build reasoning client")?,
            )
        }
        None => {
            info!("no reasoning endpoint configured, running offline");
            Arc::new(OfflineReasoning)
        }
    };

    let store = SessionStore::new(engine_config.scorer.clone());
    let stress: StressLevel = cli.stress.parse().map_err(|e: String| anyhow!(e))?;
    let (state, _metrics) = store
        .update_state(cli.sleep, cli.energy, stress, cli.time)
        .context("invalid health snapshot")?;
    store.set_tasks(file_config.day_tasks()?)?;

    let formatter = ConsoleFormatter;

    // Goal negotiation mode
    if let Some(goal) = &cli.goal {
        let use_case = NegotiateGoalUseCase::new(
            Arc::clone(&gateway),
            engine_config.goal_limits.clone(),
            engine_config.goal_timeout,
        );
        let assessment = use_case.execute(goal, &state).await;

        match cli.output {
            OutputFormat::Json => println!(
                "{}",
                serde_json::to_string_pretty(&assessment).unwrap_or_else(|_| "{}".to_string())
            ),
            _ => println!("{}", formatter.format_goal(&assessment)),
        }
        return Ok(());
    }

    // Decision cycle mode
    let domain: ActivityDomain = cli.domain.parse().map_err(|e: String| anyhow!(e))?;
    let title = cli
        .activity
        .clone()
        .unwrap_or_else(|| format!("{} session", domain));

    let snapshot = store
        .snapshot()?
        .ok_or_else(|| anyhow!("session has no health snapshot"))?;

    let input = CycleInput {
        state: snapshot.state,
        activity: ProposedActivity::new(title, domain, cli.duration),
        history: snapshot.history,
        tasks: snapshot.tasks,
        prior_risk: snapshot.prior_risk,
        now_ms: chrono::Utc::now().timestamp_millis() as u64,
    };

    let mut use_case = RunCycleUseCase::new(Arc::clone(&gateway), engine_config);
    if let Some(path) = &cli.audit_log
        && let Some(logger) = JsonlAuditLogger::new(path)
    {
        use_case = use_case.with_audit(Arc::new(logger));
    }

    let outcome = if cli.quiet {
        use_case.execute(input).await
    } else {
        let progress = ProgressReporter::new();
        use_case.execute_with_progress(input, &progress).await
    };

    store.apply_outcome(&outcome)?;

    let output = match cli.output {
        OutputFormat::Full => formatter.format(&outcome),
        OutputFormat::Summary => formatter.format_summary(&outcome),
        OutputFormat::Json => formatter.format_json(&outcome),
    };
    println!("{}", output);

    Ok(())
}
