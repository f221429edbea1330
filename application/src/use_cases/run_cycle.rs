//! Run Cycle use case
//!
//! Orchestrates one full decision cycle: snapshot → constraints → priority
//! matrix → council → circuit breaker → plan adjuster, with the risk scorer
//! running over snapshot and history alongside.
//!
//! The cycle never hard-fails. External-service errors degrade to template
//! rationales; an engine invariant violation resolves to the maximally
//! conservative outcome (breaker engaged, everything blocked).

use crate::config::EngineConfig;
use crate::ports::audit::{AuditEvent, AuditSink, NoAudit};
use crate::ports::progress::{CyclePhase, CycleProgress, NoProgress};
use crate::ports::reasoning::{RationaleRequest, ReasoningGateway};
use pacekeeper_domain::{
    current_timestamp, ActivityDomain, AgentVote, BreakerVerdict, CircuitBreaker, ComputedMetrics,
    ConsensusResult, ConstraintEvaluator, ConstraintSet, Decision, DecisionAction, DomainAction,
    DomainError, HealthState, PatternScan, PlanAdjuster, PriorityWeights, RiskBand, SkipReason,
    Task, TradeOffDecision, TradeOffEngine,
};
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The activity the council votes on
#[derive(Debug, Clone, PartialEq)]
pub struct ProposedActivity {
    pub title: String,
    pub domain: ActivityDomain,
    pub duration_minutes: u32,
}

impl ProposedActivity {
    pub fn new(title: impl Into<String>, domain: ActivityDomain, duration_minutes: u32) -> Self {
        Self {
            title: title.into(),
            domain,
            duration_minutes,
        }
    }
}

/// Input for one cycle
///
/// `history` is a consistent snapshot taken at cycle start; the engine never
/// reads the live history mid-cycle. `prior_risk` is the previous cycle's
/// burnout band (the adaptive feedback input).
#[derive(Debug, Clone)]
pub struct CycleInput {
    pub state: HealthState,
    pub activity: ProposedActivity,
    pub history: Vec<Decision>,
    pub tasks: Vec<Task>,
    pub prior_risk: Option<RiskBand>,
    /// Cycle timestamp in milliseconds; injected for determinism
    pub now_ms: u64,
}

impl CycleInput {
    pub fn new(state: HealthState, activity: ProposedActivity) -> Self {
        Self {
            state,
            activity,
            history: Vec::new(),
            tasks: Vec::new(),
            prior_risk: None,
            now_ms: current_timestamp(),
        }
    }

    pub fn with_history(mut self, history: Vec<Decision>) -> Self {
        self.history = history;
        self
    }

    pub fn with_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = tasks;
        self
    }

    pub fn with_prior_risk(mut self, prior_risk: Option<RiskBand>) -> Self {
        self.prior_risk = prior_risk;
        self
    }

    pub fn at(mut self, now_ms: u64) -> Self {
        self.now_ms = now_ms;
        self
    }
}

/// Everything one cycle produced
#[derive(Debug, Clone, Serialize)]
pub struct CycleOutcome {
    pub metrics: ComputedMetrics,
    pub constraints: ConstraintSet,
    pub weights: PriorityWeights,
    pub tradeoffs: Vec<TradeOffDecision>,
    pub consensus: ConsensusResult,
    pub breaker: BreakerVerdict,
    pub schedule: Vec<Task>,
    pub patterns: PatternScan,
    pub decision: Decision,
    /// True when an invariant violation forced the conservative fallback
    pub conservative: bool,
}

/// Use case for running one decision cycle
pub struct RunCycleUseCase<G: ReasoningGateway + ?Sized + 'static> {
    gateway: Arc<G>,
    config: EngineConfig,
    audit: Arc<dyn AuditSink>,
}

impl<G: ReasoningGateway + ?Sized + 'static> RunCycleUseCase<G> {
    pub fn new(gateway: Arc<G>, config: EngineConfig) -> Self {
        Self {
            gateway,
            config,
            audit: Arc::new(NoAudit),
        }
    }

    pub fn with_audit(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Execute the cycle with default (no-op) progress
    pub async fn execute(&self, input: CycleInput) -> CycleOutcome {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the cycle with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: CycleInput,
        progress: &dyn CycleProgress,
    ) -> CycleOutcome {
        match self.run(&input, progress).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("cycle fell back to conservative outcome: {}", e);
                self.conservative_outcome(&input, &e)
            }
        }
    }

    async fn run(
        &self,
        input: &CycleInput,
        progress: &dyn CycleProgress,
    ) -> Result<CycleOutcome, DomainError> {
        let cfg = &self.config;
        info!(
            activity = %input.activity.title,
            domain = %input.activity.domain,
            "starting decision cycle"
        );

        // === Phase 1: Assess ===
        progress.on_phase_start(&CyclePhase::Assess, 3);

        let metrics = ComputedMetrics::derive(&input.state, &cfg.scorer);
        let patterns =
            pacekeeper_domain::scan_patterns(&input.history, input.now_ms, &cfg.temporal);

        let evaluator = ConstraintEvaluator::new(cfg.thresholds.clone());
        let constraints = evaluator.evaluate(&input.state, input.prior_risk);
        debug!("{}", ConstraintEvaluator::summarize(&constraints));

        let mut weights = cfg.base_weights.clone();
        weights.apply_signals(&patterns.signals)?;
        weights.apply_constraints(&constraints, &cfg.modifiers)?;

        let mut demand: BTreeMap<ActivityDomain, u32> = BTreeMap::new();
        for task in &input.tasks {
            *demand.entry(task.domain).or_insert(0) += task.duration_minutes;
        }

        let tradeoffs = TradeOffEngine::new(cfg.tradeoff.clone()).decide(
            &weights,
            &demand,
            input.state.available_minutes(),
            &constraints,
        )?;
        progress.on_phase_complete(&CyclePhase::Assess);

        // === Phase 2: Council ===
        progress.on_phase_start(&CyclePhase::Council, cfg.profiles.len());
        let votes = self
            .council_votes(input, patterns.skip_rate(input.activity.domain), progress)
            .await;
        let consensus = ConsensusResult::from_votes(votes)?;
        progress.on_phase_complete(&CyclePhase::Council);

        // === Phase 3: Finalize ===
        progress.on_phase_start(&CyclePhase::Finalize, 2);

        let breaker = CircuitBreaker::new(cfg.breaker_rules.clone()).assess(&constraints);
        let schedule = PlanAdjuster::new(cfg.substitutions.clone()).finalize(
            &input.tasks,
            &tradeoffs,
            &breaker,
        );

        let decision = self.build_decision(input, &constraints, &consensus, &breaker);
        progress.on_phase_complete(&CyclePhase::Finalize);

        self.audit.record(AuditEvent::new(
            "cycle_completed",
            json!({
                "activity": input.activity.title,
                "domain": input.activity.domain,
                "consensus": consensus.vote,
                "aggregate_confidence": consensus.aggregate_confidence,
                "votes": consensus.votes,
                "degraded": consensus.degraded,
                "breaker_engaged": breaker.engaged,
                "constraints": constraints.names(),
                "burnout_risk_score": metrics.burnout_risk_score,
                "action": decision.action,
            }),
        ));

        Ok(CycleOutcome {
            metrics,
            constraints,
            weights,
            tradeoffs,
            consensus,
            breaker,
            schedule,
            patterns,
            decision,
            conservative: false,
        })
    }

    /// Evaluate all profiles concurrently.
    ///
    /// The numeric vote and confidence come from the deterministic profile
    /// rules before any service call. Each rationale refinement is bounded
    /// by its own timeout; a timeout or error leaves only that profile's
    /// template rationale in place.
    async fn council_votes(
        &self,
        input: &CycleInput,
        skip_rate: f64,
        progress: &dyn CycleProgress,
    ) -> Vec<AgentVote> {
        let refinements = self.config.profiles.iter().map(|profile| {
            let vote = profile.cast_vote(&input.state, skip_rate);
            let request = RationaleRequest {
                profile_id: profile.id.clone(),
                profile_name: profile.name.clone(),
                vote: vote.vote,
                confidence: vote.confidence,
                state: input.state.clone(),
                activity: input.activity.title.clone(),
                domain: input.activity.domain,
            };
            let gateway = Arc::clone(&self.gateway);
            let timeout = self.config.rationale_timeout;

            async move {
                let refined = match tokio::time::timeout(
                    timeout,
                    gateway.refine_rationale(&request),
                )
                .await
                {
                    Ok(Ok(refinement)) => vote.with_rationale(refinement.rationale),
                    Ok(Err(e)) => {
                        debug!(profile = %request.profile_id, "rationale degraded: {}", e);
                        vote
                    }
                    Err(_) => {
                        debug!(profile = %request.profile_id, "rationale call timed out");
                        vote
                    }
                };
                progress.on_profile_complete(
                    &CyclePhase::Council,
                    &refined.profile,
                    refined.degraded,
                );
                refined
            }
        });

        // join_all preserves profile order, so votes stay ordered
        futures::future::join_all(refinements).await
    }

    fn build_decision(
        &self,
        input: &CycleInput,
        constraints: &ConstraintSet,
        consensus: &ConsensusResult,
        breaker: &BreakerVerdict,
    ) -> Decision {
        let (action, reasoning) = match breaker.block_for(input.activity.domain) {
            Some(block) => (
                DecisionAction::Rejected,
                format!(
                    "circuit breaker engaged ({}); council had voted {} at {:.0}% confidence",
                    block.reason,
                    consensus.vote,
                    consensus.aggregate_confidence * 100.0
                ),
            ),
            None => (
                DecisionAction::from(consensus.vote),
                format!(
                    "council consensus {} {} at {:.0}% confidence",
                    consensus.vote_summary(),
                    consensus.vote,
                    consensus.aggregate_confidence * 100.0
                ),
            ),
        };

        Decision::new(
            input.now_ms,
            input.activity.title.clone(),
            input.activity.domain,
            action,
            reasoning,
            constraints.names(),
        )
    }

    /// Maximally conservative outcome: treat the cycle as if the circuit
    /// breaker engaged everywhere.
    fn conservative_outcome(&self, input: &CycleInput, error: &DomainError) -> CycleOutcome {
        let reason = format!("conservative fallback: {}", error);
        let cfg = &self.config;

        let metrics = ComputedMetrics::derive(&input.state, &cfg.scorer);
        let patterns =
            pacekeeper_domain::scan_patterns(&input.history, input.now_ms, &cfg.temporal);
        let constraints =
            ConstraintEvaluator::new(cfg.thresholds.clone()).evaluate(&input.state, input.prior_risk);

        let breaker = BreakerVerdict::conservative(&reason);
        let consensus = ConsensusResult::conservative(&reason);

        let tradeoffs: Vec<TradeOffDecision> = ActivityDomain::CANONICAL
            .iter()
            .map(|domain| TradeOffDecision {
                domain: *domain,
                action: DomainAction::Skip,
                requested_minutes: 0,
                granted_minutes: 0,
                weight: 0.0,
                skip_reason: Some(SkipReason::Safety),
                reasoning: reason.clone(),
            })
            .collect();

        let schedule = PlanAdjuster::new(cfg.substitutions.clone()).finalize(
            &input.tasks,
            &tradeoffs,
            &breaker,
        );

        let decision = Decision::new(
            input.now_ms,
            input.activity.title.clone(),
            input.activity.domain,
            DecisionAction::Rejected,
            reason.clone(),
            constraints.names(),
        );

        self.audit.record(AuditEvent::new(
            "cycle_conservative_fallback",
            json!({
                "activity": input.activity.title,
                "reason": reason,
            }),
        ));

        CycleOutcome {
            metrics,
            constraints,
            weights: cfg.base_weights.clone(),
            tradeoffs,
            consensus,
            breaker,
            schedule,
            patterns,
            decision,
            conservative: true,
        }
    }
}
