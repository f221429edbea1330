//! Negotiate Goal use case
//!
//! Gatekeeps free-text goals. Prefers the external reasoning service's
//! assessment; on timeout or failure, the deterministic heuristic screen
//! takes over. Either way the caller always gets a verdict.

use crate::ports::reasoning::ReasoningGateway;
use pacekeeper_domain::{screen_goal, GoalAssessment, GoalLimits, HealthState};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Use case for evaluating goal safety
pub struct NegotiateGoalUseCase<G: ReasoningGateway + ?Sized + 'static> {
    gateway: Arc<G>,
    limits: GoalLimits,
    timeout: Duration,
}

impl<G: ReasoningGateway + ?Sized + 'static> NegotiateGoalUseCase<G> {
    pub fn new(gateway: Arc<G>, limits: GoalLimits, timeout: Duration) -> Self {
        Self {
            gateway,
            limits,
            timeout,
        }
    }

    /// Evaluate a goal; never fails
    pub async fn execute(&self, goal: &str, state: &HealthState) -> GoalAssessment {
        info!(goal, "evaluating goal safety");

        match tokio::time::timeout(self.timeout, self.gateway.evaluate_goal(goal, state)).await {
            Ok(Ok(mut assessment)) => {
                assessment.risk_score = assessment.risk_score.clamp(0.0, 1.0);
                assessment
            }
            Ok(Err(e)) => {
                debug!("goal evaluation degraded to heuristic screen: {}", e);
                screen_goal(goal, state, &self.limits)
            }
            Err(_) => {
                debug!("goal evaluation timed out, using heuristic screen");
                screen_goal(goal, state, &self.limits)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::reasoning::{
        RationaleRefinement, RationaleRequest, ReasoningError,
    };
    use async_trait::async_trait;
    use pacekeeper_domain::{GoalStatus, StressLevel};

    struct DownGateway;

    #[async_trait]
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
        ) -> Result<GoalAssessment, ReasoningError> {
            Err(ReasoningError::Unavailable("down".into()))
        }
    }

    struct LenientGateway;

    #[async_trait]
    impl ReasoningGateway for LenientGateway {
        async fn refine_rationale(
            &self,
            _request: &RationaleRequest,
        ) -> Result<RationaleRefinement, ReasoningError> {
            Err(ReasoningError::Unavailable("not under test".into()))
        }

        async fn evaluate_goal(
            &self,
            _goal: &str,
            _state: &HealthState,
        ) -> Result<GoalAssessment, ReasoningError> {
            Ok(GoalAssessment {
                status: GoalStatus::Accepted,
                reasoning: "service says fine".into(),
                counter_proposal: None,
                risk_score: 7.0, // out of range on purpose
            })
        }
    }

    fn state() -> HealthState {
        HealthState::new(7.5, 7, StressLevel::Low, 2.0).unwrap()
    }

    #[tokio::test]
    async fn test_service_verdict_is_used_and_clamped() {
        let use_case = NegotiateGoalUseCase::new(
            Arc::new(LenientGateway),
            GoalLimits::default(),
            Duration::from_millis(500),
        );

        let assessment = use_case.execute("lose 20kg in 2 weeks", &state()).await;
        assert_eq!(assessment.status, GoalStatus::Accepted);
        assert_eq!(assessment.risk_score, 1.0);
    }

    #[tokio::test]
    async fn test_unreachable_service_falls_back_to_heuristics() {
        let use_case = NegotiateGoalUseCase::new(
            Arc::new(DownGateway),
            GoalLimits::default(),
            Duration::from_millis(500),
        );

        let assessment = use_case.execute("lose 20kg in 2 weeks", &state()).await;
        assert_eq!(assessment.status, GoalStatus::Negotiate);
        assert!(assessment.counter_proposal.is_some());
    }
}
