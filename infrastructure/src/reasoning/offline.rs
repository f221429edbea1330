//! Offline reasoning adapter
//!
//! Used when no service endpoint is configured. Every call reports
//! unavailable, so the application layer's deterministic fallbacks carry the
//! whole cycle (template rationales, heuristic goal screen).

use async_trait::async_trait;
use pacekeeper_application::ports::reasoning::{
    RationaleRefinement, RationaleRequest, ReasoningError, ReasoningGateway,
};
use pacekeeper_domain::{GoalAssessment, HealthState};

/// Always-unavailable gateway
pub struct OfflineReasoning;

#[async_trait]
impl ReasoningGateway for OfflineReasoning {
    async fn refine_rationale(
        &self,
        _request: &RationaleRequest,
    ) -> Result<RationaleRefinement, ReasoningError> {
        Err(ReasoningError::Unavailable(
            "no reasoning endpoint configured".to_string(),
        ))
    }

    async fn evaluate_goal(
        &self,
        _goal: &str,
        _state: &HealthState,
    ) -> Result<GoalAssessment, ReasoningError> {
        Err(ReasoningError::Unavailable(
            "no reasoning endpoint configured".to_string(),
        ))
    }
}
