//! Reasoning service port
//!
//! Defines the interface to the optional external reasoning service. The
//! service has exactly two capabilities: refining a profile's rationale
//! prose, and evaluating goal safety. Both are advisory — every call site
//! owns a deterministic fallback, and a failure here never fails a cycle.

use async_trait::async_trait;
use pacekeeper_domain::{ActivityDomain, CouncilVote, GoalAssessment, HealthState};
use thiserror::Error;

/// Errors from the reasoning service
#[derive(Error, Debug)]
pub enum ReasoningError {
    #[error("reasoning service timed out")]
    Timeout,

    #[error("reasoning service unavailable: {0}")]
    Unavailable(String),

    #[error("malformed service response: {0}")]
    Malformed(String),

    #[error("request failed: {0}")]
    RequestFailed(String),
}

/// Everything the service needs to write better prose for one vote
///
/// The vote and confidence are already decided; the service only explains.
#[derive(Debug, Clone)]
pub struct RationaleRequest {
    pub profile_id: String,
    pub profile_name: String,
    pub vote: CouncilVote,
    pub confidence: f64,
    pub state: HealthState,
    pub activity: String,
    pub domain: ActivityDomain,
}

/// Service-refined rationale prose
#[derive(Debug, Clone)]
pub struct RationaleRefinement {
    pub rationale: String,
}

/// Gateway to the external reasoning service
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ReasoningGateway: Send + Sync {
    /// Refine one profile's rationale given state and activity
    async fn refine_rationale(
        &self,
        request: &RationaleRequest,
    ) -> Result<RationaleRefinement, ReasoningError>;

    /// Evaluate the safety of a free-text goal
    async fn evaluate_goal(
        &self,
        goal: &str,
        state: &HealthState,
    ) -> Result<GoalAssessment, ReasoningError>;
}
