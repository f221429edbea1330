//! HTTP adapter for the reasoning service
//!
//! Speaks JSON to the two service endpoints: `/rationale` for per-profile
//! prose refinement and `/goal-safety` for goal evaluation. Every call is
//! bounded by the client timeout; all failures map onto [`ReasoningError`]
//! so the application layer can degrade deterministically.

use async_trait::async_trait;
use pacekeeper_application::ports::reasoning::{
    RationaleRefinement, RationaleRequest, ReasoningError, ReasoningGateway,
};
use pacekeeper_domain::{CouncilVote, GoalAssessment, GoalStatus, HealthState};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Reasoning service client over HTTP
pub struct HttpReasoningGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpReasoningGateway {
    /// Build a client for the given base URL with a per-request timeout
    pub fn new(
        base_url: impl Into<String>,
        request_timeout: Duration,
    ) -> Result<Self, ReasoningError> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| ReasoningError::Unavailable(e.to_string()))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn map_error(e: reqwest::Error) -> ReasoningError {
        if e.is_timeout() {
            ReasoningError::Timeout
        } else if e.is_connect() {
            ReasoningError::Unavailable(e.to_string())
        } else if e.is_decode() {
            ReasoningError::Malformed(e.to_string())
        } else {
            ReasoningError::RequestFailed(e.to_string())
        }
    }
}

#[derive(Serialize)]
struct RationaleHttpRequest<'a> {
    profile: &'a str,
    profile_name: &'a str,
    vote: &'a str,
    confidence: f64,
    activity: &'a str,
    domain: &'a str,
    state: &'a HealthState,
}

/// The service echoes a vote and confidence alongside the prose; only the
/// prose is consumed — the deterministic pipeline owns the numbers.
#[derive(Deserialize)]
struct RationaleHttpResponse {
    rationale: String,
    #[serde(default)]
    vote: Option<CouncilVote>,
    #[serde(default)]
    confidence: Option<f64>,
}

#[derive(Serialize)]
struct GoalHttpRequest<'a> {
    goal: &'a str,
    state: &'a HealthState,
}

#[derive(Deserialize)]
struct GoalHttpResponse {
    status: GoalStatus,
    reasoning: String,
    counter_proposal: Option<String>,
    risk_score: f64,
}

#[async_trait]
impl ReasoningGateway for HttpReasoningGateway {
    async fn refine_rationale(
        &self,
        request: &RationaleRequest,
    ) -> Result<RationaleRefinement, ReasoningError> {
        let body = RationaleHttpRequest {
            profile: &request.profile_id,
            profile_name: &request.profile_name,
            vote: request.vote.as_str(),
            confidence: request.confidence,
            activity: &request.activity,
            domain: request.domain.as_str(),
            state: &request.state,
        };

        debug!(profile = %request.profile_id, "requesting rationale refinement");
        let response = self
            .client
            .post(self.endpoint("rationale"))
            .json(&body)
            .send()
            .await
            .map_err(Self::map_error)?
            .error_for_status()
            .map_err(|e| ReasoningError::RequestFailed(e.to_string()))?;

        let parsed: RationaleHttpResponse =
            response.json().await.map_err(Self::map_error)?;
        if parsed.rationale.trim().is_empty() {
            return Err(ReasoningError::Malformed(
                "service returned an empty rationale".to_string(),
            ));
        }
        if let Some(vote) = parsed.vote
            && vote != request.vote
        {
            debug!(
                profile = %request.profile_id,
                service_vote = %vote,
                engine_vote = %request.vote,
                service_confidence = ?parsed.confidence,
                "service disagrees with the deterministic vote; keeping the engine's"
            );
        }

        Ok(RationaleRefinement {
            rationale: parsed.rationale,
        })
    }

    async fn evaluate_goal(
        &self,
        goal: &str,
        state: &HealthState,
    ) -> Result<GoalAssessment, ReasoningError> {
        let body = GoalHttpRequest { goal, state };

        debug!("requesting goal-safety evaluation");
        let response = self
            .client
            .post(self.endpoint("goal-safety"))
            .json(&body)
            .send()
            .await
            .map_err(Self::map_error)?
            .error_for_status()
            .map_err(|e| ReasoningError::RequestFailed(e.to_string()))?;

        let parsed: GoalHttpResponse = response.json().await.map_err(Self::map_error)?;
        Ok(GoalAssessment {
            status: parsed.status,
            reasoning: parsed.reasoning,
            counter_proposal: parsed.counter_proposal,
            risk_score: parsed.risk_score.clamp(0.0, 1.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_cleanly() {
        let gateway =
            HttpReasoningGateway::new("http://localhost:8600/", Duration::from_millis(500))
                .unwrap();
        assert_eq!(gateway.endpoint("rationale"), "http://localhost:8600/rationale");
    }

    #[test]
    fn test_rationale_response_tolerates_vote_echo() {
        let json = r#"{"rationale": "prose", "vote": "SKIP", "confidence": 0.8}"#;
        let parsed: RationaleHttpResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.vote, Some(CouncilVote::Skip));
        assert_eq!(parsed.confidence, Some(0.8));

        let bare = r#"{"rationale": "prose"}"#;
        let parsed: RationaleHttpResponse = serde_json::from_str(bare).unwrap();
        assert!(parsed.vote.is_none());
    }

    #[test]
    fn test_goal_response_deserializes() {
        let json = r#"{
            "status": "NEGOTIATE",
            "reasoning": "too fast",
            "counter_proposal": "slower plan",
            "risk_score": 0.6
        }"#;
        let parsed: GoalHttpResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.status, GoalStatus::Negotiate);
        assert_eq!(parsed.counter_proposal.as_deref(), Some("slower plan"));
    }

    #[test]
    fn test_goal_response_without_counter() {
        let json = r#"{"status": "ACCEPTED", "reasoning": "fine", "counter_proposal": null, "risk_score": 0.1}"#;
        let parsed: GoalHttpResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.status, GoalStatus::Accepted);
        assert!(parsed.counter_proposal.is_none());
    }
}
