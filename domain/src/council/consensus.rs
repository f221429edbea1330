//! Confidence-weighted consensus aggregation

use super::vote::{AgentVote, CouncilVote};
use crate::core::DomainError;
use serde::{Deserialize, Serialize};

/// Aggregate severity below this resolves to PROCEED
const PROCEED_BOUND: f64 = 0.5;
/// Aggregate severity below this resolves to MODIFY, SKIP otherwise
const MODIFY_BOUND: f64 = 1.5;

/// Outcome of one council run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusResult {
    pub vote: CouncilVote,
    /// Mean confidence of the votes matching the winning category, in [0, 1]
    pub aggregate_confidence: f64,
    /// Confidence-weighted mean severity the thresholds were applied to
    pub aggregate_severity: f64,
    /// Individual votes, in profile order
    pub votes: Vec<AgentVote>,
    /// True when any profile fell back to its template rationale
    pub degraded: bool,
}

impl ConsensusResult {
    /// Aggregate votes into a consensus.
    ///
    /// Severity map: PROCEED=0, MODIFY=1, SKIP=2; aggregate is the
    /// confidence-weighted mean. Raising the confidence of a SKIP vote can
    /// only pull the aggregate upward, never down.
    ///
    /// # Errors
    ///
    /// [`DomainError::Invariant`] when the vote list is empty or total
    /// confidence is zero.
    pub fn from_votes(votes: Vec<AgentVote>) -> Result<Self, DomainError> {
        if votes.is_empty() {
            return Err(DomainError::invariant("council produced no votes"));
        }

        let total_confidence: f64 = votes.iter().map(|v| v.confidence).sum();
        if total_confidence <= 0.0 {
            return Err(DomainError::invariant(
                "total vote confidence is zero, aggregate is undefined",
            ));
        }

        let aggregate_severity = votes
            .iter()
            .map(|v| v.vote.severity() * v.confidence)
            .sum::<f64>()
            / total_confidence;

        let vote = if aggregate_severity < PROCEED_BOUND {
            CouncilVote::Proceed
        } else if aggregate_severity < MODIFY_BOUND {
            CouncilVote::Modify
        } else {
            CouncilVote::Skip
        };

        let matching: Vec<&AgentVote> = votes.iter().filter(|v| v.vote == vote).collect();
        let aggregate_confidence = if matching.is_empty() {
            // The weighted mean landed between camps; fall back to the
            // overall mean so the number stays meaningful.
            total_confidence / votes.len() as f64
        } else {
            matching.iter().map(|v| v.confidence).sum::<f64>() / matching.len() as f64
        }
        .clamp(0.0, 1.0);

        let degraded = votes.iter().any(|v| v.degraded);

        Ok(Self {
            vote,
            aggregate_confidence,
            aggregate_severity,
            votes,
            degraded,
        })
    }

    /// Maximally conservative consensus, used when an engine invariant broke
    /// mid-cycle.
    pub fn conservative(reason: impl Into<String>) -> Self {
        Self {
            vote: CouncilVote::Skip,
            aggregate_confidence: 1.0,
            aggregate_severity: CouncilVote::Skip.severity(),
            votes: vec![
                AgentVote::new("engine", CouncilVote::Skip, 1.0, reason.into()).degraded(),
            ],
            degraded: true,
        }
    }

    /// Compact vote display, e.g. "[●◐○○]"
    pub fn vote_summary(&self) -> String {
        let mut summary = String::from("[");
        for vote in &self.votes {
            summary.push(vote.vote.glyph());
        }
        summary.push(']');
        summary
    }

    pub fn is_unanimous(&self) -> bool {
        self.votes.iter().all(|v| v.vote == self.vote)
    }

    /// Votes disagreeing with the winning category
    pub fn dissent(&self) -> impl Iterator<Item = &AgentVote> {
        self.votes.iter().filter(|v| v.vote != self.vote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vote(profile: &str, v: CouncilVote, confidence: f64) -> AgentVote {
        AgentVote::new(profile, v, confidence, "test")
    }

    #[test]
    fn test_unanimous_proceed() {
        let result = ConsensusResult::from_votes(vec![
            vote("a", CouncilVote::Proceed, 0.9),
            vote("b", CouncilVote::Proceed, 0.8),
        ])
        .unwrap();

        assert_eq!(result.vote, CouncilVote::Proceed);
        assert_eq!(result.aggregate_severity, 0.0);
        assert!(result.is_unanimous());
        assert!((result.aggregate_confidence - 0.85).abs() < 1e-9);
    }

    #[test]
    fn test_confident_skip_outweighs_hesitant_proceeds() {
        let result = ConsensusResult::from_votes(vec![
            vote("a", CouncilVote::Skip, 0.95),
            vote("b", CouncilVote::Proceed, 0.2),
            vote("c", CouncilVote::Proceed, 0.2),
        ])
        .unwrap();

        // (2*0.95) / 1.35 = 1.407... -> MODIFY band
        assert_eq!(result.vote, CouncilVote::Modify);
        assert!(result.aggregate_severity > 1.0);
    }

    #[test]
    fn test_skip_confidence_monotonicity() {
        let base = ConsensusResult::from_votes(vec![
            vote("a", CouncilVote::Skip, 0.5),
            vote("b", CouncilVote::Proceed, 0.8),
        ])
        .unwrap();

        let raised = ConsensusResult::from_votes(vec![
            vote("a", CouncilVote::Skip, 0.9),
            vote("b", CouncilVote::Proceed, 0.8),
        ])
        .unwrap();

        assert!(raised.aggregate_severity >= base.aggregate_severity);
    }

    #[test]
    fn test_empty_votes_is_invariant_violation() {
        let err = ConsensusResult::from_votes(vec![]).unwrap_err();
        assert!(err.is_invariant());
    }

    #[test]
    fn test_zero_confidence_is_invariant_violation() {
        let err = ConsensusResult::from_votes(vec![
            vote("a", CouncilVote::Proceed, 0.0),
            vote("b", CouncilVote::Skip, 0.0),
        ])
        .unwrap_err();
        assert!(err.is_invariant());
    }

    #[test]
    fn test_degraded_flag_propagates() {
        let result = ConsensusResult::from_votes(vec![
            vote("a", CouncilVote::Proceed, 0.9),
            vote("b", CouncilVote::Proceed, 0.9).degraded(),
        ])
        .unwrap();
        assert!(result.degraded);
    }

    #[test]
    fn test_conservative_result_skips() {
        let result = ConsensusResult::conservative("weights failed to normalize");
        assert_eq!(result.vote, CouncilVote::Skip);
        assert_eq!(result.aggregate_confidence, 1.0);
        assert!(result.degraded);
    }

    #[test]
    fn test_vote_summary_glyphs() {
        let result = ConsensusResult::from_votes(vec![
            vote("a", CouncilVote::Proceed, 0.9),
            vote("b", CouncilVote::Modify, 0.9),
            vote("c", CouncilVote::Skip, 0.9),
        ])
        .unwrap();
        assert_eq!(result.vote_summary(), "[●◐○]");
    }

    #[test]
    fn test_dissent_lists_minority() {
        let result = ConsensusResult::from_votes(vec![
            vote("a", CouncilVote::Proceed, 0.9),
            vote("b", CouncilVote::Proceed, 0.9),
            vote("c", CouncilVote::Skip, 0.3),
        ])
        .unwrap();

        let dissent: Vec<_> = result.dissent().map(|v| v.profile.clone()).collect();
        assert_eq!(dissent, vec!["c"]);
    }
}
