//! Vote types for council consensus

use serde::{Deserialize, Serialize};

/// A council member's verdict on a proposed activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CouncilVote {
    Proceed,
    Modify,
    Skip,
}

impl CouncilVote {
    /// Severity used for confidence-weighted aggregation:
    /// Proceed=0, Modify=1, Skip=2.
    pub fn severity(&self) -> f64 {
        match self {
            CouncilVote::Proceed => 0.0,
            CouncilVote::Modify => 1.0,
            CouncilVote::Skip => 2.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CouncilVote::Proceed => "PROCEED",
            CouncilVote::Modify => "MODIFY",
            CouncilVote::Skip => "SKIP",
        }
    }

    /// Glyph for compact vote summaries, e.g. "[●◐○○]"
    pub fn glyph(&self) -> char {
        match self {
            CouncilVote::Proceed => '●',
            CouncilVote::Modify => '◐',
            CouncilVote::Skip => '○',
        }
    }
}

impl std::fmt::Display for CouncilVote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CouncilVote {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PROCEED" => Ok(CouncilVote::Proceed),
            "MODIFY" => Ok(CouncilVote::Modify),
            "SKIP" => Ok(CouncilVote::Skip),
            _ => Err(format!("unknown vote: {}. Valid: PROCEED, MODIFY, SKIP", s)),
        }
    }
}

/// A single profile's vote in a council run
///
/// Produced fresh per run; persisted only inside a
/// [`Decision`](crate::decision::Decision) record for audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentVote {
    /// Profile identifier (e.g. "recovery", "momentum")
    pub profile: String,
    pub vote: CouncilVote,
    /// Confidence in [0, 1]
    pub confidence: f64,
    /// Prose explanation; the only part that may come from the external
    /// reasoning service
    pub rationale: String,
    /// True when the rationale is the deterministic template fallback
    pub degraded: bool,
}

impl AgentVote {
    pub fn new(
        profile: impl Into<String>,
        vote: CouncilVote,
        confidence: f64,
        rationale: impl Into<String>,
    ) -> Self {
        Self {
            profile: profile.into(),
            vote,
            confidence: confidence.clamp(0.0, 1.0),
            rationale: rationale.into(),
            degraded: false,
        }
    }

    /// Mark the rationale as the template fallback
    pub fn degraded(mut self) -> Self {
        self.degraded = true;
        self
    }

    /// Replace the rationale with service-refined prose; the vote and
    /// confidence stay untouched.
    pub fn with_rationale(mut self, rationale: impl Into<String>) -> Self {
        self.rationale = rationale.into();
        self.degraded = false;
        self
    }
}
