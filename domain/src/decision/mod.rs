//! Decision records and the append-only history
//!
//! Every cycle ends in exactly one [`Decision`]. Records are immutable once
//! appended; the history is owned by the session collaborator and the engine
//! only ever reads a snapshot taken at cycle start.

use crate::core::ActivityDomain;
use crate::council::CouncilVote;
use serde::{Deserialize, Serialize};

/// Final disposition of a proposed activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DecisionAction {
    Proceeded,
    Modified,
    Rejected,
}

impl DecisionAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionAction::Proceeded => "PROCEEDED",
            DecisionAction::Modified => "MODIFIED",
            DecisionAction::Rejected => "REJECTED",
        }
    }

    /// Whether this entry counts as a skip for pattern detection
    pub fn is_skip(&self) -> bool {
        matches!(self, DecisionAction::Rejected)
    }
}

impl From<CouncilVote> for DecisionAction {
    fn from(vote: CouncilVote) -> Self {
        match vote {
            CouncilVote::Proceed => DecisionAction::Proceeded,
            CouncilVote::Modify => DecisionAction::Modified,
            CouncilVote::Skip => DecisionAction::Rejected,
        }
    }
}

impl std::fmt::Display for DecisionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One immutable history entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// Milliseconds since epoch
    pub timestamp_ms: u64,
    pub activity: String,
    pub domain: ActivityDomain,
    pub action: DecisionAction,
    pub reasoning: String,
    /// Names of the constraints active when the decision was made
    pub constraints: Vec<String>,
}

impl Decision {
    pub fn new(
        timestamp_ms: u64,
        activity: impl Into<String>,
        domain: ActivityDomain,
        action: DecisionAction,
        reasoning: impl Into<String>,
        constraints: Vec<String>,
    ) -> Self {
        Self {
            timestamp_ms,
            activity: activity.into(),
            domain,
            action,
            reasoning: reasoning.into(),
            constraints,
        }
    }
}

/// Append-only ordered sequence of decisions
///
/// Exposes no removal or mutation of past entries. Writes are serialized by
/// the owning session; readers take a snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecisionHistory {
    entries: Vec<Decision>,
}

impl DecisionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, decision: Decision) {
        self.entries.push(decision);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consistent snapshot for one cycle
    pub fn snapshot(&self) -> Vec<Decision> {
        self.entries.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Decision> {
        self.entries.iter()
    }
}
