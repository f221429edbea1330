//! Multi-profile council
//!
//! Four independently configured evaluators vote on a proposed activity;
//! votes aggregate into a single confidence-weighted consensus. Profiles are
//! plain data records scored by one generic function; only the prose
//! rationale may come from an external service.

pub mod consensus;
pub mod profile;
pub mod vote;

pub use consensus::ConsensusResult;
pub use profile::{EvaluatorProfile, ProfileReading, ProfileThresholds, SignalWeights};
pub use vote::{AgentVote, CouncilVote};
