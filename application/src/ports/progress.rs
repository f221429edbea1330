//! Progress notification port
//!
//! Callbacks for the decision cycle's phases. Implementations live in the
//! presentation layer and can display progress however they like.

/// Phases of one decision cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePhase {
    /// Metrics, constraints, priorities, trade-offs
    Assess,
    /// Parallel profile evaluation and consensus
    Council,
    /// Circuit breaker and schedule finalization
    Finalize,
}

impl CyclePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            CyclePhase::Assess => "assess",
            CyclePhase::Council => "council",
            CyclePhase::Finalize => "finalize",
        }
    }
}

/// Callback for progress updates during a cycle
pub trait CycleProgress: Send + Sync {
    /// Called when a phase starts
    fn on_phase_start(&self, phase: &CyclePhase, total_tasks: usize);

    /// Called when one council profile finishes (council phase only)
    fn on_profile_complete(&self, phase: &CyclePhase, profile: &str, degraded: bool);

    /// Called when a phase completes
    fn on_phase_complete(&self, phase: &CyclePhase);
}

/// No-op progress for when reporting is not needed
pub struct NoProgress;

impl CycleProgress for NoProgress {
    fn on_phase_start(&self, _phase: &CyclePhase, _total_tasks: usize) {}
    fn on_profile_complete(&self, _phase: &CyclePhase, _profile: &str, _degraded: bool) {}
    fn on_phase_complete(&self, _phase: &CyclePhase) {}
}
