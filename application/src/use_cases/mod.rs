//! Use cases orchestrating the decision engine

pub mod negotiate_goal;
pub mod run_cycle;

pub use negotiate_goal::NegotiateGoalUseCase;
pub use run_cycle::{CycleInput, CycleOutcome, ProposedActivity, RunCycleUseCase};
