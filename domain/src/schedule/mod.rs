//! Task schedule and plan adjustment

pub mod adjuster;
pub mod task;

pub use adjuster::{PlanAdjuster, Substitute, SubstitutionTable};
pub use task::Task;
