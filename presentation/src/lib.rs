//! Presentation layer for pacekeeper
//!
//! This crate contains CLI definitions, output formatters, and progress
//! reporters. The engine works the same if this whole layer is replaced.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
