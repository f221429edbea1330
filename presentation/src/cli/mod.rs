//! CLI argument types

pub mod commands;

pub use commands::{Cli, OutputFormat};
