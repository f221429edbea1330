//! Configuration loading and schema

pub mod file_config;
pub mod loader;

pub use file_config::{
    FileBreakerConfig, FileConfig, FileCouncilConfig, FileEngineConfig, FileReasoningConfig,
    FileScheduleConfig, FileScorerConfig, FileTemporalConfig,
};
pub use loader::ConfigLoader;

use thiserror::Error;

/// Errors converting the file schema into engine configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid configuration value: {0}")]
    InvalidValue(String),
}
