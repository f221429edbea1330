//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for cycle results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Full formatted output with all engine stages
    Full,
    /// Only the final decision and schedule flags
    Summary,
    /// JSON output
    Json,
}

/// CLI arguments for pacekeeper
#[derive(Parser, Debug)]
#[command(name = "pacekeeper")]
#[command(author, version, about = "Bio-adaptive daily planner with council-reviewed safety decisions")]
#[command(long_about = r#"
Pacekeeper takes a self-reported health snapshot and decides how to spend the
day's limited capacity across fitness, nutrition, recovery, mindfulness, and
productivity, guarding against overexertion.

One decision cycle runs:
1. Assess: constraints, priority reweighting, capacity trade-offs
2. Council: four evaluator profiles vote on the proposed activity
3. Finalize: circuit breaker check and schedule adjustment

Configuration files are loaded from (in priority order):
1. --config <path>        Explicit config file
2. ./pacekeeper.toml      Project-level config
3. ~/.config/pacekeeper/config.toml   Global config

Examples:
  pacekeeper "Strength training" --sleep 7.5 --energy 7 --stress low --time 2
  pacekeeper "HIIT session" -d fitness --sleep 4 --energy 2 --stress high
  pacekeeper --goal "lose 10kg in 3 weeks"
"#)]
pub struct Cli {
    /// The proposed activity to decide on
    pub activity: Option<String>,

    /// Domain of the proposed activity
    #[arg(short, long, default_value = "fitness")]
    pub domain: String,

    /// Requested duration of the activity in minutes
    #[arg(long, default_value_t = 45)]
    pub duration: u32,

    /// Hours slept last night
    #[arg(short, long, default_value_t = 7.0)]
    pub sleep: f64,

    /// Energy level, 1-10
    #[arg(short, long, default_value_t = 6)]
    pub energy: u8,

    /// Stress level: low, medium, high
    #[arg(long, default_value = "medium")]
    pub stress: String,

    /// Hours available today
    #[arg(short, long, default_value_t = 2.0)]
    pub time: f64,

    /// Evaluate a free-text goal instead of running a decision cycle
    #[arg(short, long)]
    pub goal: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "full")]
    pub output: OutputFormat,

    /// Append cycle audit events to this JSONL file
    #[arg(long, value_name = "PATH")]
    pub audit_log: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
