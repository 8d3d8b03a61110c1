//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

/// Keeps the non-blocking file writer alive for the whole process.
pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(name = "auton", version, about = "Autonomous routine CLI")]
pub struct Cli {
    /// Path to config TOML (typed)
    #[arg(long, value_name = "FILE", default_value = "etc/auton_config.toml")]
    pub config: PathBuf,

    /// Log as JSON lines instead of pretty
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace)
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the routine against the simulated robot
    Run {
        /// Override the tick cap from config (0 = unbounded)
        #[arg(long, value_name = "TICKS")]
        max_ticks: Option<u64>,
        /// Override the control period from config
        #[arg(long, value_name = "MS")]
        control_period_ms: Option<u64>,
        /// Print per-run tick count on completion
        #[arg(long, action = ArgAction::SetTrue)]
        print_ticks: bool,
    },
    /// Parse and validate the config, then exit
    CheckConfig,
}
