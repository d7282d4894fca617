//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::sim::event::ScriptedEvent;

/// Default tick count for headless runs.
pub const DEFAULT_TICKS: u64 = 20;

/// Virtual power plant grid dashboard.
///
/// Runs the grid simulation headless by default, printing one line per
/// tick followed by the final grid statistics.
#[derive(Parser, Debug, Clone)]
#[command(name = "vpp-dashboard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Number of ticks to simulate headless
    #[arg(short, long, default_value_t = DEFAULT_TICKS)]
    pub ticks: u64,

    /// Random seed for reproducible runs; overrides the config file
    #[arg(long)]
    pub seed: Option<u64>,

    /// Sleep the configured tick interval between headless ticks
    #[arg(long)]
    pub realtime: bool,

    /// Scenario to apply before a tick, as <tick>:<scenario> (repeatable)
    #[arg(short, long = "event", value_name = "TICK:SCENARIO")]
    pub events: Vec<ScriptedEvent>,

    /// Write retained history to a CSV file
    #[arg(long, value_name = "PATH")]
    pub history_out: Option<PathBuf>,

    /// Ask the advisory service for a recommendation after the run
    #[cfg(feature = "advisory")]
    #[arg(long)]
    pub advise: bool,

    /// Serve the REST API instead of running headless
    #[cfg(feature = "api")]
    #[arg(long)]
    pub serve: bool,

    /// REST API port
    #[cfg(feature = "api")]
    #[arg(long, default_value_t = 3000)]
    pub port: u16,

    /// Open the terminal dashboard
    #[cfg(feature = "tui")]
    #[arg(long)]
    pub tui: bool,
}
