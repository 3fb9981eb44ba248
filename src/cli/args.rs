//! CLI argument definitions using clap derive

use crate::domain::TrackedResource;
use clap::{CommandFactory, Parser, ValueEnum};
use clap_complete::Shell;

/// Host resource watchdog daemon
///
/// Samples the selected resources every tick and raises a notification when
/// one stays over its threshold for a sustained period.
#[derive(Parser, Debug)]
#[command(name = "resmond")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Resources to track: cpu, ram, disc
    #[arg(value_name = "RESOURCE")]
    pub resources: Vec<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to configuration file
    #[arg(short, long, env = "RESMOND_CONFIG")]
    pub config: Option<String>,

    /// Sampling interval in seconds (overrides config)
    #[arg(short, long)]
    pub interval: Option<u64>,

    /// Run a single sampling tick, print the readings, and exit
    #[arg(long)]
    pub once: bool,

    /// Output format for --once
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Generate shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
}

/// Parse positional tokens into the selection set.
///
/// Unknown tokens never join the selection; historically they were ignored
/// without a word, here they earn a warning. Duplicates collapse and the
/// result is in canonical resource order.
pub fn parse_selection(tokens: &[String]) -> Vec<TrackedResource> {
    let mut selected = Vec::new();
    for token in tokens {
        match TrackedResource::from_token(token) {
            Some(resource) => {
                if !selected.contains(&resource) {
                    selected.push(resource);
                }
            }
            None => log::warn!("Unknown resource '{token}' ignored (expected cpu, ram or disc)"),
        }
    }
    selected.sort();
    selected
}

/// Generate shell completions to stdout
pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}
