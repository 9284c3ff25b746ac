//! Command-line interface definitions.
//!
//! Defines the CLI structure for `marketsync` using `clap`. With no
//! subcommand the fee audit runs.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::infrastructure::config::DEFAULT_CONFIG_PATH;

/// Keep a trading platform's markets and withdrawal fees in line with a
/// reference exchange
#[derive(Parser, Debug)]
#[command(name = "marketsync")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// The config path to load and whether the operator asked for it.
    #[must_use]
    pub fn config_path(&self) -> (PathBuf, bool) {
        match &self.config {
            Some(path) => (path.clone(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        }
    }

    /// The subcommand to run, defaulting to the fee audit.
    #[must_use]
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Fees)
    }
}

/// Color output mode for terminal rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Audit withdrawal fees and minimums against the source venue (default)
    Fees,

    /// Reconcile market parameters with the source venue
    Markets(MarketsArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Arguments for `marketsync markets`.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct MarketsArgs {
    /// Apply every update without prompting, then record the updated
    /// markets and restart the matching engine
    #[arg(long)]
    pub auto: bool,

    /// File receiving updated market names in auto mode
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Subcommands for `marketsync check`.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CheckCommand {
    /// Validate the configuration and report which credentials are present.
    Config,
}
