//! Command definitions for the eggtimer CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::types::NotificationMode;

// ============================================================================
// CLI Structure
// ============================================================================

/// eggtimer - duration-based reminder timers
#[derive(Parser, Debug)]
#[command(
    name = "eggtimer",
    version,
    about = "Duration-based reminder timers with desktop and webhook notifications",
    long_about = "Set reminder timers from free-form durations like \"1h20m: Pizza\".\n\
                  The daemon tracks running timers and fires a desktop alert and/or\n\
                  configured webhooks when a timer expires.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Unix socket path for daemon communication
    #[arg(long, global = true, value_name = "PATH")]
    pub socket: Option<PathBuf>,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start a new timer, e.g. `add 1h20m: Pizza`
    Add(AddArgs),

    /// List active timers
    List,

    /// Cancel a timer by id (as shown by `list`)
    Cancel {
        /// Full timer id
        id: String,
    },

    /// Run the timer daemon in the foreground
    Daemon(DaemonArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Add Command Arguments
// ============================================================================

/// Arguments for the add command
#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// Timer request: duration segments plus an optional `: message`
    /// suffix, e.g. `20m: Pizza` or `1h 30m`
    #[arg(required = true)]
    pub text: Vec<String>,

    /// Require the duration to consume the whole input (no trailing text)
    #[arg(long)]
    pub strict: bool,
}

impl AddArgs {
    /// The request text with word arguments re-joined.
    pub fn joined_text(&self) -> String {
        self.text.join(" ")
    }
}

// ============================================================================
// Daemon Command Arguments
// ============================================================================

/// Arguments for the daemon command
#[derive(Args, Debug, Clone, Default)]
pub struct DaemonArgs {
    /// Desktop alert mode: off, notify or sound
    #[arg(long, value_name = "MODE")]
    pub notification_type: Option<NotificationMode>,

    /// Inline webhook directive spec (one directive per line)
    #[arg(long, value_name = "SPEC", conflicts_with = "webhook_file")]
    pub webhook: Option<String>,

    /// File containing webhook directives
    #[arg(long, value_name = "PATH")]
    pub webhook_file: Option<PathBuf>,
}

// ============================================================================
// Tests
// ============================================================================
