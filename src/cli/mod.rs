//! CLI module for the eggtimer reminder engine.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `client`: IPC client for daemon communication
//! - `display`: Output formatting and display logic

pub mod client;
pub mod commands;
pub mod display;

pub use client::IpcClient;
pub use commands::{AddArgs, Cli, Commands, DaemonArgs};
pub use display::Display;
