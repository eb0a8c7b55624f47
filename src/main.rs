//! eggtimer - duration-based reminder timers
//!
//! Set reminders from free-form durations ("1h20m: Pizza", "45s") and get
//! a desktop alert and/or webhook callback when they expire. A daemon
//! tracks the running timers; the CLI talks to it over a Unix socket.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use eggtimer::cli::{Cli, Commands, Display, IpcClient};
use eggtimer::config::AppConfig;
use eggtimer::daemon;
use eggtimer::parse::{self, ParseMode};

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging
    init_tracing();

    // Parse command line arguments
    let cli = Cli::parse();

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Add(args)) => {
            let config = AppConfig::load();
            let mode = if args.strict {
                ParseMode::Strict
            } else {
                config.parse_mode()
            };

            let text = args.joined_text();
            let Some((duration, message)) = parse::parse_request(&text, mode) else {
                anyhow::bail!(
                    "could not parse a duration from '{}' (try formats like 10m, 1h 20m, 45s)",
                    text
                );
            };

            let client = make_client(&cli.socket)?;
            let response = client.add(duration, message).await?;
            Display::show_add_success(&response);
        }
        Some(Commands::List) => {
            let client = make_client(&cli.socket)?;
            let response = client.list().await?;
            Display::show_list(&response);
        }
        Some(Commands::Cancel { id }) => {
            let client = make_client(&cli.socket)?;
            let response = client.cancel(id).await?;
            Display::show_cancel(&response);
        }
        Some(Commands::Daemon(args)) => {
            let mut config = AppConfig::load();

            if let Some(mode) = args.notification_type {
                config.notification_type = mode;
            }
            if let Some(spec) = args.webhook {
                config.notification_url = Some(spec);
            }
            if let Some(path) = args.webhook_file {
                let spec = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read webhook file {}", path.display()))?;
                config.notification_url = Some(spec);
            }

            let socket_path = match cli.socket {
                Some(path) => path,
                None => daemon::default_socket_path()?,
            };

            daemon::run(config, &socket_path).await?;
        }
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Builds an IPC client honoring the global socket override.
fn make_client(socket: &Option<std::path::PathBuf>) -> Result<IpcClient> {
    match socket {
        Some(path) => Ok(IpcClient::with_socket_path(path.clone())),
        None => IpcClient::new(),
    }
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["eggtimer"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_list() {
        let cli = Cli::parse_from(["eggtimer", "list"]);
        assert!(matches!(cli.command, Some(Commands::List)));
    }

    #[test]
    fn test_cli_parse_add_with_message() {
        let cli = Cli::parse_from(["eggtimer", "add", "20m:", "Pizza"]);
        match cli.command {
            Some(Commands::Add(args)) => {
                assert_eq!(args.joined_text(), "20m: Pizza");
            }
            _ => panic!("Expected Add command"),
        }
    }

    #[test]
    fn test_cli_parse_verbose() {
        let cli = Cli::parse_from(["eggtimer", "--verbose", "list"]);
        assert!(cli.verbose);
    }

    #[test]
    fn test_make_client_with_socket_override() {
        let socket = Some(std::path::PathBuf::from("/tmp/custom.sock"));
        let client = make_client(&socket).unwrap();
        assert_eq!(client.socket_path(), &socket.unwrap());
    }
}
