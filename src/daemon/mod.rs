//! Daemon for the eggtimer reminder engine.
//!
//! This module contains the core daemon functionality:
//! - `registry`: the concurrent timer registry (the scheduling core)
//! - `scheduler`: deferred single-shot execution behind a trait
//! - `ipc`: Unix Domain Socket server for the collaborator contract

pub mod ipc;
pub mod registry;
pub mod scheduler;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::notification::Dispatcher;

pub use ipc::{IpcError, IpcServer, RequestHandler};
pub use registry::TimerRegistry;
pub use scheduler::{CancelHandle, CancelToken, MockScheduler, Scheduler, TimerJob, TokioScheduler};

/// Socket file name inside the application directory.
const SOCKET_FILE: &str = "eggtimer.sock";

/// Default socket path: `~/.eggtimer/eggtimer.sock`.
///
/// # Errors
///
/// Returns an error if no home directory can be determined.
pub fn default_socket_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("home directory not found")?;
    Ok(home.join(crate::config::APP_DIR).join(SOCKET_FILE))
}

/// Runs the daemon until Ctrl-C.
///
/// Builds the dispatcher and registry from `config`, binds the IPC
/// socket, and serves one request per connection. Connection-level
/// failures are logged and never stop the loop.
///
/// # Errors
///
/// Returns an error if the dispatcher cannot be built or the socket
/// cannot be bound.
pub async fn run(config: AppConfig, socket_path: &Path) -> Result<()> {
    let dispatcher = Arc::new(Dispatcher::from_config(&config)?);
    let registry = TimerRegistry::new(Arc::new(TokioScheduler::new()), dispatcher);
    let handler = Arc::new(RequestHandler::new(registry));

    let server = IpcServer::new(socket_path)?;
    info!("daemon listening on {}", socket_path.display());

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("shutdown signal received");
                break;
            }
            accepted = server.accept() => {
                match accepted {
                    Ok(mut stream) => {
                        let handler = Arc::clone(&handler);
                        tokio::spawn(async move {
                            match IpcServer::receive_request(&mut stream).await {
                                Ok(request) => {
                                    let response = handler.handle(request).await;
                                    if let Err(e) =
                                        IpcServer::send_response(&mut stream, &response).await
                                    {
                                        warn!("failed to send response: {:#}", e);
                                    }
                                }
                                Err(e) => warn!("failed to read request: {:#}", e),
                            }
                        });
                    }
                    Err(e) => warn!("failed to accept connection: {:#}", e),
                }
            }
        }
    }

    Ok(())
}
