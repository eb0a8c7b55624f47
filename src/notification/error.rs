//! Notification system error types.
//!
//! Everything here is recoverable by design: errors are caught at the
//! dispatch boundary, logged, and surfaced through a local error
//! notification. Nothing in the fire path is allowed to propagate.

use thiserror::Error;

/// Errors that can occur while dispatching notifications.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The desktop notification facility rejected the alert.
    #[error("failed to show desktop notification: {0}")]
    Desktop(String),

    /// A webhook directive line used a method other than GET or POST.
    #[error("unsupported webhook method: {0}")]
    UnsupportedMethod(String),

    /// A webhook directive line did not match its expected shape.
    #[error("malformed webhook directive: {0}")]
    MalformedDirective(String),

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),

    /// A webhook request failed at the transport level.
    #[error("webhook request failed: {0}")]
    Transport(String),

    /// A webhook target answered with a non-2xx status.
    #[error("webhook returned error status: {0}")]
    Status(String),

    /// One or more directive lines failed; carries the joined reasons.
    #[error("webhook dispatch failed: {0}")]
    WebhookFailed(String),
}

impl NotifyError {
    /// Returns true if this error stems from the directive configuration
    /// rather than from the network or the target.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedMethod(_) | Self::MalformedDirective(_)
        )
    }
}
