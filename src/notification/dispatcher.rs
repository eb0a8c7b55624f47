//! Notification dispatch orchestration.
//!
//! The dispatcher is the single point the registry talks to on expiry.
//! It is best-effort end to end: desktop and webhook failures are logged
//! and surfaced locally, never propagated to the caller.

use tracing::error;

use crate::config::AppConfig;
use crate::types::NotificationMode;

use super::desktop::DesktopNotifier;
use super::error::NotifyError;
use super::webhook::WebhookSender;
use super::DesktopNotify;

/// Title of the expiry alert.
pub const ALERT_TITLE: &str = "Time's Up";

/// Title of the local alert raised when webhook dispatch fails.
pub const ERROR_TITLE: &str = "Timer Notification Error";

// ============================================================================
// Dispatcher
// ============================================================================

/// Fans a notification message out to the configured channels.
pub struct Dispatcher {
    /// Desktop alert behavior
    mode: NotificationMode,
    /// Desktop alert backend
    desktop: Box<dyn DesktopNotify + Send + Sync>,
    /// Webhook backend, if configured
    webhook: Option<WebhookSender>,
}

impl Dispatcher {
    /// Creates a dispatcher with explicit parts. Used directly by tests;
    /// production code goes through [`Dispatcher::from_config`].
    pub fn new(
        mode: NotificationMode,
        desktop: Box<dyn DesktopNotify + Send + Sync>,
        webhook: Option<WebhookSender>,
    ) -> Self {
        Self {
            mode,
            desktop,
            webhook,
        }
    }

    /// Builds the production dispatcher from the daemon configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the webhook HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, NotifyError> {
        let webhook = match &config.notification_url {
            Some(spec) if !spec.trim().is_empty() => Some(WebhookSender::new(spec.clone())?),
            _ => None,
        };

        Ok(Self::new(
            config.notification_type,
            Box::new(DesktopNotifier::new()),
            webhook,
        ))
    }

    /// Delivers a notification, best-effort.
    ///
    /// In mode `off` the desktop alert is skipped; `sound` adds a sound
    /// hint to the alert. A webhook failure raises a local error alert
    /// (regardless of mode, matching the historical behavior).
    pub async fn notify(&self, message: &str) {
        if self.mode != NotificationMode::Off {
            let sound = self.mode == NotificationMode::Sound;
            if let Err(e) = self.desktop.alert(ALERT_TITLE, message, sound) {
                error!("desktop notification failed: {}", e);
            }
        }

        if let Some(webhook) = &self.webhook {
            if let Err(e) = webhook.send(message).await {
                error!("failed to send webhook notification: {}", e);
                let report = format!("Failed to send notification: {}", e);
                if let Err(alert_err) = self.desktop.alert(ERROR_TITLE, &report, false) {
                    error!("error notification failed: {}", alert_err);
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
