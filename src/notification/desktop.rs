//! Desktop alert implementations.
//!
//! `DesktopNotifier` talks to the OS notification facility through
//! notify-rust; `MockNotifier` records alerts for tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use notify_rust::Notification;
use tracing::debug;

use super::error::NotifyError;
use super::DesktopNotify;

/// Application name attached to desktop notifications.
const APP_NAME: &str = "eggtimer";

/// Icon hint for desktop notifications.
const ICON: &str = "alarm-clock";

/// Sound hint played when the "sound" mode is active.
const SOUND_NAME: &str = "alarm-clock-elapsed";

// ============================================================================
// DesktopNotifier
// ============================================================================

/// Sends alerts through the OS notification facility.
#[derive(Debug, Default, Clone, Copy)]
pub struct DesktopNotifier;

impl DesktopNotifier {
    /// Creates a new desktop notifier.
    pub fn new() -> Self {
        Self
    }
}

impl DesktopNotify for DesktopNotifier {
    fn alert(&self, title: &str, body: &str, sound: bool) -> Result<(), NotifyError> {
        debug!("showing desktop notification: {}", title);

        let mut notification = Notification::new();
        notification
            .summary(title)
            .body(body)
            .appname(APP_NAME)
            .icon(ICON);
        if sound {
            notification.sound_name(SOUND_NAME);
        }

        notification
            .show()
            .map(|_| ())
            .map_err(|e| NotifyError::Desktop(e.to_string()))
    }
}

// ============================================================================
// MockNotifier
// ============================================================================

/// A single alert recorded by [`MockNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockAlert {
    /// Alert title
    pub title: String,
    /// Alert body
    pub body: String,
    /// Whether the sound hint was requested
    pub sound: bool,
}

/// Records alerts instead of showing them; cloning shares the record.
#[derive(Debug, Clone, Default)]
pub struct MockNotifier {
    alerts: Arc<Mutex<Vec<MockAlert>>>,
    fail: Arc<AtomicBool>,
}

impl MockNotifier {
    /// Creates a new recording notifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all alerts recorded so far.
    pub fn alerts(&self) -> Vec<MockAlert> {
        self.alerts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of alerts recorded so far.
    pub fn alert_count(&self) -> usize {
        self.alerts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Makes subsequent `alert` calls fail.
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

impl DesktopNotify for MockNotifier {
    fn alert(&self, title: &str, body: &str, sound: bool) -> Result<(), NotifyError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(NotifyError::Desktop("mock failure".to_string()));
        }
        self.alerts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(MockAlert {
                title: title.to_string(),
                body: body.to_string(),
                sound,
            });
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_records_alerts() {
        let mock = MockNotifier::new();
        mock.alert("Time's Up", "Tea", false).unwrap();
        mock.alert("Time's Up", "Pizza", true).unwrap();

        let alerts = mock.alerts();
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].body, "Tea");
        assert!(!alerts[0].sound);
        assert_eq!(alerts[1].body, "Pizza");
        assert!(alerts[1].sound);
    }

    #[test]
    fn test_mock_clone_shares_record() {
        let mock = MockNotifier::new();
        let clone = mock.clone();
        clone.alert("t", "b", false).unwrap();
        assert_eq!(mock.alert_count(), 1);
    }

    #[test]
    fn test_mock_fail_mode() {
        let mock = MockNotifier::new();
        mock.set_fail(true);
        assert!(mock.alert("t", "b", false).is_err());
        assert_eq!(mock.alert_count(), 0);

        mock.set_fail(false);
        assert!(mock.alert("t", "b", false).is_ok());
        assert_eq!(mock.alert_count(), 1);
    }
}
