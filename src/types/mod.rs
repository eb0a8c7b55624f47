//! Core data types for the eggtimer reminder engine.
//!
//! This module defines the data structures used for:
//! - Duration requests (hours/minutes/seconds) with bounds validation
//! - Active timer bookkeeping and wire-level snapshots
//! - Notification mode configuration
//! - IPC request/response serialization

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// DurationSpec
// ============================================================================

/// A requested timer span, split into the units the input grammar uses.
///
/// Each field is independently optional in the grammar; absence means zero.
/// A spec that reaches the registry is always non-zero and within bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationSpec {
    /// Whole hours
    #[serde(default)]
    pub hours: u32,
    /// Whole minutes
    #[serde(default)]
    pub minutes: u32,
    /// Whole seconds
    #[serde(default)]
    pub seconds: u32,
}

impl DurationSpec {
    /// Largest value any single unit field may carry.
    pub const MAX_UNIT: u32 = 99_999;

    /// Creates a new duration spec.
    pub fn new(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self {
            hours,
            minutes,
            seconds,
        }
    }

    /// Total length in seconds.
    pub fn total_seconds(&self) -> u64 {
        u64::from(self.hours) * 3600 + u64::from(self.minutes) * 60 + u64::from(self.seconds)
    }

    /// Converts to a `std::time::Duration`.
    pub fn to_duration(&self) -> Duration {
        Duration::from_secs(self.total_seconds())
    }

    /// Returns true if every unit is zero.
    pub fn is_zero(&self) -> bool {
        self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }

    /// Returns true if every unit is within [`Self::MAX_UNIT`].
    pub fn in_bounds(&self) -> bool {
        self.hours <= Self::MAX_UNIT
            && self.minutes <= Self::MAX_UNIT
            && self.seconds <= Self::MAX_UNIT
    }
}

impl fmt::Display for DurationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0s");
        }
        let mut first = true;
        for (value, unit) in [(self.hours, "h"), (self.minutes, "m"), (self.seconds, "s")] {
            if value > 0 {
                if !first {
                    write!(f, " ")?;
                }
                write!(f, "{}{}", value, unit)?;
                first = false;
            }
        }
        Ok(())
    }
}

// ============================================================================
// NotificationMode
// ============================================================================

/// Controls the local desktop alert behavior on timer expiry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationMode {
    /// No desktop alert
    Off,
    /// Desktop alert only (default)
    #[default]
    #[serde(alias = "no-send")]
    Notify,
    /// Desktop alert with a notification sound hint
    Sound,
}

impl NotificationMode {
    /// Returns the string representation of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationMode::Off => "off",
            NotificationMode::Notify => "notify",
            NotificationMode::Sound => "sound",
        }
    }
}

impl FromStr for NotificationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // "no-send" is a historical alias for the default mode.
        match s {
            "off" => Ok(NotificationMode::Off),
            "notify" | "no-send" => Ok(NotificationMode::Notify),
            "sound" => Ok(NotificationMode::Sound),
            other => Err(format!(
                "unknown notification mode '{}' (expected off, notify or sound)",
                other
            )),
        }
    }
}

// ============================================================================
// TimerInfo
// ============================================================================

/// An active timer as the registry tracks it.
///
/// Immutable after creation; only registry membership changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerInfo {
    /// Unique identifier, the sole external handle for this timer
    pub id: Uuid,
    /// The originally requested span
    pub duration: DurationSpec,
    /// User-supplied message; empty means "use the default label"
    pub message: String,
    /// Creation instant
    pub created_at: SystemTime,
    /// Absolute instant at which the timer fires
    pub fires_at: SystemTime,
}

impl TimerInfo {
    /// Creates a new timer record with a fresh id, firing `duration` from now.
    pub fn new(duration: DurationSpec, message: String) -> Self {
        let created_at = SystemTime::now();
        Self {
            id: Uuid::new_v4(),
            duration,
            message,
            created_at,
            fires_at: created_at + duration.to_duration(),
        }
    }

    /// First 4 hex characters of the id, for compact display.
    pub fn short_id(&self) -> String {
        let simple = self.id.simple().to_string();
        simple[..4].to_string()
    }

    /// Time left until expiry, saturating at zero.
    pub fn remaining(&self) -> Duration {
        self.fires_at
            .duration_since(SystemTime::now())
            .unwrap_or(Duration::ZERO)
    }

    /// The notification body: the user message, or a short-id default.
    pub fn notification_message(&self) -> String {
        if self.message.is_empty() {
            format!("Timer \"{}\" has finished.", self.short_id())
        } else {
            self.message.clone()
        }
    }

    /// A label for list display: the user message, or a short-id default.
    pub fn display_label(&self) -> String {
        if self.message.is_empty() {
            format!("Timer \"{}\"", self.short_id())
        } else {
            self.message.clone()
        }
    }
}

// ============================================================================
// TimerSnapshot
// ============================================================================

/// Wire-level view of an active timer, with remaining time precomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    /// Full timer id (hyphenated uuid)
    pub id: String,
    /// First 4 hex characters of the id
    pub short_id: String,
    /// Display label (user message or short-id default)
    pub label: String,
    /// Seconds left until expiry at snapshot time
    pub remaining_seconds: u64,
    /// Originally requested length in seconds
    pub total_seconds: u64,
}

impl TimerSnapshot {
    /// Creates a snapshot from a registry record.
    pub fn from_info(info: &TimerInfo) -> Self {
        Self {
            id: info.id.to_string(),
            short_id: info.short_id(),
            label: info.display_label(),
            remaining_seconds: info.remaining().as_secs(),
            total_seconds: info.duration.total_seconds(),
        }
    }
}

// ============================================================================
// IPC Types
// ============================================================================

/// Parameters for the add command.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddParams {
    /// Requested timer span
    pub duration: DurationSpec,
    /// Optional message; empty string selects the default label
    #[serde(default)]
    pub message: String,
}

/// IPC request from client to daemon.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "lowercase")]
pub enum IpcRequest {
    /// Register a new timer
    Add {
        /// Add parameters
        #[serde(flatten)]
        params: AddParams,
    },
    /// List active timers
    List,
    /// Cancel a timer by id
    Cancel {
        /// Full timer id
        id: String,
    },
}

/// Response data for IPC responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseData {
    /// The affected timer (add)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timer: Option<TimerSnapshot>,
    /// Snapshot of all active timers (list)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timers: Option<Vec<TimerSnapshot>>,
}

impl ResponseData {
    /// Creates response data carrying a single timer.
    pub fn from_timer(info: &TimerInfo) -> Self {
        Self {
            timer: Some(TimerSnapshot::from_info(info)),
            timers: None,
        }
    }

    /// Creates response data carrying a list snapshot.
    pub fn from_timers(infos: &[TimerInfo]) -> Self {
        Self {
            timer: None,
            timers: Some(infos.iter().map(TimerSnapshot::from_info).collect()),
        }
    }
}

/// IPC response from daemon to client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpcResponse {
    /// Response status ("success" or "error")
    pub status: String,
    /// Human-readable message
    pub message: String,
    /// Optional response data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}

impl IpcResponse {
    /// Creates a success response.
    pub fn success(message: impl Into<String>, data: Option<ResponseData>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
            data,
        }
    }

    /// Creates an error response.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            data: None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
