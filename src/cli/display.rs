//! Display utilities for the eggtimer CLI.
//!
//! This module provides formatted output for:
//! - Add/cancel confirmation messages
//! - The active timer list
//! - Error messages

use crate::types::IpcResponse;

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Shows a confirmation for a started timer.
    pub fn show_add_success(response: &IpcResponse) {
        println!("Timer started");

        if let Some(timer) = response.data.as_ref().and_then(|d| d.timer.as_ref()) {
            println!("  id:       {}", timer.id);
            println!("  label:    {}", timer.label);
            println!("  fires in: {}", Self::format_time(timer.remaining_seconds));
        }
    }

    /// Shows the active timer list.
    pub fn show_list(response: &IpcResponse) {
        let timers = response.data.as_ref().and_then(|d| d.timers.as_ref());

        let Some(timers) = timers.filter(|t| !t.is_empty()) else {
            println!("No active timers.");
            return;
        };

        println!("Active timers");
        println!("-------------");
        for timer in timers {
            println!(
                "{}  {:>9}  {}",
                timer.id,
                Self::format_time(timer.remaining_seconds),
                timer.label
            );
        }
    }

    /// Shows the cancel outcome (the daemon phrases it).
    pub fn show_cancel(response: &IpcResponse) {
        println!("{}", response.message);
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("Error: {}", message);
    }

    /// Formats seconds as `m:ss`, or `h:mm:ss` from one hour up.
    fn format_time(total_seconds: u64) -> String {
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}:{:02}:{:02}", hours, minutes, seconds)
        } else {
            format!("{}:{:02}", minutes, seconds)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod format_time_tests {
        use super::*;

        #[test]
        fn test_seconds_only() {
            assert_eq!(Display::format_time(45), "0:45");
        }

        #[test]
        fn test_minutes_and_seconds() {
            assert_eq!(Display::format_time(90), "1:30");
            assert_eq!(Display::format_time(20 * 60), "20:00");
        }

        #[test]
        fn test_hours() {
            assert_eq!(Display::format_time(3600), "1:00:00");
            assert_eq!(Display::format_time(3600 + 20 * 60 + 5), "1:20:05");
        }

        #[test]
        fn test_zero() {
            assert_eq!(Display::format_time(0), "0:00");
        }
    }
}
