//! Configuration for the eggtimer daemon.
//!
//! Settings live in `~/.eggtimer/config.json`. Every field has a default,
//! so a missing or partial file is fine; a malformed file is reported and
//! replaced by the defaults rather than aborting the daemon.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::parse::ParseMode;
use crate::types::NotificationMode;

/// Directory under the home directory holding config and socket.
pub const APP_DIR: &str = ".eggtimer";

/// Config file name inside [`APP_DIR`].
pub const CONFIG_FILE: &str = "config.json";

// ============================================================================
// AppConfig
// ============================================================================

/// Daemon configuration.
///
/// `notification_url` holds the webhook directive spec: one directive per
/// line (`GET <url>`, `POST <url> || <body>`, a bare legacy URL template,
/// or a `#` comment). `None` disables webhooks entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Desktop alert behavior on expiry
    #[serde(default)]
    pub notification_type: NotificationMode,

    /// Webhook directive spec, line-oriented
    #[serde(default)]
    pub notification_url: Option<String>,

    /// Require duration input to be consumed entirely by the grammar
    #[serde(default)]
    pub strict_parsing: bool,
}

impl AppConfig {
    /// The parse mode implied by `strict_parsing`.
    pub fn parse_mode(&self) -> ParseMode {
        ParseMode::from_strict(self.strict_parsing)
    }

    /// Default config file location, if a home directory exists.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Loads the configuration from the default location.
    ///
    /// A missing file yields the defaults silently; an unreadable or
    /// malformed file yields the defaults with a warning.
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            warn!("home directory not found, using default configuration");
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("failed to load {}: {:#}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Loads the configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }
}

// ============================================================================
// Tests
// ============================================================================
