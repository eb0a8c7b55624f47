//! Eggtimer Library
//!
//! This library provides the core functionality for the eggtimer CLI:
//! - Concurrent timer registry with cancellation-safe expiry
//! - Deferred single-shot scheduling behind a trait (tokio or mock)
//! - Notification dispatch: desktop alerts and webhook directives
//! - Duration/message parsing for free-form timer requests
//! - IPC server/client for daemon-CLI communication
//! - Configuration loading with per-field defaults

pub mod cli;
pub mod config;
pub mod daemon;
pub mod notification;
pub mod parse;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{
    AddParams, DurationSpec, IpcRequest, IpcResponse, NotificationMode, ResponseData, TimerInfo,
    TimerSnapshot,
};

// Re-export configuration
pub use config::AppConfig;

// Re-export parsing entry points
pub use parse::{parse_duration, parse_message, parse_request, ParseMode};

// Re-export the scheduling core
pub use daemon::{
    CancelHandle, IpcServer, MockScheduler, RequestHandler, Scheduler, TimerJob, TimerRegistry,
    TokioScheduler,
};

// Re-export notification types
pub use notification::{
    DesktopNotify, DesktopNotifier, Dispatcher, MockAlert, MockNotifier, NotifyError,
    WebhookSender,
};
