//! Webhook notification dispatch.
//!
//! The webhook configuration is a line-oriented directive spec:
//!
//! ```text
//! # comments and blank lines are skipped
//! GET http://host/ping?msg={message}
//! POST http://host/hook || {"text": {message}}
//! http://host/legacy?msg={message}
//! ```
//!
//! `{message}` substitution is per-directive: raw for `GET`, JSON-escaped
//! (quotes included) for `POST` bodies, URL-escaped for the legacy bare
//! template. Each line succeeds or fails on its own; one bad line never
//! stops the others.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use tracing::{debug, error, info};

use super::error::NotifyError;

/// Placeholder token replaced with the notification text.
pub const MESSAGE_PLACEHOLDER: &str = "{message}";

/// Per-request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 10;

// ============================================================================
// Directive
// ============================================================================

/// One parsed webhook directive line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `GET <url>` with raw `{message}` substitution
    Get {
        /// Target URL template
        url: String,
    },
    /// `POST <url> || <body-template>` with JSON-escaped substitution
    Post {
        /// Target URL
        url: String,
        /// JSON body template
        body: String,
    },
    /// A bare URL template with URL-escaped substitution, fetched via GET
    LegacyGet {
        /// Target URL template
        template: String,
    },
}

/// Parses a single directive line.
///
/// Returns `None` for blank lines and `#` comments, `Some(Err(..))` for a
/// line that names an unsupported method or is otherwise malformed.
pub fn parse_directive(line: &str) -> Option<Result<Directive, NotifyError>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let Some((method, rest)) = line.split_once(' ') else {
        // No method token at all: the legacy single-URL form.
        return Some(Ok(Directive::LegacyGet {
            template: line.to_string(),
        }));
    };

    let parsed = match method {
        "GET" => Ok(Directive::Get {
            url: rest.trim().to_string(),
        }),
        "POST" => match rest.split_once("||") {
            Some((url, body)) => Ok(Directive::Post {
                url: url.trim().to_string(),
                body: body.trim().to_string(),
            }),
            None => Err(NotifyError::MalformedDirective(format!(
                "POST directive is missing '||' body separator: {}",
                line
            ))),
        },
        other => Err(NotifyError::UnsupportedMethod(other.to_string())),
    };

    Some(parsed)
}

// ============================================================================
// Substitution
// ============================================================================

/// JSON-escapes a message, quotes included, for POST body templates.
pub fn json_escape(message: &str) -> String {
    serde_json::Value::String(message.to_string()).to_string()
}

/// URL-escapes a message for the legacy bare-template form.
pub fn url_escape(message: &str) -> String {
    url::form_urlencoded::byte_serialize(message.as_bytes()).collect()
}

// ============================================================================
// WebhookSender
// ============================================================================

/// Dispatches a notification message to every configured directive.
#[derive(Debug, Clone)]
pub struct WebhookSender {
    /// HTTP client, shared across directives
    client: reqwest::Client,
    /// Raw line-oriented directive spec
    spec: String,
}

impl WebhookSender {
    /// Creates a sender for the given directive spec.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(spec: impl Into<String>) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| NotifyError::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            spec: spec.into(),
        })
    }

    /// Sends `message` to every directive line.
    ///
    /// Lines are independent: a bad directive or a failed request is
    /// logged and remembered, and the remaining lines still run.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::WebhookFailed`] carrying the joined reasons
    /// if any line failed.
    pub async fn send(&self, message: &str) -> Result<(), NotifyError> {
        let mut failures: Vec<String> = Vec::new();

        for line in self.spec.lines() {
            let Some(parsed) = parse_directive(line) else {
                continue;
            };
            match parsed {
                Ok(directive) => {
                    if let Err(e) = self.dispatch(&directive, message).await {
                        error!("webhook directive failed: {}", e);
                        failures.push(e.to_string());
                    }
                }
                Err(e) => {
                    error!("bad webhook directive: {}", e);
                    failures.push(e.to_string());
                }
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(NotifyError::WebhookFailed(failures.join("; ")))
        }
    }

    /// Issues the HTTP request for one directive.
    async fn dispatch(&self, directive: &Directive, message: &str) -> Result<(), NotifyError> {
        match directive {
            Directive::Get { url } => {
                let target = url.replace(MESSAGE_PLACEHOLDER, message);
                debug!("sending GET request to {}", target);
                let response = self
                    .client
                    .get(&target)
                    .send()
                    .await
                    .map_err(|e| NotifyError::Transport(e.to_string()))?;
                info!("GET response: {}", response.status());
                response
                    .error_for_status()
                    .map_err(|e| NotifyError::Status(e.to_string()))?;
            }
            Directive::Post { url, body } => {
                let payload = body.replace(MESSAGE_PLACEHOLDER, &json_escape(message));
                debug!("sending POST request to {}", url);
                let response = self
                    .client
                    .post(url)
                    .header(CONTENT_TYPE, "application/json")
                    .body(payload)
                    .send()
                    .await
                    .map_err(|e| NotifyError::Transport(e.to_string()))?;
                info!("POST response: {}", response.status());
                response
                    .error_for_status()
                    .map_err(|e| NotifyError::Status(e.to_string()))?;
            }
            Directive::LegacyGet { template } => {
                let target = template.replace(MESSAGE_PLACEHOLDER, &url_escape(message));
                debug!("sending legacy GET request to {}", target);
                let response = self
                    .client
                    .get(&target)
                    .send()
                    .await
                    .map_err(|e| NotifyError::Transport(e.to_string()))?;
                info!("legacy GET response: {}", response.status());
                response
                    .error_for_status()
                    .map_err(|e| NotifyError::Status(e.to_string()))?;
            }
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
