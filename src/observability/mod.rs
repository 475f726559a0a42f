//! Structured logging for API calls and webhook deliveries.
//!
//! Events are emitted through `tracing`; installing a subscriber is left to
//! the application.

use reqwest::header::HeaderMap;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Tracing hooks for GitHub API operations.
pub struct TracingHooks;

impl TracingHooks {
    /// Logs the start of an API request, with sensitive header values redacted.
    pub fn on_request_start(method: &str, url: &str, headers: &HeaderMap) {
        debug!(
            method = %method,
            url = %url,
            headers = %redacted_headers(headers),
            "GitHub API request started"
        );
    }

    /// Logs the completion of an API request.
    pub fn on_request_complete(method: &str, url: &str, status: u16, duration: Duration) {
        info!(
            method = %method,
            url = %url,
            status = status,
            duration_ms = duration.as_millis() as u64,
            "GitHub API request completed"
        );
    }

    /// Logs a request error.
    pub fn on_request_error(method: &str, url: &str, error: &str) {
        error!(
            method = %method,
            url = %url,
            error = %error,
            "GitHub API request failed"
        );
    }

    /// Logs a request rejected before it was sent.
    pub fn on_request_rejected(method: &str, path: &str, reason: &str) {
        warn!(
            method = %method,
            path = %path,
            reason = %reason,
            "GitHub API request rejected before sending"
        );
    }

    /// Logs webhook verification.
    pub fn on_webhook_verified(event_type: &str, success: bool) {
        if success {
            debug!(
                event_type = %event_type,
                "Webhook signature verified successfully"
            );
        } else {
            warn!(
                event_type = %event_type,
                "Webhook signature verification failed"
            );
        }
    }
}

/// Header names whose values never reach the logs.
pub const SENSITIVE_HEADERS: &[&str] = &[
    "authorization",
    "proxy-authorization",
    "x-hub-signature",
    "x-hub-signature-256",
    "cookie",
];

/// Returns `value`, or `[REDACTED]` when `name` is sensitive.
pub fn redact_header<'v>(name: &str, value: &'v str) -> &'v str {
    if SENSITIVE_HEADERS
        .iter()
        .any(|sensitive| sensitive.eq_ignore_ascii_case(name))
    {
        "[REDACTED]"
    } else {
        value
    }
}

/// Renders `headers` as `name: value` pairs for a log line.
fn redacted_headers(headers: &HeaderMap) -> String {
    headers
        .iter()
        .map(|(name, value)| {
            let value = value.to_str().unwrap_or("<binary>");
            format!("{}: {}", name, redact_header(name.as_str(), value))
        })
        .collect::<Vec<_>>()
        .join(", ")
}
