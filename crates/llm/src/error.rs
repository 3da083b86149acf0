//! Upstream failure taxonomy.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse classification of an upstream failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusClass {
    /// 401 / 403: bad or missing credentials.
    Unauthorized,
    /// 429: the upstream is throttling us.
    RateLimited,
    /// Any other 4xx: the request was malformed or refused.
    BadRequest,
    /// 5xx: the upstream broke.
    Server,
    /// Connect, TLS, or body read failure.
    Transport,
    /// The upstream answered but the body could not be decoded.
    Decode,
}

impl StatusClass {
    /// Classify a non-2xx HTTP status code.
    pub fn from_status(code: u16) -> Self {
        match code {
            401 | 403 => Self::Unauthorized,
            429 => Self::RateLimited,
            400..=499 => Self::BadRequest,
            _ => Self::Server,
        }
    }
}

impl fmt::Display for StatusClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unauthorized => "unauthorized",
            Self::RateLimited => "rate limited",
            Self::BadRequest => "bad request",
            Self::Server => "server error",
            Self::Transport => "transport failure",
            Self::Decode => "decode failure",
        };
        f.write_str(name)
    }
}

/// A failed upstream call, already stripped of SDK-specific detail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("upstream {class}: {message}")]
pub struct UpstreamError {
    /// Failure class.
    pub class: StatusClass,
    /// Short diagnostic for logs. Never shown to end users verbatim.
    pub message: String,
}

impl UpstreamError {
    /// Create an error of the given class.
    pub fn new(class: StatusClass, message: impl Into<String>) -> Self {
        Self {
            class,
            message: message.into(),
        }
    }

    /// Build an error from a non-2xx status and the raw response body.
    pub fn status(code: u16, body: &str) -> Self {
        let summary = error_summary(body).unwrap_or_else(|| body.trim().to_owned());
        Self::new(StatusClass::from_status(code), format!("{code}: {summary}"))
    }

    /// Build a transport-level error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(StatusClass::Transport, message)
    }

    /// Whether the failure happened before the upstream produced a status.
    pub fn is_transport(&self) -> bool {
        self.class == StatusClass::Transport
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => Self::new(StatusClass::from_status(status.as_u16()), e.to_string()),
            None if e.is_decode() => Self::new(StatusClass::Decode, e.to_string()),
            None => Self::transport(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for UpstreamError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(StatusClass::Decode, e.to_string())
    }
}

/// Pull `error.message` (or a bare `error`/`message` string) out of an
/// OpenAI-style error body.
fn error_summary(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body.trim()).ok()?;
    let summary = value
        .pointer("/error/message")
        .and_then(|v| v.as_str())
        .or_else(|| value.get("error").and_then(|v| v.as_str()))
        .or_else(|| value.get("message").and_then(|v| v.as_str()))?;
    Some(summary.split_whitespace().collect::<Vec<_>>().join(" "))
}
