//! Relay failure taxonomy.
//!
//! Everything that can go wrong in a run is one of these. Each variant maps
//! to a short sentence fit for the conversation transcript; the technical
//! detail stays in `Display` for logs.

use llm::UpstreamError;
use provider::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Relay failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RelayError {
    /// The selection could not be resolved to a usable model.
    #[error("routing failed: {0}")]
    Routing(String),
    /// An upstream call failed after output was forwarded.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    /// Every candidate of the fallback chain failed.
    #[error("all candidates failed, last error: {0}")]
    ExhaustedFallback(String),
    /// The channel to the client broke.
    #[error("client channel closed")]
    Transport,
    /// The provider is not configured.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    /// The run exceeded its duration ceiling.
    #[error("relay exceeded {0:?}")]
    Timeout(Duration),
}

/// Discriminant of [`RelayError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Routing,
    Upstream,
    ExhaustedFallback,
    Transport,
    Configuration,
    Timeout,
}

impl RelayError {
    /// The error's kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Routing(_) => ErrorKind::Routing,
            Self::Upstream(_) => ErrorKind::Upstream,
            Self::ExhaustedFallback(_) => ErrorKind::ExhaustedFallback,
            Self::Transport => ErrorKind::Transport,
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::Timeout(_) => ErrorKind::Timeout,
        }
    }

    /// One sentence for the end user.
    pub fn user_message(&self) -> &'static str {
        self.kind().user_message()
    }
}

impl ErrorKind {
    /// One sentence for the end user.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Routing => "Sorry, I could not pick a model for that request.",
            Self::Upstream => "The model stopped responding before finishing its answer.",
            Self::ExhaustedFallback => "All models are busy right now. Please try again shortly.",
            Self::Transport => "The connection was lost.",
            Self::Configuration => "That model is not available on this server.",
            Self::Timeout => "The response took too long and was stopped.",
        }
    }
}
