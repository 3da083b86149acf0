//! Relay events and outcomes

use crate::{ErrorKind, RelayError};
use compact_str::CompactString;
use provider::DeltaEvent;

/// State of a relay run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RelayState {
    #[default]
    Idle,
    Resolving,
    /// Forwarding output of this model.
    Streaming(CompactString),
    /// Switching to this model after a failed attempt.
    Retrying(CompactString),
    Completed,
    Degraded,
    Exhausted(ErrorKind),
}

impl RelayState {
    /// Whether the run is over.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Degraded | Self::Exhausted(_))
    }
}

/// Terminal result of a relay run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    /// The routed model answered.
    Completed { text: String, model: CompactString },
    /// A backup model answered.
    Degraded {
        text: String,
        model: CompactString,
        warning: String,
    },
    /// The run failed. `partial` holds whatever was forwarded.
    Exhausted {
        error: RelayError,
        partial: String,
        model: Option<CompactString>,
    },
}

impl RelayOutcome {
    /// Accumulated text, partial for failed runs.
    pub fn text(&self) -> &str {
        match self {
            Self::Completed { text, .. } | Self::Degraded { text, .. } => text,
            Self::Exhausted { partial, .. } => partial,
        }
    }

    /// Last model that produced output.
    pub fn model(&self) -> Option<&str> {
        match self {
            Self::Completed { model, .. } | Self::Degraded { model, .. } => Some(model.as_str()),
            Self::Exhausted { model, .. } => model.as_deref(),
        }
    }

    /// The failure, if the run did not complete.
    pub fn error(&self) -> Option<&RelayError> {
        match self {
            Self::Exhausted { error, .. } => Some(error),
            _ => None,
        }
    }

    /// The state this outcome leaves the run in.
    pub fn state(&self) -> RelayState {
        match self {
            Self::Completed { .. } => RelayState::Completed,
            Self::Degraded { .. } => RelayState::Degraded,
            Self::Exhausted { error, .. } => RelayState::Exhausted(error.kind()),
        }
    }
}

/// One item of a relay run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayEvent {
    /// The state machine moved.
    Transition(RelayState),
    /// Output to forward, in order.
    Delta(DeltaEvent),
    /// The run is over; always the last item.
    Finished(RelayOutcome),
}
