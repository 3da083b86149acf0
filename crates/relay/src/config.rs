//! Relay settings, the `[relay]` table.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunables of the router and relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Most recent turns sent upstream.
    pub history_window: usize,
    /// Ceiling on one relay run, in seconds.
    pub max_duration_secs: u64,
    /// Whether category selections consult the classifier model.
    pub classify: bool,
    /// Budget of one classification call, in milliseconds.
    pub classify_timeout_ms: u64,
}

impl RelayConfig {
    /// Ceiling on one relay run.
    pub fn max_duration(&self) -> Duration {
        Duration::from_secs(self.max_duration_secs)
    }

    /// Budget of one classification call.
    pub fn classify_timeout(&self) -> Duration {
        Duration::from_millis(self.classify_timeout_ms)
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            history_window: 15,
            max_duration_secs: 120,
            classify: true,
            classify_timeout_ms: 4000,
        }
    }
}
