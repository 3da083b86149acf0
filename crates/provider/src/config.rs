//! Provider configuration
//!
//! One [`RemoteConfig`] per upstream. An empty API key leaves the provider
//! unavailable instead of failing startup. Keys support `${ENV_VAR}`
//! expansion at the gateway layer.

use crate::ProviderKind;
use serde::{Deserialize, Serialize};

/// Default endpoints for the supported upstreams.
pub mod endpoint {
    /// Groq's OpenAI-compatible chat completions endpoint.
    pub const GROQ: &str = "https://api.groq.com/openai/v1/chat/completions";
    /// Gemini's OpenAI compatibility chat completions endpoint.
    pub const GEMINI: &str =
        "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions";
    /// Gemini's bidirectional live endpoint.
    pub const GEMINI_LIVE: &str = "wss://generativelanguage.googleapis.com/ws/google.ai.generativelanguage.v1beta.GenerativeService.BidiGenerateContent";
}

/// Configuration for a remote HTTP API provider.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct RemoteConfig {
    /// API key. Empty means the provider is not configured.
    #[serde(default)]
    pub api_key: String,
    /// Optional chat completions endpoint override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Optional live channel endpoint override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
}

impl RemoteConfig {
    /// Config with only a key set.
    pub fn with_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Whether a credential is present.
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

/// Credentials and endpoints for every upstream, the `[providers]` table.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct ProvidersConfig {
    /// Groq settings.
    #[serde(default)]
    pub groq: RemoteConfig,
    /// Gemini settings.
    #[serde(default)]
    pub gemini: RemoteConfig,
}

impl ProvidersConfig {
    /// Settings for one provider.
    pub fn get(&self, kind: ProviderKind) -> &RemoteConfig {
        match kind {
            ProviderKind::Groq => &self.groq,
            ProviderKind::Gemini => &self.gemini,
        }
    }

    /// Whether the provider has a credential.
    pub fn is_configured(&self, kind: ProviderKind) -> bool {
        self.get(kind).is_configured()
    }

    /// Chat completions endpoint for a provider.
    pub fn endpoint(&self, kind: ProviderKind) -> &str {
        let default = match kind {
            ProviderKind::Groq => endpoint::GROQ,
            ProviderKind::Gemini => endpoint::GEMINI,
        };
        self.get(kind).base_url.as_deref().unwrap_or(default)
    }

    /// Live channel endpoint.
    pub fn live_url(&self) -> &str {
        self.gemini
            .live_url
            .as_deref()
            .unwrap_or(endpoint::GEMINI_LIVE)
    }
}
