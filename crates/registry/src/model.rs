//! Catalog entry types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Upstream a model is served by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Groq's OpenAI-compatible API.
    Groq,
    /// Google's Gemini API through its OpenAI compatibility endpoint.
    Gemini,
}

impl ProviderKind {
    /// Every provider, in configuration order.
    pub const ALL: [ProviderKind; 2] = [ProviderKind::Groq, ProviderKind::Gemini];

    /// Derive the provider from the model id namespace.
    ///
    /// Google model families and the image backends belong to Gemini,
    /// everything else is served by Groq.
    pub fn from_model_id(id: &str) -> Self {
        const GEMINI: [&str; 4] = ["gemini", "gemma", "imagen", "pollinations/"];
        if GEMINI.iter().any(|prefix| id.starts_with(prefix)) {
            Self::Gemini
        } else {
            Self::Groq
        }
    }

    /// Lowercase name used in config and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Groq => "groq",
            Self::Gemini => "gemini",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability tier of a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Fast,
    Balanced,
    Reasoning,
    Creative,
    Image,
}

impl Tier {
    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Balanced => "balanced",
            Self::Reasoning => "reasoning",
            Self::Creative => "creative",
            Self::Image => "image",
        }
    }
}

/// A model known to the relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelDescriptor {
    /// Globally unique model id, as sent upstream.
    pub id: &'static str,
    /// Human readable name.
    pub name: &'static str,
    /// Serving upstream.
    pub provider: ProviderKind,
    /// Capability tier.
    pub tier: Tier,
}

impl ModelDescriptor {
    pub(crate) const fn new(
        id: &'static str,
        name: &'static str,
        provider: ProviderKind,
        tier: Tier,
    ) -> Self {
        Self {
            id,
            name,
            provider,
            tier,
        }
    }
}

/// A named group of models, shown together in a picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    /// Category token, also accepted as a logical model selection.
    pub id: &'static str,
    /// Tab name.
    pub name: &'static str,
    /// Models in display order.
    pub models: &'static [ModelDescriptor],
}
