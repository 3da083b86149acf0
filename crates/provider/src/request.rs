//! Provider request bodies

use crate::{ProviderKind, rules};
use compact_str::CompactString;
use llm::{
    Message, Sampling,
    reqwest::header::{HeaderMap, HeaderName, HeaderValue},
};
use serde::Serialize;
use serde_json::{Value, json};

/// A request ready to be sent to one upstream.
///
/// Serializes as an OpenAI-compatible chat completions body. Groq takes the
/// token budget as `max_completion_tokens`, Gemini as `max_tokens`; only the
/// field of the target provider is set.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderRequest {
    /// Target upstream.
    #[serde(skip)]
    pub provider: ProviderKind,
    /// Extra HTTP headers.
    #[serde(skip)]
    pub headers: HeaderMap,
    /// Concrete model id.
    pub model: CompactString,
    /// Conversation turns.
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_completion_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning_effort: Option<&'static str>,
    /// Server-side tool settings for compound models.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compound_custom: Option<Value>,
    /// Whether the upstream call streams.
    pub stream: bool,
}

impl ProviderRequest {
    /// Effective token budget, whichever field carries it.
    pub fn token_budget(&self) -> Option<u32> {
        self.max_completion_tokens.or(self.max_tokens)
    }
}

/// Build the request for `model` on `kind`.
///
/// Pure: the result depends only on the arguments and the provider's rule
/// table.
pub fn build_request(
    kind: ProviderKind,
    model: &str,
    turns: &[Message],
    sampling: Sampling,
    tools: bool,
) -> ProviderRequest {
    let shape = rules::shape(kind, model);
    let sampling = shape.sampling(sampling);

    let mut headers = HeaderMap::new();
    if let Some(version) = shape.model_version {
        headers.insert(
            HeaderName::from_static("groq-model-version"),
            HeaderValue::from_static(version),
        );
    }

    let (max_completion_tokens, max_tokens) = match kind {
        ProviderKind::Groq => (sampling.max_tokens, None),
        ProviderKind::Gemini => (None, sampling.max_tokens),
    };

    let compound_custom = (tools && shape.tools).then(|| {
        json!({
            "tools": { "enabled_tools": ["web_search", "visit_website"] }
        })
    });

    ProviderRequest {
        provider: kind,
        headers,
        model: model.into(),
        messages: turns.to_vec(),
        temperature: sampling.temperature,
        max_completion_tokens,
        max_tokens,
        top_p: sampling.top_p,
        reasoning_effort: shape.reasoning_effort,
        compound_custom,
        stream: shape.streaming,
    }
}
