//! Gravity wire protocol types shared between gateway and client.
//!
//! Chat completions travel as a JSON request answered by a server-sent event
//! stream of [`Frame`]s closed by a `[DONE]` sentinel (see [`codec`]).
//! Image generation and health checks are plain JSON request/response.

use compact_str::CompactString;
use llm::{Message, Sampling};
use serde::{Deserialize, Serialize};

pub mod codec;

/// Chat completion endpoint.
pub const CHAT_PATH: &str = "/api/chat";
/// Image generation endpoint.
pub const IMAGE_PATH: &str = "/api/image";
/// Health endpoint.
pub const HEALTH_PATH: &str = "/api/health";
/// Live voice channel endpoint.
pub const LIVE_PATH: &str = "/api/live";

/// Body of a chat completion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Provider hint. Informational only; routing follows the model id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<CompactString>,
    /// Model id or category token.
    pub model: CompactString,
    /// Conversation, oldest first, ending with the new user turn.
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    /// Allow server-side tools on models that support them.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub tools: bool,
}

impl ChatRequest {
    /// A request with default sampling.
    pub fn new(model: impl Into<CompactString>, messages: Vec<Message>) -> Self {
        Self {
            provider: None,
            model: model.into(),
            messages,
            temperature: None,
            max_tokens: None,
            top_p: None,
            tools: false,
        }
    }

    /// Caller sampling carried by the request.
    pub fn sampling(&self) -> Sampling {
        Sampling {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            top_p: self.top_p,
        }
    }
}

/// One server-sent event payload of a chat stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Frame {
    /// A piece of the answer.
    Delta {
        content: String,
        /// Producing model. Absent means the last known model.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        model: Option<CompactString>,
    },
    /// The run failed; sent at most once, right before `[DONE]`.
    Error { error: String },
}

impl Frame {
    /// A delta frame.
    pub fn delta(content: impl Into<String>, model: impl Into<CompactString>) -> Self {
        Self::Delta {
            content: content.into(),
            model: Some(model.into()),
        }
    }

    /// An error frame.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }
}

/// Body of an image generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRequest {
    pub prompt: String,
    /// Image model id, or `auto`.
    #[serde(default = "auto")]
    pub model: CompactString,
}

/// Body of an image generation response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResponse {
    #[serde(
        default,
        rename = "imageUrl",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// JSON error body of a rejected request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    /// Create an error body.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Body of the health endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    /// Always `ok` when the server answers.
    pub status: String,
    /// RFC 3339 server time.
    pub timestamp: String,
    /// Which upstream credentials are configured.
    pub env: HealthEnv,
}

/// Credential presence flags. Never the credentials themselves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthEnv {
    pub groq_key_set: bool,
    pub gemini_key_set: bool,
}

/// Voice of the live channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Voice {
    #[default]
    Female,
    Male,
}

impl Voice {
    /// Lowercase name as used in query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Female => "female",
            Self::Male => "male",
        }
    }
}

/// Query parameters of the live channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<CompactString>,
    #[serde(default)]
    pub voice: Voice,
}

fn auto() -> CompactString {
    CompactString::const_new("auto")
}
