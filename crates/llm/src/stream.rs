//! Streaming chunk bodies (OpenAI-compatible `chat.completion.chunk`)

use serde::Deserialize;

/// A streaming chat completion chunk
#[derive(Debug, Clone, Deserialize, Default)]
pub struct StreamChunk {
    /// The model that produced the chunk, when the upstream reports it
    #[serde(default)]
    pub model: Option<String>,

    /// The list of completion choices (with delta content)
    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// A choice inside a streaming chunk
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Choice {
    /// The incremental content
    #[serde(default)]
    pub delta: Delta,

    /// Why the model stopped, on the last chunk
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Incremental message content
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Delta {
    /// Text appended by this chunk
    #[serde(default)]
    pub content: Option<String>,
}

impl StreamChunk {
    /// Get the content of the first choice
    pub fn content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.delta.content.as_deref())
            .filter(|s| !s.is_empty())
    }

    /// Get the reason the model stopped generating
    pub fn reason(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.finish_reason.as_deref())
    }
}
