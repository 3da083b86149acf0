//! Non-streaming response bodies

use serde::Deserialize;

/// A complete chat completion response
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Response {
    /// The model that answered
    #[serde(default)]
    pub model: Option<String>,

    /// Completion choices
    #[serde(default)]
    pub choices: Vec<ResponseChoice>,
}

/// A choice in a complete response
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ResponseChoice {
    /// The generated message
    #[serde(default)]
    pub message: ResponseMessage,
}

/// The generated message of a choice
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ResponseMessage {
    /// Generated text
    #[serde(default)]
    pub content: Option<String>,
}

impl Response {
    /// Text of the first choice, empty when the upstream returned none.
    pub fn content(&self) -> &str {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .unwrap_or_default()
    }
}
