//! Chat turns

use serde::{Deserialize, Serialize};

/// A single turn in a conversation.
///
/// Turns are never mutated after creation; history is append-only.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct Message {
    /// The role of the message
    pub role: Role,

    /// The content of the message
    pub content: String,
}

impl Message {
    /// Create a new system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a new user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create a new assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// The most recent `size` turns of `history`.
pub fn window(history: &[Message], size: usize) -> &[Message] {
    &history[history.len().saturating_sub(size)..]
}

/// The role of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Default)]
pub enum Role {
    /// The user role
    #[serde(rename = "user")]
    #[default]
    User,
    /// The assistant role
    #[serde(rename = "assistant")]
    Assistant,
    /// The system role
    #[serde(rename = "system")]
    System,
}
