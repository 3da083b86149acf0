//! Completion requests

use compact_str::CompactString;
use llm::{Message, Role, Sampling};

/// One send action: a logical selection plus the conversation so far.
///
/// The last user turn in `history` is the message being answered.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Model id or category token.
    pub target: CompactString,
    /// Conversation turns, oldest first.
    pub history: Vec<Message>,
    /// Caller sampling.
    pub sampling: Sampling,
    /// Whether server-side tools may be attached.
    pub tools: bool,
}

impl CompletionRequest {
    /// Create a request with default sampling and no tools.
    pub fn new(target: impl Into<CompactString>, history: Vec<Message>) -> Self {
        Self {
            target: target.into(),
            history,
            sampling: Sampling::default(),
            tools: false,
        }
    }

    /// Set caller sampling.
    pub fn with_sampling(mut self, sampling: Sampling) -> Self {
        self.sampling = sampling;
        self
    }

    /// Allow server-side tools.
    pub fn with_tools(mut self, tools: bool) -> Self {
        self.tools = tools;
        self
    }

    /// Content of the most recent user turn.
    pub fn prompt(&self) -> &str {
        self.history
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
            .unwrap_or_default()
    }
}
