//! In-memory conversation model.
//!
//! A [`Session`] is an append-only transcript. A reply is opened with
//! [`Session::begin_reply`] and driven to its final form by applying the
//! [`Update`]s read from a chat stream, one at a time and in order.

use chrono::{DateTime, Utc};
use compact_str::CompactString;
use llm::Message;
use protocol::Frame;

/// Most recent messages sent upstream with a new turn.
pub const HISTORY_WINDOW: usize = 15;

/// Characters of the first user message kept as the session title.
pub const TITLE_CHARS: usize = 30;

/// Shown when the stream broke before anything arrived.
pub const INTERRUPTED: &str = "System connection interrupted.";

/// Shown when the stream ended without any content.
pub const NO_RESPONSE: &str = "No response received.";

const UNTITLED: &str = "New Chat";

/// Author of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    User,
    Ai,
    /// A failure notice, styled apart from answers and never sent upstream.
    Error,
}

/// What a message's content holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContentType {
    #[default]
    Text,
    /// An image URL.
    Image,
}

/// One transcript entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: u64,
    pub kind: MessageKind,
    pub content: String,
    pub content_type: ContentType,
    pub timestamp: DateTime<Utc>,
    /// Still receiving deltas.
    pub streaming: bool,
    /// Model that produced the content, updated on every switch.
    pub model_used: Option<CompactString>,
}

/// One item read from a chat stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Update {
    Frame(Frame),
    /// The `[DONE]` sentinel.
    Done,
    /// The stream failed on the client side.
    Broken,
}

/// A conversation.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: u64,
    pub title: String,
    pub messages: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
    next_id: u64,
}

impl Session {
    /// An empty session.
    pub fn new(id: u64) -> Self {
        Self {
            id,
            title: UNTITLED.to_owned(),
            messages: Vec::new(),
            created_at: Utc::now(),
            next_id: 1,
        }
    }

    /// The turns sent upstream before a new user message: the last
    /// [`HISTORY_WINDOW`] user and model messages.
    pub fn history(&self) -> Vec<Message> {
        let turns: Vec<Message> = self
            .messages
            .iter()
            .filter_map(|m| match m.kind {
                MessageKind::User => Some(Message::user(m.content.as_str())),
                MessageKind::Ai => Some(Message::assistant(m.content.as_str())),
                MessageKind::Error => None,
            })
            .collect();
        llm::window(&turns, HISTORY_WINDOW).to_vec()
    }

    /// Append a user message. The first one names the session.
    pub fn push_user(&mut self, text: &str) -> u64 {
        if !self.messages.iter().any(|m| m.kind == MessageKind::User) {
            self.title = text.chars().take(TITLE_CHARS).collect();
        }
        self.push(MessageKind::User, text.to_owned(), ContentType::Text, None)
    }

    /// Append a finished model message.
    pub fn push_ai(
        &mut self,
        content: impl Into<String>,
        content_type: ContentType,
        model: Option<&str>,
    ) -> u64 {
        self.push(
            MessageKind::Ai,
            content.into(),
            content_type,
            model.map(CompactString::from),
        )
    }

    /// Append a failure notice.
    pub fn push_error(&mut self, text: &str) -> u64 {
        self.push(MessageKind::Error, text.to_owned(), ContentType::Text, None)
    }

    /// Open an empty streaming reply.
    pub fn begin_reply(&mut self) -> u64 {
        let id = self.push(MessageKind::Ai, String::new(), ContentType::Text, None);
        if let Some(message) = self.messages.last_mut() {
            message.streaming = true;
        }
        id
    }

    /// A message by id.
    pub fn message(&self, id: u64) -> Option<&ChatMessage> {
        self.messages.iter().find(|m| m.id == id)
    }

    /// Apply one stream item to the streaming reply `reply`.
    ///
    /// Delta text is appended and the model label follows the latest model.
    /// A reply that fails or ends without any content is replaced by an
    /// error message; one that fails after content keeps it and gets an
    /// error message after it. Finished replies ignore further updates.
    pub fn apply(&mut self, reply: u64, update: Update) {
        let Some(index) = self.messages.iter().position(|m| m.id == reply) else {
            return;
        };
        let message = &mut self.messages[index];
        if !message.streaming {
            return;
        }

        match update {
            Update::Frame(Frame::Delta { content, model }) => {
                message.content.push_str(&content);
                if let Some(model) = model {
                    message.model_used = Some(model);
                }
            }
            Update::Frame(Frame::Error { error }) => self.fail(index, &error),
            Update::Done if message.content.is_empty() => self.fail(index, NO_RESPONSE),
            Update::Done => message.streaming = false,
            Update::Broken => self.fail(index, INTERRUPTED),
        }
    }

    fn fail(&mut self, index: usize, text: &str) {
        let message = &mut self.messages[index];
        message.streaming = false;
        if message.content.is_empty() {
            message.kind = MessageKind::Error;
            message.content = text.to_owned();
            message.timestamp = Utc::now();
        } else {
            self.push_error(text);
        }
    }

    fn push(
        &mut self,
        kind: MessageKind,
        content: String,
        content_type: ContentType,
        model_used: Option<CompactString>,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(ChatMessage {
            id,
            kind,
            content,
            content_type,
            timestamp: Utc::now(),
            streaming: false,
            model_used,
        });
        id
    }
}
