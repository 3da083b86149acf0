//! Terminal output for streaming replies.

use client::{ChatMessage, ContentType, MessageKind};
use futures_core::Stream;
use futures_util::StreamExt;
use std::{io::Write, pin::pin};

/// Turns message snapshots into incremental terminal output.
#[derive(Debug, Default)]
pub struct Printer {
    current: Option<u64>,
    printed: usize,
    labelled: bool,
}

impl Printer {
    /// Text to print for `message`, given everything printed before.
    pub fn step(&mut self, message: &ChatMessage) -> String {
        if self.current != Some(message.id) {
            self.current = Some(message.id);
            self.printed = 0;
            self.labelled = false;
        }

        let mut out = String::new();
        match (message.kind, message.content_type) {
            (MessageKind::Error, _) => {
                if self.printed > 0 {
                    out.push('\n');
                }
                out.push_str(&format!("error: {}\n", message.content));
                self.printed = message.content.len();
            }
            (_, ContentType::Image) => {
                let model = message.model_used.as_deref().unwrap_or("image");
                out.push_str(&format!("[{model}] {}\n", message.content));
                self.printed = message.content.len();
            }
            (_, ContentType::Text) => {
                let fresh = message.content.get(self.printed..).unwrap_or_default();
                if !fresh.is_empty() && !self.labelled {
                    if let Some(model) = &message.model_used {
                        out.push_str(&format!("[{model}] "));
                    }
                    self.labelled = true;
                }
                out.push_str(fresh);
                self.printed = message.content.len();
                if !message.streaming && message.kind == MessageKind::Ai {
                    out.push('\n');
                }
            }
        }
        out
    }
}

/// Print message snapshots as they arrive.
///
/// Ctrl+C stops reading. Returns the id of the message that was still
/// streaming when reading stopped, if any.
pub async fn stream_to_terminal(messages: impl Stream<Item = ChatMessage>) -> Option<u64> {
    let mut messages = pin!(messages);
    let mut printer = Printer::default();
    let mut streaming = None;

    loop {
        tokio::select! {
            message = messages.next() => {
                let Some(message) = message else {
                    return None;
                };
                print!("{}", printer.step(&message));
                std::io::stdout().flush().ok();
                streaming = message.streaming.then_some(message.id);
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                return streaming;
            }
        }
    }
}
