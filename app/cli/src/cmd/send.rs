//! One-shot message command.

use crate::terminal::stream_to_terminal;
use anyhow::{Result, bail};
use clap::Args;
use client::{GravityClient, MessageKind, Session};
use compact_str::CompactString;

/// Send a one-shot message and print the reply.
#[derive(Args, Debug)]
pub struct Send {
    /// Message content.
    pub content: String,

    /// Model id or category.
    #[arg(long, default_value = "auto")]
    pub model: CompactString,

    /// Enable web search.
    #[arg(long)]
    pub search: bool,
}

impl Send {
    /// Send the message and stream the reply to stdout.
    pub async fn run(self, client: &GravityClient) -> Result<()> {
        let mut session = Session::new(1);
        let messages = client.send_message(&mut session, &self.model, &self.content, self.search);
        if stream_to_terminal(messages).await.is_some() {
            bail!("cancelled");
        }
        if session
            .messages
            .last()
            .is_some_and(|m| m.kind == MessageKind::Error)
        {
            bail!("no answer received");
        }
        Ok(())
    }
}
