//! Interactive chat REPL command.

use crate::repl::ChatRepl;
use anyhow::Result;
use clap::Args;
use client::GravityClient;
use compact_str::CompactString;

/// Start an interactive chat REPL.
#[derive(Args, Debug)]
pub struct Chat {
    /// Model id or category.
    #[arg(long, default_value = "auto")]
    pub model: CompactString,

    /// Start with web search enabled.
    #[arg(long)]
    pub search: bool,
}

impl Chat {
    /// Enter the interactive REPL.
    pub async fn run(self, client: GravityClient) -> Result<()> {
        ChatRepl::new(client, self.model, self.search).run().await
    }
}
