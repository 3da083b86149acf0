//! Interactive chat REPL with streaming output.

use crate::terminal::stream_to_terminal;
use anyhow::Result;
use client::{GravityClient, Session, Update};
use compact_str::CompactString;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

/// A line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input<'a> {
    /// Text to send.
    Message(&'a str),
    /// `/new`: start a new session.
    New,
    /// `/model ID`: change the selection.
    Model(&'a str),
    /// `/search`: toggle web search.
    Search,
    /// `/exit` or `/quit`.
    Exit,
    /// Blank line or unknown command.
    Ignored,
}

impl<'a> Input<'a> {
    /// Classify one input line.
    pub fn parse(line: &'a str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Ignored;
        }
        let Some(command) = line.strip_prefix('/') else {
            return Self::Message(line);
        };
        let (name, arg) = command
            .split_once(char::is_whitespace)
            .map(|(name, arg)| (name, arg.trim()))
            .unwrap_or((command, ""));
        match name {
            "new" => Self::New,
            "model" if !arg.is_empty() => Self::Model(arg),
            "search" => Self::Search,
            "exit" | "quit" => Self::Exit,
            _ => Self::Ignored,
        }
    }
}

/// Interactive chat REPL over one gateway.
pub struct ChatRepl {
    client: GravityClient,
    model: CompactString,
    search: bool,
    session: Session,
    sessions: u64,
}

impl ChatRepl {
    /// Create a new REPL with the given client and model selection.
    pub fn new(client: GravityClient, model: CompactString, search: bool) -> Self {
        Self {
            client,
            model,
            search,
            session: Session::new(1),
            sessions: 1,
        }
    }

    /// Run the interactive REPL loop until EOF or `/exit`.
    pub async fn run(&mut self) -> Result<()> {
        println!("Gravity chat with {} (/new, /model ID, /search, /exit)", self.model);
        println!("---");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            print!("> ");
            std::io::stdout().flush().ok();
            let Some(line) = lines.next_line().await? else {
                break;
            };
            match Input::parse(&line) {
                Input::Message(text) => self.send(text).await,
                Input::New => {
                    self.sessions += 1;
                    self.session = Session::new(self.sessions);
                    println!("(new session)");
                }
                Input::Model(model) => {
                    self.model = model.into();
                    println!("(model {model})");
                }
                Input::Search => {
                    self.search = !self.search;
                    let state = if self.search { "on" } else { "off" };
                    println!("(web search {state})");
                }
                Input::Exit => break,
                Input::Ignored => {}
            }
        }
        Ok(())
    }

    async fn send(&mut self, text: &str) {
        let messages =
            self.client
                .send_message(&mut self.session, &self.model, text, self.search);
        if let Some(reply) = stream_to_terminal(messages).await {
            self.session.apply(reply, Update::Broken);
        }
    }
}
