//! CLI argument parsing and subcommand dispatch.

use anyhow::Result;
use clap::{Parser, Subcommand};
use client::{ClientConfig, GravityClient, URL_ENV};

pub mod chat;
pub mod health;
pub mod image;
pub mod models;
pub mod send;
pub mod serve;

/// Gravity multi-provider chat relay.
#[derive(Parser, Debug)]
#[command(name = "gravity", about = "Gravity multi-provider chat relay")]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Gateway URL.
    #[arg(long, global = true, env = URL_ENV)]
    pub url: Option<String>,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the gateway server.
    Serve(serve::Serve),
    /// Start an interactive chat REPL.
    Chat(chat::Chat),
    /// Send a one-shot message and print the reply.
    Send(send::Send),
    /// Generate an image and print its URL.
    Image(image::Image),
    /// List the model catalog.
    Models(models::Models),
    /// Show the gateway health report.
    Health,
}

impl Cli {
    /// Gateway client for the configured URL.
    pub fn client(&self) -> GravityClient {
        let config = match &self.url {
            Some(url) => ClientConfig {
                base_url: url.as_str().into(),
            },
            None => ClientConfig::default(),
        };
        GravityClient::new(config)
    }

    /// Run the selected command.
    pub async fn run(self) -> Result<()> {
        let client = self.client();
        match self.command {
            Command::Serve(cmd) => cmd.run().await,
            Command::Chat(cmd) => cmd.run(client).await,
            Command::Send(cmd) => cmd.run(&client).await,
            Command::Image(cmd) => cmd.run(&client).await,
            Command::Models(cmd) => cmd.run(),
            Command::Health => health::run(&client).await,
        }
    }
}
