//! Image generation command.

use anyhow::{Result, bail};
use clap::Args;
use client::GravityClient;
use compact_str::CompactString;
use protocol::ImageRequest;

/// Generate an image and print its URL.
#[derive(Args, Debug)]
pub struct Image {
    /// What to draw.
    pub prompt: String,

    /// Image model id.
    #[arg(long, default_value = "auto")]
    pub model: CompactString,
}

impl Image {
    /// Request the image and print the result.
    pub async fn run(self, client: &GravityClient) -> Result<()> {
        let response = client
            .image(&ImageRequest {
                prompt: self.prompt,
                model: self.model,
            })
            .await?;
        match (response.image_url, response.text) {
            (None, None) => bail!("no image received"),
            (url, text) => {
                if let Some(url) = url {
                    println!("{url}");
                }
                if let Some(text) = text {
                    println!("{text}");
                }
            }
        }
        Ok(())
    }
}
