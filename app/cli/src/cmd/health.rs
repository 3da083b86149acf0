//! Gateway health command.

use anyhow::Result;
use client::GravityClient;

/// Print the gateway health report.
pub async fn run(client: &GravityClient) -> Result<()> {
    let health = client.health().await?;
    println!("status: {} ({})", health.status, health.timestamp);
    println!("groq key: {}", flag(health.env.groq_key_set));
    println!("gemini key: {}", flag(health.env.gemini_key_set));
    Ok(())
}

fn flag(set: bool) -> &'static str {
    if set { "set" } else { "missing" }
}
