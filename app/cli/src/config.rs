//! Configuration resolution for `gravity serve`.
//!
//! Resolves gateway.toml in priority order:
//! 1. `--config <path>` flag (explicit override)
//! 2. `{cwd}/gateway.toml` (workspace config)
//! 3. `~/.config/gravity/gateway.toml` (global config)
//!
//! Without any file the built-in configuration is used, which reads the
//! provider keys from the environment.

use anyhow::{Context, Result, bail};
use gateway::{GatewayConfig, config::CONFIG_FILE};
use std::path::{Path, PathBuf};

/// Resolve gateway config following the priority chain.
pub fn resolve_config(config_flag: Option<&Path>) -> Result<GatewayConfig> {
    if let Some(path) = config_flag {
        if !path.exists() {
            bail!("config file {} does not exist", path.display());
        }
        return GatewayConfig::load_or_default(path)
            .with_context(|| format!("failed to load config from {}", path.display()));
    }

    let workspace_path = PathBuf::from(CONFIG_FILE);
    if workspace_path.exists() {
        return GatewayConfig::load_or_default(&workspace_path)
            .context("failed to load workspace config");
    }

    let global_path = global_config_path();
    GatewayConfig::load_or_default(&global_path).context("failed to load global config")
}

/// Path to the global config.
pub fn global_config_path() -> PathBuf {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("gravity")
        .join(CONFIG_FILE)
}
