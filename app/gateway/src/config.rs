//! Gateway configuration loaded from TOML.

use anyhow::{Context, Result};
use provider::ProvidersConfig;
use relay::RelayConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default config file name.
pub const CONFIG_FILE: &str = "gateway.toml";

/// Environment variable overriding the listen port.
pub const PORT_ENV: &str = "PORT";

/// Built-in configuration, credentials taken from the environment.
pub const DEFAULT_CONFIG: &str = r#"
[server]
host = "127.0.0.1"
port = 3000

[providers.groq]
api_key = "${GROQ_API_KEY}"

[providers.gemini]
api_key = "${GEMINI_API_KEY}"

[relay]
history_window = 15
max_duration_secs = 120
classify = true
classify_timeout_ms = 4000
"#;

/// Top-level gateway configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Server bind configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream credentials and endpoints.
    #[serde(default)]
    pub providers: ProvidersConfig,
    /// Relay tuning.
    #[serde(default)]
    pub relay: RelayConfig,
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen host.
    pub host: String,
    /// Listen port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 3000,
        }
    }
}

impl GatewayConfig {
    /// Parse a TOML string into a `GatewayConfig`, expanding environment
    /// variables first.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let expanded = crate::utils::expand_env_vars(toml_str);
        let config: Self = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Load `path` when it exists, the built-in configuration otherwise.
    ///
    /// `PORT` from the environment overrides `server.port` either way.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            tracing::info!("loaded configuration from {}", path.display());
            Self::load(path)?
        } else {
            tracing::info!("{} not found, using built-in configuration", path.display());
            Self::from_toml(DEFAULT_CONFIG)?
        };
        config.apply_port_override(std::env::var(PORT_ENV).ok().as_deref())?;
        Ok(config)
    }

    /// Replace the port with `port` when set.
    pub fn apply_port_override(&mut self, port: Option<&str>) -> Result<()> {
        let Some(port) = port.map(str::trim).filter(|p| !p.is_empty()) else {
            return Ok(());
        };
        self.server.port = port
            .parse()
            .with_context(|| format!("invalid {PORT_ENV} value {port:?}"))?;
        Ok(())
    }

    /// The `host:port` address to listen on.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
