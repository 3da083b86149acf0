//! Shared application state for the gateway server.

use crate::GatewayConfig;
use anyhow::Result;
use protocol::{HealthEnv, LiveParams};
use provider::{Adapter, Images, ProviderKind, Providers, ProvidersConfig, Upstream};
use relay::Relay;
use std::sync::Arc;
use url::Url;

/// Shared state available to all request handlers.
pub struct AppState<U> {
    /// The streaming relay.
    pub relay: Arc<Relay<U>>,
    /// Image generation.
    pub images: Arc<Images>,
    /// Credential presence, reported by the health endpoint.
    pub env: HealthEnv,
    /// Upstream of the live channel.
    pub live: Arc<LiveTarget>,
}

impl<U> Clone for AppState<U> {
    fn clone(&self) -> Self {
        Self {
            relay: Arc::clone(&self.relay),
            images: Arc::clone(&self.images),
            env: self.env,
            live: Arc::clone(&self.live),
        }
    }
}

impl<U: Upstream> AppState<U> {
    /// Wrap a relay, taking credential flags and the live upstream from
    /// `providers`.
    pub fn new(relay: Relay<U>, providers: &ProvidersConfig) -> Self {
        let gemini = providers.is_configured(ProviderKind::Gemini);
        Self {
            relay: Arc::new(relay),
            images: Arc::new(Images::new(gemini)),
            env: HealthEnv {
                groq_key_set: providers.is_configured(ProviderKind::Groq),
                gemini_key_set: gemini,
            },
            live: Arc::new(LiveTarget::new(
                providers.live_url(),
                &providers.gemini.api_key,
            )),
        }
    }

    /// Replace the image generator.
    pub fn with_images(mut self, images: Images) -> Self {
        self.images = Arc::new(images);
        self
    }
}

impl AppState<Adapter> {
    /// Build the HTTP adapters for every configured provider.
    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        let providers = Providers::from_config(&config.providers, llm::Client::new())?;
        let available = providers.available();
        if available.is_empty() {
            tracing::warn!("no provider credentials configured, chat requests will fail");
        } else {
            tracing::info!("providers available: {available:?}");
        }
        let relay = Relay::new(providers, config.relay);
        Ok(Self::new(relay, &config.providers))
    }
}

/// Where live sessions are proxied to.
#[derive(Clone)]
pub struct LiveTarget {
    url: String,
    key: String,
}

impl LiveTarget {
    /// Target `url`, authenticated with `key`.
    pub fn new(url: &str, key: &str) -> Self {
        Self {
            url: url.to_owned(),
            key: key.trim().to_owned(),
        }
    }

    /// Whether a credential is present.
    pub fn is_configured(&self) -> bool {
        !self.key.is_empty()
    }

    /// The upstream URL for a session, `None` without a credential.
    pub fn endpoint(&self, params: &LiveParams) -> Result<Option<Url>> {
        if !self.is_configured() {
            return Ok(None);
        }
        let mut url = Url::parse(&self.url)?;
        url.query_pairs_mut().append_pair("key", &self.key);
        tracing::debug!(
            "live session for model {:?} with {} voice",
            params.model,
            params.voice.as_str()
        );
        Ok(Some(url))
    }
}

impl std::fmt::Debug for LiveTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveTarget")
            .field("url", &self.url)
            .field("configured", &self.is_configured())
            .finish()
    }
}
