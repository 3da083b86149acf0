//! Gravity client library: HTTP client for a gravity-gateway plus the
//! in-memory conversation model driven by its streams. Used by gravity-cli
//! and other front-ends.

use anyhow::Result;
use compact_str::CompactString;
use futures_core::Stream;
use protocol::{
    CHAT_PATH, ChatRequest, ErrorBody, Frame, HEALTH_PATH, Health, IMAGE_PATH, ImageRequest,
    ImageResponse, Voice,
};
use reqwest::Response;

pub use {
    conversation::{ChatMessage, ContentType, MessageKind, Session, Update},
    live::{LiveSession, LiveState},
};

pub mod connection;
pub mod conversation;
pub mod live;
mod send;

/// Environment variable overriding the gateway URL.
pub const URL_ENV: &str = "GRAVITY_URL";

/// Client configuration for connecting to a gravity-gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Gateway base URL, without a trailing path.
    pub base_url: CompactString,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: CompactString::const_new("http://127.0.0.1:3000"),
        }
    }
}

impl ClientConfig {
    /// The default configuration, with `GRAVITY_URL` applied when set.
    pub fn from_env() -> Self {
        match std::env::var(URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self {
                base_url: url.trim().into(),
            },
            _ => Self::default(),
        }
    }
}

/// HTTP client for the gravity-gateway.
#[derive(Debug, Clone)]
pub struct GravityClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl GravityClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Access the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Set the gateway URL.
    pub fn base_url(mut self, url: impl Into<CompactString>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Full URL of a gateway path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }

    /// Stream a chat completion, see [`connection::chat`].
    pub fn chat(
        &self,
        request: &ChatRequest,
    ) -> impl Stream<Item = Result<Frame>> + Send + 'static {
        connection::chat(self.http.post(self.url(CHAT_PATH)).json(request))
    }

    /// Generate an image.
    pub async fn image(&self, request: &ImageRequest) -> Result<ImageResponse> {
        let response = self
            .http
            .post(self.url(IMAGE_PATH))
            .json(request)
            .send()
            .await?;
        Ok(checked(response).await?.json().await?)
    }

    /// Query the gateway health report.
    pub async fn health(&self) -> Result<Health> {
        let response = self.http.get(self.url(HEALTH_PATH)).send().await?;
        Ok(checked(response).await?.json().await?)
    }

    /// Open a live voice session.
    pub fn live(&self, voice: Voice, model: Option<&str>) -> Result<LiveSession> {
        LiveSession::connect(&self.config.base_url, voice, model)
    }
}

/// Turn a non-2xx response into an error carrying the gateway's message.
pub(crate) async fn checked(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error)
        .unwrap_or(text);
    anyhow::bail!("gateway returned {status}: {message}")
}
