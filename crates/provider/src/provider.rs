//! HTTP adapter for OpenAI-compatible upstreams.

use crate::{
    ConfigurationError, DeltaEvent, ProviderKind, ProviderRequest, ProvidersConfig, Upstream,
    build_request,
};
use async_stream::try_stream;
use futures_core::Stream;
use futures_util::StreamExt;
use llm::{Client, HttpProvider, Message, Sampling, UpstreamError};
use std::pin::pin;

/// Adapter for one upstream.
///
/// Both supported upstreams speak the OpenAI chat completions dialect, so a
/// single transport serves them; the provider kind selects the rule table
/// and endpoint.
#[derive(Clone)]
pub struct Adapter {
    kind: ProviderKind,
    http: HttpProvider,
}

impl Adapter {
    /// Construct the adapter for `kind` from configuration.
    pub fn new(
        kind: ProviderKind,
        config: &ProvidersConfig,
        client: Client,
    ) -> Result<Self, AdapterError> {
        let remote = config.get(kind);
        if !remote.is_configured() {
            return Err(ConfigurationError::MissingCredential(kind).into());
        }
        let http = HttpProvider::bearer(client, remote.api_key.trim(), config.endpoint(kind))?;
        Ok(Self { kind, http })
    }

    /// Wrap an existing transport.
    pub fn from_http(kind: ProviderKind, http: HttpProvider) -> Self {
        Self { kind, http }
    }

    /// Which upstream this adapter talks to.
    pub fn kind(&self) -> ProviderKind {
        self.kind
    }

    /// Endpoint requests are sent to.
    pub fn endpoint(&self) -> &str {
        self.http.endpoint()
    }

    /// Shape a request for `model` on this adapter's upstream.
    pub fn build_request(
        &self,
        model: &str,
        turns: &[Message],
        sampling: Sampling,
        tools: bool,
    ) -> ProviderRequest {
        build_request(self.kind, model, turns, sampling, tools)
    }
}

impl Upstream for Adapter {
    fn execute(
        &self,
        request: ProviderRequest,
    ) -> impl Stream<Item = Result<DeltaEvent, UpstreamError>> + Send + 'static {
        let http = self.http.clone();
        tracing::debug!(
            "{} request: model={}, stream={}",
            request.provider,
            request.model,
            request.stream
        );
        try_stream! {
            if request.stream {
                let mut chunks = pin!(http.stream_sse(&request, &request.headers));
                while let Some(chunk) = chunks.next().await {
                    let chunk = chunk?;
                    if let Some(text) = chunk.content() {
                        yield DeltaEvent::new(text, request.model.clone());
                    }
                }
            } else {
                let response = http.send(&request, &request.headers).await?;
                yield DeltaEvent::new(response.content(), request.model.clone());
            }
        }
    }
}

/// Failure to construct an [`Adapter`].
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Transport(#[from] UpstreamError),
}
