//! Shared HTTP transport for OpenAI-compatible upstreams.
//!
//! `HttpProvider` wraps a `reqwest::Client` with pre-configured headers and
//! endpoint URL. Provides `send()` for non-streaming calls and `stream_sse()`
//! for Server-Sent Events streaming. Every failure leaves this module as an
//! [`UpstreamError`].

use crate::{
    Response, StreamChunk, UpstreamError,
    sse::{DONE, LineBuffer, data_payload},
};
use async_stream::try_stream;
use futures_core::Stream;
use futures_util::StreamExt;
use reqwest::{
    Client, Method,
    header::{self, HeaderMap, HeaderName, HeaderValue},
};
use serde::Serialize;

/// Shared HTTP transport for OpenAI-compatible providers.
///
/// Holds a `reqwest::Client`, pre-built headers (auth + content-type),
/// and the target endpoint URL.
#[derive(Clone)]
pub struct HttpProvider {
    client: Client,
    headers: HeaderMap,
    endpoint: String,
}

impl HttpProvider {
    /// Create a provider with Bearer token authentication.
    pub fn bearer(client: Client, key: &str, endpoint: &str) -> Result<Self, UpstreamError> {
        let mut headers = json_headers();
        let value = HeaderValue::from_str(&format!("Bearer {key}"))
            .map_err(|e| UpstreamError::transport(format!("invalid api key header: {e}")))?;
        headers.insert(header::AUTHORIZATION, value);
        Ok(Self {
            client,
            headers,
            endpoint: endpoint.to_owned(),
        })
    }

    /// Create a provider without authentication.
    pub fn no_auth(client: Client, endpoint: &str) -> Self {
        Self {
            client,
            headers: json_headers(),
            endpoint: endpoint.to_owned(),
        }
    }

    /// Send a non-streaming request and deserialize the response as JSON.
    pub async fn send(
        &self,
        body: &impl Serialize,
        extra: &HeaderMap,
    ) -> Result<Response, UpstreamError> {
        tracing::trace!("request: {}", serde_json::to_string(body)?);
        let response = self
            .client
            .request(Method::POST, &self.endpoint)
            .headers(self.merged(extra))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(UpstreamError::status(status.as_u16(), &text));
        }
        tracing::trace!("response: {text}");
        serde_json::from_str(&text).map_err(Into::into)
    }

    /// Stream an SSE response (OpenAI-compatible format).
    ///
    /// Parses `data:` lines and deserializes each payload as [`StreamChunk`]
    /// until the `[DONE]` sentinel. A body that ends without the sentinel is
    /// reported as a transport failure. Dropping the stream drops the
    /// underlying connection.
    pub fn stream_sse(
        &self,
        body: &impl Serialize,
        extra: &HeaderMap,
    ) -> impl Stream<Item = Result<StreamChunk, UpstreamError>> + Send + 'static {
        if let Ok(body) = serde_json::to_string(body) {
            tracing::trace!("request: {}", body);
        }
        let request = self
            .client
            .request(Method::POST, &self.endpoint)
            .headers(self.merged(extra))
            .json(body);

        try_stream! {
            let response = request.send().await.map_err(UpstreamError::from)?;
            let response = checked(response).await?;

            let mut lines = LineBuffer::new();
            let mut done = false;
            let mut stream = response.bytes_stream();
            'body: while let Some(next) = stream.next().await {
                let bytes = next.map_err(UpstreamError::from)?;
                for line in lines.push(&bytes) {
                    let Some(data) = data_payload(&line) else {
                        continue;
                    };
                    if data == DONE {
                        done = true;
                        break 'body;
                    }
                    if data.is_empty() {
                        continue;
                    }
                    match serde_json::from_str::<StreamChunk>(data) {
                        Ok(chunk) => yield chunk,
                        Err(e) => tracing::warn!("failed to parse chunk: {e}, data: {data}"),
                    }
                }
            }

            if !done && !lines.finish_at_done() {
                Err::<(), UpstreamError>(UpstreamError::transport("stream ended without [DONE]"))?;
            }
        }
    }

    /// Get the endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Get a reference to the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn merged(&self, extra: &HeaderMap) -> HeaderMap {
        let mut headers = self.headers.clone();
        for (name, value) in extra {
            headers.insert(HeaderName::clone(name), value.clone());
        }
        headers
    }
}

/// Pass a 2xx response through; anything else becomes a status error
/// carrying the body.
async fn checked(response: reqwest::Response) -> Result<reqwest::Response, UpstreamError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().await.unwrap_or_default();
    Err(UpstreamError::status(status.as_u16(), &text))
}

fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
    headers
}
