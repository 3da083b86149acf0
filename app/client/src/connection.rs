//! Server-sent event transport for chat streams.

use crate::checked;
use anyhow::{Error, Result, anyhow};
use async_stream::try_stream;
use futures_core::Stream;
use futures_util::StreamExt;
use llm::LineBuffer;
use protocol::{
    Frame,
    codec::{self, Event},
};
use reqwest::RequestBuilder;

/// Send a chat request and stream the frames of the response.
///
/// Frames are yielded as soon as their line is complete. The stream ends
/// at `[DONE]`; a body that closes without it, a non-2xx status or a
/// network failure ends the stream with an error. Undecodable frames are
/// skipped.
pub fn chat(request: RequestBuilder) -> impl Stream<Item = Result<Frame>> + Send + 'static {
    try_stream! {
        let response = request.send().await.map_err(Error::from)?;
        let response = checked(response).await?;

        let mut lines = LineBuffer::new();
        let mut done = false;
        let mut body = response.bytes_stream();
        'body: while let Some(bytes) = body.next().await {
            let bytes = bytes.map_err(Error::from)?;
            for line in lines.push(&bytes) {
                match codec::decode_line(&line) {
                    Ok(Some(Event::Frame(frame))) => yield frame,
                    Ok(Some(Event::Done)) => {
                        done = true;
                        break 'body;
                    }
                    Ok(None) => {}
                    Err(e) => tracing::warn!("skipping undecodable frame: {e}"),
                }
            }
        }

        if !done && !lines.finish_at_done() {
            Err::<(), Error>(anyhow!("stream ended without [DONE]"))?;
        }
    }
}
