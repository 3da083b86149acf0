//! Server-sent event codec for chat streams.
//!
//! Wire format: one `data: <json Frame>` event per frame, then a single
//! `data: [DONE]` event. Readers stop at the sentinel and ignore comments,
//! blank lines and other fields.

use crate::Frame;
use llm::sse::{DONE, data_payload};

/// One decoded stream item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Frame(Frame),
    /// The end-of-stream sentinel.
    Done,
}

/// Encode a frame as the `data` payload of an event.
pub fn encode_data(frame: &Frame) -> Result<String, serde_json::Error> {
    serde_json::to_string(frame)
}

/// Encode a frame as a complete event.
pub fn encode(frame: &Frame) -> Result<String, serde_json::Error> {
    Ok(format!("data: {}\n\n", encode_data(frame)?))
}

/// The sentinel event closing every stream.
pub fn done() -> String {
    format!("data: {DONE}\n\n")
}

/// Decode one line of an event stream.
///
/// Returns `None` for lines that are not `data:` fields.
pub fn decode_line(line: &str) -> Result<Option<Event>, serde_json::Error> {
    let Some(data) = data_payload(line) else {
        return Ok(None);
    };
    if data == DONE {
        return Ok(Some(Event::Done));
    }
    if data.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(data).map(|frame| Some(Event::Frame(frame)))
}
