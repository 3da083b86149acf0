//! Relay events to wire frames.
//!
//! Deltas become [`Frame::Delta`]s in order. A failed run adds a single
//! [`Frame::Error`] carrying the user-facing sentence. Every stream ends
//! with exactly one [`Event::Done`], whatever the outcome.

use async_stream::stream;
use futures_core::Stream;
use futures_util::StreamExt;
use protocol::{Frame, codec::Event};
use relay::RelayEvent;
use std::pin::pin;

/// Frames for a relay run, closed by the sentinel.
pub fn frames(
    events: impl Stream<Item = RelayEvent> + Send + 'static,
) -> impl Stream<Item = Event> + Send + 'static {
    stream! {
        let mut events = pin!(events);
        while let Some(event) = events.next().await {
            match event {
                RelayEvent::Transition(state) => tracing::trace!("relay state {state:?}"),
                RelayEvent::Delta(delta) => {
                    yield Event::Frame(Frame::delta(delta.text, delta.model));
                }
                RelayEvent::Finished(outcome) => {
                    if let Some(error) = outcome.error() {
                        yield Event::Frame(Frame::error(error.user_message()));
                    }
                    break;
                }
            }
        }
        yield Event::Done;
    }
}
