//! Routing and streaming relay.
//!
//! [`Router`] turns a logical selection (a model id or a category token)
//! into a concrete provider and model. [`Relay`] executes the routed request
//! and walks the fallback chain when an attempt fails before producing
//! output, exposing the run as a stream of [`RelayEvent`]s that ends with
//! exactly one [`RelayOutcome`].

pub use {
    config::RelayConfig,
    error::{ErrorKind, RelayError},
    event::{RelayEvent, RelayOutcome, RelayState},
    provider::DeltaEvent,
    relay::{Relay, notice},
    request::CompletionRequest,
    router::{Route, Router},
};

mod config;
mod error;
mod event;
pub mod fallback;
mod relay;
mod request;
mod router;
