//! Shared chat types and upstream transport.
//!
//! This crate provides the types every other layer speaks: `Message` (one
//! chat turn), `Sampling`, the OpenAI-compatible `StreamChunk`/`Response`
//! bodies, the `HttpProvider` transport, and `UpstreamError`, the only error
//! type allowed to cross out of an upstream call.

pub use error::{StatusClass, UpstreamError};
pub use http::HttpProvider;
pub use message::{Message, Role, window};
pub use reqwest::{self, Client};
pub use response::{Response, ResponseChoice, ResponseMessage};
pub use sampling::Sampling;
pub use sse::{DONE, LineBuffer, data_payload};
pub use stream::{Choice, Delta, StreamChunk};

mod error;
mod http;
mod message;
mod response;
mod sampling;
pub mod sse;
mod stream;
