//! Gravity gateway: the HTTP server in front of the relay.
//!
//! Serves streaming chat completions as server-sent events, image URLs,
//! a health report and the live voice proxy.

pub mod bridge;
pub mod config;
pub mod routes;
pub mod serve;
pub mod state;
pub mod utils;

pub use config::GatewayConfig;
pub use routes::router;
pub use serve::{ServeHandle, serve, serve_with_state};
pub use state::{AppState, LiveTarget};
