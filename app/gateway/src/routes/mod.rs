//! HTTP surface of the gateway.

use crate::AppState;
use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use protocol::{CHAT_PATH, ErrorBody, HEALTH_PATH, IMAGE_PATH, LIVE_PATH};
use provider::Upstream;
use tower_http::cors::CorsLayer;

pub mod http;
pub mod live;

/// Build the axum router for every endpoint.
pub fn router<U: Upstream>(state: AppState<U>) -> Router {
    Router::new()
        .route(CHAT_PATH, post(http::chat::<U>))
        .route(IMAGE_PATH, post(http::image::<U>))
        .route(HEALTH_PATH, get(http::health::<U>))
        .route(LIVE_PATH, get(live::handler::<U>))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// A JSON error response.
pub(crate) fn reject(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorBody::new(message))).into_response()
}
