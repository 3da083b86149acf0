//! Chat, image and health handlers.

use super::reject;
use crate::{AppState, bridge};
use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{
        IntoResponse, Response,
        sse::{Event as SseEvent, Sse},
    },
};
use futures_util::StreamExt;
use llm::sse::DONE;
use protocol::{
    ChatRequest, Health, IMAGE_PATH, ImageRequest, ImageResponse,
    codec::{self, Event},
};
use provider::{ImageError, Upstream};
use relay::{CompletionRequest, RelayError};

/// `POST /api/chat`: stream a completion as server-sent events.
///
/// Requests that can never succeed are rejected with a JSON error before
/// the stream opens. Everything after that is reported inside the stream.
pub async fn chat<U: Upstream>(
    State(state): State<AppState<U>>,
    Json(body): Json<ChatRequest>,
) -> Response {
    if body.messages.is_empty() {
        return reject(StatusCode::BAD_REQUEST, "messages must not be empty");
    }
    if let Some(provider) = &body.provider {
        tracing::trace!("provider hint {provider} for {}", body.model);
    }

    let sampling = body.sampling();
    let request = CompletionRequest::new(body.model, body.messages)
        .with_sampling(sampling)
        .with_tools(body.tools);
    if let Err(e) = state.relay.check(&request) {
        tracing::warn!("rejected chat request for {}: {e}", request.target);
        return match e {
            RelayError::Routing(reason) => reject(
                StatusCode::BAD_REQUEST,
                format!("{reason}, use {IMAGE_PATH} for images"),
            ),
            RelayError::Configuration(e) => reject(StatusCode::SERVICE_UNAVAILABLE, e.to_string()),
            e => reject(StatusCode::INTERNAL_SERVER_ERROR, e.user_message()),
        };
    }

    tracing::debug!("streaming chat for {}", request.target);
    let events = bridge::frames(state.relay.run(request)).map(|event| match event {
        Event::Frame(frame) => codec::encode_data(&frame).map(|data| SseEvent::default().data(data)),
        Event::Done => Ok(SseEvent::default().data(DONE)),
    });
    ([(header::CACHE_CONTROL, "no-cache")], Sse::new(events)).into_response()
}

/// `POST /api/image`: generate an image URL.
pub async fn image<U: Upstream>(
    State(state): State<AppState<U>>,
    Json(body): Json<ImageRequest>,
) -> Response {
    match state.images.generate(&body.prompt, &body.model) {
        Ok(url) => {
            tracing::debug!("image generated with {}", body.model);
            Json(ImageResponse {
                image_url: Some(url),
                text: None,
            })
            .into_response()
        }
        Err(e @ ImageError::EmptyPrompt) => reject(StatusCode::BAD_REQUEST, e.to_string()),
        Err(e @ ImageError::Unsupported(_)) => {
            tracing::warn!("{e}");
            reject(StatusCode::NOT_IMPLEMENTED, e.to_string())
        }
        Err(e @ ImageError::Configuration(_)) => {
            reject(StatusCode::SERVICE_UNAVAILABLE, e.to_string())
        }
    }
}

/// `GET /api/health`: liveness and credential presence.
pub async fn health<U: Upstream>(State(state): State<AppState<U>>) -> Json<Health> {
    Json(Health {
        status: "ok".to_owned(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        env: state.env,
    })
}
