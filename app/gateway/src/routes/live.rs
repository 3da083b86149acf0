//! Live channel proxy.
//!
//! The client socket is bridged to the upstream live endpoint frame by
//! frame. Text, binary and close frames are forwarded verbatim; each side
//! answers its own pings.

use crate::{AppState, state::LiveTarget};
use axum::{
    extract::{
        Query, State,
        ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade, close_code},
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use protocol::LiveParams;
use provider::Upstream;
use registry::Registry;
use std::sync::Arc;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{self, protocol::frame::coding::CloseCode},
};

/// `GET /api/live`: upgrade and proxy.
pub async fn handler<U: Upstream>(
    State(state): State<AppState<U>>,
    Query(params): Query<LiveParams>,
    ws: WebSocketUpgrade,
) -> Response {
    let target = Arc::clone(&state.live);
    ws.on_upgrade(move |socket| proxy(socket, target, params))
}

async fn proxy(mut socket: WebSocket, target: Arc<LiveTarget>, params: LiveParams) {
    let url = match target.endpoint(&params) {
        Ok(Some(url)) => url,
        Ok(None) => {
            tracing::warn!("live channel requested without a gemini key");
            let _ = socket
                .send(close(close_code::POLICY, "Gemini API key not configured"))
                .await;
            return;
        }
        Err(e) => {
            tracing::warn!("invalid live url: {e}");
            let _ = socket
                .send(close(close_code::ERROR, "live endpoint misconfigured"))
                .await;
            return;
        }
    };

    if let Some(model) = params.model.as_deref().filter(|m| !Registry::builtin().is_live(m)) {
        tracing::warn!("live channel requested for unsupported model {model}");
        let reason = format!("unsupported live model {model}");
        let _ = socket.send(close(close_code::POLICY, &reason)).await;
        return;
    }

    let upstream = match connect_async(url.as_str()).await {
        Ok((upstream, _)) => upstream,
        Err(e) => {
            tracing::warn!("failed to reach live upstream: {e}");
            let _ = socket
                .send(close(close_code::ERROR, "live upstream unavailable"))
                .await;
            return;
        }
    };
    tracing::info!("live session opened");

    let (mut client_tx, mut client_rx) = socket.split();
    let (mut upstream_tx, mut upstream_rx) = upstream.split();

    let inbound = async {
        while let Some(Ok(message)) = client_rx.next().await {
            let Some(message) = to_upstream(message) else {
                continue;
            };
            if upstream_tx.send(message).await.is_err() {
                break;
            }
        }
        let _ = upstream_tx.close().await;
    };
    let outbound = async {
        while let Some(Ok(message)) = upstream_rx.next().await {
            let Some(message) = to_client(message) else {
                continue;
            };
            if client_tx.send(message).await.is_err() {
                break;
            }
        }
        let _ = client_tx.close().await;
    };

    tokio::select! {
        _ = inbound => {}
        _ = outbound => {}
    }
    tracing::info!("live session closed");
}

fn close(code: u16, reason: &str) -> Message {
    Message::Close(Some(CloseFrame {
        code,
        reason: reason.into(),
    }))
}

fn to_upstream(message: Message) -> Option<tungstenite::Message> {
    match message {
        Message::Text(text) => Some(tungstenite::Message::text(text.as_str())),
        Message::Binary(data) => Some(tungstenite::Message::binary(data)),
        Message::Close(frame) => Some(tungstenite::Message::Close(frame.map(|frame| {
            tungstenite::protocol::CloseFrame {
                code: CloseCode::from(frame.code),
                reason: frame.reason.as_str().into(),
            }
        }))),
        Message::Ping(_) | Message::Pong(_) => None,
    }
}

fn to_client(message: tungstenite::Message) -> Option<Message> {
    match message {
        tungstenite::Message::Text(text) => Some(Message::Text(text.as_str().into())),
        tungstenite::Message::Binary(data) => Some(Message::Binary(data)),
        tungstenite::Message::Close(frame) => Some(Message::Close(frame.map(|frame| CloseFrame {
            code: frame.code.into(),
            reason: frame.reason.as_str().into(),
        }))),
        _ => None,
    }
}
