//! Live voice channel.
//!
//! A [`LiveSession`] is an owned handle on one websocket to the gateway's
//! live endpoint. The socket is driven by a background task; frames go out
//! through [`LiveSession::send`], come back through [`LiveSession::recv`],
//! and the connection state is published on a `watch` channel. Audio
//! framing is up to the caller.

use anyhow::{Result, anyhow};
use futures_util::{SinkExt, StreamExt};
use protocol::{LIVE_PATH, Voice};
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};
use tokio_tungstenite::{connect_async, tungstenite::Message};
use url::Url;

/// Frames buffered in each direction.
const BUFFER: usize = 64;

/// Connection state of a live session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveState {
    Connecting,
    Connected,
    /// Closed, with the reason.
    Closed(String),
}

/// Handle on one live session.
pub struct LiveSession {
    outgoing: Option<mpsc::Sender<Vec<u8>>>,
    incoming: mpsc::Receiver<Vec<u8>>,
    state: watch::Receiver<LiveState>,
    task: JoinHandle<()>,
}

impl LiveSession {
    /// Start connecting to the gateway at `base_url`.
    ///
    /// Returns immediately in [`LiveState::Connecting`]; frames sent before
    /// the socket is up are queued.
    pub fn connect(base_url: &str, voice: Voice, model: Option<&str>) -> Result<Self> {
        let url = live_url(base_url, voice, model)?;
        let (state_tx, state) = watch::channel(LiveState::Connecting);
        let (outgoing, outgoing_rx) = mpsc::channel(BUFFER);
        let (incoming_tx, incoming) = mpsc::channel(BUFFER);
        let task = tokio::spawn(drive(url, state_tx, outgoing_rx, incoming_tx));
        Ok(Self {
            outgoing: Some(outgoing),
            incoming,
            state,
            task,
        })
    }

    /// Subscribe to state changes.
    pub fn state(&self) -> watch::Receiver<LiveState> {
        self.state.clone()
    }

    /// Send one frame.
    pub async fn send(&self, frame: Vec<u8>) -> Result<()> {
        let outgoing = self
            .outgoing
            .as_ref()
            .ok_or_else(|| anyhow!("live session closed"))?;
        outgoing
            .send(frame)
            .await
            .map_err(|_| anyhow!("live session closed"))
    }

    /// The next frame from the server, `None` once the session is closed.
    pub async fn recv(&mut self) -> Option<Vec<u8>> {
        self.incoming.recv().await
    }

    /// Close the session and wait for the socket to shut down.
    pub async fn close(mut self) -> LiveState {
        self.outgoing.take();
        if let Err(e) = (&mut self.task).await {
            tracing::warn!("live session task failed: {e}");
        }
        self.state.borrow().clone()
    }
}

/// Websocket URL of the live endpoint for a voice and model.
pub fn live_url(base_url: &str, voice: Voice, model: Option<&str>) -> Result<Url> {
    let mut url = Url::parse(&format!("{}{LIVE_PATH}", base_url.trim_end_matches('/')))?;
    let scheme = match url.scheme() {
        "https" | "wss" => "wss",
        _ => "ws",
    };
    url.set_scheme(scheme)
        .map_err(|_| anyhow!("cannot derive a websocket url from {base_url}"))?;
    url.query_pairs_mut().append_pair("voice", voice.as_str());
    if let Some(model) = model {
        url.query_pairs_mut().append_pair("model", model);
    }
    Ok(url)
}

async fn drive(
    url: Url,
    state: watch::Sender<LiveState>,
    mut outgoing: mpsc::Receiver<Vec<u8>>,
    incoming: mpsc::Sender<Vec<u8>>,
) {
    let socket = match connect_async(url.as_str()).await {
        Ok((socket, _)) => socket,
        Err(e) => {
            state.send_replace(LiveState::Closed(e.to_string()));
            return;
        }
    };
    state.send_replace(LiveState::Connected);
    tracing::debug!("live session connected");

    let (mut sink, mut stream) = socket.split();
    let reason = loop {
        tokio::select! {
            frame = outgoing.recv() => match frame {
                Some(frame) => {
                    if let Err(e) = sink.send(Message::binary(frame)).await {
                        break e.to_string();
                    }
                }
                None => {
                    let _ = sink.close().await;
                    break "closed by client".to_owned();
                }
            },
            message = stream.next() => {
                let frame = match message {
                    Some(Ok(Message::Binary(data))) => data.to_vec(),
                    Some(Ok(Message::Text(text))) => text.as_str().as_bytes().to_vec(),
                    Some(Ok(Message::Close(frame))) => {
                        break frame
                            .map(|f| f.reason.as_str().to_owned())
                            .unwrap_or_else(|| "closed by server".to_owned());
                    }
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => break e.to_string(),
                    None => break "closed by server".to_owned(),
                };
                if incoming.send(frame).await.is_err() {
                    let _ = sink.close().await;
                    break "closed by client".to_owned();
                }
            }
        }
    };
    tracing::debug!("live session closed: {reason}");
    state.send_replace(LiveState::Closed(reason));
}
