//! Tests for HttpProvider header construction and SSE streaming.

use futures_util::StreamExt;
use gravity_llm::{HttpProvider, StatusClass, reqwest::header::HeaderMap};
use std::pin::pin;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};

#[test]
fn bearer_sets_authorization_header() {
    let client = gravity_llm::Client::new();
    let provider = HttpProvider::bearer(client, "test-key", "http://example.com/v1/chat")
        .expect("bearer provider");

    let auth = provider
        .headers()
        .get("authorization")
        .expect("authorization header");
    assert_eq!(auth.to_str().unwrap(), "Bearer test-key");
    assert_eq!(provider.endpoint(), "http://example.com/v1/chat");
}

#[test]
fn no_auth_omits_authorization_header() {
    let client = gravity_llm::Client::new();
    let provider = HttpProvider::no_auth(client, "http://localhost:11434/v1/chat");

    assert!(provider.headers().get("authorization").is_none());
    assert_eq!(provider.endpoint(), "http://localhost:11434/v1/chat");
}

#[test]
fn bearer_sets_content_type_and_accept() {
    let client = gravity_llm::Client::new();
    let provider =
        HttpProvider::bearer(client, "k", "http://example.com").expect("bearer provider");

    let ct = provider
        .headers()
        .get("content-type")
        .expect("content-type");
    assert_eq!(ct.to_str().unwrap(), "application/json");
    let accept = provider.headers().get("accept").expect("accept");
    assert_eq!(accept.to_str().unwrap(), "application/json");
}

#[test]
fn bearer_rejects_unprintable_key() {
    let client = gravity_llm::Client::new();
    let err = HttpProvider::bearer(client, "bad\nkey", "http://example.com")
        .err()
        .expect("invalid header value");
    assert_eq!(err.class, StatusClass::Transport);
}

/// Serve exactly one canned HTTP response on an ephemeral port.
async fn serve_once(status: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        read_request(&mut socket).await;
        let head = format!(
            "HTTP/1.1 {status}\r\ncontent-type: text/event-stream\r\nconnection: close\r\n\r\n"
        );
        socket.write_all(head.as_bytes()).await.unwrap();
        socket.write_all(body.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
    });
    format!("http://{addr}/v1/chat/completions")
}

async fn read_request(socket: &mut tokio::net::TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..n]);
        let text = String::from_utf8_lossy(&buf).to_string();
        let Some(end) = text.find("\r\n\r\n") else {
            continue;
        };
        let length = text[..end]
            .lines()
            .find_map(|l| {
                let (name, value) = l.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        if buf.len() >= end + 4 + length {
            return;
        }
    }
}

async fn collect(endpoint: &str) -> Vec<Result<String, gravity_llm::UpstreamError>> {
    let provider = HttpProvider::no_auth(gravity_llm::Client::new(), endpoint);
    let body = serde_json::json!({ "model": "m", "stream": true });
    let mut stream = pin!(provider.stream_sse(&body, &HeaderMap::new()));
    let mut out = Vec::new();
    while let Some(item) = stream.next().await {
        out.push(item.map(|chunk| chunk.content().unwrap_or_default().to_owned()));
    }
    out
}

#[tokio::test]
async fn stream_sse_yields_chunks_until_done() {
    let endpoint = serve_once(
        "200 OK",
        "data: {\"choices\":[{\"delta\":{\"content\":\"Hel\"}}]}\n\n\
         : keep-alive\n\n\
         data: {\"choices\":[{\"delta\":{\"content\":\"lo\"}}]}\r\n\r\n\
         data: [DONE]\n\n\
         data: {\"choices\":[{\"delta\":{\"content\":\"ignored\"}}]}\n\n",
    )
    .await;

    let items = collect(&endpoint).await;
    let texts: Vec<_> = items.into_iter().map(Result::unwrap).collect();
    assert_eq!(texts, vec!["Hel".to_owned(), "lo".to_owned()]);
}

#[tokio::test]
async fn stream_sse_accepts_done_without_trailing_newline() {
    let endpoint = serve_once(
        "200 OK",
        "data: {\"choices\":[{\"delta\":{\"content\":\"x\"}}]}\n\ndata: [DONE]",
    )
    .await;

    let items = collect(&endpoint).await;
    assert_eq!(items.len(), 1);
    assert!(items[0].is_ok());
}

#[tokio::test]
async fn stream_sse_without_done_is_a_transport_failure() {
    let endpoint = serve_once(
        "200 OK",
        "data: {\"choices\":[{\"delta\":{\"content\":\"cut\"}}]}\n\n",
    )
    .await;

    let items = collect(&endpoint).await;
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].as_deref().unwrap(), "cut");
    let err = items[1].as_ref().unwrap_err();
    assert_eq!(err.class, StatusClass::Transport);
}

#[tokio::test]
async fn stream_sse_classifies_error_status() {
    let endpoint = serve_once(
        "429 Too Many Requests",
        "{\"error\":{\"message\":\"Rate limit reached\"}}",
    )
    .await;

    let items = collect(&endpoint).await;
    assert_eq!(items.len(), 1);
    let err = items[0].as_ref().unwrap_err();
    assert_eq!(err.class, StatusClass::RateLimited);
    assert!(err.message.contains("Rate limit reached"));
}

#[tokio::test]
async fn stream_sse_error_status_ends_the_stream() {
    let endpoint = serve_once(
        "500 Internal Server Error",
        "data: {\"choices\":[{\"delta\":{\"content\":\"never\"}}]}\n\ndata: [DONE]\n\n",
    )
    .await;

    let items = collect(&endpoint).await;
    assert_eq!(items.len(), 1);
    let err = items[0].as_ref().unwrap_err();
    assert_eq!(err.class, StatusClass::Server);
}
