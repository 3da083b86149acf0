//! Tests for `Adapter::execute` against a local HTTP stub.

use futures_util::StreamExt;
use gravity_provider::{Adapter, ProviderKind, Upstream, build_request};
use llm::{HttpProvider, Message, Sampling, StatusClass};
use std::pin::pin;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};

/// Serve one canned response and hand back the raw request.
async fn serve_once(
    status: &'static str,
    content_type: &'static str,
    body: &'static str,
) -> (String, tokio::task::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf).to_string();
            if let Some(end) = text.find("\r\n\r\n") {
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
                    break;
                }
            }
            if n == 0 {
                break;
            }
        }
        let head = format!(
            "HTTP/1.1 {status}\r\ncontent-type: {content_type}\r\nconnection: close\r\n\r\n"
        );
        socket.write_all(head.as_bytes()).await.unwrap();
        socket.write_all(body.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
        String::from_utf8_lossy(&buf).to_string()
    });
    (format!("http://{addr}/v1/chat/completions"), handle)
}

fn adapter(endpoint: &str) -> Adapter {
    let http = HttpProvider::bearer(llm::Client::new(), "test-key", endpoint).unwrap();
    Adapter::from_http(ProviderKind::Groq, http)
}

#[tokio::test]
async fn test_streaming_model_yields_tagged_deltas() {
    let (endpoint, server) = serve_once(
        "200 OK",
        "text/event-stream",
        "data: {\"choices\":[{\"delta\":{\"role\":\"assistant\"}}]}\n\n\
         data: {\"choices\":[{\"delta\":{\"content\":\"Hi\"}}]}\n\n\
         data: {\"choices\":[{\"delta\":{\"content\":\" there\"}}]}\n\n\
         data: [DONE]\n\n",
    )
    .await;
    let adapter = adapter(&endpoint);
    let request = build_request(
        ProviderKind::Groq,
        "groq/compound",
        &[Message::user("Hello")],
        Sampling::default(),
        false,
    );

    let mut deltas = pin!(adapter.execute(request));
    let mut texts = Vec::new();
    while let Some(delta) = deltas.next().await {
        let delta = delta.unwrap();
        assert_eq!(delta.model, "groq/compound");
        texts.push(delta.text);
    }
    assert_eq!(texts, ["Hi", " there"]);

    let raw = server.await.unwrap().to_lowercase();
    assert!(raw.contains("authorization: bearer test-key"));
    assert!(raw.contains("groq-model-version: latest"));
    assert!(raw.contains("\"stream\":true"));
}

#[tokio::test]
async fn test_non_streaming_model_yields_one_delta() {
    let (endpoint, server) = serve_once(
        "200 OK",
        "application/json",
        "{\"model\":\"llama-guard-3-8b\",\"choices\":[{\"message\":{\"content\":\"safe\"}}]}",
    )
    .await;
    let adapter = adapter(&endpoint);
    let request = build_request(
        ProviderKind::Groq,
        "llama-guard-3-8b",
        &[Message::user("Hello")],
        Sampling::default(),
        false,
    );

    let deltas: Vec<_> = adapter.execute(request).collect().await;
    assert_eq!(deltas.len(), 1);
    let delta = deltas[0].as_ref().unwrap();
    assert_eq!(delta.text, "safe");
    assert_eq!(delta.model, "llama-guard-3-8b");

    let raw = server.await.unwrap();
    assert!(raw.contains("\"stream\":false"));
}

#[tokio::test]
async fn test_error_status_becomes_upstream_error() {
    let (endpoint, _server) = serve_once(
        "401 Unauthorized",
        "application/json",
        "{\"error\":{\"message\":\"Invalid API Key\"}}",
    )
    .await;
    let adapter = adapter(&endpoint);
    let request = build_request(
        ProviderKind::Groq,
        "llama-3.1-8b-instant",
        &[Message::user("Hello")],
        Sampling::default(),
        false,
    );

    let deltas: Vec<_> = adapter.execute(request).collect().await;
    assert_eq!(deltas.len(), 1);
    let err = deltas[0].as_ref().unwrap_err();
    assert_eq!(err.class, StatusClass::Unauthorized);
}
