//! Scripted in-process upstream.

#![allow(dead_code)]

use futures_core::Stream;
use gravity_relay::{CompletionRequest, Relay, RelayConfig, RelayEvent, RelayOutcome};
use llm::{Message, Role, UpstreamError};
use provider::{DeltaEvent, ProviderKind, ProviderRequest, Providers, Upstream};
use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

/// Behaviour of one model.
#[derive(Clone, Debug)]
pub enum Script {
    /// Yield these deltas, then end.
    Yield(Vec<&'static str>),
    /// Fail before any delta.
    Fail,
    /// Yield these deltas, then fail.
    FailAfter(Vec<&'static str>),
    /// Yield these deltas, then never finish.
    Stall(Vec<&'static str>),
}

/// Upstream answering from per-model scripts. Models without a script fail.
#[derive(Clone, Default)]
pub struct Stub {
    scripts: Arc<HashMap<&'static str, Script>>,
    classifier: Option<Script>,
    calls: Arc<Mutex<Vec<ProviderRequest>>>,
    dropped: Arc<AtomicBool>,
}

impl Stub {
    pub fn new(scripts: impl IntoIterator<Item = (&'static str, Script)>) -> Self {
        Self {
            scripts: Arc::new(scripts.into_iter().collect()),
            ..Default::default()
        }
    }

    /// Script for classification calls.
    pub fn classifier(mut self, script: Script) -> Self {
        self.classifier = Some(script);
        self
    }

    /// Every request seen, in order.
    pub fn calls(&self) -> Vec<ProviderRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Models of the non-classification requests seen, in order.
    pub fn attempts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|r| !is_classification(r))
            .map(|r| r.model.to_string())
            .collect()
    }

    /// Whether a started upstream stream has been dropped.
    pub fn dropped(&self) -> bool {
        self.dropped.load(Ordering::SeqCst)
    }
}

fn is_classification(request: &ProviderRequest) -> bool {
    request
        .messages
        .first()
        .is_some_and(|m| m.role == Role::System)
}

struct DropFlag(Arc<AtomicBool>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

impl Upstream for Stub {
    fn execute(
        &self,
        request: ProviderRequest,
    ) -> impl Stream<Item = Result<DeltaEvent, UpstreamError>> + Send + 'static {
        self.calls.lock().unwrap().push(request.clone());
        let script = if is_classification(&request) {
            self.classifier.clone()
        } else {
            self.scripts.get(request.model.as_str()).cloned()
        }
        .unwrap_or(Script::Fail);
        let model = request.model.clone();
        let flag = DropFlag(self.dropped.clone());

        async_stream::stream! {
            let _flag = flag;
            let busy = || UpstreamError::status(503, r#"{"error":{"message":"busy"}}"#);
            match script {
                Script::Yield(parts) => {
                    for part in parts {
                        yield Ok(DeltaEvent::new(part, model.clone()));
                    }
                }
                Script::Fail => yield Err(busy()),
                Script::FailAfter(parts) => {
                    for part in parts {
                        yield Ok(DeltaEvent::new(part, model.clone()));
                    }
                    yield Err(busy());
                }
                Script::Stall(parts) => {
                    for part in parts {
                        yield Ok(DeltaEvent::new(part, model.clone()));
                    }
                    std::future::pending::<()>().await;
                }
            }
        }
    }
}

/// Providers with the stub behind both upstreams.
pub fn both(stub: &Stub) -> Providers<Stub> {
    Providers::new()
        .with(ProviderKind::Groq, stub.clone())
        .with(ProviderKind::Gemini, stub.clone())
}

/// Relay config without classification.
pub fn no_classify() -> RelayConfig {
    RelayConfig {
        classify: false,
        ..Default::default()
    }
}

/// A request with a single user turn.
pub fn ask(target: &str, prompt: &str) -> CompletionRequest {
    CompletionRequest::new(target, vec![Message::user(prompt)])
}

/// Drive a run to the end.
pub async fn run_all<U: Upstream>(relay: &Relay<U>, request: CompletionRequest) -> Vec<RelayEvent> {
    use futures_util::StreamExt;
    relay.run(request).collect().await
}

/// The outcome of a finished run.
pub fn outcome(events: &[RelayEvent]) -> &RelayOutcome {
    match events.last() {
        Some(RelayEvent::Finished(outcome)) => outcome,
        other => panic!("run did not finish: {other:?}"),
    }
}

/// Delta events of a run.
pub fn deltas(events: &[RelayEvent]) -> Vec<DeltaEvent> {
    events
        .iter()
        .filter_map(|e| match e {
            RelayEvent::Delta(delta) => Some(delta.clone()),
            _ => None,
        })
        .collect()
}
