//! Scripted upstream and a running gateway over it.

#![allow(dead_code)]

use futures_core::Stream;
use gravity_gateway::{AppState, ServeHandle, serve_with_state};
use llm::UpstreamError;
use provider::{
    DeltaEvent, ProviderKind, ProviderRequest, Providers, ProvidersConfig, RemoteConfig, Upstream,
};
use relay::{Relay, RelayConfig};
use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

/// Behaviour of one model.
#[derive(Clone, Debug)]
pub enum Script {
    /// Yield these deltas, then end.
    Yield(Vec<&'static str>),
    /// Yield these deltas, then fail.
    FailAfter(Vec<&'static str>),
    /// Yield this delta, then never finish.
    Stall(&'static str),
}

/// Upstream answering from per-model scripts. Models without a script fail
/// before producing anything.
#[derive(Clone, Default)]
pub struct Stub {
    scripts: Arc<HashMap<&'static str, Script>>,
    dropped: Arc<AtomicBool>,
}

impl Stub {
    pub fn new(scripts: impl IntoIterator<Item = (&'static str, Script)>) -> Self {
        Self {
            scripts: Arc::new(scripts.into_iter().collect()),
            dropped: Arc::default(),
        }
    }

    /// Whether a stream handed out by this stub has been dropped.
    pub fn dropped(&self) -> bool {
        self.dropped.load(Ordering::SeqCst)
    }
}

/// Sets its flag when dropped along with the stream that owns it.
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
        let script = self.scripts.get(request.model.as_str()).cloned();
        let model = request.model.clone();
        let flag = DropFlag(self.dropped.clone());
        async_stream::stream! {
            let _flag = flag;
            if let Some(Script::Stall(first)) = script {
                yield Ok(DeltaEvent::new(first, model.clone()));
                std::future::pending::<()>().await;
                return;
            }
            let busy = || UpstreamError::status(503, "busy");
            let (parts, fail) = match script {
                Some(Script::Yield(parts)) => (parts, false),
                Some(Script::FailAfter(parts)) => (parts, true),
                Some(Script::Stall(_)) | None => (Vec::new(), true),
            };
            for part in parts {
                yield Ok(DeltaEvent::new(part, model.clone()));
            }
            if fail {
                yield Err(busy());
            }
        }
    }
}

/// Provider config with both keys set.
pub fn keys() -> ProvidersConfig {
    ProvidersConfig {
        groq: RemoteConfig::with_key("gsk-test"),
        gemini: RemoteConfig::with_key("gm-test"),
    }
}

/// Gateway state over `stub` for the providers configured in `config`.
pub fn state(stub: Stub, config: &ProvidersConfig) -> AppState<Stub> {
    let mut providers = Providers::new();
    for kind in ProviderKind::ALL {
        if config.is_configured(kind) {
            providers = providers.with(kind, stub.clone());
        }
    }
    let relay = Relay::new(
        providers,
        RelayConfig {
            classify: false,
            ..Default::default()
        },
    );
    AppState::new(relay, config)
}

/// Serve `state` on an ephemeral loopback port.
pub async fn start(state: AppState<Stub>) -> ServeHandle {
    serve_with_state(state, "127.0.0.1:0").await.unwrap()
}
