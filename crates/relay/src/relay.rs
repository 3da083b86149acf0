//! The streaming relay.
//!
//! One run walks `Resolving -> Streaming(model)` and ends in `Completed`,
//! `Degraded` or `Exhausted`. An attempt that fails before forwarding any
//! output moves to `Retrying(next)` and the next candidate of the fallback
//! chain; the first switch of a run is announced with a notice delta. An
//! attempt that fails after forwarding output ends the run with the partial
//! text. Attempts are sequential and the chain is finite.

use crate::{
    CompletionRequest, RelayConfig, RelayError, RelayEvent, RelayOutcome, RelayState, Router,
    fallback,
};
use async_stream::stream;
use compact_str::CompactString;
use futures_core::Stream;
use futures_util::StreamExt;
use llm::window;
use provider::{DeltaEvent, ProviderKind, Providers, Upstream, build_request};
use registry::{Registry, Tier};
use std::pin::pin;
use tokio::time::{Instant, timeout_at};

/// Delta text announcing the first switch to a backup model.
pub fn notice(display_name: &str) -> String {
    format!("*[Primary model busy. Switching to {display_name}...]*\n\n")
}

/// Executes completion requests with fallback.
///
/// Cheap to clone; every run owns its own accumulator and chain position.
#[derive(Clone)]
pub struct Relay<U> {
    registry: Registry,
    providers: Providers<U>,
    router: Router<U>,
    config: RelayConfig,
}

impl<U: Upstream> Relay<U> {
    /// Create a relay over the built-in registry.
    pub fn new(providers: Providers<U>, config: RelayConfig) -> Self {
        Self::with_registry(Registry::builtin(), providers, config)
    }

    /// Create a relay over a custom registry.
    pub fn with_registry(
        registry: Registry,
        providers: Providers<U>,
        config: RelayConfig,
    ) -> Self {
        let router = Router::new(registry, providers.clone(), &config);
        Self {
            registry,
            providers,
            router,
            config,
        }
    }

    /// The model catalog.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The configured upstreams.
    pub fn providers(&self) -> &Providers<U> {
        &self.providers
    }

    /// The router.
    pub fn router(&self) -> &Router<U> {
        &self.router
    }

    /// Relay settings.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Reject requests that can never succeed, without any network call.
    pub fn check(&self, request: &CompletionRequest) -> Result<(), RelayError> {
        if request.history.is_empty() {
            return Err(RelayError::Routing("empty conversation".into()));
        }
        if self.registry.is_image_category(&request.target) {
            let reason = format!("{} is an image category", request.target);
            return Err(RelayError::Routing(reason));
        }
        if fallback::plan(&request.target).is_some() {
            return Ok(());
        }
        if let Some(model) = self.registry.lookup(&request.target) {
            if model.tier == Tier::Image {
                let reason = format!("{} is an image model", model.id);
                return Err(RelayError::Routing(reason));
            }
            self.providers.get(ProviderKind::from_model_id(model.id))?;
        }
        Ok(())
    }

    /// Run `request`.
    ///
    /// The stream yields state transitions and deltas, then exactly one
    /// [`RelayEvent::Finished`]. Dropping it cancels the upstream call.
    pub fn run(
        &self,
        request: CompletionRequest,
    ) -> impl Stream<Item = RelayEvent> + Send + 'static {
        let relay = self.clone();
        stream! {
            let deadline = Instant::now() + relay.config.max_duration();
            let timeout = RelayError::Timeout(relay.config.max_duration());
            yield RelayEvent::Transition(RelayState::Resolving);

            let resolved = timeout_at(
                deadline,
                relay.router.resolve(&request.target, request.prompt()),
            )
            .await;
            let route = match resolved {
                Ok(Ok(route)) => route,
                Ok(Err(error)) => {
                    for event in finish(exhausted(error, String::new(), None)) {
                        yield event;
                    }
                    return;
                }
                Err(_) => {
                    for event in finish(exhausted(timeout, String::new(), None)) {
                        yield event;
                    }
                    return;
                }
            };
            tracing::info!("relay {} -> {}", request.target, route.model);

            let turns = window(&request.history, relay.config.history_window).to_vec();
            let candidates = fallback::candidates(&route, &relay.providers);
            let mut text = String::new();
            let mut notified = false;
            let mut last_error = String::new();

            for (attempt, model) in candidates.iter().enumerate() {
                if attempt > 0 {
                    yield RelayEvent::Transition(RelayState::Retrying(model.clone()));
                    let notice = if notified {
                        String::new()
                    } else {
                        notified = true;
                        notice(relay.registry.display_name(model))
                    };
                    text.push_str(&notice);
                    yield RelayEvent::Delta(DeltaEvent::new(notice, model.clone()));
                }
                let kind = ProviderKind::from_model_id(model);
                let upstream = match relay.providers.get(kind) {
                    Ok(upstream) => upstream.clone(),
                    Err(e) => {
                        tracing::warn!("{model} unavailable: {e}");
                        last_error = e.to_string();
                        continue;
                    }
                };
                yield RelayEvent::Transition(RelayState::Streaming(model.clone()));
                let call = build_request(kind, model, &turns, request.sampling, request.tools);
                let mut deltas = pin!(upstream.execute(call));
                let mut forwarded = false;

                loop {
                    match timeout_at(deadline, deltas.next()).await {
                        Err(_) => {
                            let outcome = exhausted(timeout, text, Some(model.clone()));
                            for event in finish(outcome) {
                                yield event;
                            }
                            return;
                        }
                        Ok(None) => {
                            let outcome = if attempt == 0 {
                                RelayOutcome::Completed {
                                    text,
                                    model: model.clone(),
                                }
                            } else {
                                RelayOutcome::Degraded {
                                    text,
                                    model: model.clone(),
                                    warning: format!(
                                        "{} failed, answered by {model}",
                                        candidates[0]
                                    ),
                                }
                            };
                            for event in finish(outcome) {
                                yield event;
                            }
                            return;
                        }
                        Ok(Some(Ok(delta))) => {
                            if delta.is_empty() {
                                continue;
                            }
                            forwarded = true;
                            text.push_str(&delta.text);
                            yield RelayEvent::Delta(DeltaEvent::new(delta.text, model.clone()));
                        }
                        Ok(Some(Err(e))) if forwarded => {
                            let outcome = exhausted(e.into(), text, Some(model.clone()));
                            for event in finish(outcome) {
                                yield event;
                            }
                            return;
                        }
                        Ok(Some(Err(e))) => {
                            tracing::warn!("{model} failed before output: {e}");
                            last_error = e.to_string();
                            break;
                        }
                    }
                }
            }

            let outcome = exhausted(RelayError::ExhaustedFallback(last_error), text, None);
            for event in finish(outcome) {
                yield event;
            }
        }
    }
}

fn exhausted(
    error: RelayError,
    partial: String,
    model: Option<CompactString>,
) -> RelayOutcome {
    RelayOutcome::Exhausted {
        error,
        partial,
        model,
    }
}

/// Log the outcome and turn it into the closing events of a run.
fn finish(outcome: RelayOutcome) -> [RelayEvent; 2] {
    match &outcome {
        RelayOutcome::Completed { model, text } => {
            tracing::debug!("relay completed on {model}, {} bytes", text.len());
        }
        RelayOutcome::Degraded { warning, .. } => tracing::warn!("relay degraded: {warning}"),
        RelayOutcome::Exhausted { error, partial, .. } => {
            tracing::error!("relay exhausted after {} bytes: {error}", partial.len());
        }
    }
    [
        RelayEvent::Transition(outcome.state()),
        RelayEvent::Finished(outcome),
    ]
}
