//! Selection resolution.
//!
//! Concrete ids route by namespace with no network call. Category tokens may
//! spend one short classification call on a fixed fast model; anything but
//! an exact id from the category's pool is a routing failure and resolves to
//! the category's fixed default.

use crate::{
    RelayConfig, RelayError,
    fallback::{self, CategoryPlan},
};
use compact_str::CompactString;
use futures_util::StreamExt;
use llm::{Message, Sampling, UpstreamError};
use provider::{ProviderKind, Providers, Upstream, build_request};
use registry::{Registry, Tier};
use std::{pin::pin, time::Duration};

/// Model answering classification calls.
pub const CLASSIFIER: &str = "llama-3.1-8b-instant";

/// Output cap of a classification call.
const CLASSIFIER_TOKENS: u32 = 16;

/// A resolved selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Upstream serving `model`.
    pub provider: ProviderKind,
    /// Concrete model id.
    pub model: CompactString,
    /// Category token the selection came from, if any.
    pub category: Option<&'static str>,
}

impl Route {
    fn concrete(model: &str) -> Self {
        Self {
            provider: ProviderKind::from_model_id(model),
            model: model.into(),
            category: None,
        }
    }

    fn category(plan: &CategoryPlan, model: &str) -> Self {
        Self {
            provider: ProviderKind::from_model_id(model),
            model: model.into(),
            category: Some(plan.id),
        }
    }
}

/// Resolves logical selections to concrete models.
#[derive(Clone)]
pub struct Router<U> {
    registry: Registry,
    providers: Providers<U>,
    classify: bool,
    classify_timeout: Duration,
}

impl<U: Upstream> Router<U> {
    /// Create a router over `providers`.
    pub fn new(registry: Registry, providers: Providers<U>, config: &RelayConfig) -> Self {
        Self {
            registry,
            providers,
            classify: config.classify,
            classify_timeout: config.classify_timeout(),
        }
    }

    /// Resolve `target` for a conversation whose latest user turn is
    /// `prompt`.
    ///
    /// Fails only for selections that can never succeed: image models, and
    /// concrete ids whose provider is not configured.
    pub async fn resolve(&self, target: &str, prompt: &str) -> Result<Route, RelayError> {
        if self.registry.is_image_category(target) {
            return Err(RelayError::Routing(format!("{target} is an image category")));
        }
        if let Some(plan) = fallback::plan(target) {
            let model = match self.pick(plan, prompt).await {
                Ok(model) => model,
                Err(reason) => {
                    tracing::warn!(
                        "routing failure for {target}: {reason}, using {}",
                        plan.default
                    );
                    plan.default
                }
            };
            tracing::debug!("routed {target} to {model}");
            return Ok(Route::category(plan, model));
        }

        let Some(model) = self.registry.lookup(target) else {
            let plan = fallback::auto();
            tracing::warn!("unknown model {target}, using {}", plan.default);
            return Ok(Route::category(plan, plan.default));
        };
        if model.tier == Tier::Image {
            return Err(RelayError::Routing(format!("{target} is an image model")));
        }
        let route = Route::concrete(model.id);
        self.providers.get(route.provider)?;
        Ok(route)
    }

    /// Pick a pool member for a category.
    async fn pick(&self, plan: &CategoryPlan, prompt: &str) -> Result<&'static str, String> {
        let classifier = ProviderKind::from_model_id(CLASSIFIER);
        if !self.classify || !self.providers.is_available(classifier) {
            return self.heuristic(plan, prompt);
        }

        let reply = tokio::time::timeout(self.classify_timeout, self.classify(plan, prompt))
            .await
            .map_err(|_| format!("classifier timed out after {:?}", self.classify_timeout))?
            .map_err(|e| e.to_string())?;
        let choice = plan
            .pool
            .iter()
            .copied()
            .find(|id| *id == reply.trim())
            .ok_or_else(|| format!("classifier answered {reply:?}"))?;
        if !self.providers.is_available(ProviderKind::from_model_id(choice)) {
            return Err(format!("{choice} has no configured provider"));
        }
        Ok(choice)
    }

    /// Run one classification call and return the raw reply.
    async fn classify(&self, plan: &CategoryPlan, prompt: &str) -> Result<String, UpstreamError> {
        let kind = ProviderKind::from_model_id(CLASSIFIER);
        let upstream = self
            .providers
            .get(kind)
            .map_err(|e| UpstreamError::transport(e.to_string()))?;

        let sampling = Sampling {
            temperature: Some(0.0),
            max_tokens: Some(CLASSIFIER_TOKENS),
            top_p: None,
        };
        let turns = [Message::system(instructions(plan)), Message::user(prompt)];
        let mut request = build_request(kind, CLASSIFIER, &turns, sampling, false);
        request.temperature = sampling.temperature;
        request.max_completion_tokens = sampling.max_tokens;
        request.stream = false;

        let mut deltas = pin!(upstream.execute(request));
        let mut reply = String::new();
        while let Some(delta) = deltas.next().await {
            reply.push_str(&delta?.text);
        }
        Ok(reply)
    }

    /// Fallback when classification is off or unavailable.
    fn heuristic(&self, plan: &CategoryPlan, prompt: &str) -> Result<&'static str, String> {
        if plan.id != "auto" {
            return Ok(plan.default);
        }
        let model = self.registry.resolve_category(prompt);
        if self.registry.is_image(model) {
            return Err("prompt asks for an image".into());
        }
        if !plan.pool.contains(&model) {
            return Err(format!("heuristic picked {model} outside the pool"));
        }
        Ok(model)
    }
}

/// System prompt of a classification call.
fn instructions(plan: &CategoryPlan) -> String {
    let mut text = String::from(
        "You route chat requests to models. Reply with exactly one model id from \
         the list below and nothing else.\n",
    );
    for id in plan.pool {
        text.push_str("- ");
        text.push_str(id);
        text.push('\n');
    }
    text
}
