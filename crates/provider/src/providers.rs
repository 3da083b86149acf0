//! `Providers`: the set of usable upstreams.

use crate::{Adapter, AdapterError, ConfigurationError, ProviderKind, ProvidersConfig, Upstream};
use llm::Client;
use std::collections::BTreeMap;

/// Upstreams keyed by provider kind.
///
/// A provider is present only when its credential is configured; asking for
/// a missing one fails with [`ConfigurationError`] before any network call.
/// Cloning is cheap when `U` is.
#[derive(Clone)]
pub struct Providers<U = Adapter> {
    upstreams: BTreeMap<ProviderKind, U>,
}

impl Providers<Adapter> {
    /// Build adapters for every configured provider.
    ///
    /// Unconfigured providers are skipped and logged, not treated as errors.
    pub fn from_config(config: &ProvidersConfig, client: Client) -> Result<Self, AdapterError> {
        let mut upstreams = BTreeMap::new();
        for kind in ProviderKind::ALL {
            if !config.is_configured(kind) {
                tracing::warn!("{kind} api key not set, provider unavailable");
                continue;
            }
            let adapter = Adapter::new(kind, config, client.clone())?;
            tracing::info!("{kind} provider ready at {}", adapter.endpoint());
            upstreams.insert(kind, adapter);
        }
        Ok(Self { upstreams })
    }
}

impl<U: Upstream> Providers<U> {
    /// An empty set.
    pub fn new() -> Self {
        Self {
            upstreams: BTreeMap::new(),
        }
    }

    /// Add or replace an upstream.
    pub fn with(mut self, kind: ProviderKind, upstream: U) -> Self {
        self.upstreams.insert(kind, upstream);
        self
    }

    /// The upstream for `kind`.
    pub fn get(&self, kind: ProviderKind) -> Result<&U, ConfigurationError> {
        self.upstreams
            .get(&kind)
            .ok_or(ConfigurationError::MissingCredential(kind))
    }

    /// Whether `kind` can be called.
    pub fn is_available(&self, kind: ProviderKind) -> bool {
        self.upstreams.contains_key(&kind)
    }

    /// Every callable provider.
    pub fn available(&self) -> Vec<ProviderKind> {
        self.upstreams.keys().copied().collect()
    }
}

impl<U: Upstream> Default for Providers<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> std::fmt::Debug for Providers<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Providers")
            .field("available", &self.upstreams.keys().collect::<Vec<_>>())
            .finish()
    }
}
