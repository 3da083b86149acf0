//! Provider crate: upstream adapters, request shaping, and the provider set.
//!
//! Each upstream is reached through an [`Adapter`] that turns a model id,
//! chat turns and sampling into a [`ProviderRequest`] using an ordered rule
//! table, then executes it as a lazy sequence of [`DeltaEvent`]s. The
//! [`Upstream`] trait is the seam the relay is generic over, so tests can
//! script upstream behaviour without the network. [`Providers`] holds the
//! adapters whose credentials are configured.

pub mod config;
mod error;
pub mod image;
mod provider;
mod providers;
mod request;
pub mod rules;
mod upstream;

pub use {
    config::{ProvidersConfig, RemoteConfig},
    error::ConfigurationError,
    image::{ImageError, Images},
    provider::{Adapter, AdapterError},
    providers::Providers,
    registry::ProviderKind,
    request::{ProviderRequest, build_request},
    rules::Shape,
    upstream::{DeltaEvent, Upstream},
};
