use crate::ProviderKind;

/// A provider cannot be used with the current configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// No API key is configured for the provider.
    #[error("no api key configured for {0}")]
    MissingCredential(ProviderKind),
}
