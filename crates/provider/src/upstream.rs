//! The upstream seam.

use crate::ProviderRequest;
use compact_str::CompactString;
use futures_core::Stream;
use llm::UpstreamError;

/// One piece of generated text, tagged with the model that produced it.
///
/// An empty `text` carries no displayable content but still reports the
/// producing model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeltaEvent {
    pub text: String,
    pub model: CompactString,
}

impl DeltaEvent {
    /// Create a new delta.
    pub fn new(text: impl Into<String>, model: impl Into<CompactString>) -> Self {
        Self {
            text: text.into(),
            model: model.into(),
        }
    }

    /// Whether the delta carries displayable text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// An upstream that executes provider requests.
///
/// Implementations convert every failure into an [`UpstreamError`] before it
/// leaves `execute`. Dropping the returned stream must release the
/// underlying connection.
pub trait Upstream: Clone + Send + Sync + 'static {
    /// Execute a request as a lazy sequence of deltas.
    ///
    /// Non-streaming requests still produce a sequence, of one element.
    fn execute(
        &self,
        request: ProviderRequest,
    ) -> impl Stream<Item = Result<DeltaEvent, UpstreamError>> + Send + 'static;
}
