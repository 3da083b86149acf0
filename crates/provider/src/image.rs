//! Image generation.
//!
//! Pollinations models are served by URL: the image is rendered when the
//! client fetches it, so generating one is building a link. Imagen has no
//! OpenAI-compatible image endpoint and is reported as unsupported.

use crate::{ConfigurationError, ProviderKind};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use rand::Rng;
use registry::{DEFAULT_IMAGE_MODEL, Registry};

/// Base URL of the pollinations prompt endpoint.
pub const POLLINATIONS: &str = "https://image.pollinations.ai/prompt/";

/// Upper bound (exclusive) of the random seed.
const SEED_RANGE: u32 = 10_000_000;

/// Characters left unescaped in a URI component.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Image generation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageError {
    /// The model has no image backend.
    #[error("image generation is not supported for {0}")]
    Unsupported(String),
    /// The prompt is empty.
    #[error("image prompt is empty")]
    EmptyPrompt,
    /// The backend needs a credential that is not configured.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

/// Image generation front.
#[derive(Debug, Clone)]
pub struct Images {
    base: String,
    gemini: bool,
}

impl Images {
    /// Create a generator. `gemini` tells whether a Gemini key is set.
    pub fn new(gemini: bool) -> Self {
        Self {
            base: POLLINATIONS.to_owned(),
            gemini,
        }
    }

    /// Override the pollinations base URL.
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    /// Generate an image URL for `prompt` with `model`.
    ///
    /// `auto` and the `image` category select the default image model.
    pub fn generate(&self, prompt: &str, model: &str) -> Result<String, ImageError> {
        if prompt.trim().is_empty() {
            return Err(ImageError::EmptyPrompt);
        }
        let model = if model == "auto" || Registry::builtin().is_image_category(model) {
            DEFAULT_IMAGE_MODEL
        } else {
            model
        };

        if let Some(name) = model.strip_prefix("pollinations/") {
            let seed = rand::rng().random_range(0..SEED_RANGE);
            return Ok(self.url(prompt, name, seed));
        }
        if model.starts_with("imagen") && !self.gemini {
            return Err(ConfigurationError::MissingCredential(ProviderKind::Gemini).into());
        }
        Err(ImageError::Unsupported(model.to_owned()))
    }

    /// The pollinations URL for a prompt, model name and seed.
    pub fn url(&self, prompt: &str, name: &str, seed: u32) -> String {
        let prompt = utf8_percent_encode(prompt, COMPONENT);
        format!(
            "{}{prompt}?model={name}&width=1024&height=1024&nologo=true&seed={seed}",
            self.base
        )
    }
}

impl Default for Images {
    fn default() -> Self {
        Self::new(false)
    }
}
