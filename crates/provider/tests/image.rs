//! Tests for image generation.

use gravity_provider::{ConfigurationError, ImageError, Images, ProviderKind};

#[test]
fn test_pollinations_url_encodes_prompt() {
    let url = Images::default().url("a cat & dog?", "flux-pro", 42);
    assert_eq!(
        url,
        "https://image.pollinations.ai/prompt/a%20cat%20%26%20dog%3F\
         ?model=flux-pro&width=1024&height=1024&nologo=true&seed=42"
    );
}

#[test]
fn test_unreserved_characters_stay_literal() {
    let url = Images::default().url("it's (ok)!*~._-", "flux", 0);
    assert!(url.contains("/prompt/it's%20(ok)!*~._-?"));
}

#[test]
fn test_generate_pollinations_model() {
    let url = Images::default()
        .generate("sunset", "pollinations/flux-realism")
        .unwrap();
    assert!(url.starts_with("https://image.pollinations.ai/prompt/sunset?model=flux-realism&"));
    let seed: u32 = url.rsplit("seed=").next().unwrap().parse().unwrap();
    assert!(seed < 10_000_000);
}

#[test]
fn test_image_category_maps_to_default_image_model() {
    let url = Images::default()
        .with_base("http://img.local/p/")
        .generate("sunset", "image")
        .unwrap();
    assert!(url.starts_with("http://img.local/p/sunset?model=flux-pro&"));
}

#[test]
fn test_auto_maps_to_default_image_model() {
    let url = Images::default()
        .with_base("http://img.local/p/")
        .generate("sunset", "auto")
        .unwrap();
    assert!(url.starts_with("http://img.local/p/sunset?model=flux-pro&"));
}

#[test]
fn test_imagen_is_unsupported() {
    assert_eq!(
        Images::new(true).generate("x", "imagen-3.0-generate-001"),
        Err(ImageError::Unsupported("imagen-3.0-generate-001".into()))
    );
    assert_eq!(
        Images::new(false).generate("x", "imagen-3.0-generate-001"),
        Err(ImageError::Configuration(
            ConfigurationError::MissingCredential(ProviderKind::Gemini)
        ))
    );
}

#[test]
fn test_empty_prompt_rejected() {
    assert_eq!(
        Images::default().generate("  ", "pollinations/flux-pro"),
        Err(ImageError::EmptyPrompt)
    );
}
