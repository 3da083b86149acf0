//! Tests for `Providers` and `Adapter` construction.

use gravity_provider::{
    Adapter, AdapterError, ConfigurationError, ProviderKind, Providers, ProvidersConfig,
    RemoteConfig,
};

#[test]
fn test_from_config_skips_unconfigured() {
    let config = ProvidersConfig {
        groq: RemoteConfig::with_key("gsk"),
        gemini: RemoteConfig::default(),
    };
    let providers = Providers::from_config(&config, llm::Client::new()).unwrap();
    assert!(providers.is_available(ProviderKind::Groq));
    assert!(!providers.is_available(ProviderKind::Gemini));
    assert_eq!(providers.available(), vec![ProviderKind::Groq]);
}

#[test]
fn test_get_missing_provider_is_configuration_error() {
    let providers = Providers::from_config(&ProvidersConfig::default(), llm::Client::new())
        .unwrap();
    assert_eq!(
        providers.get(ProviderKind::Gemini).err(),
        Some(ConfigurationError::MissingCredential(ProviderKind::Gemini))
    );
}

#[test]
fn test_adapter_requires_key() {
    let result = Adapter::new(
        ProviderKind::Groq,
        &ProvidersConfig::default(),
        llm::Client::new(),
    );
    assert!(matches!(
        result,
        Err(AdapterError::Configuration(
            ConfigurationError::MissingCredential(ProviderKind::Groq)
        ))
    ));
}

#[test]
fn test_adapter_uses_base_url_override() {
    let config = ProvidersConfig {
        gemini: RemoteConfig {
            api_key: "key".into(),
            base_url: Some("http://127.0.0.1:9/v1/chat/completions".into()),
            live_url: None,
        },
        ..Default::default()
    };
    let adapter = Adapter::new(ProviderKind::Gemini, &config, llm::Client::new()).unwrap();
    assert_eq!(adapter.kind(), ProviderKind::Gemini);
    assert_eq!(adapter.endpoint(), "http://127.0.0.1:9/v1/chat/completions");
}

#[test]
fn test_adapter_build_request_uses_own_table() {
    let config = ProvidersConfig {
        gemini: RemoteConfig::with_key("key"),
        ..Default::default()
    };
    let adapter = Adapter::new(ProviderKind::Gemini, &config, llm::Client::new()).unwrap();
    let request = adapter.build_request(
        "gemini-2.5-flash-lite",
        &[llm::Message::user("hi")],
        llm::Sampling::default(),
        false,
    );
    assert_eq!(request.provider, ProviderKind::Gemini);
    assert_eq!(request.max_tokens, Some(2048));
}
