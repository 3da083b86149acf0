//! Tests for CLI argument parsing.

use clap::Parser;
use gravity_cli::{Cli, Command};

#[test]
fn cli_parse_chat_defaults_to_auto() {
    let cli = Cli::parse_from(["gravity", "chat"]);
    match cli.command {
        Command::Chat(chat) => {
            assert_eq!(chat.model, "auto");
            assert!(!chat.search);
        }
        _ => panic!("expected Chat command"),
    }
}

#[test]
fn cli_parse_send() {
    let cli = Cli::parse_from(["gravity", "send", "hello world", "--model", "meta"]);
    match cli.command {
        Command::Send(send) => {
            assert_eq!(send.content, "hello world");
            assert_eq!(send.model, "meta");
        }
        _ => panic!("expected Send command"),
    }
}

#[test]
fn cli_parse_send_with_search() {
    let cli = Cli::parse_from(["gravity", "send", "news today", "--search"]);
    match cli.command {
        Command::Send(send) => assert!(send.search),
        _ => panic!("expected Send command"),
    }
}

#[test]
fn cli_parse_global_url_after_subcommand() {
    let cli = Cli::parse_from(["gravity", "health", "--url", "http://10.0.0.2:8080"]);
    assert!(matches!(cli.command, Command::Health));
    assert_eq!(cli.url.as_deref(), Some("http://10.0.0.2:8080"));
    assert_eq!(cli.client().url("/api/health"), "http://10.0.0.2:8080/api/health");
}

#[test]
fn cli_parse_serve_flags() {
    let cli = Cli::parse_from([
        "gravity",
        "serve",
        "--config",
        "/tmp/gateway.toml",
        "--bind",
        "0.0.0.0:8080",
    ]);
    match cli.command {
        Command::Serve(serve) => {
            assert_eq!(
                serve.config.as_deref(),
                Some(std::path::Path::new("/tmp/gateway.toml"))
            );
            assert_eq!(serve.bind.map(|a| a.port()), Some(8080));
        }
        _ => panic!("expected Serve command"),
    }
}

#[test]
fn cli_parse_serve_rejects_bad_bind() {
    assert!(Cli::try_parse_from(["gravity", "serve", "--bind", "nowhere"]).is_err());
}

#[test]
fn cli_parse_image_and_models() {
    let cli = Cli::parse_from(["gravity", "image", "a red fox"]);
    match cli.command {
        Command::Image(image) => {
            assert_eq!(image.prompt, "a red fox");
            assert_eq!(image.model, "auto");
        }
        _ => panic!("expected Image command"),
    }

    let cli = Cli::parse_from(["gravity", "models", "--category", "image"]);
    match cli.command {
        Command::Models(models) => assert_eq!(models.category.as_deref(), Some("image")),
        _ => panic!("expected Models command"),
    }
}

#[test]
fn cli_requires_a_subcommand() {
    assert!(Cli::try_parse_from(["gravity"]).is_err());
}
