//! Tests for CLI parsing and validation.

use clap::Parser;
use url_metadata::config::{Command, LogFormat, LogLevel, Opt};
use url_metadata::config::{DEFAULT_BIND_ADDR, DEFAULT_REQUEST_DEADLINE_SECS, DEFAULT_USER_AGENT};

#[test]
fn test_serve_defaults() {
    let opt = Opt::try_parse_from(["url_metadata", "serve"]).unwrap();
    assert!(matches!(opt.log_level, LogLevel::Info));
    assert!(matches!(opt.log_format, LogFormat::Plain));
    match &opt.command {
        Command::Serve {
            bind,
            request_deadline_seconds,
        } => {
            assert_eq!(bind, DEFAULT_BIND_ADDR);
            assert_eq!(*request_deadline_seconds, DEFAULT_REQUEST_DEADLINE_SECS);
        }
        other => panic!("expected serve, got {other:?}"),
    }
    let fetch = opt.fetch_config();
    assert_eq!(fetch.user_agent, DEFAULT_USER_AGENT);
    assert_eq!(fetch.max_redirects, 3);
    assert!(opt.validate().is_ok());
}

#[test]
fn test_global_flags_after_subcommand() {
    let opt = Opt::try_parse_from([
        "url_metadata",
        "serve",
        "--bind",
        "0.0.0.0:9000",
        "--max-body-size",
        "1024",
        "--log-format",
        "json",
        "--user-agent",
        "TestBot/1.0",
    ])
    .unwrap();
    assert!(matches!(opt.log_format, LogFormat::Json));
    let fetch = opt.fetch_config();
    assert_eq!(fetch.max_body_size, 1024);
    assert_eq!(fetch.user_agent, "TestBot/1.0");
    assert!(matches!(opt.command, Command::Serve { ref bind, .. } if bind == "0.0.0.0:9000"));
}

#[test]
fn test_fetch_requires_url() {
    assert!(Opt::try_parse_from(["url_metadata", "fetch"]).is_err());
    let opt = Opt::try_parse_from(["url_metadata", "fetch", "example.com"]).unwrap();
    assert!(matches!(opt.command, Command::Fetch { ref url } if url == "example.com"));
}

#[test]
fn test_subcommand_is_required() {
    assert!(Opt::try_parse_from(["url_metadata"]).is_err());
}

#[test]
fn test_invalid_log_level_rejected() {
    assert!(Opt::try_parse_from(["url_metadata", "--log-level", "loud", "serve"]).is_err());
}

#[test]
fn test_deadline_must_exceed_timeout() {
    let opt = Opt::try_parse_from([
        "url_metadata",
        "--timeout-seconds",
        "30",
        "serve",
        "--request-deadline-seconds",
        "30",
    ])
    .unwrap();
    let err = opt.validate().unwrap_err();
    assert!(err.contains("must exceed"));
}

#[test]
fn test_zero_timeout_rejected() {
    let opt = Opt::try_parse_from(["url_metadata", "--timeout-seconds", "0", "fetch", "x.com"])
        .unwrap();
    assert!(opt.validate().is_err());
}
