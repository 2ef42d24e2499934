// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use devquiz_client::{Difficulty, OAuthProvider, ProblemType, SortType};

use super::Config;
use crate::command::Command;

fn parse(args: &[&str]) -> Config {
    Config::parse_from(args)
}

fn assert_invalid(args: &[&str], expected: &str) {
    let config = parse(args);
    match config.validate() {
        Ok(()) => panic!("expected {args:?} to be rejected"),
        Err(e) => assert!(e.to_string().contains(expected), "got: {e}"),
    }
}

#[test]
fn defaults_are_correct() -> anyhow::Result<()> {
    let config = parse(&["devquiz", "status"]);
    config.validate()?;
    assert_eq!(config.api_url, "http://localhost:8080");
    assert_eq!(config.storage_key, "auth");
    assert_eq!(config.login_route, "/login");
    assert_eq!(config.timeout_ms, 10_000);
    assert_eq!(config.refresh_timeout_ms, 10_000);
    assert_eq!(config.log_format, "text");
    assert_eq!(config.log_level, "warn");
    assert!(matches!(config.command, Command::Status));
    Ok(())
}

#[test]
fn global_flags_after_subcommand() -> anyhow::Result<()> {
    let config = parse(&["devquiz", "logout", "--api-url", "https://quiz.example.com/"]);
    config.validate()?;
    let client = config.client_config();
    assert_eq!(client.base_url, "https://quiz.example.com");
    assert_eq!(client.request_timeout(), Duration::from_secs(10));
    Ok(())
}

#[test]
fn client_config_carries_overrides() {
    let config = parse(&[
        "devquiz",
        "--login-route",
        "/signin",
        "--timeout-ms",
        "500",
        "--refresh-timeout-ms",
        "750",
        "status",
    ]);
    let client = config.client_config();
    assert_eq!(client.login_route, "/signin");
    assert_eq!(client.request_timeout(), Duration::from_millis(500));
    assert_eq!(client.refresh_timeout(), Duration::from_millis(750));
}

#[test]
fn token_store_lives_under_state_dir() {
    let config = parse(&["devquiz", "--state-dir", "/tmp/dq", "--storage-key", "work", "status"]);
    assert_eq!(config.resolved_state_dir(), PathBuf::from("/tmp/dq"));
    assert_eq!(config.token_store().path(), PathBuf::from("/tmp/dq/work.json").as_path());
}

#[test]
fn invalid_configs() {
    assert_invalid(&["devquiz", "--api-url", "ftp://x", "status"], "http(s) URL");
    assert_invalid(&["devquiz", "--storage-key", "../etc", "status"], "storage-key");
    assert_invalid(&["devquiz", "--storage-key", "", "status"], "storage-key");
    assert_invalid(&["devquiz", "--login-route", "login", "status"], "login-route");
    assert_invalid(&["devquiz", "--timeout-ms", "0", "status"], "greater than zero");
    assert_invalid(&["devquiz", "--log-format", "xml", "status"], "invalid log format");
}

#[test]
fn login_parses_provider() {
    let config = parse(&["devquiz", "login", "GitHub", "--open"]);
    match config.command {
        Command::Login(args) => {
            assert_eq!(args.provider, OAuthProvider::Github);
            assert!(args.open);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn login_rejects_unknown_provider() {
    assert!(Config::try_parse_from(["devquiz", "login", "myspace"]).is_err());
}

#[test]
fn problems_filters_map_to_query() {
    let config = parse(&[
        "devquiz",
        "problems",
        "--page",
        "2",
        "--difficulty",
        "hard",
        "--type",
        "multiple-choice",
        "--sort",
        "latest",
        "--category",
        "NETWORK",
        "--only-unsolved",
    ]);
    let Command::Problems(args) = config.command else {
        panic!("expected problems command");
    };
    let query = args.to_query();
    assert_eq!(query.page, 2);
    assert_eq!(query.size, 12);
    assert_eq!(query.difficulty, Some(Difficulty::Hard));
    assert_eq!(query.problem_type, Some(ProblemType::MultipleChoice));
    assert_eq!(query.sort, SortType::Latest);
    assert_eq!(query.category.as_deref(), Some("NETWORK"));
    assert!(query.only_unsolved);
}

#[test]
fn problems_defaults_match_platform() {
    let Command::Problems(args) = parse(&["devquiz", "problems"]).command else {
        panic!("expected problems command");
    };
    assert_eq!(args.to_query(), devquiz_client::ProblemQuery::default());
}

#[test]
fn submit_requires_answer() {
    assert!(Config::try_parse_from(["devquiz", "submit", "3"]).is_err());
    let Command::Submit(args) =
        parse(&["devquiz", "submit", "3", "--answer", "TCP", "--duration", "42"]).command
    else {
        panic!("expected submit command");
    };
    assert_eq!((args.id, args.answer.as_str(), args.duration), (3, "TCP", 42));
}
