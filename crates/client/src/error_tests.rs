// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn auth_errors_use_protocol_codes() {
    assert_eq!(AuthError::RefreshExhausted.as_str(), "refresh_exhausted");
    assert_eq!(AuthError::RefreshFailed("boom".into()).as_str(), "refresh_failed");
    assert_eq!(AuthError::RefreshFailed("boom".into()).to_string(), "refresh_failed: boom");
}

#[test]
fn machine_codes_are_distinct() {
    let errors = [
        ClientError::Network("x".into()),
        ClientError::Http { status: 500, body: String::new() },
        ClientError::Auth(AuthError::RefreshExhausted),
        ClientError::Auth(AuthError::RefreshFailed("x".into())),
        ClientError::Storage("x".into()),
        ClientError::InvalidRequest("x".into()),
        ClientError::Decode("x".into()),
    ];
    let mut codes: Vec<&str> = errors.iter().map(ClientError::as_str).collect();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), errors.len());
}

#[test]
fn http_display_omits_empty_body() {
    let bare = ClientError::Http { status: 404, body: String::new() };
    assert_eq!(bare.to_string(), "HTTP 404");

    let with_body = ClientError::Http { status: 400, body: "bad".into() };
    assert_eq!(with_body.to_string(), "HTTP 400: bad");
}

#[test]
fn status_reports_http_and_exhausted() {
    assert_eq!(ClientError::Http { status: 503, body: String::new() }.status(), Some(503));
    assert_eq!(ClientError::Auth(AuthError::RefreshExhausted).status(), Some(401));
    assert_eq!(ClientError::Network("down".into()).status(), None);
    assert!(ClientError::refresh_failed("gone").is_auth());
}
