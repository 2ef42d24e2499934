// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::fmt;

/// Authentication failures raised by the refresh protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The request was already retried once with a fresh token and still got 401.
    RefreshExhausted,
    /// The refresh endpoint failed, timed out, or no refresh token was stored.
    RefreshFailed(String),
}

impl AuthError {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RefreshExhausted => "refresh_exhausted",
            Self::RefreshFailed(_) => "refresh_failed",
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RefreshExhausted => f.write_str("refresh_exhausted"),
            Self::RefreshFailed(reason) => write!(f, "refresh_failed: {reason}"),
        }
    }
}

/// Errors returned by [`crate::AuthClient`].
///
/// `Clone` because a single refresh failure is delivered to every request
/// parked on that refresh cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Transport-level failure (connect, timeout, reset).
    Network(String),
    /// Non-2xx response other than a recoverable 401.
    Http { status: u16, body: String },
    Auth(AuthError),
    /// Persisted token data could not be read.
    Storage(String),
    /// The caller violated the request contract (e.g. supplied `Authorization`).
    InvalidRequest(String),
    /// A 2xx body did not match the expected JSON shape.
    Decode(String),
}

impl ClientError {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network(_) => "NETWORK",
            Self::Http { .. } => "HTTP",
            Self::Auth(AuthError::RefreshExhausted) => "REFRESH_EXHAUSTED",
            Self::Auth(AuthError::RefreshFailed(_)) => "REFRESH_FAILED",
            Self::Storage(_) => "STORAGE",
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::Decode(_) => "DECODE",
        }
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Auth(AuthError::RefreshExhausted) => Some(401),
            _ => None,
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }

    pub(crate) fn refresh_failed(reason: impl Into<String>) -> Self {
        Self::Auth(AuthError::RefreshFailed(reason.into()))
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "network error: {msg}"),
            Self::Http { status, body } if body.is_empty() => write!(f, "HTTP {status}"),
            Self::Http { status, body } => write!(f, "HTTP {status}: {body}"),
            Self::Auth(e) => write!(f, "auth error: {e}"),
            Self::Storage(msg) => write!(f, "token storage error: {msg}"),
            Self::InvalidRequest(msg) => write!(f, "invalid request: {msg}"),
            Self::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<AuthError> for ClientError {
    fn from(e: AuthError) -> Self {
        Self::Auth(e)
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
