// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Social-login helpers: authorization entry points and callback parsing.
//!
//! The platform runs the OAuth dance server-side and finally redirects the
//! browser to the client's callback route with the issued tokens in the
//! query string.

use std::fmt;

use reqwest::Url;

use crate::store::TokenPair;

/// Route the user is sent to after a successful callback when none is given.
pub const DEFAULT_REDIRECT: &str = "/problems";

/// Supported social-login providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OAuthProvider {
    Kakao,
    Naver,
    Google,
    Github,
}

impl OAuthProvider {
    pub const ALL: [Self; 4] = [Self::Kakao, Self::Naver, Self::Google, Self::Github];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kakao => "kakao",
            Self::Naver => "naver",
            Self::Google => "google",
            Self::Github => "github",
        }
    }

    /// Platform path that starts the provider's authorization flow.
    pub fn authorization_path(&self) -> String {
        format!("/oauth2/authorization/{}", self.as_str())
    }

    pub fn authorization_url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.authorization_path())
    }
}

impl fmt::Display for OAuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OAuthProvider {
    type Err = CallbackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "kakao" => Ok(Self::Kakao),
            "naver" => Ok(Self::Naver),
            "google" => Ok(Self::Google),
            "github" => Ok(Self::Github),
            other => Err(CallbackError::UnknownProvider(other.to_owned())),
        }
    }
}

/// Result of a successful callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Callback {
    pub tokens: TokenPair,
    /// Where to send the user next.
    pub redirect_to: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackError {
    InvalidUrl(String),
    /// `accessToken` or `refreshToken` absent or empty.
    MissingTokens,
    UnknownProvider(String),
}

impl fmt::Display for CallbackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUrl(msg) => write!(f, "invalid callback URL: {msg}"),
            Self::MissingTokens => f.write_str("callback did not carry both tokens"),
            Self::UnknownProvider(p) => write!(f, "unknown OAuth provider: {p}"),
        }
    }
}

impl std::error::Error for CallbackError {}

/// Extract the token pair from a callback URL.
///
/// Accepts a full URL (`https://app/oauth/callback?...`), a path with query
/// (`/oauth/callback?...`), or a bare query string.
pub fn parse_callback(input: &str) -> Result<Callback, CallbackError> {
    let input = input.trim();
    let url = if input.contains("://") {
        Url::parse(input)
    } else if input.starts_with('/') {
        Url::parse(&format!("http://callback.invalid{input}"))
    } else {
        Url::parse(&format!("http://callback.invalid/?{}", input.trim_start_matches('?')))
    }
    .map_err(|e| CallbackError::InvalidUrl(e.to_string()))?;

    let mut access_token = None;
    let mut refresh_token = None;
    let mut redirect_to = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "accessToken" => access_token = Some(value.into_owned()),
            "refreshToken" => refresh_token = Some(value.into_owned()),
            "redirectTo" => redirect_to = Some(value.into_owned()),
            _ => {}
        }
    }

    match (access_token, refresh_token) {
        (Some(access), Some(refresh)) if !access.is_empty() && !refresh.is_empty() => {
            Ok(Callback {
                tokens: TokenPair::new(access, refresh),
                redirect_to: redirect_to
                    .filter(|r| !r.is_empty())
                    .unwrap_or_else(|| DEFAULT_REDIRECT.to_owned()),
            })
        }
        _ => Err(CallbackError::MissingTokens),
    }
}

#[cfg(test)]
#[path = "oauth_tests.rs"]
mod tests;
