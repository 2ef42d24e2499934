// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Refresh-token exchange against the platform's refresh endpoint.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::api::ApiResponse;
use crate::error::ClientError;
use crate::store::TokenPair;

/// Path of the refresh endpoint, relative to the API base URL.
pub const REFRESH_PATH: &str = "/api/auth/refresh";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

/// Payload of a successful refresh. Only the token pair is used.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRefreshResponse {
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    pub access_token: String,
    #[serde(default)]
    pub access_token_expires_at: Option<String>,
    pub refresh_token: String,
    #[serde(default)]
    pub refresh_token_expires_at: Option<String>,
}

/// Exchange `refresh_token` for a new pair.
///
/// A single attempt: any failure (transport, non-2xx, `isSuccess: false`,
/// bad body, timeout) is `refresh_failed`.
pub async fn do_refresh(
    http: &reqwest::Client,
    refresh_url: &str,
    refresh_token: &str,
    timeout: Duration,
) -> Result<TokenPair, ClientError> {
    match tokio::time::timeout(timeout, exchange(http, refresh_url, refresh_token)).await {
        Ok(result) => result,
        Err(_) => Err(ClientError::refresh_failed(format!(
            "refresh timed out after {}ms",
            timeout.as_millis()
        ))),
    }
}

async fn exchange(
    http: &reqwest::Client,
    refresh_url: &str,
    refresh_token: &str,
) -> Result<TokenPair, ClientError> {
    let resp = http
        .post(refresh_url)
        .json(&RefreshRequest { refresh_token })
        .send()
        .await
        .map_err(|e| ClientError::refresh_failed(format!("HTTP error: {e}")))?;

    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| ClientError::refresh_failed(format!("read body: {e}")))?;

    if !status.is_success() {
        return Err(ClientError::refresh_failed(format!("HTTP {}: {body}", status.as_u16())));
    }

    let envelope: ApiResponse<Option<TokenRefreshResponse>> = serde_json::from_str(&body)
        .map_err(|e| ClientError::refresh_failed(format!("parse response: {e}")))?;

    if !envelope.is_success {
        return Err(ClientError::refresh_failed(format!("rejected: {}", envelope.message)));
    }
    let data = envelope
        .data
        .ok_or_else(|| ClientError::refresh_failed("response carried no tokens"))?;

    Ok(TokenPair { access_token: data.access_token, refresh_token: data.refresh_token })
}

#[cfg(test)]
#[path = "refresh_tests.rs"]
mod tests;
