// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Authenticated HTTP client with single-flight token refresh.
//!
//! Every request carries `Authorization: Bearer <access token>` when one is
//! stored. A `401` parks the request on the client's wait queue; the first
//! one to park starts the (only) refresh cycle. When the cycle settles, every
//! parked request is handed the new access token (or the refresh error) in
//! arrival order and replays itself exactly once.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use parking_lot::Mutex;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::error::{AuthError, ClientError};
use crate::refresh::{do_refresh, REFRESH_PATH};
use crate::session::{Navigator, DEFAULT_LOGIN_ROUTE};
use crate::store::{TokenPair, TokenStore};

/// Static client settings.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API origin, e.g. `https://api.example.com`. Relative request paths are
    /// appended to it.
    pub base_url: String,
    /// Route handed to the [`Navigator`] when the session cannot be recovered.
    pub login_route: String,
    /// Per-request timeout in milliseconds.
    pub request_timeout_ms: u64,
    /// Upper bound on a refresh call in milliseconds.
    pub refresh_timeout_ms: u64,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            login_route: DEFAULT_LOGIN_ROUTE.to_owned(),
            request_timeout_ms: 10_000,
            refresh_timeout_ms: 10_000,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn refresh_timeout(&self) -> Duration {
        Duration::from_millis(self.refresh_timeout_ms)
    }

    fn refresh_url(&self) -> String {
        format!("{}{REFRESH_PATH}", self.base_url.trim_end_matches('/'))
    }
}

/// One outbound call. The client owns the `Authorization` header.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the base URL, or an absolute `http(s)://` URL.
    pub path: String,
    pub body: Option<serde_json::Value>,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    /// Set once the request has been granted a refreshed token.
    retried: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            headers: Vec::new(),
            query: Vec::new(),
            retried: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self::new(Method::POST, path).json(body)
    }

    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn query(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    fn label(&self) -> String {
        format!("{} {}", self.method, self.path)
    }

    fn validate(&self) -> Result<(), ClientError> {
        if self.headers.iter().any(|(name, _)| name.eq_ignore_ascii_case("authorization")) {
            return Err(ClientError::InvalidRequest(
                "Authorization header is managed by the client".to_owned(),
            ));
        }
        Ok(())
    }
}

/// A successful (2xx) response, fully buffered.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl HttpResponse {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        serde_json::from_slice(&self.body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    fn into_result(self) -> Result<Self, ClientError> {
        if self.status.is_success() {
            Ok(self)
        } else {
            Err(ClientError::Http { status: self.status.as_u16(), body: self.text() })
        }
    }
}

/// A request parked on the current refresh cycle.
struct PendingRequest {
    /// `METHOD path` of the parked request.
    label: String,
    tx: oneshot::Sender<Result<String, ClientError>>,
}

/// Shared refresh bookkeeping. Only touched under `Inner::state`.
#[derive(Default)]
struct RefreshState {
    refreshing: bool,
    queue: VecDeque<PendingRequest>,
    /// Completed plus in-flight refresh cycles.
    cycles: u64,
}

struct Inner {
    config: ClientConfig,
    http: reqwest::Client,
    refresh_url: String,
    store: Arc<dyn TokenStore>,
    navigator: Arc<dyn Navigator>,
    state: Mutex<RefreshState>,
}

/// HTTP client that attaches bearer tokens and recovers from expiry.
///
/// Cheap to clone; clones share tokens and refresh state.
#[derive(Clone)]
pub struct AuthClient {
    inner: Arc<Inner>,
}

impl AuthClient {
    pub fn new(
        config: ClientConfig,
        store: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .unwrap_or_default();
        let refresh_url = config.refresh_url();
        Self {
            inner: Arc::new(Inner {
                config,
                http,
                refresh_url,
                store,
                navigator,
                state: Mutex::new(RefreshState::default()),
            }),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Store tokens obtained from the OAuth callback.
    pub fn login(&self, tokens: &TokenPair) -> Result<(), ClientError> {
        self.inner.store.save(tokens)
    }

    /// Drop stored tokens. Does not notify the navigator.
    pub fn logout(&self) -> Result<(), ClientError> {
        self.inner.store.clear()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.access_token().is_some()
    }

    /// Whether a refresh call is outstanding.
    pub fn is_refreshing(&self) -> bool {
        self.inner.state.lock().refreshing
    }

    /// Number of requests parked on the current refresh cycle.
    pub fn queued(&self) -> usize {
        self.inner.state.lock().queue.len()
    }

    /// Number of refresh cycles started by this client.
    pub fn refresh_cycles(&self) -> u64 {
        self.inner.state.lock().cycles
    }

    /// Send `req`, transparently refreshing the access token on `401`.
    ///
    /// 2xx responses are returned as-is; any other status is
    /// [`ClientError::Http`]. A request is retried at most once; a second
    /// `401` is [`AuthError::RefreshExhausted`].
    pub async fn request(&self, mut req: ApiRequest) -> Result<HttpResponse, ClientError> {
        req.validate()?;
        let url = self.inner.resolve(&req.path)?;
        let mut token = self.inner.access_token();

        loop {
            let resp = self.inner.dispatch(&url, &req, token.as_deref()).await?;
            if resp.status != StatusCode::UNAUTHORIZED {
                return resp.into_result();
            }
            if req.retried {
                warn!(request = %req.label(), "still unauthorized after token refresh");
                return Err(AuthError::RefreshExhausted.into());
            }
            req.retried = true;
            token = Some(self.fresh_token(&req, token.as_deref()).await?);
        }
    }

    /// Obtain a token to replay `req` with, after it got a 401 using `used`.
    async fn fresh_token(&self, req: &ApiRequest, used: Option<&str>) -> Result<String, ClientError> {
        let rx = {
            let mut state = self.inner.state.lock();
            if !state.refreshing {
                match self.inner.access_token() {
                    // A refresh already replaced the token this request went out with.
                    Some(current) if used != Some(current.as_str()) => {
                        debug!(request = %req.label(), "replaying with already-refreshed token");
                        return Ok(current);
                    }
                    // Tokens were cleared after this request went out; the user
                    // has already been sent to login.
                    None if used.is_some() => {
                        debug!(request = %req.label(), "session already ended");
                        return Err(ClientError::refresh_failed("session already ended"));
                    }
                    _ => {}
                }
            }

            let (tx, rx) = oneshot::channel();
            state.queue.push_back(PendingRequest { label: req.label(), tx });
            if !state.refreshing {
                state.refreshing = true;
                state.cycles += 1;
                debug!(request = %req.label(), "starting token refresh");
                let inner = Arc::clone(&self.inner);
                tokio::spawn(async move {
                    inner.run_refresh_cycle().await;
                });
            } else {
                debug!(request = %req.label(), queued = state.queue.len(), "waiting on token refresh");
            }
            rx
        };

        match rx.await {
            Ok(result) => result,
            Err(_) => Err(ClientError::refresh_failed("refresh cycle aborted")),
        }
    }
}

impl Inner {
    fn access_token(&self) -> Option<String> {
        self.tokens().map(|t| t.access_token)
    }

    /// Unreadable storage counts as signed out.
    fn tokens(&self) -> Option<TokenPair> {
        match self.store.get() {
            Ok(tokens) => tokens,
            Err(e) => {
                warn!(err = %e, "ignoring unreadable token store");
                None
            }
        }
    }

    fn resolve(&self, path: &str) -> Result<Url, ClientError> {
        let raw = if path.starts_with("http://") || path.starts_with("https://") {
            path.to_owned()
        } else if path.starts_with('/') {
            format!("{}{path}", self.config.base_url.trim_end_matches('/'))
        } else {
            format!("{}/{path}", self.config.base_url.trim_end_matches('/'))
        };
        Url::parse(&raw).map_err(|e| ClientError::InvalidRequest(format!("{raw}: {e}")))
    }

    async fn dispatch(
        &self,
        url: &Url,
        req: &ApiRequest,
        token: Option<&str>,
    ) -> Result<HttpResponse, ClientError> {
        let mut builder = self.http.request(req.method.clone(), url.clone());
        if !req.query.is_empty() {
            builder = builder.query(&req.query);
        }
        for (name, value) in &req.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(ref body) = req.body {
            builder = builder.json(body);
        }
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }

        let resp = builder.send().await?;
        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp.bytes().await?;
        debug!(request = %req.label(), status = status.as_u16(), retried = req.retried, "response");
        Ok(HttpResponse { status, headers, body })
    }

    /// The single refresh call plus settlement of every parked request.
    async fn run_refresh_cycle(self: Arc<Self>) {
        let outcome = match self.tokens() {
            Some(tokens) => {
                do_refresh(
                    &self.http,
                    &self.refresh_url,
                    &tokens.refresh_token,
                    self.config.refresh_timeout(),
                )
                .await
            }
            None => Err(ClientError::refresh_failed("no refresh token stored")),
        };

        // Persisting, un-flagging, and draining happen under one lock so no
        // other 401 handler observes a half-settled cycle.
        let waiters = {
            let mut state = self.state.lock();
            let persisted = match outcome {
                Ok(ref tokens) => self.store.save(tokens),
                Err(_) => self.store.clear(),
            };
            if let Err(e) = persisted {
                warn!(err = %e, "failed to update token store after refresh");
            }
            state.refreshing = false;
            std::mem::take(&mut state.queue)
        };

        match outcome {
            Ok(tokens) => {
                info!(waiters = waiters.len(), "access token refreshed");
                for waiter in waiters {
                    debug!(request = %waiter.label, "releasing with refreshed token");
                    let _ = waiter.tx.send(Ok(tokens.access_token.clone()));
                }
            }
            Err(e) => {
                warn!(err = %e, waiters = waiters.len(), "token refresh failed, signing out");
                // Redirect before any caller observes the failure.
                self.navigator.to_login(&self.config.login_route);
                for waiter in waiters {
                    let _ = waiter.tx.send(Err(e.clone()));
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
