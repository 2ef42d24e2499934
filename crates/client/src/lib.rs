// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! devquiz client: authenticated access to the daily developer quiz API.
//!
//! [`AuthClient`] attaches the stored bearer token to every request and, on
//! `401`, runs a single shared refresh cycle that every concurrently
//! rejected request waits on.

pub mod api;
pub mod client;
pub mod error;
pub mod oauth;
pub mod refresh;
pub mod session;
pub mod store;

pub use api::{ApiResponse, Difficulty, ProblemQuery, ProblemType, SortType, SubmitAnswer};
pub use client::{ApiRequest, AuthClient, ClientConfig, HttpResponse};
pub use error::{AuthError, ClientError};
pub use oauth::{parse_callback, Callback, CallbackError, OAuthProvider};
pub use refresh::{do_refresh, TokenRefreshResponse, REFRESH_PATH};
pub use session::{LogNavigator, Navigator, DEFAULT_LOGIN_ROUTE};
pub use store::{state_dir, FileTokenStore, MemoryTokenStore, TokenPair, TokenStore};
