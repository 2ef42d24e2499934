// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session collaborator: where the user is sent once their session is gone.

/// Route the user lands on after an unrecoverable auth failure.
pub const DEFAULT_LOGIN_ROUTE: &str = "/login";

/// Sends the user to the login view.
///
/// Called at most once per failed refresh cycle, after tokens are cleared.
pub trait Navigator: Send + Sync {
    fn to_login(&self, route: &str);
}

impl<F> Navigator for F
where
    F: Fn(&str) + Send + Sync,
{
    fn to_login(&self, route: &str) {
        self(route)
    }
}

/// Navigator that only records the redirect in the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn to_login(&self, route: &str) {
        tracing::warn!(route, "session expired, login required");
    }
}
