// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use devquiz_client::{Navigator, OAuthProvider};
use tracing::warn;

/// Navigator for an interactive terminal: there is no login page to show,
/// so the user is told how to sign in again.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNavigator;

impl TerminalNavigator {
    pub fn message() -> String {
        let providers: Vec<&str> = OAuthProvider::ALL.iter().map(|p| p.as_str()).collect();
        format!(
            "Session expired. Sign in again with `devquiz login <{}>`.",
            providers.join("|")
        )
    }
}

impl Navigator for TerminalNavigator {
    fn to_login(&self, route: &str) {
        warn!(route, "session expired");
        eprintln!("{}", Self::message());
    }
}
