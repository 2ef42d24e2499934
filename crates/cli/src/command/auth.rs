// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `devquiz login|callback|logout|status`.

use devquiz_client::{parse_callback, AuthClient, FileTokenStore, OAuthProvider};
use tracing::info;

#[derive(Debug, clap::Args)]
pub struct LoginArgs {
    /// Provider: kakao, naver, google, github.
    pub provider: OAuthProvider,
    /// Also open the URL in the default browser.
    #[arg(long)]
    pub open: bool,
}

#[derive(Debug, clap::Args)]
pub struct CallbackArgs {
    /// The URL the browser landed on after signing in.
    pub url: String,
}

pub fn login(api_url: &str, args: &LoginArgs) -> String {
    let url = args.provider.authorization_url(api_url);
    if args.open {
        open_browser(&url);
    }
    format!(
        "Open this URL to sign in with {}:\n  {url}\nThen run `devquiz callback '<redirect URL>'`.",
        args.provider
    )
}

fn open_browser(url: &str) {
    #[cfg(target_os = "macos")]
    {
        let _ = std::process::Command::new("open").arg(url).spawn();
    }
    #[cfg(target_os = "linux")]
    {
        let _ = std::process::Command::new("xdg-open").arg(url).spawn();
    }
    #[cfg(not(any(target_os = "macos", target_os = "linux")))]
    let _ = url;
}

pub fn callback(client: &AuthClient, args: &CallbackArgs) -> anyhow::Result<String> {
    let cb = parse_callback(&args.url)?;
    client.login(&cb.tokens)?;
    info!(redirect_to = %cb.redirect_to, "stored tokens from callback");
    Ok(format!("Signed in. Continue at {}.", cb.redirect_to))
}

pub fn logout(client: &AuthClient) -> anyhow::Result<String> {
    client.logout()?;
    Ok("Signed out.".to_owned())
}

pub fn status(client: &AuthClient, store: &FileTokenStore) -> String {
    let state = if client.is_authenticated() { "signed in" } else { "signed out" };
    format!("{state} ({}, tokens at {})", client.config().base_url, store.path().display())
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
