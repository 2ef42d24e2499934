// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use clap::Parser;
use devquiz_client::{ClientConfig, FileTokenStore, DEFAULT_LOGIN_ROUTE};

use crate::command::Command;

/// Command-line client for the daily developer quiz.
#[derive(Debug, Parser)]
#[command(name = "devquiz", version, about)]
pub struct Config {
    /// API origin.
    #[arg(long, global = true, env = "DEVQUIZ_API_URL", default_value = "http://localhost:8080")]
    pub api_url: String,

    /// Directory holding the token file.
    #[arg(long, global = true, env = "DEVQUIZ_STATE_DIR")]
    pub state_dir: Option<PathBuf>,

    /// Token file name, without the `.json` suffix.
    #[arg(long, global = true, env = "DEVQUIZ_STORAGE_KEY", default_value = "auth")]
    pub storage_key: String,

    /// Route reported when the session cannot be recovered.
    #[arg(long, global = true, env = "DEVQUIZ_LOGIN_ROUTE", default_value = DEFAULT_LOGIN_ROUTE)]
    pub login_route: String,

    /// Per-request timeout in milliseconds.
    #[arg(long, global = true, env = "DEVQUIZ_TIMEOUT_MS", default_value = "10000")]
    pub timeout_ms: u64,

    /// Token refresh timeout in milliseconds.
    #[arg(long, global = true, env = "DEVQUIZ_REFRESH_TIMEOUT_MS", default_value = "10000")]
    pub refresh_timeout_ms: u64,

    /// Log format (json or text).
    #[arg(long, global = true, env = "DEVQUIZ_LOG_FORMAT", default_value = "text")]
    pub log_format: String,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, env = "DEVQUIZ_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

impl Config {
    /// Validate the configuration after parsing.
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            anyhow::bail!("--api-url must be an http(s) URL, got {:?}", self.api_url);
        }
        if self.storage_key.is_empty()
            || self.storage_key.contains(['/', '\\'])
            || self.storage_key.starts_with('.')
        {
            anyhow::bail!("invalid --storage-key: {:?}", self.storage_key);
        }
        if !self.login_route.starts_with('/') {
            anyhow::bail!("--login-route must start with '/'");
        }
        if self.timeout_ms == 0 || self.refresh_timeout_ms == 0 {
            anyhow::bail!("timeouts must be greater than zero");
        }
        match self.log_format.as_str() {
            "json" | "text" => {}
            other => anyhow::bail!("invalid log format: {other}"),
        }
        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api_url.trim_end_matches('/').to_owned(),
            login_route: self.login_route.clone(),
            request_timeout_ms: self.timeout_ms,
            refresh_timeout_ms: self.refresh_timeout_ms,
        }
    }

    /// `--state-dir`, or the platform state directory.
    pub fn resolved_state_dir(&self) -> PathBuf {
        self.state_dir.clone().unwrap_or_else(devquiz_client::state_dir)
    }

    pub fn token_store(&self) -> FileTokenStore {
        FileTokenStore::new(self.resolved_state_dir(), &self.storage_key)
    }

    /// Build a minimal `Config` for tests.
    #[doc(hidden)]
    pub fn test(api_url: &str, state_dir: PathBuf, command: Command) -> Self {
        Self {
            api_url: api_url.into(),
            state_dir: Some(state_dir),
            storage_key: "auth".into(),
            login_route: DEFAULT_LOGIN_ROUTE.into(),
            timeout_ms: 2_000,
            refresh_timeout_ms: 2_000,
            log_format: "text".into(),
            log_level: "debug".into(),
            command,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
