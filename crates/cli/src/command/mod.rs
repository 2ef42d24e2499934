// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI subcommands: session management and problem access.

pub mod auth;
pub mod problems;

use std::sync::Arc;

use devquiz_client::{AuthClient, TokenStore};

use crate::config::Config;
use crate::navigator::TerminalNavigator;

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Print the social-login URL for a provider.
    Login(auth::LoginArgs),
    /// Store the tokens carried by an OAuth callback URL.
    Callback(auth::CallbackArgs),
    /// Forget the stored tokens.
    Logout,
    /// Show whether a session is stored.
    Status,
    /// List problems.
    Problems(problems::ProblemsArgs),
    /// Show one problem.
    Problem(problems::ProblemArgs),
    /// Submit an answer to a problem.
    Submit(problems::SubmitArgs),
}

/// Build the client for `config`, backed by the on-disk token file.
pub fn build_client(config: &Config) -> AuthClient {
    let store: Arc<dyn TokenStore> = Arc::new(config.token_store());
    AuthClient::new(config.client_config(), store, Arc::new(TerminalNavigator))
}

/// Run the selected subcommand and return what it prints to stdout.
pub async fn run(config: &Config) -> anyhow::Result<String> {
    let client = build_client(config);
    match &config.command {
        Command::Login(args) => Ok(auth::login(&config.api_url, args)),
        Command::Callback(args) => auth::callback(&client, args),
        Command::Logout => auth::logout(&client),
        Command::Status => Ok(auth::status(&client, &config.token_store())),
        Command::Problems(args) => problems::list(&client, args).await,
        Command::Problem(args) => problems::show(&client, args).await,
        Command::Submit(args) => problems::submit(&client, args).await,
    }
}
