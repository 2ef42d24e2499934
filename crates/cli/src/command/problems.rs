// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `devquiz problems|problem|submit`.

use devquiz_client::{
    ApiResponse, AuthClient, Difficulty, ProblemQuery, ProblemType, SortType, SubmitAnswer,
};

#[derive(Debug, clap::Args)]
pub struct ProblemsArgs {
    /// Zero-based page index.
    #[arg(long, default_value_t = 0)]
    pub page: u32,
    #[arg(long, default_value_t = 12)]
    pub size: u32,
    #[arg(long)]
    pub category: Option<String>,
    /// easy, medium, hard.
    #[arg(long)]
    pub difficulty: Option<Difficulty>,
    /// subjective, multiple-choice.
    #[arg(long = "type")]
    pub problem_type: Option<ProblemType>,
    /// latest, oldest, most-solved, least-solved.
    #[arg(long, default_value = "most-solved")]
    pub sort: SortType,
    /// Hide problems already solved.
    #[arg(long)]
    pub only_unsolved: bool,
}

impl ProblemsArgs {
    pub fn to_query(&self) -> ProblemQuery {
        ProblemQuery {
            page: self.page,
            size: self.size,
            category: self.category.clone(),
            difficulty: self.difficulty,
            problem_type: self.problem_type,
            sort: self.sort,
            only_unsolved: self.only_unsolved,
        }
    }
}

#[derive(Debug, clap::Args)]
pub struct ProblemArgs {
    pub id: u64,
}

#[derive(Debug, clap::Args)]
pub struct SubmitArgs {
    pub id: u64,
    #[arg(long)]
    pub answer: String,
    /// Seconds spent solving.
    #[arg(long, default_value_t = 0)]
    pub duration: u64,
}

pub async fn list(client: &AuthClient, args: &ProblemsArgs) -> anyhow::Result<String> {
    render(client.list_problems(&args.to_query()).await?)
}

pub async fn show(client: &AuthClient, args: &ProblemArgs) -> anyhow::Result<String> {
    render(client.get_problem(args.id).await?)
}

pub async fn submit(client: &AuthClient, args: &SubmitArgs) -> anyhow::Result<String> {
    let submission = SubmitAnswer { answer: args.answer.clone(), duration: args.duration };
    render(client.submit_answer(args.id, &submission).await?)
}

/// Pretty-print the envelope's `data`, or fail with the platform's message.
pub fn render(resp: ApiResponse<serde_json::Value>) -> anyhow::Result<String> {
    if !resp.is_success {
        anyhow::bail!("request rejected ({}): {}", resp.status_code, resp.message);
    }
    Ok(serde_json::to_string_pretty(&resp.data)?)
}

#[cfg(test)]
#[path = "problems_tests.rs"]
mod tests;
