// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Platform REST endpoints and the JSON envelope they all share.
//!
//! Problem and submission payloads are left as raw JSON; only request
//! parameters are typed.

use std::fmt;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::client::{ApiRequest, AuthClient};
use crate::error::ClientError;

/// Envelope wrapping every platform response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub is_success: bool,
    #[serde(default)]
    pub status_code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: T,
}

/// Problem difficulty filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Problem type filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProblemType {
    Subjective,
    MultipleChoice,
}

/// Ordering of the problem list.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortType {
    Latest,
    Oldest,
    #[default]
    MostSolved,
    LeastSolved,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "EASY",
            Self::Medium => "MEDIUM",
            Self::Hard => "HARD",
        }
    }
}

impl ProblemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Subjective => "SUBJECTIVE",
            Self::MultipleChoice => "MULTIPLE_CHOICE",
        }
    }
}

impl SortType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Latest => "LATEST",
            Self::Oldest => "OLDEST",
            Self::MostSolved => "MOST_SOLVED",
            Self::LeastSolved => "LEAST_SOLVED",
        }
    }
}

/// Error for an unrecognized filter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: {}", self.kind, self.value)
    }
}

impl std::error::Error for UnknownVariant {}

// Accepts the wire spelling in any case, with `-` or `_`.
fn normalize(s: &str) -> String {
    s.trim().to_uppercase().replace('-', "_")
}

impl std::str::FromStr for Difficulty {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "EASY" => Ok(Self::Easy),
            "MEDIUM" => Ok(Self::Medium),
            "HARD" => Ok(Self::Hard),
            _ => Err(UnknownVariant { kind: "difficulty", value: s.to_owned() }),
        }
    }
}

impl std::str::FromStr for ProblemType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "SUBJECTIVE" => Ok(Self::Subjective),
            "MULTIPLE_CHOICE" => Ok(Self::MultipleChoice),
            _ => Err(UnknownVariant { kind: "problem type", value: s.to_owned() }),
        }
    }
}

impl std::str::FromStr for SortType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "LATEST" => Ok(Self::Latest),
            "OLDEST" => Ok(Self::Oldest),
            "MOST_SOLVED" => Ok(Self::MostSolved),
            "LEAST_SOLVED" => Ok(Self::LeastSolved),
            _ => Err(UnknownVariant { kind: "sort type", value: s.to_owned() }),
        }
    }
}

/// Parameters for `GET /api/problems`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemQuery {
    /// Zero-based page index.
    pub page: u32,
    pub size: u32,
    pub category: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub problem_type: Option<ProblemType>,
    pub sort: SortType,
    /// Only meaningful for signed-in users.
    pub only_unsolved: bool,
}

impl Default for ProblemQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: 12,
            category: None,
            difficulty: None,
            problem_type: None,
            sort: SortType::default(),
            only_unsolved: false,
        }
    }
}

impl ProblemQuery {
    /// Query pairs in wire form. Optional filters appear only when set.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_owned(), self.page.to_string()),
            ("size".to_owned(), self.size.to_string()),
            ("sortType".to_owned(), self.sort.as_str().to_owned()),
        ];
        if let Some(ref category) = self.category {
            if !category.is_empty() {
                pairs.push(("category".to_owned(), category.clone()));
            }
        }
        if let Some(difficulty) = self.difficulty {
            pairs.push(("difficulty".to_owned(), difficulty.as_str().to_owned()));
        }
        if let Some(problem_type) = self.problem_type {
            pairs.push(("type".to_owned(), problem_type.as_str().to_owned()));
        }
        if self.only_unsolved {
            pairs.push(("onlyUnsolved".to_owned(), "true".to_owned()));
        }
        pairs
    }
}

/// Body of `POST /api/problems/{id}/submissions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitAnswer {
    /// Comma-separated option ids for multiple choice, free text otherwise.
    pub answer: String,
    /// Seconds spent on the problem.
    pub duration: u64,
}

impl AuthClient {
    /// `GET /api/problems`.
    pub async fn list_problems(
        &self,
        query: &ProblemQuery,
    ) -> Result<ApiResponse<serde_json::Value>, ClientError> {
        let req = ApiRequest::new(Method::GET, "/api/problems").query(query.to_pairs());
        self.request_json(req).await
    }

    /// `GET /api/problems/{id}`.
    pub async fn get_problem(
        &self,
        problem_id: u64,
    ) -> Result<ApiResponse<serde_json::Value>, ClientError> {
        let req = ApiRequest::new(Method::GET, format!("/api/problems/{problem_id}"));
        self.request_json(req).await
    }

    /// `POST /api/problems/{id}/submissions`.
    pub async fn submit_answer(
        &self,
        problem_id: u64,
        submission: &SubmitAnswer,
    ) -> Result<ApiResponse<serde_json::Value>, ClientError> {
        let body = serde_json::to_value(submission)
            .map_err(|e| ClientError::InvalidRequest(e.to_string()))?;
        let req = ApiRequest::new(Method::POST, format!("/api/problems/{problem_id}/submissions"))
            .json(body);
        self.request_json(req).await
    }

    async fn request_json<T: DeserializeOwned + Default>(
        &self,
        req: ApiRequest,
    ) -> Result<ApiResponse<T>, ClientError> {
        let resp = self.request(req).await?;
        resp.json()
    }
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod tests;
