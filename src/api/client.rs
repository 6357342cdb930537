//! HTTP client for the trivia question API.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::models::{Category, Question, QuizConfig, QUESTION_COUNT};

use super::decode::decode_html_entities;

/// Production API base URL.
pub const DEFAULT_BASE_URL: &str = "https://opentdb.com";

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Errors from the trivia API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The API returned an error status.
    #[error("API error (HTTP {0})")]
    Status(u16),

    /// The request could not be sent or the connection failed.
    #[error("network error: {0}")]
    Network(String),

    /// The response body was not the expected JSON.
    #[error("unexpected response: {0}")]
    Decode(String),

    /// The API has no questions for the selected filters.
    #[error("no questions available for these filters (API code {0})")]
    NoQuestions(u8),
}

/// Client for the two read-only trivia API endpoints.
pub struct TriviaClient {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct CategoryListResponse {
    trivia_categories: Vec<Category>,
}

#[derive(Deserialize)]
struct QuestionBatchResponse {
    response_code: u8,
    results: Vec<RawQuestion>,
}

/// A question as the API serves it: HTML-entity-encoded, with the
/// correct answer separate from the incorrect ones.
#[derive(Deserialize)]
struct RawQuestion {
    question: String,
    correct_answer: String,
    incorrect_answers: Vec<String>,
}

impl RawQuestion {
    fn into_question(self) -> Question {
        Question::with_shuffled_options(
            decode_html_entities(&self.question),
            decode_html_entities(&self.correct_answer),
            self.incorrect_answers
                .iter()
                .map(|a| decode_html_entities(a))
                .collect(),
        )
    }
}

impl TriviaClient {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Fetch the category list.
    pub async fn fetch_categories(&self) -> Result<Vec<Category>, ApiError> {
        let response = self
            .client
            .get(format!("{}/api_category.php", self.base_url))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if status >= 400 {
            return Err(ApiError::Status(status));
        }

        let body: CategoryListResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        debug!(count = body.trivia_categories.len(), "fetched categories");
        Ok(body.trivia_categories)
    }

    /// Fetch one quiz worth of questions matching the filters, decoded
    /// and with shuffled options.
    pub async fn fetch_questions(&self, config: &QuizConfig) -> Result<Vec<Question>, ApiError> {
        let response = self
            .client
            .get(format!("{}/api.php", self.base_url))
            .query(&query_params(config))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if status >= 400 {
            return Err(ApiError::Status(status));
        }

        let body: QuestionBatchResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        if body.response_code != 0 || body.results.is_empty() {
            return Err(ApiError::NoQuestions(body.response_code));
        }

        debug!(count = body.results.len(), "fetched question batch");
        Ok(body.results.into_iter().map(RawQuestion::into_question).collect())
    }
}

fn query_params(config: &QuizConfig) -> Vec<(&'static str, String)> {
    let mut params = vec![("amount", QUESTION_COUNT.to_string())];
    if let Some(id) = config.category {
        params.push(("category", id.to_string()));
    }
    if let Some(difficulty) = config.difficulty {
        params.push(("difficulty", difficulty.as_param().to_string()));
    }
    if let Some(question_type) = config.question_type {
        params.push(("type", question_type.as_param().to_string()));
    }
    params
}
