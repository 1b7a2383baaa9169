//! HTTP client for the survey question service

use super::traits::QuestionSource;
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use std::time::Duration;
use thiserror::Error;

/// Default question service address
pub const DEFAULT_ENDPOINT: &str = "https://api.example.com/survey-questions";

/// Errors raised while fetching questions
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid question endpoint `{endpoint}`: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("question request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("question service responded with {0}")]
    Status(StatusCode),
}

/// Fetches questions with a GET to `<endpoint>?topic=<topic>`
#[derive(Debug, Clone)]
pub struct HttpQuestionSource {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpQuestionSource {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, FetchError> {
        let endpoint = Url::parse(endpoint).map_err(|e| FetchError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    /// URL requested for a topic
    pub fn request_url(&self, topic: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("topic", topic);
        url
    }
}

#[async_trait]
impl QuestionSource for HttpQuestionSource {
    async fn fetch_questions(&self, topic: &str) -> Result<Vec<String>, FetchError> {
        let url = self.request_url(topic);
        tracing::debug!(%url, "fetching survey questions");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let questions: Vec<String> = response.json().await?;
        tracing::debug!(topic, count = questions.len(), "received survey questions");
        Ok(questions)
    }
}
