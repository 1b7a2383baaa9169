//! Trait abstraction for the question service to enable mocking in tests

use super::client::FetchError;
use async_trait::async_trait;

/// Source of supplementary survey questions
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch the ordered questions for a survey topic
    async fn fetch_questions(&self, topic: &str) -> Result<Vec<String>, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_source_returns_questions() {
        let mut source = MockQuestionSource::new();
        source
            .expect_fetch_questions()
            .withf(|topic| topic == "Education")
            .times(1)
            .returning(|_| Ok(vec!["Which course changed your mind?".to_string()]));

        let questions = tokio_test::block_on(source.fetch_questions("Education")).unwrap();
        assert_eq!(questions, vec!["Which course changed your mind?"]);
    }

    #[test]
    fn test_mock_source_error() {
        let mut source = MockQuestionSource::new();
        source
            .expect_fetch_questions()
            .returning(|_| Err(FetchError::Status(reqwest::StatusCode::BAD_GATEWAY)));

        let result = tokio_test::block_on(source.fetch_questions("Health"));
        assert!(matches!(result, Err(FetchError::Status(code)) if code.as_u16() == 502));
    }
}
