//! Background question fetching with stale-response protection
//!
//! Every topic change bumps a generation counter. Results travel back over
//! a channel tagged with the generation that requested them, and only the
//! latest generation is applied.

use super::client::FetchError;
use super::traits::QuestionSource;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Message sent back by a finished fetch task
#[derive(Debug)]
pub struct FetchResult {
    pub generation: u64,
    pub topic: String,
    pub result: Result<Vec<String>, FetchError>,
}

/// Update to apply to the displayed question list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionUpdate {
    /// Latest fetch succeeded
    Loaded(Vec<String>),
    /// Latest fetch failed; the list stays empty
    Failed,
}

pub struct QuestionFetcher {
    source: Arc<dyn QuestionSource>,
    generation: u64,
    pending: bool,
    tx: UnboundedSender<FetchResult>,
    rx: UnboundedReceiver<FetchResult>,
}

impl QuestionFetcher {
    pub fn new(source: Arc<dyn QuestionSource>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            source,
            generation: 0,
            pending: false,
            tx,
            rx,
        }
    }

    /// Whether a fetch for the latest topic is still in flight
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Start fetching questions for `topic`, superseding earlier requests.
    ///
    /// An empty topic only invalidates. Must be called inside a tokio runtime.
    pub fn request(&mut self, topic: &str) {
        self.invalidate();
        if topic.is_empty() {
            return;
        }

        let generation = self.generation;
        let topic = topic.to_string();
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        self.pending = true;
        tracing::debug!(generation, topic = %topic, "requesting survey questions");

        tokio::spawn(async move {
            let result = source.fetch_questions(&topic).await;
            // Receiver only goes away on shutdown
            let _ = tx.send(FetchResult {
                generation,
                topic,
                result,
            });
        });
    }

    /// Drop interest in every request made so far
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.pending = false;
    }

    /// Decide what a finished fetch means for the displayed questions
    pub fn accept(&mut self, finished: FetchResult) -> Option<QuestionUpdate> {
        if finished.generation != self.generation {
            tracing::debug!(
                generation = finished.generation,
                current = self.generation,
                topic = %finished.topic,
                "discarding stale question response"
            );
            return None;
        }

        self.pending = false;
        match finished.result {
            Ok(questions) => Some(QuestionUpdate::Loaded(questions)),
            Err(err) => {
                tracing::warn!(topic = %finished.topic, error = %err, "error fetching additional questions");
                Some(QuestionUpdate::Failed)
            }
        }
    }

    /// Apply every finished fetch without blocking; returns the last relevant update
    pub fn drain(&mut self) -> Option<QuestionUpdate> {
        let mut update = None;
        while let Ok(finished) = self.rx.try_recv() {
            if let Some(next) = self.accept(finished) {
                update = Some(next);
            }
        }
        update
    }

    /// Wait for the next finished fetch
    #[cfg(test)]
    pub async fn recv(&mut self) -> Option<FetchResult> {
        self.rx.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::traits::MockQuestionSource;
    use async_trait::async_trait;
    use std::time::Duration;

    /// Answers "Technology" slowly and everything else immediately
    struct SlowTechnology;

    #[async_trait]
    impl QuestionSource for SlowTechnology {
        async fn fetch_questions(&self, topic: &str) -> Result<Vec<String>, FetchError> {
            if topic == "Technology" {
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
            Ok(vec![format!("{topic} question")])
        }
    }

    fn mock_returning(questions: Vec<&'static str>) -> Arc<dyn QuestionSource> {
        let mut source = MockQuestionSource::new();
        source.expect_fetch_questions().returning(move |_| {
            Ok(questions.iter().map(|q| q.to_string()).collect())
        });
        Arc::new(source)
    }

    #[tokio::test]
    async fn test_latest_request_is_applied() {
        let mut fetcher = QuestionFetcher::new(mock_returning(vec!["Q1", "Q2"]));
        fetcher.request("Health");
        assert!(fetcher.is_pending());

        let finished = fetcher.recv().await.unwrap();
        assert_eq!(finished.topic, "Health");
        assert_eq!(
            fetcher.accept(finished),
            Some(QuestionUpdate::Loaded(vec!["Q1".to_string(), "Q2".to_string()]))
        );
        assert!(!fetcher.is_pending());
    }

    #[tokio::test]
    async fn test_slow_stale_response_is_dropped() {
        let mut fetcher = QuestionFetcher::new(Arc::new(SlowTechnology));
        fetcher.request("Technology");
        fetcher.request("Health");

        let first = fetcher.recv().await.unwrap();
        assert_eq!(first.topic, "Health");
        assert_eq!(
            fetcher.accept(first),
            Some(QuestionUpdate::Loaded(vec!["Health question".to_string()]))
        );

        let late = fetcher.recv().await.unwrap();
        assert_eq!(late.topic, "Technology");
        assert_eq!(fetcher.accept(late), None);
    }

    #[tokio::test]
    async fn test_empty_topic_invalidates_in_flight_request() {
        let mut fetcher = QuestionFetcher::new(mock_returning(vec!["Q1"]));
        fetcher.request("Education");
        fetcher.request("");
        assert!(!fetcher.is_pending());

        let finished = fetcher.recv().await.unwrap();
        assert_eq!(fetcher.accept(finished), None);
    }

    #[tokio::test]
    async fn test_failure_reports_failed() {
        let mut source = MockQuestionSource::new();
        source
            .expect_fetch_questions()
            .withf(|topic| topic == "Health")
            .times(1)
            .returning(|_| Err(FetchError::Status(reqwest::StatusCode::NOT_FOUND)));
        let mut fetcher = QuestionFetcher::new(Arc::new(source));

        fetcher.request("Health");
        let finished = fetcher.recv().await.unwrap();
        assert_eq!(fetcher.accept(finished), Some(QuestionUpdate::Failed));
        assert!(!fetcher.is_pending());
    }

    #[tokio::test]
    async fn test_drain_without_results_is_none() {
        let mut fetcher = QuestionFetcher::new(mock_returning(vec![]));
        assert_eq!(fetcher.drain(), None);
    }
}
