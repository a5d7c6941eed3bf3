//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the hero image library
//! without calling a real search provider or probing real URLs.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::{ProbeError, ProbeResult, SearchError, SearchResult};
use crate::traits::{
    probe::ContentProbe,
    producer::{ProducedRecord, RecordProducer},
    searcher::{ImageQuery, ImageSearcher},
};
use crate::types::{candidate::Candidate, descriptor::SubjectKind};

/// A scripted image searcher.
///
/// Each call pops the next scripted response; once the script runs out every
/// call returns no candidates. Every query is recorded for assertions.
#[derive(Default, Clone)]
pub struct MockImageSearcher {
    script: Arc<RwLock<VecDeque<SearchResult<Vec<Candidate>>>>>,
    queries: Arc<RwLock<Vec<ImageQuery>>>,
}

impl MockImageSearcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response.
    pub fn with_response(self, candidates: Vec<Candidate>) -> Self {
        self.push(Ok(candidates));
        self
    }

    /// Queue a provider failure.
    pub fn with_failure(self, error: SearchError) -> Self {
        self.push(Err(error));
        self
    }

    /// Queue `n` empty responses.
    pub fn with_empty_responses(self, n: usize) -> Self {
        for _ in 0..n {
            self.push(Ok(Vec::new()));
        }
        self
    }

    /// All queries received, in call order.
    pub fn queries(&self) -> Vec<ImageQuery> {
        self.queries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.queries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn push(&self, response: SearchResult<Vec<Candidate>>) {
        self.script
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(response);
    }
}

#[async_trait]
impl ImageSearcher for MockImageSearcher {
    async fn search_images(&self, query: &ImageQuery) -> SearchResult<Vec<Candidate>> {
        self.queries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(query.clone());

        let next = self
            .script
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();

        match next {
            Some(Ok(mut candidates)) => {
                candidates.truncate(query.limit);
                Ok(candidates)
            }
            Some(Err(e)) => Err(e),
            None => Ok(Vec::new()),
        }
    }
}

/// A searcher whose requests never complete. For timeout tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct PendingSearcher;

#[async_trait]
impl ImageSearcher for PendingSearcher {
    async fn search_images(&self, _query: &ImageQuery) -> SearchResult<Vec<Candidate>> {
        std::future::pending().await
    }
}

#[derive(Debug, Clone)]
enum ProbeBehavior {
    ContentType(&'static str),
    Unreachable,
}

/// A content probe that answers every URL the same way.
#[derive(Debug)]
pub struct StaticProbe {
    behavior: ProbeBehavior,
    calls: AtomicUsize,
}

impl StaticProbe {
    /// Every URL declares `content_type`.
    pub fn content_type(content_type: &'static str) -> Self {
        Self {
            behavior: ProbeBehavior::ContentType(content_type),
            calls: AtomicUsize::new(0),
        }
    }

    /// Every probe fails, as if the host were down.
    pub fn unreachable() -> Self {
        Self {
            behavior: ProbeBehavior::Unreachable,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentProbe for StaticProbe {
    async fn content_type(&self, _url: &str) -> ProbeResult<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            ProbeBehavior::ContentType(ct) => Ok(Some(ct.to_string())),
            ProbeBehavior::Unreachable => Err(ProbeError::Status(503)),
        }
    }
}

/// A record producer that returns a fixed record, or always fails.
pub struct StaticRecordProducer {
    record: Option<ProducedRecord>,
    calls: AtomicUsize,
}

impl StaticRecordProducer {
    pub fn new(record: ProducedRecord) -> Self {
        Self {
            record: Some(record),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            record: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordProducer for StaticRecordProducer {
    async fn produce(
        &self,
        _name: &str,
        _kind: SubjectKind,
    ) -> Result<ProducedRecord, Box<dyn std::error::Error + Send + Sync>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.record
            .clone()
            .ok_or_else(|| "record producer unavailable".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_searcher_script_then_empty() {
        let searcher = MockImageSearcher::new()
            .with_failure(SearchError::NotConfigured)
            .with_response(vec![Candidate::new("https://a.example.com/1.jpg")]);
        let q = ImageQuery::new("anything");

        assert!(searcher.search_images(&q).await.is_err());
        assert_eq!(searcher.search_images(&q).await.unwrap().len(), 1);
        assert!(searcher.search_images(&q).await.unwrap().is_empty());
        assert_eq!(searcher.call_count(), 3);
    }

    #[tokio::test]
    async fn test_mock_searcher_respects_limit() {
        let many = (0..8)
            .map(|i| Candidate::new(format!("https://a.example.com/{i}.jpg")))
            .collect();
        let searcher = MockImageSearcher::new().with_response(many);
        let results = searcher.search_images(&ImageQuery::new("q")).await.unwrap();
        assert_eq!(results.len(), 5);
    }

    #[test]
    fn test_pending_searcher_never_resolves() {
        let query = ImageQuery::new("anything");
        let mut fut = tokio_test::task::spawn(PendingSearcher.search_images(&query));
        tokio_test::assert_pending!(fut.poll());
        tokio_test::assert_pending!(fut.poll());
    }

    #[tokio::test]
    async fn test_static_probe_counts_calls() {
        let probe = StaticProbe::content_type("image/png");
        assert_eq!(
            probe.content_type("https://x.example.com").await.unwrap(),
            Some("image/png".into())
        );
        assert!(StaticProbe::unreachable()
            .content_type("https://x.example.com")
            .await
            .is_err());
        assert_eq!(probe.call_count(), 1);
    }
}
