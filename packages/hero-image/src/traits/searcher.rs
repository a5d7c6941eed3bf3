//! Image searcher trait for candidate discovery.
//!
//! Abstracts over image search providers (Google Programmable Search, Bing,
//! test doubles). The discovery loop treats any error as "no results for this
//! strategy" and moves on.

use async_trait::async_trait;

use crate::error::{SearchError, SearchResult};
use crate::types::{
    candidate::Candidate,
    config::{DiscoveryConfig, ImageSize},
};

/// One provider request: a query plus the constraints every strategy shares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageQuery {
    pub query: String,
    pub limit: usize,
    pub size: ImageSize,
    pub photo_only: bool,
    pub safe_search: bool,
}

impl ImageQuery {
    /// Request with default constraints (5 large photographs, safe search).
    pub fn new(query: impl Into<String>) -> Self {
        Self::from_config(query, &DiscoveryConfig::default())
    }

    pub fn from_config(query: impl Into<String>, config: &DiscoveryConfig) -> Self {
        Self {
            query: query.into(),
            limit: config.results_per_query,
            size: config.image_size,
            photo_only: config.photo_only,
            safe_search: config.safe_search,
        }
    }
}

/// Image search trait.
///
/// Implementations return candidates in provider relevance order; callers
/// never re-sort them.
///
/// # Implementations
///
/// - `GoogleImageSearcher` - Google Custom Search JSON API
/// - `RateLimitedSearcher` - Wrapper that bounds request rate
/// - `NoopImageSearcher` - Always fails with `NotConfigured`, for unconfigured deployments
/// - `MockImageSearcher` - For testing
#[async_trait]
pub trait ImageSearcher: Send + Sync {
    /// Run one query and return at most `query.limit` candidates.
    async fn search_images(&self, query: &ImageQuery) -> SearchResult<Vec<Candidate>>;
}

/// Searcher used when no provider is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopImageSearcher;

#[async_trait]
impl ImageSearcher for NoopImageSearcher {
    async fn search_images(&self, _query: &ImageQuery) -> SearchResult<Vec<Candidate>> {
        tracing::warn!("NoopImageSearcher: search called but no provider is configured");
        Err(SearchError::NotConfigured)
    }
}
