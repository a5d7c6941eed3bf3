//! Image discovery: the search, filter, classify loop.

use std::time::Duration;
use tracing::{debug, info, warn};

use crate::classifier::UrlClassifier;
use crate::pipeline::filter::ContentFilter;
use crate::pipeline::strategy::{SearchStrategy, StrategySequencer};
use crate::traits::{
    probe::ContentProbe,
    searcher::{ImageQuery, ImageSearcher},
};
use crate::types::{
    config::DiscoveryConfig,
    decision::{AcceptanceDecision, DiscoveryResult},
    descriptor::EntityDescriptor,
};

/// Finds a verified hero image for an entity.
///
/// Strategies run in priority order and candidates in provider order; the
/// first candidate to clear every stage wins and nothing after it is tried.
/// Provider and probe failures are logged and skipped, never returned.
///
/// # Example
///
/// ```rust,ignore
/// use hero_image::{EntityDescriptor, GoogleImageSearcher, HttpProbe, ImageDiscovery};
///
/// let discovery = ImageDiscovery::new(GoogleImageSearcher::new(&credentials), HttpProbe::new()?);
/// let descriptor = EntityDescriptor::city("Lisbon")?.with_country("Portugal");
///
/// if let Some(url) = discovery.discover(&descriptor).await.into_url() {
///     println!("hero image: {url}");
/// }
/// ```
pub struct ImageDiscovery<S: ImageSearcher, P: ContentProbe> {
    searcher: S,
    classifier: UrlClassifier<P>,
    sequencer: StrategySequencer,
    filter: ContentFilter,
    config: DiscoveryConfig,
}

impl<S: ImageSearcher, P: ContentProbe> ImageDiscovery<S, P> {
    pub fn new(searcher: S, probe: P) -> Self {
        Self::with_classifier(searcher, UrlClassifier::new(probe))
    }

    /// Share a classifier (and its probe) with other components.
    pub fn with_classifier(searcher: S, classifier: UrlClassifier<P>) -> Self {
        let config = DiscoveryConfig::default();
        Self {
            searcher,
            classifier,
            sequencer: StrategySequencer::new(),
            filter: ContentFilter::from_config(&config),
            config,
        }
    }

    pub fn with_config(mut self, config: DiscoveryConfig) -> Self {
        self.filter = ContentFilter::from_config(&config);
        self.config = config;
        self
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    pub fn searcher(&self) -> &S {
        &self.searcher
    }

    pub fn classifier(&self) -> &UrlClassifier<P> {
        &self.classifier
    }

    /// Search for a hero image, trying each strategy until one yields an
    /// acceptable candidate.
    pub async fn discover(&self, descriptor: &EntityDescriptor) -> DiscoveryResult {
        let strategies = self.sequencer.strategies(descriptor);
        info!(
            name = %descriptor.name(),
            kind = %descriptor.subject_kind(),
            strategies = strategies.len(),
            "Starting image discovery"
        );

        for strategy in &strategies {
            if let Some(url) = self.try_strategy(strategy, descriptor).await {
                info!(
                    name = %descriptor.name(),
                    strategy = strategy.label(),
                    url = %url,
                    "Hero image found"
                );
                return DiscoveryResult::Found(url);
            }
        }

        info!(name = %descriptor.name(), "No acceptable image found");
        DiscoveryResult::NotFound
    }

    /// `discover` under a time budget. Uses `config.timeout` when `budget` is
    /// `None`; with neither set the call is unbounded. On expiry the in-flight
    /// requests are dropped and the result is `NotFound`.
    pub async fn discover_with_timeout(
        &self,
        descriptor: &EntityDescriptor,
        budget: Option<Duration>,
    ) -> DiscoveryResult {
        let Some(budget) = budget.or(self.config.timeout) else {
            return self.discover(descriptor).await;
        };

        match tokio::time::timeout(budget, self.discover(descriptor)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    name = %descriptor.name(),
                    budget_ms = budget.as_millis() as u64,
                    "Image discovery timed out"
                );
                DiscoveryResult::NotFound
            }
        }
    }

    async fn try_strategy(
        &self,
        strategy: &SearchStrategy,
        descriptor: &EntityDescriptor,
    ) -> Option<String> {
        let query = ImageQuery::from_config(strategy.query(), &self.config);

        let candidates = match self.searcher.search_images(&query).await {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(
                    strategy = strategy.label(),
                    error = %e,
                    "Image search failed, moving to next strategy"
                );
                return None;
            }
        };
        debug!(
            strategy = strategy.label(),
            count = candidates.len(),
            "Evaluating candidates"
        );

        for candidate in candidates.iter().take(self.config.results_per_query) {
            match self
                .filter
                .evaluate(candidate, descriptor, &self.classifier)
                .await
            {
                AcceptanceDecision::Accepted => return Some(candidate.image_url.clone()),
                AcceptanceDecision::Rejected(reason) => {
                    debug!(
                        strategy = strategy.label(),
                        url = %candidate.image_url,
                        reason = reason.code(),
                        detail = %reason,
                        "Candidate rejected"
                    );
                }
            }
        }

        None
    }
}
