//! Hero Image Discovery Library
//!
//! Finds one representative photograph for a named entity (a university or a
//! city) by running a fixed sequence of image search queries and screening
//! every candidate through a provenance pipeline. Only URLs that serve raster
//! image bytes are ever returned.
//!
//! # Design Philosophy
//!
//! **"No image beats a wrong image"**
//!
//! - First acceptable candidate wins; provider order is trusted
//! - Cheap text checks before any network probe
//! - Anything unverifiable is rejected
//! - Provider and probe failures degrade to "not found", never to errors
//!
//! # Usage
//!
//! ```rust,ignore
//! use hero_image::{EntityDescriptor, ImageDiscovery, HttpProbe};
//! use hero_image::testing::MockImageSearcher;
//!
//! let discovery = ImageDiscovery::new(MockImageSearcher::new(), HttpProbe::new()?);
//! let descriptor = EntityDescriptor::university("University of Porto")?
//!     .with_country("Portugal");
//!
//! match discovery.discover(&descriptor).await {
//!     DiscoveryResult::Found(url) => println!("{url}"),
//!     DiscoveryResult::NotFound => println!("no image"),
//! }
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Core trait abstractions (ImageSearcher, ContentProbe, RecordProducer)
//! - [`types`] - Descriptors, candidates, decisions, configuration
//! - [`pipeline`] - Strategies, content filter, discovery and enrichment
//! - [`classifier`] - Direct-image URL classification
//! - [`keywords`] - Blacklists and keyword vocabularies
//! - [`searchers`] - Search provider implementations
//! - [`probes`] - Content probe implementations
//! - [`security`] - Credential handling and SSRF protection
//! - [`testing`] - Mock implementations for testing

pub mod classifier;
pub mod error;
pub mod keywords;
pub mod pipeline;
pub mod probes;
pub mod searchers;
pub mod security;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use classifier::{Evidence, UrlClass, UrlClassifier};
pub use error::{DiscoveryError, GuardError, ProbeError, Result, SearchError};
pub use pipeline::{
    ContentFilter, EnrichedRecord, Enricher, ImageDiscovery, ImageProvenance, SearchStrategy,
    StandaloneValidator, StrategySequencer,
};
pub use probes::HttpProbe;
pub use searchers::{GoogleImageSearcher, ImageSearcherExt, RateLimitedSearcher};
pub use security::{SearchCredentials, SecretString, UrlGuard};
pub use traits::{
    probe::ContentProbe,
    producer::{ProducedRecord, RecordProducer},
    searcher::{ImageQuery, ImageSearcher, NoopImageSearcher},
};
pub use types::{
    candidate::Candidate,
    config::{DiscoveryConfig, ImageSize, ProbeConfig},
    decision::{AcceptanceDecision, DiscoveryResult, RejectReason},
    descriptor::{EntityDescriptor, SubjectKind},
};
