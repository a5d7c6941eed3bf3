//! Discovery pipeline: strategies, filter stages, and orchestration.

pub mod discover;
pub mod enrich;
pub mod filter;
pub mod standalone;
pub mod strategy;

pub use discover::ImageDiscovery;
pub use enrich::{EnrichedRecord, Enricher, ImageProvenance};
pub use filter::{ContentFilter, KeywordScore};
pub use standalone::StandaloneValidator;
pub use strategy::{SearchStrategy, StrategySequencer};
