//! Image searcher implementations.
//!
//! - `GoogleImageSearcher` - Google Custom Search JSON API (image mode)
//! - `RateLimitedSearcher` - Wrapper that adds rate limiting

pub mod google;
pub mod rate_limited;

pub use google::GoogleImageSearcher;
pub use rate_limited::{ImageSearcherExt, RateLimitedSearcher};
