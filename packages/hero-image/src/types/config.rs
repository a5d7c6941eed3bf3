//! Configuration types for discovery and probing.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Minimum size class requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSize {
    Medium,
    #[default]
    Large,
    Huge,
}

/// Configuration for the discovery loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Results requested per strategy query.
    ///
    /// Default: 5.
    pub results_per_query: usize,

    /// Minimum size class requested from the provider.
    pub image_size: ImageSize,

    /// Ask the provider for photographs only.
    pub photo_only: bool,

    /// Ask the provider to apply safe search.
    pub safe_search: bool,

    /// Inclusive lower bound on width / height when dimensions are known.
    ///
    /// Default: 1.2.
    pub min_aspect_ratio: f64,

    /// Inclusive upper bound on width / height when dimensions are known.
    ///
    /// Default: 2.5.
    pub max_aspect_ratio: f64,

    /// Overall budget for one `discover` call (None = unbounded).
    #[serde(default, with = "duration_secs")]
    pub timeout: Option<Duration>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            results_per_query: 5,
            image_size: ImageSize::Large,
            photo_only: true,
            safe_search: true,
            min_aspect_ratio: 1.2,
            max_aspect_ratio: 2.5,
            timeout: None,
        }
    }
}

impl DiscoveryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_results_per_query(mut self, n: usize) -> Self {
        self.results_per_query = n;
        self
    }

    pub fn with_image_size(mut self, size: ImageSize) -> Self {
        self.image_size = size;
        self
    }

    pub fn with_aspect_ratio_bounds(mut self, min: f64, max: f64) -> Self {
        self.min_aspect_ratio = min;
        self.max_aspect_ratio = max;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Configuration for the header-only HTTP probe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Per-probe timeout in seconds.
    pub timeout_secs: u64,

    /// Redirect hops followed before giving up.
    pub max_redirects: usize,

    pub user_agent: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            max_redirects: 5,
            user_agent: "HeroImageBot/1.0".to_string(),
        }
    }
}

impl ProbeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_max_redirects(mut self, hops: usize) -> Self {
        self.max_redirects = hops;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => s.serialize_some(&d.as_secs()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(d)?.map(Duration::from_secs))
    }
}
