use anyhow::{Context, Result};
use dotenvy::dotenv;
use hero_image::{ProbeConfig, SearchCredentials};
use std::env;
use std::time::Duration;

/// CLI configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Search provider credentials. `None` runs in standalone mode.
    pub search: Option<SearchCredentials>,
    pub probe_timeout_secs: u64,
    /// Per-request budget for the search provider
    pub search_timeout: Duration,
    /// Budget for one whole discovery run
    pub discovery_timeout: Duration,
    pub search_requests_per_second: Option<u32>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let search = match non_blank("IMAGE_SEARCH_API_KEY") {
            Some(api_key) => {
                let engine_id = non_blank("IMAGE_SEARCH_ENGINE_ID")
                    .context("IMAGE_SEARCH_ENGINE_ID must be set when IMAGE_SEARCH_API_KEY is")?;
                let credentials = SearchCredentials::new(api_key, engine_id);
                Some(match non_blank("IMAGE_SEARCH_BASE_URL") {
                    Some(url) => credentials.with_base_url(url),
                    None => credentials,
                })
            }
            None => None,
        };

        Ok(Self {
            search,
            probe_timeout_secs: env::var("PROBE_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("PROBE_TIMEOUT_SECS must be a valid number")?,
            search_timeout: env::var("SEARCH_TIMEOUT_SECS")
                .unwrap_or_else(|_| "15".to_string())
                .parse()
                .map(Duration::from_secs)
                .context("SEARCH_TIMEOUT_SECS must be a valid number")?,
            discovery_timeout: env::var("DISCOVERY_TIMEOUT_SECS")
                .unwrap_or_else(|_| "90".to_string())
                .parse()
                .map(Duration::from_secs)
                .context("DISCOVERY_TIMEOUT_SECS must be a valid number")?,
            search_requests_per_second: non_blank("SEARCH_REQUESTS_PER_SECOND")
                .map(|s| s.parse())
                .transpose()
                .context("SEARCH_REQUESTS_PER_SECOND must be a valid number")?,
        })
    }

    pub fn probe_config(&self) -> ProbeConfig {
        ProbeConfig::new().with_timeout_secs(self.probe_timeout_secs)
    }
}

fn non_blank(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
