//! Pure Google Custom Search JSON API client.
//!
//! A minimal client for the Programmable Search Engine REST API, limited to
//! image search. Supports size, type and safe-search constraints.
//!
//! # Example
//!
//! ```rust,ignore
//! use google_cse_client::{CseClient, ImageSearchParams};
//!
//! let client = CseClient::new("api-key".into(), "engine-id".into());
//!
//! let items = client.search_images(&ImageSearchParams::new("Lisbon skyline")).await?;
//! for item in &items {
//!     println!("{} ({})", item.link, item.title);
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{CseError, Result};
pub use types::{ImageSearchParams, ImageSize, ImageType, SafeSearch, SearchItem, SearchItemImage};

use std::time::Duration;
use types::SearchResponse;

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// Per-request budget unless overridden with `with_timeout`.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// The API caps `num` at 10 per request.
const MAX_RESULTS_PER_REQUEST: u32 = 10;

pub struct CseClient {
    client: reqwest::Client,
    api_key: String,
    engine_id: String,
    base_url: String,
    timeout: Duration,
}

impl CseClient {
    pub fn new(api_key: String, engine_id: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            engine_id,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Bound every request, including reading the response body.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Point the client at a different endpoint (proxies, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Use a preconfigured HTTP client (timeouts, proxies).
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Run one image search. A response without `items` yields an empty list.
    pub async fn search_images(&self, params: &ImageSearchParams) -> Result<Vec<SearchItem>> {
        if self.api_key.is_empty() || self.engine_id.is_empty() {
            return Err(CseError::Config(
                "api key and engine id are required".to_string(),
            ));
        }

        let num = params.num.clamp(1, MAX_RESULTS_PER_REQUEST);
        let mut query: Vec<(&str, String)> = vec![
            ("key", self.api_key.clone()),
            ("cx", self.engine_id.clone()),
            ("q", params.query.clone()),
            ("searchType", "image".to_string()),
            ("num", num.to_string()),
            ("safe", params.safe.as_str().to_string()),
        ];
        if let Some(size) = params.img_size {
            query.push(("imgSize", size.as_str().to_string()));
        }
        if let Some(img_type) = params.img_type {
            query.push(("imgType", img_type.as_str().to_string()));
        }

        tracing::debug!(query = %params.query, num, "Custom Search image request");

        let resp = self
            .client
            .get(&self.base_url)
            .query(&query)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CseError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let search: SearchResponse = resp.json().await?;
        let items = search.items.unwrap_or_default();
        tracing::debug!(count = items.len(), "Custom Search returned items");

        Ok(items)
    }
}

impl std::fmt::Debug for CseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CseClient")
            .field("api_key", &"[REDACTED]")
            .field("engine_id", &self.engine_id)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
