//! Google Programmable Search image searcher.

use async_trait::async_trait;
use google_cse_client::{CseClient, CseError, ImageSearchParams, ImageType, SafeSearch, SearchItem};
use std::time::Duration;

use crate::error::{SearchError, SearchResult};
use crate::security::SearchCredentials;
use crate::traits::searcher::{ImageQuery, ImageSearcher};
use crate::types::{candidate::Candidate, config::ImageSize};

/// Image searcher backed by the Custom Search JSON API.
///
/// Every request is bounded by `google_cse_client::DEFAULT_TIMEOUT` unless
/// `with_timeout` says otherwise, so a silent provider surfaces as a failed
/// strategy instead of a stalled discovery.
pub struct GoogleImageSearcher {
    client: CseClient,
}

impl GoogleImageSearcher {
    pub fn new(credentials: &SearchCredentials) -> Self {
        let mut client = CseClient::new(
            credentials.api_key.expose().to_string(),
            credentials.engine_id.clone(),
        );
        if let Some(base_url) = &credentials.base_url {
            client = client.with_base_url(base_url.clone());
        }
        Self { client }
    }

    /// Use a preconfigured HTTP client (proxies, TLS settings).
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.client = self.client.with_http_client(http);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = self.client.with_timeout(timeout);
        self
    }
}

fn to_params(query: &ImageQuery) -> ImageSearchParams {
    let size = match query.size {
        ImageSize::Medium => google_cse_client::ImageSize::Medium,
        ImageSize::Large => google_cse_client::ImageSize::Large,
        ImageSize::Huge => google_cse_client::ImageSize::Huge,
    };

    let mut params = ImageSearchParams::new(query.query.clone())
        .with_num(u32::try_from(query.limit).unwrap_or(u32::MAX))
        .with_size(size)
        .with_safe(if query.safe_search {
            SafeSearch::Active
        } else {
            SafeSearch::Off
        });
    if query.photo_only {
        params = params.with_type(ImageType::Photo);
    }
    params
}

fn to_candidate(item: SearchItem) -> Candidate {
    let (source_page_url, width, height) = match item.image {
        Some(image) => (image.context_link, image.width, image.height),
        None => (None, None, None),
    };
    Candidate {
        image_url: item.link,
        source_page_url,
        title: item.title,
        width,
        height,
    }
}

#[async_trait]
impl ImageSearcher for GoogleImageSearcher {
    async fn search_images(&self, query: &ImageQuery) -> SearchResult<Vec<Candidate>> {
        let items = self
            .client
            .search_images(&to_params(query))
            .await
            .map_err(|e| match e {
                CseError::Api { status, message } => SearchError::Api { status, message },
                CseError::Config(_) => SearchError::NotConfigured,
                other => SearchError::Http(Box::new(other)),
            })?;

        Ok(items
            .into_iter()
            .take(query.limit)
            .map(to_candidate)
            .collect())
    }
}
