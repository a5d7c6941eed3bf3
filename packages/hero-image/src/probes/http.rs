//! HTTP HEAD probe.

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, LOCATION, USER_AGENT};
use reqwest::redirect::Policy;
use tracing::{debug, warn};
use url::Url;

use crate::error::{GuardError, ProbeError, ProbeResult};
use crate::security::UrlGuard;
use crate::traits::probe::ContentProbe;
use crate::types::config::ProbeConfig;

/// Content probe that issues `HEAD` requests.
///
/// Redirects are followed here rather than inside reqwest so that every hop
/// is resolved and checked by the SSRF guard before it is requested.
///
/// # Example
///
/// ```rust,ignore
/// use hero_image::{HttpProbe, UrlClassifier};
///
/// let classifier = UrlClassifier::new(HttpProbe::new()?);
/// assert!(classifier.is_direct_image("https://example.com/campus").await);
/// ```
pub struct HttpProbe {
    client: reqwest::Client,
    guard: UrlGuard,
    user_agent: String,
    max_redirects: usize,
}

impl HttpProbe {
    /// Create a probe with default settings.
    pub fn new() -> ProbeResult<Self> {
        Self::with_config(&ProbeConfig::default())
    }

    pub fn with_config(config: &ProbeConfig) -> ProbeResult<Self> {
        Self::with_guard(config, UrlGuard::new())
    }

    pub fn with_guard(config: &ProbeConfig, guard: UrlGuard) -> ProbeResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .redirect(Policy::none())
            .build()
            .map_err(|e| ProbeError::Http(Box::new(e)))?;

        Ok(Self {
            client,
            guard,
            user_agent: config.user_agent.clone(),
            max_redirects: config.max_redirects,
        })
    }

    async fn head(&self, url: &Url) -> ProbeResult<reqwest::Response> {
        self.client
            .head(url.clone())
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProbeError::Timeout {
                        url: url.to_string(),
                    }
                } else {
                    warn!(url = %url, error = %e, "HEAD probe failed");
                    ProbeError::Http(Box::new(e))
                }
            })
    }
}

#[async_trait]
impl ContentProbe for HttpProbe {
    async fn content_type(&self, url: &str) -> ProbeResult<Option<String>> {
        let mut current = self.guard.check_resolved(url).await?;

        for hop in 0..=self.max_redirects {
            debug!(url = %current, hop, "HEAD probe");
            let response = self.head(&current).await?;
            let status = response.status();

            if status.is_redirection() {
                let location = response
                    .headers()
                    .get(LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .ok_or(ProbeError::Status(status.as_u16()))?;
                let next = current.join(location).map_err(GuardError::from)?;
                current = self.guard.check_resolved(next.as_str()).await?;
                continue;
            }

            if !status.is_success() {
                return Err(ProbeError::Status(status.as_u16()));
            }

            return Ok(response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string()));
        }

        Err(ProbeError::TooManyRedirects {
            url: url.to_string(),
        })
    }
}
