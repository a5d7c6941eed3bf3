//! Header-only content probe.
//!
//! The only network capability the URL classifier needs: given a URL, report
//! the declared content type after redirects, or fail.

use async_trait::async_trait;

use crate::error::ProbeResult;

/// Probe a URL for its declared content type without fetching the body.
///
/// `Ok(None)` means the server answered but declared no content type.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentProbe: Send + Sync {
    async fn content_type(&self, url: &str) -> ProbeResult<Option<String>>;
}
