//! Direct-image classification.
//!
//! Decides whether a URL serves image bytes or an HTML page. The URL path is
//! checked first; only ambiguous URLs cost a header-only probe. Anything that
//! cannot be verified counts as not a direct image.

use std::sync::Arc;
use tracing::debug;

use crate::keywords::{DIRECT_IMAGE_EXTENSIONS, VECTOR_EXTENSIONS};
use crate::traits::probe::ContentProbe;

/// How the direct-image verdict was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evidence {
    Extension,
    Probe,
}

/// Detailed classifier verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlClass {
    DirectImage(Evidence),
    VectorImage,
    HtmlPage,
    UnsupportedType(String),
    Unverifiable,
    InvalidUrl,
}

impl UrlClass {
    pub fn is_direct(&self) -> bool {
        matches!(self, UrlClass::DirectImage(_))
    }
}

/// Lowercased file extension of the URL path's last segment.
pub fn path_extension(url: &url::Url) -> Option<String> {
    let segment = url.path_segments()?.last()?;
    let (stem, ext) = segment.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

/// Map a declared content type to a verdict.
pub fn classify_content_type(content_type: &str) -> UrlClass {
    let media_type = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase();

    if media_type.starts_with("image/svg") {
        UrlClass::VectorImage
    } else if media_type.starts_with("image/") {
        UrlClass::DirectImage(Evidence::Probe)
    } else if media_type.starts_with("text/html") || media_type.starts_with("application/") {
        UrlClass::HtmlPage
    } else {
        UrlClass::UnsupportedType(media_type)
    }
}

/// URL classifier over a content probe.
pub struct UrlClassifier<P: ContentProbe> {
    probe: Arc<P>,
}

impl<P: ContentProbe> Clone for UrlClassifier<P> {
    fn clone(&self) -> Self {
        Self {
            probe: Arc::clone(&self.probe),
        }
    }
}

impl<P: ContentProbe> UrlClassifier<P> {
    pub fn new(probe: P) -> Self {
        Self {
            probe: Arc::new(probe),
        }
    }

    pub fn from_shared(probe: Arc<P>) -> Self {
        Self { probe }
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    /// True only when the URL is confirmed to serve raster image content.
    pub async fn is_direct_image(&self, url: &str) -> bool {
        self.classify(url).await.is_direct()
    }

    pub async fn classify(&self, url: &str) -> UrlClass {
        let Ok(parsed) = url::Url::parse(url.trim()) else {
            debug!(url = %url, "Unparseable URL");
            return UrlClass::InvalidUrl;
        };

        if let Some(ext) = path_extension(&parsed) {
            if VECTOR_EXTENSIONS.contains(&ext.as_str()) {
                return UrlClass::VectorImage;
            }
            if DIRECT_IMAGE_EXTENSIONS.contains(&ext.as_str()) {
                return UrlClass::DirectImage(Evidence::Extension);
            }
        }

        let class = match self.probe.content_type(parsed.as_str()).await {
            Ok(Some(content_type)) => classify_content_type(&content_type),
            Ok(None) => UrlClass::UnsupportedType(String::new()),
            Err(e) => {
                debug!(url = %url, error = %e, "Probe failed");
                UrlClass::Unverifiable
            }
        };
        debug!(url = %url, class = ?class, "Probed URL");
        class
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProbeError;
    use crate::traits::probe::MockContentProbe;

    fn never_probed() -> MockContentProbe {
        let mut probe = MockContentProbe::new();
        probe.expect_content_type().never();
        probe
    }

    fn probe_returning(content_type: &'static str) -> MockContentProbe {
        let mut probe = MockContentProbe::new();
        probe
            .expect_content_type()
            .times(1)
            .returning(move |_| Ok(Some(content_type.to_string())));
        probe
    }

    #[tokio::test]
    async fn test_raster_extensions_accepted_without_probe() {
        let classifier = UrlClassifier::new(never_probed());
        for url in [
            "https://cdn.example.com/campus.jpg",
            "https://cdn.example.com/campus.PNG",
            "https://cdn.example.com/a/b/campus.webp?w=1600",
            "https://cdn.example.com/campus.jpeg#frag",
        ] {
            assert!(classifier.is_direct_image(url).await, "{url}");
        }
    }

    #[tokio::test]
    async fn test_vector_rejected_without_probe() {
        let classifier = UrlClassifier::new(never_probed());
        assert_eq!(
            classifier.classify("https://cdn.example.com/crest.svg").await,
            UrlClass::VectorImage
        );
    }

    #[tokio::test]
    async fn test_html_probe_rejected() {
        let classifier = UrlClassifier::new(probe_returning("text/html; charset=utf-8"));
        assert!(!classifier.is_direct_image("https://example.com/gallery/campus").await);
    }

    #[tokio::test]
    async fn test_image_probe_accepted() {
        let classifier = UrlClassifier::new(probe_returning("image/jpeg"));
        assert_eq!(
            classifier.classify("https://example.com/photo?id=12").await,
            UrlClass::DirectImage(Evidence::Probe)
        );
    }

    #[tokio::test]
    async fn test_application_type_rejected() {
        let classifier = UrlClassifier::new(probe_returning("application/octet-stream"));
        assert_eq!(
            classifier.classify("https://example.com/download").await,
            UrlClass::HtmlPage
        );
    }

    #[tokio::test]
    async fn test_other_type_rejected() {
        let classifier = UrlClassifier::new(probe_returning("video/mp4"));
        assert!(!classifier.is_direct_image("https://example.com/clip").await);
    }

    #[tokio::test]
    async fn test_probe_failure_rejected() {
        let mut probe = MockContentProbe::new();
        probe
            .expect_content_type()
            .returning(|_| Err(ProbeError::Status(404)));
        let classifier = UrlClassifier::new(probe);
        assert_eq!(
            classifier.classify("https://example.com/missing").await,
            UrlClass::Unverifiable
        );
    }

    #[tokio::test]
    async fn test_missing_content_type_rejected() {
        let mut probe = MockContentProbe::new();
        probe.expect_content_type().returning(|_| Ok(None));
        let classifier = UrlClassifier::new(probe);
        assert!(!classifier.is_direct_image("https://example.com/blob").await);
    }

    #[tokio::test]
    async fn test_invalid_url_rejected_without_probe() {
        let classifier = UrlClassifier::new(never_probed());
        assert_eq!(classifier.classify("not a url").await, UrlClass::InvalidUrl);
    }

    #[test]
    fn test_path_extension() {
        let url = url::Url::parse("https://a.example/x/y/photo.final.JPG?s=1").unwrap();
        assert_eq!(path_extension(&url).as_deref(), Some("jpg"));

        let bare = url::Url::parse("https://a.example/photo").unwrap();
        assert_eq!(path_extension(&bare), None);

        let dotfile = url::Url::parse("https://a.example/.jpg").unwrap();
        assert_eq!(path_extension(&dotfile), None);
    }

    #[test]
    fn test_classify_content_type() {
        assert_eq!(
            classify_content_type("image/svg+xml"),
            UrlClass::VectorImage
        );
        assert_eq!(
            classify_content_type("IMAGE/WEBP"),
            UrlClass::DirectImage(Evidence::Probe)
        );
        assert_eq!(classify_content_type("text/html"), UrlClass::HtmlPage);
        assert_eq!(
            classify_content_type("text/plain"),
            UrlClass::UnsupportedType("text/plain".to_string())
        );
    }
}
