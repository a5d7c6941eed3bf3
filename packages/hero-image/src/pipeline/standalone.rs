//! Degraded-mode validation of a single upstream-supplied image URL.

use tracing::debug;

use crate::classifier::UrlClassifier;
use crate::traits::probe::ContentProbe;

/// Validates one URL with the classifier alone.
///
/// Used when no search provider is configured, so there are no alternative
/// candidates to pick from. A rejected URL comes back as `None`; callers
/// publish nothing rather than an unverified link.
pub struct StandaloneValidator<P: ContentProbe> {
    classifier: UrlClassifier<P>,
}

impl<P: ContentProbe> StandaloneValidator<P> {
    pub fn new(probe: P) -> Self {
        Self::with_classifier(UrlClassifier::new(probe))
    }

    pub fn with_classifier(classifier: UrlClassifier<P>) -> Self {
        Self { classifier }
    }

    pub async fn validate(&self, url: Option<&str>) -> Option<String> {
        let url = url.map(str::trim).filter(|u| !u.is_empty())?;
        let class = self.classifier.classify(url).await;
        if class.is_direct() {
            Some(url.to_string())
        } else {
            debug!(url = %url, class = ?class, "Dropping unverified image URL");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StaticProbe;

    #[tokio::test]
    async fn test_absent_and_blank_urls() {
        let validator = StandaloneValidator::new(StaticProbe::content_type("image/jpeg"));
        assert_eq!(validator.validate(None).await, None);
        assert_eq!(validator.validate(Some("   ")).await, None);
    }

    #[tokio::test]
    async fn test_direct_image_kept() {
        let validator = StandaloneValidator::new(StaticProbe::unreachable());
        assert_eq!(
            validator
                .validate(Some(" https://cdn.example.com/campus.jpg "))
                .await
                .as_deref(),
            Some("https://cdn.example.com/campus.jpg")
        );
    }

    #[tokio::test]
    async fn test_landing_page_dropped() {
        let validator = StandaloneValidator::new(StaticProbe::content_type("text/html"));
        assert_eq!(
            validator
                .validate(Some("https://www.example.edu/about/campus"))
                .await,
            None
        );
    }

    #[tokio::test]
    async fn test_unreachable_dropped() {
        let validator = StandaloneValidator::new(StaticProbe::unreachable());
        assert_eq!(
            validator.validate(Some("https://www.example.edu/photo")).await,
            None
        );
    }
}
