//! Record enrichment: produce a record, then attach a verified hero image.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::classifier::UrlClassifier;
use crate::error::{DiscoveryError, Result};
use crate::pipeline::{discover::ImageDiscovery, standalone::StandaloneValidator};
use crate::traits::{
    probe::ContentProbe,
    producer::{ProducedRecord, RecordProducer},
    searcher::{ImageSearcher, NoopImageSearcher},
};
use crate::types::descriptor::{EntityDescriptor, SubjectKind};

/// Where the published image URL came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageProvenance {
    /// Found and verified by multi-strategy search.
    Search,
    /// Supplied by the producer and confirmed as a direct image.
    Producer,
    /// No verified image.
    Absent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    #[serde(flatten)]
    pub record: ProducedRecord,
    pub image_provenance: ImageProvenance,
}

/// Combines a record producer with image discovery, or with standalone
/// validation when no search provider is configured.
pub struct Enricher<R: RecordProducer, S: ImageSearcher, P: ContentProbe> {
    producer: R,
    discovery: Option<ImageDiscovery<S, P>>,
    validator: StandaloneValidator<P>,
}

impl<R: RecordProducer, S: ImageSearcher, P: ContentProbe> Enricher<R, S, P> {
    pub fn with_search(producer: R, discovery: ImageDiscovery<S, P>) -> Self {
        let validator = StandaloneValidator::with_classifier(discovery.classifier().clone());
        Self {
            producer,
            discovery: Some(discovery),
            validator,
        }
    }

    pub fn is_search_enabled(&self) -> bool {
        self.discovery.is_some()
    }

    /// Produce a record for `name` and replace its image URL with a verified
    /// one (or none). Fails only on an invalid request or producer error.
    pub async fn enrich(&self, name: &str, kind: SubjectKind) -> Result<EnrichedRecord> {
        let requested = EntityDescriptor::new(name, kind)?;

        let mut record = self
            .producer
            .produce(requested.name(), kind)
            .await
            .map_err(DiscoveryError::Producer)?;

        let descriptor = EntityDescriptor::new(record.name.clone(), kind)
            .unwrap_or(requested)
            .with_region_opt(record.region.clone())
            .with_country_opt(record.country.clone());

        let (image_url, provenance) = match &self.discovery {
            Some(discovery) => {
                let found = discovery
                    .discover_with_timeout(&descriptor, None)
                    .await
                    .into_url();
                let provenance = if found.is_some() {
                    ImageProvenance::Search
                } else {
                    ImageProvenance::Absent
                };
                (found, provenance)
            }
            None => {
                let kept = self.validator.validate(record.image_url.as_deref()).await;
                let provenance = if kept.is_some() {
                    ImageProvenance::Producer
                } else {
                    ImageProvenance::Absent
                };
                (kept, provenance)
            }
        };

        info!(
            name = %descriptor.name(),
            provenance = ?provenance,
            "Record enriched"
        );
        record.image_url = image_url;

        Ok(EnrichedRecord {
            record,
            image_provenance: provenance,
        })
    }
}

impl<R: RecordProducer, P: ContentProbe> Enricher<R, NoopImageSearcher, P> {
    /// Degraded mode: validate the producer's own image URL only.
    pub fn standalone(producer: R, probe: P) -> Self {
        Self::standalone_with_classifier(producer, UrlClassifier::new(probe))
    }

    pub fn standalone_with_classifier(producer: R, classifier: UrlClassifier<P>) -> Self {
        Self {
            producer,
            discovery: None,
            validator: StandaloneValidator::with_classifier(classifier),
        }
    }
}
