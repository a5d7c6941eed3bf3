//! Structured record producer.
//!
//! The generative extraction step lives outside this library. It turns an
//! entity name into a record; the only parts read here are the name, the
//! location fields, and an optional self-supplied image URL.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::types::descriptor::SubjectKind;

/// Record returned by the producer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProducedRecord {
    pub name: String,
    pub region: Option<String>,
    pub country: Option<String>,

    /// Image URL proposed by the producer. Never published unverified.
    pub image_url: Option<String>,

    /// Everything else the producer extracted, passed through untouched.
    #[serde(default)]
    pub fields: serde_json::Value,
}

impl ProducedRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            region: None,
            country: None,
            image_url: None,
            fields: serde_json::Value::Null,
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn with_fields(mut self, fields: serde_json::Value) -> Self {
        self.fields = fields;
        self
    }
}

#[async_trait]
pub trait RecordProducer: Send + Sync {
    async fn produce(
        &self,
        name: &str,
        kind: SubjectKind,
    ) -> Result<ProducedRecord, Box<dyn std::error::Error + Send + Sync>>;
}
