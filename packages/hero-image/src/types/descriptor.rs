//! Entity descriptors: the immutable input to discovery.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DiscoveryError, Result};

/// The category of entity being illustrated.
///
/// Decides which query strategies and keyword rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectKind {
    University,
    City,
}

impl SubjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubjectKind::University => "university",
            SubjectKind::City => "city",
        }
    }
}

impl fmt::Display for SubjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubjectKind {
    type Err = DiscoveryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "university" => Ok(SubjectKind::University),
            "city" => Ok(SubjectKind::City),
            other => Err(DiscoveryError::UnknownSubjectKind(other.to_string())),
        }
    }
}

/// Who or what to find a hero image for.
///
/// Construction validates that the name is non-blank, so every descriptor in
/// circulation is usable for discovery without further checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDescriptor")]
pub struct EntityDescriptor {
    name: String,
    subject_kind: SubjectKind,
    region: Option<String>,
    country: Option<String>,
}

#[derive(Deserialize)]
struct RawDescriptor {
    name: String,
    subject_kind: SubjectKind,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    country: Option<String>,
}

impl TryFrom<RawDescriptor> for EntityDescriptor {
    type Error = DiscoveryError;

    fn try_from(raw: RawDescriptor) -> Result<Self> {
        Self::new(raw.name, raw.subject_kind)
            .map(|d| d.with_region_opt(raw.region).with_country_opt(raw.country))
    }
}

impl EntityDescriptor {
    /// Create a descriptor. Fails when the name is empty or whitespace.
    pub fn new(name: impl Into<String>, subject_kind: SubjectKind) -> Result<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DiscoveryError::InvalidDescriptor {
                reason: "name must not be empty".to_string(),
            });
        }

        Ok(Self {
            name,
            subject_kind,
            region: None,
            country: None,
        })
    }

    pub fn university(name: impl Into<String>) -> Result<Self> {
        Self::new(name, SubjectKind::University)
    }

    pub fn city(name: impl Into<String>) -> Result<Self> {
        Self::new(name, SubjectKind::City)
    }

    pub fn with_region(self, region: impl Into<String>) -> Self {
        self.with_region_opt(Some(region.into()))
    }

    pub fn with_country(self, country: impl Into<String>) -> Self {
        self.with_country_opt(Some(country.into()))
    }

    /// Set the region; blank strings count as absent.
    pub fn with_region_opt(mut self, region: Option<String>) -> Self {
        self.region = non_blank(region);
        self
    }

    /// Set the country; blank strings count as absent.
    pub fn with_country_opt(mut self, country: Option<String>) -> Self {
        self.country = non_blank(country);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn subject_kind(&self) -> SubjectKind {
        self.subject_kind
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
