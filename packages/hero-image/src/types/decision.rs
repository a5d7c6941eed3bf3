//! Filter verdicts and discovery outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a candidate was turned away.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectReason {
    ForbiddenDomain { domain: String },
    ForbiddenExtension { extension: String },
    NonPhotograph { marker: String },
    SubjectMismatch,
    WrongCountry { marker: String },
    GenericKeyword { keyword: String },
    BadAspectRatio { ratio: f64 },
    NotDirectImage,
}

impl RejectReason {
    /// Stable code for log fields and metrics labels.
    pub fn code(&self) -> &'static str {
        match self {
            RejectReason::ForbiddenDomain { .. } => "forbidden_domain",
            RejectReason::ForbiddenExtension { .. } => "forbidden_extension",
            RejectReason::NonPhotograph { .. } => "non_photograph",
            RejectReason::SubjectMismatch => "subject_mismatch",
            RejectReason::WrongCountry { .. } => "wrong_country",
            RejectReason::GenericKeyword { .. } => "generic_keyword",
            RejectReason::BadAspectRatio { .. } => "bad_aspect_ratio",
            RejectReason::NotDirectImage => "not_direct_image",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::ForbiddenDomain { domain } => write!(f, "forbidden domain {}", domain),
            RejectReason::ForbiddenExtension { extension } => {
                write!(f, "forbidden extension .{}", extension)
            }
            RejectReason::NonPhotograph { marker } => {
                write!(f, "non-photograph marker \"{}\"", marker)
            }
            RejectReason::SubjectMismatch => f.write_str("subject not mentioned"),
            RejectReason::WrongCountry { marker } => {
                write!(f, "mentions \"{}\" but not the expected country", marker)
            }
            RejectReason::GenericKeyword { keyword } => {
                write!(f, "generic keyword \"{}\"", keyword)
            }
            RejectReason::BadAspectRatio { ratio } => write!(f, "aspect ratio {:.2}", ratio),
            RejectReason::NotDirectImage => f.write_str("not a direct image"),
        }
    }
}

/// Outcome of running a candidate through the filter chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum AcceptanceDecision {
    Accepted,
    Rejected(RejectReason),
}

impl AcceptanceDecision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, AcceptanceDecision::Accepted)
    }

    pub fn reason(&self) -> Option<&RejectReason> {
        match self {
            AcceptanceDecision::Accepted => None,
            AcceptanceDecision::Rejected(reason) => Some(reason),
        }
    }
}

impl From<Result<(), RejectReason>> for AcceptanceDecision {
    fn from(result: Result<(), RejectReason>) -> Self {
        match result {
            Ok(()) => AcceptanceDecision::Accepted,
            Err(reason) => AcceptanceDecision::Rejected(reason),
        }
    }
}

/// Terminal output of one discovery call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "url", rename_all = "snake_case")]
pub enum DiscoveryResult {
    Found(String),
    NotFound,
}

impl DiscoveryResult {
    pub fn url(&self) -> Option<&str> {
        match self {
            DiscoveryResult::Found(url) => Some(url),
            DiscoveryResult::NotFound => None,
        }
    }

    pub fn into_url(self) -> Option<String> {
        match self {
            DiscoveryResult::Found(url) => Some(url),
            DiscoveryResult::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, DiscoveryResult::Found(_))
    }
}
