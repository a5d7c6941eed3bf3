//! Error types for the Custom Search client.

use thiserror::Error;

/// Result type for Custom Search client operations.
pub type Result<T> = std::result::Result<T, CseError>;

/// Custom Search client errors.
#[derive(Debug, Error)]
pub enum CseError {
    /// Missing API key or engine id
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connection failed, timeout, or undecodable body
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response (quota exceeded, bad key, invalid request)
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },
}

impl CseError {
    /// Quota and rate errors are worth surfacing differently in logs.
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, CseError::Api { status: 429, .. })
    }

    /// The request hit the client's timeout before a response arrived.
    pub fn is_timeout(&self) -> bool {
        matches!(self, CseError::Network(e) if e.is_timeout())
    }
}
