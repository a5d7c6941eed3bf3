//! Typed errors for the hero image library.
//!
//! Uses `thiserror` for library errors (not `anyhow`). Only descriptor
//! validation and record production surface as errors to callers; search and
//! probe failures are absorbed by the discovery loop.

use thiserror::Error;

/// Errors returned to callers of the library.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The entity descriptor violates its invariants
    #[error("invalid entity descriptor: {reason}")]
    InvalidDescriptor { reason: String },

    /// Subject kind string did not name a known kind
    #[error("unknown subject kind: {0}")]
    UnknownSubjectKind(String),

    /// A search strategy was built with a blank label or query
    #[error("invalid search strategy: {reason}")]
    InvalidStrategy { reason: String },

    /// The structured record producer failed
    #[error("record producer error: {0}")]
    Producer(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors from the external image search provider.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Transport failure or undecodable response
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Provider answered with a non-success status
    #[error("provider error {status}: {message}")]
    Api { status: u16, message: String },

    /// No provider credentials are configured
    #[error("image search provider not configured")]
    NotConfigured,
}

/// Errors from a header-only content probe.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// URL refused by the SSRF guard
    #[error("guard refused URL: {0}")]
    Guard(#[from] GuardError),

    /// Transport failure
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Non-success status after redirects
    #[error("unexpected status: {0}")]
    Status(u16),

    /// Probe did not complete in time
    #[error("probe timed out: {url}")]
    Timeout { url: String },

    /// Redirect chain longer than the configured hop limit
    #[error("too many redirects from {url}")]
    TooManyRedirects { url: String },
}

/// SSRF guard rejections.
#[derive(Debug, Error)]
pub enum GuardError {
    /// URL scheme not allowed (e.g., file://, ftp://)
    #[error("disallowed URL scheme: {0}")]
    DisallowedScheme(String),

    /// Host is blocked (e.g., localhost, metadata endpoints)
    #[error("blocked host: {0}")]
    BlockedHost(String),

    /// IP in blocked CIDR range (e.g., 10.0.0.0/8)
    #[error("blocked IP range: {0}")]
    BlockedCidr(String),

    /// URL has no host
    #[error("URL has no host")]
    NoHost,

    /// Host name did not resolve
    #[error("cannot resolve {host}: {reason}")]
    Unresolvable { host: String, reason: String },

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, DiscoveryError>;

/// Result type alias for provider calls.
pub type SearchResult<T> = std::result::Result<T, SearchError>;

/// Result type alias for probe calls.
pub type ProbeResult<T> = std::result::Result<T, ProbeError>;

/// Result type alias for guard checks.
pub type GuardResult<T> = std::result::Result<T, GuardError>;
