//! Search provider credentials.
//!
//! The API key is held in a `secrecy` box and never appears in `Debug` or
//! `Display` output, so credentials can sit inside logged config structs.

use secrecy::{ExposeSecret, SecretBox};
use std::fmt;

const REDACTED: &str = "[REDACTED]";

/// An API key that formats as `[REDACTED]`.
pub struct SecretString(SecretBox<str>);

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(value.into().into_boxed_str()))
    }

    /// The raw value. Call only at the point of building a provider request.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    pub fn is_blank(&self) -> bool {
        self.expose().trim().is_empty()
    }
}

impl Clone for SecretString {
    fn clone(&self) -> Self {
        Self::new(self.expose())
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

/// Image search provider key, engine id (Programmable Search `cx`) and an
/// optional endpoint override.
#[derive(Clone)]
pub struct SearchCredentials {
    pub api_key: SecretString,
    pub engine_id: String,
    pub base_url: Option<String>,
}

impl SearchCredentials {
    pub fn new(api_key: impl Into<String>, engine_id: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key),
            engine_id: engine_id.into(),
            base_url: None,
        }
    }

    /// Point at a different endpoint (a proxy, or a local stub in tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Both the key and the engine id are present.
    pub fn is_complete(&self) -> bool {
        !self.api_key.is_blank() && !self.engine_id.trim().is_empty()
    }
}

impl fmt::Debug for SearchCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchCredentials")
            .field("api_key", &self.api_key)
            .field("engine_id", &self.engine_id)
            .field("base_url", &self.base_url)
            .finish()
    }
}
