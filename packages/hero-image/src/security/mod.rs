//! Credential handling and SSRF protection.

pub mod credentials;
pub mod guard;

pub use credentials::{SearchCredentials, SecretString};
pub use guard::UrlGuard;
