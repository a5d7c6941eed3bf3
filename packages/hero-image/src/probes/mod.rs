//! Content probe implementations.

pub mod http;

pub use http::HttpProbe;
