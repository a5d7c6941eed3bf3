//! Core trait abstractions for the hero image library.
//!
//! These traits define the interfaces that applications implement
//! to provide image search, content probing, and record production.

pub mod probe;
pub mod producer;
pub mod searcher;
