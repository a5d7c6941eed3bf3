//! Data types for hero image discovery.

pub mod candidate;
pub mod config;
pub mod decision;
pub mod descriptor;
