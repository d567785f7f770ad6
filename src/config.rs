//! Configuration module
//!
//! This module handles loading and managing trak configuration from TOML files.

pub mod loader;
pub mod schema;

// Re-export public types and functions
pub use schema::{Config, TrackerConfig};
