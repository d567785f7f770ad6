//! Configuration schema and type definitions

use serde::{Deserialize, Serialize};

/// Configuration for trak
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub tracker: TrackerConfig,
}

/// Issue tracker connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Base URL of the tracker REST API
    /// Overridden by the TRAK_TRACKER_URL environment variable
    #[serde(default)]
    pub base_url: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: default_timeout(),
        }
    }
}

const fn default_timeout() -> u64 {
    30
}

impl TrackerConfig {
    /// Resolve the effective base URL.
    ///
    /// Priority: `TRAK_TRACKER_URL` environment variable, then the
    /// configured `base_url`.
    #[must_use]
    pub fn resolved_base_url(&self) -> Option<String> {
        std::env::var("TRAK_TRACKER_URL")
            .ok()
            .filter(|url| !url.is_empty())
            .or_else(|| self.base_url.clone())
    }
}
