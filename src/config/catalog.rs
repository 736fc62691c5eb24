//! Catalog import configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Settings for importing launchpads and launches from the public feed.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Base URL of the launch feed API
    #[serde(default = "default_feed_base_url")]
    pub feed_base_url: String,

    /// Timeout for a single feed request in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Import the catalog once before serving requests
    #[serde(default = "default_import_on_startup")]
    pub import_on_startup: bool,

    /// Seconds between background imports; 0 disables the refresher
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
}

impl CatalogConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Interval of the background refresher, `None` when disabled.
    pub fn refresh_interval(&self) -> Option<Duration> {
        (self.refresh_interval_secs > 0).then(|| Duration::from_secs(self.refresh_interval_secs))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.feed_base_url.starts_with("http://") && !self.feed_base_url.starts_with("https://")
        {
            return Err(ValidationError::InvalidFeedUrl);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.refresh_interval_secs > 0 && self.refresh_interval_secs < 60 {
            return Err(ValidationError::RefreshIntervalTooShort);
        }
        Ok(())
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            feed_base_url: default_feed_base_url(),
            timeout_secs: default_timeout(),
            import_on_startup: default_import_on_startup(),
            refresh_interval_secs: default_refresh_interval(),
        }
    }
}

fn default_feed_base_url() -> String {
    "https://api.spacexdata.com/v4".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_import_on_startup() -> bool {
    true
}

fn default_refresh_interval() -> u64 {
    3600
}
