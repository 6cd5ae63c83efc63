//! Application settings.

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};

/// Where the member list is fetched from unless configured otherwise.
pub const DEFAULT_SOURCE_URL: &str =
    "https://geektrust.s3-ap-southeast-1.amazonaws.com/adminui-problem/members.json";

/// Default event loop tick in milliseconds.
pub const DEFAULT_TICK_RATE_MS: u64 = 100;

/// Application-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// URL of the JSON member list.
    pub source_url: String,
    /// Optional timeout for the startup fetch. No timeout when absent.
    pub request_timeout_secs: Option<u64>,
    /// Event loop tick rate in milliseconds.
    pub tick_rate_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            request_timeout_secs: None,
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
        }
    }
}

impl Settings {
    /// Validate these settings.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` with details if validation fails.
    pub fn validate(&self) -> Result<()> {
        if self.source_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "source_url cannot be empty".to_string(),
            ));
        }

        if !self.source_url.starts_with("https://") && !self.source_url.starts_with("http://") {
            return Err(ConfigError::ValidationError(format!(
                "source_url '{}' must start with http:// or https://",
                self.source_url
            )));
        }

        if self.request_timeout_secs == Some(0) {
            return Err(ConfigError::ValidationError(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }

        if self.tick_rate_ms == 0 {
            return Err(ConfigError::ValidationError(
                "tick_rate_ms must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
