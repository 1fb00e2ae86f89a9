//! `[probe]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [probe]
//! base_url = "http://localhost:5173/"   # Base for relative asset locations
//! timeout = 10                          # HEAD request timeout in seconds (0 = none)
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Origin the dashboard's public assets are served from.
    pub base_url: String,

    /// Timeout for each HEAD request in seconds.
    pub timeout: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5173/".to_string(),
            timeout: 10,
        }
    }
}

impl ProbeConfig {
    /// Parsed base URL. Only `http` and `https` are accepted.
    pub fn base(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.base_url).map_err(|e| {
            ConfigError::Validation(format!("probe.base_url `{}`: {e}", self.base_url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Validation(format!(
                "probe.base_url `{}` must be an http(s) URL",
                self.base_url
            )));
        }
        Ok(url)
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout > 0).then(|| Duration::from_secs(self.timeout))
    }
}
