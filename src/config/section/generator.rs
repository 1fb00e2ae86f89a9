//! `[generator]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [generator]
//! endpoint = "https://generativelanguage.googleapis.com/v1beta"
//! model = "gemini-3-pro-preview"
//! api_key_env = "API_KEY"     # Environment variable holding the key
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub endpoint: String,
    pub model: String,
    /// Name of the environment variable the API key is read from.
    pub api_key_env: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-3-pro-preview".to_string(),
            api_key_env: "API_KEY".to_string(),
        }
    }
}
