//! Provider configuration from TOML (`[provider]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_API_KEY_ENV: &str = "API_KEY";

/// Generative model provider configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Model identifier (default: "gemini-2.5-flash").
    pub model: String,
    /// Base URL of the Generative Language API.
    pub base_url: String,
    /// Environment variable holding the API key (default: "API_KEY").
    ///
    /// The key itself never appears in config files.
    pub api_key_env: String,
    /// Per-request timeout in seconds. Unset means no timeout.
    pub timeout_secs: Option<u64>,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            timeout_secs: None,
        }
    }
}

impl FileProviderConfig {
    /// Read the API key from the environment. Blank values count as missing.
    pub fn resolve_api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
