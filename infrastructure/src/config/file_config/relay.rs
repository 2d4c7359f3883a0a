//! Relay server configuration from TOML (`[relay]` section)

use serde::{Deserialize, Serialize};

/// Raw relay configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRelayConfig {
    /// Socket address the relay listens on
    pub bind: String,
    /// Allowed CORS origins. Empty allows any origin.
    pub allowed_origins: Vec<String>,
}

impl Default for FileRelayConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8787".to_string(),
            allowed_origins: Vec::new(),
        }
    }
}
