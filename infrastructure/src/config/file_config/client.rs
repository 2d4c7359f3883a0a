//! Client configuration from TOML (`[client]` section)

use lyricsmith_domain::{ConfigIssue, ConfigIssueCode, GenerationBackend, Severity};
use serde::{Deserialize, Serialize};

/// How the interactive commands reach the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileClientConfig {
    /// "direct" (call the provider with a local key) or "relay"
    pub backend: String,
    /// Relay endpoint used when `backend = "relay"`
    pub relay_url: String,
}

impl Default for FileClientConfig {
    fn default() -> Self {
        Self {
            backend: GenerationBackend::default().as_str().to_string(),
            relay_url: "http://127.0.0.1:8787/api/generate".to_string(),
        }
    }
}

impl FileClientConfig {
    /// Parse `backend`, falling back to the default on unknown values.
    pub fn parse_backend(&self) -> (GenerationBackend, Option<ConfigIssue>) {
        match self.backend.parse::<GenerationBackend>() {
            Ok(backend) => (backend, None),
            Err(_) => (
                GenerationBackend::default(),
                Some(ConfigIssue {
                    severity: Severity::Error,
                    code: ConfigIssueCode::InvalidEnumValue {
                        field: "client.backend".to_string(),
                        value: self.backend.clone(),
                        valid_values: vec!["direct".to_string(), "relay".to_string()],
                    },
                    message: format!(
                        "client.backend: unknown value '{}' (expected 'direct' or 'relay')",
                        self.backend
                    ),
                }),
            ),
        }
    }
}
