//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Every section is optional and falls back to its defaults.

mod client;
mod logging;
mod provider;
mod relay;
mod session;

pub use client::FileClientConfig;
pub use logging::FileLoggingConfig;
pub use provider::{DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_MODEL, FileProviderConfig};
pub use relay::FileRelayConfig;
pub use session::FileSessionConfig;

use lyricsmith_domain::{ConfigIssue, ConfigIssueCode, GenerationBackend, Severity};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Model provider settings
    pub provider: FileProviderConfig,
    /// Relay server settings
    pub relay: FileRelayConfig,
    /// Backend selection for the interactive commands
    pub client: FileClientConfig,
    /// Songwriting session defaults
    pub session: FileSessionConfig,
    /// Log destinations
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        for (field, value) in [
            ("provider.model", &self.provider.model),
            ("provider.base_url", &self.provider.base_url),
            ("provider.api_key_env", &self.provider.api_key_env),
        ] {
            if value.trim().is_empty() {
                issues.push(ConfigIssue {
                    severity: Severity::Error,
                    code: ConfigIssueCode::EmptyValue {
                        field: field.to_string(),
                    },
                    message: format!("{} cannot be empty", field),
                });
            }
        }

        if self.provider.timeout_secs == Some(0) {
            issues.push(ConfigIssue {
                severity: Severity::Warning,
                code: ConfigIssueCode::EmptyValue {
                    field: "provider.timeout_secs".to_string(),
                },
                message: "provider.timeout_secs is 0; requests will fail immediately".to_string(),
            });
        }

        if self.relay.bind.parse::<SocketAddr>().is_err() {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                code: ConfigIssueCode::InvalidAddress {
                    field: "relay.bind".to_string(),
                    value: self.relay.bind.clone(),
                },
                message: format!(
                    "relay.bind: '{}' is not a socket address (e.g. 127.0.0.1:8787)",
                    self.relay.bind
                ),
            });
        }

        let (backend, backend_issue) = self.client.parse_backend();
        issues.extend(backend_issue);

        let relay_url = self.client.relay_url.trim();
        if backend == GenerationBackend::Relay
            && !(relay_url.starts_with("http://") || relay_url.starts_with("https://"))
        {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                code: ConfigIssueCode::InvalidAddress {
                    field: "client.relay_url".to_string(),
                    value: self.client.relay_url.clone(),
                },
                message: format!(
                    "client.relay_url: '{}' must be an http(s) URL when client.backend = \"relay\"",
                    self.client.relay_url
                ),
            });
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[provider]
model = "gemini-2.5-pro"
api_key_env = "GEMINI_API_KEY"
timeout_secs = 45

[relay]
bind = "0.0.0.0:9000"
allowed_origins = ["http://localhost:5173"]

[client]
backend = "relay"
relay_url = "http://localhost:9000/api/generate"

[session]
include_production_cues = false

[logging]
transcript = "~/.local/share/lyricsmith/transcript.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.provider.model, "gemini-2.5-pro");
        assert_eq!(config.provider.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.provider.timeout_secs, Some(45));
        assert_eq!(config.provider.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.relay.bind, "0.0.0.0:9000");
        assert_eq!(config.relay.allowed_origins.len(), 1);
        assert_eq!(config.client.parse_backend().0, GenerationBackend::Relay);
        assert!(!config.session.include_production_cues);
        assert!(config.session.show_progress);
        assert!(config.logging.file.is_none());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: FileConfig = toml::from_str("[provider]\ntimeout_secs = 10\n").unwrap();
        assert_eq!(config.provider.model, DEFAULT_MODEL);
        assert_eq!(config.provider.api_key_env, DEFAULT_API_KEY_ENV);
        assert_eq!(config.relay, FileRelayConfig::default());
        assert!(config.session.include_production_cues);
    }

    #[test]
    fn test_validate_default_config() {
        assert!(FileConfig::default().validate().is_empty());
    }

    #[test]
    fn test_validate_reports_every_issue() {
        let mut config = FileConfig::default();
        config.provider.model = " ".to_string();
        config.relay.bind = "localhost".to_string();
        config.client.backend = "relay".to_string();
        config.client.relay_url = "ftp://example.com".to_string();
        config.provider.timeout_secs = Some(0);

        let issues = config.validate();
        let fields: Vec<String> = issues
            .iter()
            .map(|issue| match &issue.code {
                ConfigIssueCode::EmptyValue { field }
                | ConfigIssueCode::InvalidEnumValue { field, .. }
                | ConfigIssueCode::InvalidAddress { field, .. } => field.clone(),
            })
            .collect();

        assert_eq!(
            fields,
            vec![
                "provider.model",
                "provider.timeout_secs",
                "relay.bind",
                "client.relay_url"
            ]
        );
        assert_eq!(issues.iter().filter(|i| i.is_error()).count(), 3);
    }

    #[test]
    fn test_relay_url_only_checked_for_relay_backend() {
        let mut config = FileConfig::default();
        config.client.relay_url = String::new();
        assert!(config.validate().is_empty());
    }
}
