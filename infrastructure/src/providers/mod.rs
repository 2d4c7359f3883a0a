//! Text generator adapters and their construction from configuration.

pub mod gemini;
pub mod relay_client;

use crate::config::{FileConfig, FileProviderConfig};
use gemini::GeminiTextGenerator;
use lyricsmith_application::{GenerationError, TextGenerator};
use lyricsmith_domain::GenerationBackend;
use relay_client::RelayTextGenerator;
use std::sync::Arc;
use tracing::info;

/// Build the direct provider adapter, resolving the API key.
pub fn provider_generator(
    provider: &FileProviderConfig,
) -> Result<GeminiTextGenerator, GenerationError> {
    let api_key = provider
        .resolve_api_key()
        .ok_or_else(|| GenerationError::MissingCredential {
            env_var: provider.api_key_env.clone(),
        })?;

    Ok(
        GeminiTextGenerator::new(&provider.base_url, &provider.model, api_key)
            .with_timeout(provider.timeout()),
    )
}

/// Build the generator the interactive commands should use
pub fn text_generator(config: &FileConfig) -> Result<Arc<dyn TextGenerator>, GenerationError> {
    match config.client.parse_backend().0 {
        GenerationBackend::Direct => {
            let generator = provider_generator(&config.provider)?;
            info!("Using Gemini directly (model: {})", generator.model());
            Ok(Arc::new(generator))
        }
        GenerationBackend::Relay => {
            info!("Using relay at {}", config.client.relay_url);
            Ok(Arc::new(
                RelayTextGenerator::new(config.client.relay_url.trim())
                    .with_timeout(config.provider.timeout()),
            ))
        }
    }
}

/// Map a reqwest failure to a user-facing transport error
pub(crate) fn map_request_error(error: reqwest::Error) -> GenerationError {
    if error.is_timeout() {
        GenerationError::transport("The request timed out.")
    } else if error.is_connect() {
        GenerationError::transport(format!("Could not connect: {}", error))
    } else {
        GenerationError::transport(format!("Request failed: {}", error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_names_the_variable() {
        let config = FileProviderConfig {
            api_key_env: "LYRICSMITH_TEST_NEVER_SET".to_string(),
            ..Default::default()
        };

        let error = provider_generator(&config).err().unwrap();
        assert_eq!(
            error,
            GenerationError::MissingCredential {
                env_var: "LYRICSMITH_TEST_NEVER_SET".to_string()
            }
        );
    }

    #[test]
    fn test_relay_backend_needs_no_key() {
        let mut config = FileConfig::default();
        config.client.backend = "relay".to_string();
        config.provider.api_key_env = "LYRICSMITH_TEST_NEVER_SET".to_string();

        let generator = text_generator(&config).unwrap();
        assert_eq!(generator.name(), "relay");
    }

    #[test]
    fn test_direct_backend_without_key_fails() {
        let mut config = FileConfig::default();
        config.provider.api_key_env = "LYRICSMITH_TEST_NEVER_SET".to_string();

        assert!(matches!(
            text_generator(&config),
            Err(GenerationError::MissingCredential { .. })
        ));
    }
}
