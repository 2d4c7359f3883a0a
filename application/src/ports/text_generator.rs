//! Text generator port
//!
//! Defines the interface for sending one prompt to a text-generation backend.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during a generation call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// The backend answered successfully but with no usable text
    #[error("The API returned an empty response.")]
    EmptyResponse,

    /// Network failure, non-success status, or malformed response body.
    ///
    /// `message` is safe to show to the user.
    #[error("{message}")]
    Transport { message: String },

    /// No provider credential is available
    #[error("API key is missing: set the {env_var} environment variable")]
    MissingCredential { env_var: String },
}

impl GenerationError {
    pub fn transport(message: impl Into<String>) -> Self {
        GenerationError::Transport {
            message: message.into(),
        }
    }
}

/// Backend that turns a prompt into normalized text
///
/// Implementations (adapters) live in the infrastructure layer. Each call makes
/// exactly one outbound request: no retries, no caching. Output is
/// non-deterministic, so calling twice with the same prompt may differ.
///
/// A returned `Ok` string is never empty.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Short backend name for logs (e.g. `"gemini"`, `"relay"`)
    fn name(&self) -> &str;

    /// Send `prompt` as the entire model input and return the normalized text
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_message_is_displayed_verbatim() {
        let error = GenerationError::transport("Failed to generate content from the AI model.");
        assert_eq!(
            error.to_string(),
            "Failed to generate content from the AI model."
        );
    }
}
