//! Error types for the relay HTTP boundary

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use lyricsmith_application::GenerationError;
use serde_json::json;
use thiserror::Error;

/// Errors returned to relay callers.
///
/// The `Display` text is exactly what the caller sees. Provider details stay
/// in the server log.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Prompt is required")]
    MissingPrompt,

    #[error("Server configuration error: API key is missing.")]
    MissingCredential,

    #[error("Failed to generate content from the AI model.")]
    Provider(#[source] GenerationError),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            RelayError::MissingPrompt => StatusCode::BAD_REQUEST,
            RelayError::MissingCredential | RelayError::Provider(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        match self {
            RelayError::MethodNotAllowed => (self.status(), self.to_string()).into_response(),
            _ => (self.status(), Json(json!({ "error": self.to_string() }))).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_hides_details() {
        let error = RelayError::Provider(GenerationError::transport("quota exceeded for key abc"));
        assert_eq!(error.to_string(), "Failed to generate content from the AI model.");
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_statuses() {
        assert_eq!(RelayError::MissingPrompt.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            RelayError::MethodNotAllowed.status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            RelayError::MissingCredential.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
