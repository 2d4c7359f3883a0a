//! Request handlers for the relay

use super::error::RelayError;
use axum::{Json, body::Bytes, extract::State};
use lyricsmith_application::TextGenerator;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Shared state for the relay handlers
#[derive(Clone)]
pub struct RelayState {
    /// `None` when no credential was configured at startup
    generator: Option<Arc<dyn TextGenerator>>,
}

impl RelayState {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self { generator }
    }
}

#[derive(Deserialize)]
struct GenerateRequest {
    prompt: Option<String>,
}

#[derive(Serialize)]
pub(super) struct GenerateResponse {
    text: String,
}

/// `POST /api/generate`: forward one prompt to the provider
pub(super) async fn generate(
    State(state): State<RelayState>,
    body: Bytes,
) -> Result<Json<GenerateResponse>, RelayError> {
    let prompt = serde_json::from_slice::<GenerateRequest>(&body)
        .ok()
        .and_then(|request| request.prompt)
        .filter(|prompt| !prompt.is_empty())
        .ok_or(RelayError::MissingPrompt)?;

    let Some(generator) = state.generator.as_ref() else {
        error!("Provider API key is not set; rejecting request");
        return Err(RelayError::MissingCredential);
    };

    debug!(prompt_bytes = prompt.len(), "Relaying prompt");
    let text = generator.generate(&prompt).await.map_err(|e| {
        error!("Error calling {} provider: {}", generator.name(), e);
        RelayError::Provider(e)
    })?;

    info!(response_bytes = text.len(), "Relayed generation");
    Ok(Json(GenerateResponse { text }))
}

pub(super) async fn method_not_allowed() -> RelayError {
    RelayError::MethodNotAllowed
}

pub(super) async fn healthz() -> &'static str {
    "ok"
}
