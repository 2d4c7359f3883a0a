//! Relay client adapter.
//!
//! Sends `{"prompt": ...}` to a relay endpoint that holds the provider
//! credential, and reads `{"text": ...}` or `{"error": ...}` back.

use super::map_request_error;
use async_trait::async_trait;
use lyricsmith_application::{GenerationError, TextGenerator};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Text generator that goes through a relay instead of calling the provider.
pub struct RelayTextGenerator {
    client: Client,
    url: String,
    timeout: Option<Duration>,
}

impl RelayTextGenerator {
    /// `url` is the full relay endpoint, e.g. `http://127.0.0.1:8787/api/generate`
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[derive(Serialize)]
struct RelayRequest<'a> {
    prompt: &'a str,
}

#[derive(Deserialize)]
struct RelayReply {
    text: Option<String>,
    error: Option<String>,
}

#[async_trait]
impl TextGenerator for RelayTextGenerator {
    fn name(&self) -> &str {
        "relay"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        debug!(url = %self.url, prompt_bytes = prompt.len(), "Sending prompt to relay");

        let mut request = self.client.post(&self.url).json(&RelayRequest { prompt });
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(map_request_error)?;
        let status = response.status();
        let body = response.text().await.map_err(map_request_error)?;
        let reply = serde_json::from_str::<RelayReply>(&body).ok();

        if !status.is_success() {
            let message = reply
                .and_then(|reply| reply.error)
                .unwrap_or_else(|| format!("Relay returned status {}", status.as_u16()));
            warn!(status = status.as_u16(), "Relay request failed: {}", message);
            return Err(GenerationError::transport(message));
        }

        let reply = reply.ok_or_else(|| {
            GenerationError::transport("Relay returned a malformed response.")
        })?;

        // The relay has already unwrapped any code fence
        match reply.text.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => Ok(text.to_string()),
            _ => Err(GenerationError::EmptyResponse),
        }
    }
}
