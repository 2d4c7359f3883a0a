//! Gemini provider adapter.
//!
//! Calls the Generative Language API `generateContent` endpoint with the
//! whole prompt as a single text part, then normalizes the answer.

use super::map_request_error;
use async_trait::async_trait;
use lyricsmith_application::{GenerationError, TextGenerator};
use lyricsmith_domain::normalize_model_text;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Direct Gemini text generator holding the API key locally.
pub struct GeminiTextGenerator {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
    timeout: Option<Duration>,
}

impl GeminiTextGenerator {
    /// Create a new Gemini generator.
    ///
    /// * `base_url` - API root, e.g. `https://generativelanguage.googleapis.com`
    /// * `model` - Model identifier, e.g. `gemini-2.5-flash`
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiTextGenerator {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let body = GenerateContentRequest {
            contents: [Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        debug!(model = %self.model, prompt_bytes = prompt.len(), "Sending generateContent request");

        let mut request = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(map_request_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or(body);
            warn!(status = status.as_u16(), "Gemini request failed: {}", detail);
            return Err(GenerationError::transport(format!(
                "Gemini API error ({}): {}",
                status.as_u16(),
                detail.trim()
            )));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            GenerationError::transport(format!("Failed to parse Gemini response: {}", e))
        })?;

        let text = parsed.text();
        debug!(response_bytes = text.len(), "Received generateContent response");

        normalize_model_text(&text).ok_or(GenerationError::EmptyResponse)
    }
}

// ==================== Wire types ====================

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Json, Router,
        http::{HeaderMap, StatusCode, Uri},
        response::IntoResponse,
    };
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Captured {
        path: Option<String>,
        api_key: Option<String>,
        body: Option<Value>,
    }

    /// Serve `reply` for every request and record what was received
    async fn stub_server(status: StatusCode, reply: Value) -> (String, Arc<Mutex<Captured>>) {
        let captured = Arc::new(Mutex::new(Captured::default()));
        let recorder = captured.clone();

        let app = Router::new().fallback(move |uri: Uri, headers: HeaderMap, Json(body): Json<Value>| {
            let recorder = recorder.clone();
            let reply = reply.clone();
            async move {
                let mut captured = recorder.lock().unwrap();
                captured.path = Some(uri.path().to_string());
                captured.api_key = headers
                    .get("x-goog-api-key")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                captured.body = Some(body);
                (status, Json(reply)).into_response()
            }
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}", addr), captured)
    }

    fn candidate(text: &str) -> Value {
        json!({ "candidates": [{ "content": { "parts": [{ "text": text }] } }] })
    }

    #[tokio::test]
    async fn test_generate_sends_prompt_and_key() {
        let (base_url, captured) = stub_server(StatusCode::OK, candidate("Hello")).await;
        let generator = GeminiTextGenerator::new(&base_url, "gemini-2.5-flash", "secret");

        let text = generator.generate("Write a song").await.unwrap();

        assert_eq!(text, "Hello");
        let captured = captured.lock().unwrap();
        assert_eq!(
            captured.path.as_deref(),
            Some("/v1beta/models/gemini-2.5-flash:generateContent")
        );
        assert_eq!(captured.api_key.as_deref(), Some("secret"));
        assert_eq!(
            captured.body,
            Some(json!({ "contents": [{ "parts": [{ "text": "Write a song" }] }] }))
        );
    }

    #[tokio::test]
    async fn test_generate_strips_fence_and_whitespace() {
        let (base_url, _) = stub_server(
            StatusCode::OK,
            candidate("\n```\nVerse one\nVerse two\n```\n"),
        )
        .await;
        let generator = GeminiTextGenerator::new(&base_url, "m", "k");

        assert_eq!(
            generator.generate("p").await.unwrap(),
            "Verse one\nVerse two"
        );
    }

    #[tokio::test]
    async fn test_generate_joins_text_parts() {
        let reply = json!({
            "candidates": [{ "content": { "parts": [{ "text": "Line one\n" }, { "text": "Line two" }] } }]
        });
        let (base_url, _) = stub_server(StatusCode::OK, reply).await;
        let generator = GeminiTextGenerator::new(&base_url, "m", "k");

        assert_eq!(generator.generate("p").await.unwrap(), "Line one\nLine two");
    }

    #[tokio::test]
    async fn test_whitespace_only_response_is_empty() {
        let (base_url, _) = stub_server(StatusCode::OK, candidate("   \n ")).await;
        let generator = GeminiTextGenerator::new(&base_url, "m", "k");

        assert_eq!(
            generator.generate("p").await,
            Err(GenerationError::EmptyResponse)
        );
    }

    #[tokio::test]
    async fn test_missing_candidates_is_empty() {
        let (base_url, _) = stub_server(StatusCode::OK, json!({})).await;
        let generator = GeminiTextGenerator::new(&base_url, "m", "k");

        assert_eq!(
            generator.generate("p").await,
            Err(GenerationError::EmptyResponse)
        );
    }

    #[tokio::test]
    async fn test_error_status_is_transport_error() {
        let (base_url, _) = stub_server(
            StatusCode::BAD_REQUEST,
            json!({ "error": { "code": 400, "message": "API key not valid." } }),
        )
        .await;
        let generator = GeminiTextGenerator::new(&base_url, "m", "bad");

        let error = generator.generate("p").await.unwrap_err();
        assert_eq!(
            error,
            GenerationError::transport("Gemini API error (400): API key not valid.")
        );
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let generator = GeminiTextGenerator::new(format!("http://{}", addr), "m", "k")
            .with_timeout(Some(Duration::from_secs(5)));

        assert!(matches!(
            generator.generate("p").await,
            Err(GenerationError::Transport { .. })
        ));
    }
}
