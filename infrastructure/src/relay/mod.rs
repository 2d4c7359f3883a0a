//! Backend relay: an HTTP server that holds the provider credential.
//!
//! Browser clients POST `{"prompt": "..."}` and get `{"text": "..."}` back
//! without ever seeing the API key. Failures come back as `{"error": "..."}`
//! with a generic message.

mod error;
mod handlers;

pub use error::RelayError;
pub use handlers::RelayState;

use crate::config::{FileProviderConfig, FileRelayConfig};
use crate::providers::provider_generator;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{MethodRouter, get, post},
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Primary generation route
pub const GENERATE_PATH: &str = "/api/generate";

/// Alias matching the serverless function path used by existing frontends
pub const LEGACY_GENERATE_PATH: &str = "/.netlify/functions/gemini-proxy";

impl RelayState {
    /// Resolve the provider credential once at startup.
    ///
    /// A missing key is not fatal: the relay still starts and answers every
    /// generation request with a configuration error.
    pub fn from_config(provider: &FileProviderConfig) -> Self {
        match provider_generator(provider) {
            Ok(generator) => {
                info!("Relay forwarding to model {}", generator.model());
                Self::new(Some(Arc::new(generator)))
            }
            Err(e) => {
                error!("{}; generation requests will fail", e);
                Self::new(None)
            }
        }
    }
}

/// Build the relay router
pub fn router(state: RelayState, allowed_origins: &[String]) -> Router {
    let generate: MethodRouter<RelayState> =
        post(handlers::generate).fallback(handlers::method_not_allowed);

    Router::new()
        .route(GENERATE_PATH, generate.clone())
        .route(LEGACY_GENERATE_PATH, generate)
        .route("/healthz", get(handlers::healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_origin(allow_origin)
}

/// A bound relay ready to serve
pub struct RelayServer {
    listener: TcpListener,
    app: Router,
}

impl RelayServer {
    pub async fn bind(addr: SocketAddr, app: Router) -> std::io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self { listener, app })
    }

    /// Bind using the `[relay]` config section
    pub async fn from_config(
        relay: &FileRelayConfig,
        provider: &FileProviderConfig,
    ) -> std::io::Result<Self> {
        let addr: SocketAddr = relay
            .bind
            .parse()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
        let app = router(RelayState::from_config(provider), &relay.allowed_origins);
        Self::bind(addr, app).await
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serve until `shutdown` resolves, then drain open connections
    pub async fn run<F>(self, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if let Ok(addr) = self.listener.local_addr() {
            info!("Relay listening on http://{}{}", addr, GENERATE_PATH);
        }
        axum::serve(self.listener, self.app)
            .with_graceful_shutdown(shutdown)
            .await?;
        info!("Relay stopped");
        Ok(())
    }
}

/// Resolves on Ctrl-C
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, draining connections...");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::relay_client::RelayTextGenerator;
    use async_trait::async_trait;
    use lyricsmith_application::{GenerationError, TextGenerator};
    use std::sync::Mutex;
    use tokio::sync::oneshot;

    struct StubProvider {
        reply: Result<String, GenerationError>,
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TextGenerator for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply.clone()
        }
    }

    fn stub(reply: Result<&str, GenerationError>) -> Arc<StubProvider> {
        Arc::new(StubProvider {
            reply: reply.map(str::to_string),
            prompts: Mutex::new(Vec::new()),
        })
    }

    /// Start a relay on an ephemeral port; the sender stops it
    async fn start(generator: Option<Arc<dyn TextGenerator>>) -> (String, oneshot::Sender<()>) {
        let app = router(RelayState::new(generator), &[]);
        let server = RelayServer::bind("127.0.0.1:0".parse().unwrap(), app)
            .await
            .unwrap();
        let addr = server.local_addr().unwrap();
        let (tx, rx) = oneshot::channel::<()>();
        tokio::spawn(server.run(async move {
            let _ = rx.await;
        }));
        (format!("http://{}", addr), tx)
    }

    #[tokio::test]
    async fn test_round_trip_through_relay_client() {
        let provider = stub(Ok("Verse one"));
        let (base, _stop) = start(Some(provider.clone())).await;

        let client = RelayTextGenerator::new(format!("{}{}", base, GENERATE_PATH));
        let text = client.generate("Write a song").await.unwrap();

        assert_eq!(text, "Verse one");
        assert_eq!(*provider.prompts.lock().unwrap(), vec!["Write a song"]);
    }

    #[tokio::test]
    async fn test_legacy_path_is_served() {
        let (base, _stop) = start(Some(stub(Ok("Hi")))).await;

        let client = RelayTextGenerator::new(format!("{}{}", base, LEGACY_GENERATE_PATH));
        assert_eq!(client.generate("p").await.unwrap(), "Hi");
    }

    #[tokio::test]
    async fn test_missing_prompt_is_bad_request() {
        let provider = stub(Ok("unused"));
        let (base, _stop) = start(Some(provider.clone())).await;
        let http = reqwest::Client::new();

        for body in ["{}", r#"{"prompt":""}"#, "not json", r#"{"prompt":42}"#] {
            let response = http
                .post(format!("{}{}", base, GENERATE_PATH))
                .header("content-type", "application/json")
                .body(body)
                .send()
                .await
                .unwrap();
            assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST, "body: {}", body);
            let json: serde_json::Value = response.json().await.unwrap();
            assert_eq!(json["error"], "Prompt is required");
        }
        assert!(provider.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_post_is_method_not_allowed() {
        let (base, _stop) = start(Some(stub(Ok("unused")))).await;

        let response = reqwest::get(format!("{}{}", base, GENERATE_PATH))
            .await
            .unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.text().await.unwrap(), "Method Not Allowed");
    }

    #[tokio::test]
    async fn test_missing_credential_is_server_error() {
        let (base, _stop) = start(None).await;

        let client = RelayTextGenerator::new(format!("{}{}", base, GENERATE_PATH));
        assert_eq!(
            client.generate("p").await,
            Err(GenerationError::transport(
                "Server configuration error: API key is missing."
            ))
        );
    }

    #[tokio::test]
    async fn test_missing_prompt_checked_before_credential() {
        let (base, _stop) = start(None).await;

        let response = reqwest::Client::new()
            .post(format!("{}{}", base, GENERATE_PATH))
            .body("{}")
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_provider_failure_is_generic() {
        let (base, _stop) = start(Some(stub(Err(GenerationError::transport(
            "Gemini API error (429): quota exceeded",
        )))))
        .await;

        let client = RelayTextGenerator::new(format!("{}{}", base, GENERATE_PATH));
        assert_eq!(
            client.generate("p").await,
            Err(GenerationError::transport(
                "Failed to generate content from the AI model."
            ))
        );
    }

    #[tokio::test]
    async fn test_empty_provider_response_is_generic_failure() {
        let (base, _stop) = start(Some(stub(Err(GenerationError::EmptyResponse)))).await;

        let client = RelayTextGenerator::new(format!("{}{}", base, GENERATE_PATH));
        assert_eq!(
            client.generate("p").await,
            Err(GenerationError::transport(
                "Failed to generate content from the AI model."
            ))
        );
    }

    #[tokio::test]
    async fn test_healthz() {
        let (base, _stop) = start(None).await;

        let response = reqwest::get(format!("{}/healthz", base)).await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert_eq!(response.text().await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin_by_default() {
        let (base, _stop) = start(None).await;

        let response = reqwest::Client::new()
            .request(reqwest::Method::OPTIONS, format!("{}{}", base, GENERATE_PATH))
            .header("origin", "http://localhost:5173")
            .header("access-control-request-method", "POST")
            .send()
            .await
            .unwrap();

        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
    }
}
