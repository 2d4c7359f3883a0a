//! Infrastructure layer for lyricsmith
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, the backend relay server, and
//! configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;
pub mod relay;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileClientConfig, FileConfig, FileLoggingConfig, FileProviderConfig,
    FileRelayConfig, FileSessionConfig,
};
pub use logging::JsonlGenerationLogger;
pub use providers::{
    gemini::GeminiTextGenerator, provider_generator, relay_client::RelayTextGenerator,
    text_generator,
};
pub use relay::{RelayError, RelayServer, RelayState, shutdown_signal};
