//! Configuration file loading for lyricsmith
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `LYRICSMITH_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./lyricsmith.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/lyricsmith/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_MODEL, FileClientConfig, FileConfig,
    FileLoggingConfig, FileProviderConfig, FileRelayConfig, FileSessionConfig,
};
pub use loader::{ConfigLoader, ENV_PREFIX, PROJECT_CONFIG_FILE};
