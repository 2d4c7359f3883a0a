//! Session configuration from TOML (`[session]` section)

use serde::{Deserialize, Serialize};

/// Raw session configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSessionConfig {
    /// Whether new songs and hook remixes start with production cues enabled
    pub include_production_cues: bool,
    /// Show a spinner while requests are in flight
    pub show_progress: bool,
    /// Path to the REPL line history file
    pub history_file: Option<String>,
}

impl Default for FileSessionConfig {
    fn default() -> Self {
        Self {
            include_production_cues: true,
            show_progress: true,
            history_file: None,
        }
    }
}
