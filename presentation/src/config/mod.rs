//! Presentation-level configuration
//!
//! Configuration for the interactive session.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// REPL configuration for the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplConfig {
    /// Show progress indicators
    pub show_progress: bool,
    /// Path to history file
    pub history_file: Option<String>,
    /// Initial state of the production cue toggle
    pub include_production_cues: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
            include_production_cues: true,
        }
    }
}

impl ReplConfig {
    /// Line-editor history location, falling back to the user data directory
    pub fn history_path(&self) -> Option<PathBuf> {
        match &self.history_file {
            Some(path) if !path.trim().is_empty() => Some(PathBuf::from(path)),
            _ => dirs::data_dir().map(|dir| dir.join("lyricsmith").join("history.txt")),
        }
    }
}
