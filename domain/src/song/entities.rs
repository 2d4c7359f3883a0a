//! Song entities: generation results and session history entries

use super::request::GenerationMode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Normalized text returned by one successful generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Never empty: an empty generation is a failure, not a result.
    pub text: String,
    pub mode: GenerationMode,
    pub timestamp: DateTime<Utc>,
}

impl GenerationResult {
    pub fn new(text: impl Into<String>, mode: GenerationMode) -> Self {
        Self {
            text: text.into(),
            mode,
            timestamp: Utc::now(),
        }
    }
}

/// Identifier of a history entry, unique within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HistoryId(pub u64);

impl std::fmt::Display for HistoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A completed generation remembered by the session (Entity)
///
/// Entries are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: HistoryId,
    /// Artist name, suffixed with the transformation kind for remixes
    pub label: String,
    pub topic: String,
    pub lyrics: String,
}

impl HistoryEntry {
    pub fn new(
        id: HistoryId,
        artist: &str,
        mode: GenerationMode,
        topic: impl Into<String>,
        lyrics: impl Into<String>,
    ) -> Self {
        Self {
            id,
            label: history_label(artist, mode),
            topic: topic.into(),
            lyrics: lyrics.into(),
        }
    }

    /// The bare artist name recovered from the label
    pub fn artist(&self) -> &str {
        strip_history_suffix(&self.label)
    }
}

/// Build a history label such as `"Drake (Hook Remix)"`
pub fn history_label(artist: &str, mode: GenerationMode) -> String {
    match mode.history_suffix() {
        Some(suffix) => format!("{} {}", artist, suffix),
        None => artist.to_string(),
    }
}

/// Remove one known transformation suffix from the end of a label
pub fn strip_history_suffix(label: &str) -> &str {
    [
        GenerationMode::Remix,
        GenerationMode::HookRemix,
        GenerationMode::Enhance,
    ]
    .iter()
    .filter_map(|mode| mode.history_suffix())
    .find_map(|suffix| label.strip_suffix(suffix)?.strip_suffix(' '))
    .unwrap_or(label)
}
