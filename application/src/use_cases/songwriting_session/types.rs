//! Public types for the songwriting session: errors, busy flags, snapshots.

use crate::ports::text_generator::GenerationError;
use crate::use_cases::analyze_style::AnalyzeStyleError;
use lyricsmith_domain::{
    DomainError, GenerationMode, HistoryEntry, HistoryId, StyleAnalysis, StyleDescriptor,
};
use thiserror::Error;

/// Errors that can occur during a session action
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Preconditions failed; no request was sent
    #[error(transparent)]
    Validation(#[from] DomainError),

    /// Another primary generation has not resolved yet
    #[error("{} is still in progress. Please wait for it to finish.", .0.display_name())]
    ActionInFlight(GenerationMode),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// The enhanced text dropped, reworded or reordered original lines
    #[error("The enhanced lyrics changed the original lines. Keeping the current lyrics.")]
    EnhanceAlteredLyrics,

    /// The lyrics changed while this result was being produced
    #[error("Result discarded: the lyrics changed while it was being produced")]
    StaleResult,

    #[error("No history entry {0}")]
    HistoryEntryNotFound(HistoryId),
}

impl From<AnalyzeStyleError> for SessionError {
    fn from(error: AnalyzeStyleError) -> Self {
        match error {
            AnalyzeStyleError::Domain(e) => SessionError::Validation(e),
            AnalyzeStyleError::Generation(e) => SessionError::Generation(e),
        }
    }
}

/// Which actions currently have a request outstanding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BusyFlags {
    pub new_song: bool,
    pub remix: bool,
    pub hook_remix: bool,
    pub enhance: bool,
    /// Background style derivation for the current lyrics
    pub style: bool,
    /// Standalone style analysis
    pub analysis: bool,
}

impl BusyFlags {
    /// The primary action in flight, if any
    pub fn primary(&self) -> Option<GenerationMode> {
        if self.new_song {
            Some(GenerationMode::NewSong)
        } else if self.remix {
            Some(GenerationMode::Remix)
        } else if self.hook_remix {
            Some(GenerationMode::HookRemix)
        } else if self.enhance {
            Some(GenerationMode::Enhance)
        } else {
            None
        }
    }

    pub fn any(&self) -> bool {
        self.primary().is_some() || self.style || self.analysis
    }

    pub(super) fn set(&mut self, mode: GenerationMode, busy: bool) {
        match mode {
            GenerationMode::NewSong => self.new_song = busy,
            GenerationMode::Remix => self.remix = busy,
            GenerationMode::HookRemix => self.hook_remix = busy,
            GenerationMode::Enhance => self.enhance = busy,
            GenerationMode::StyleAnalysis => self.analysis = busy,
        }
    }
}

/// Point-in-time copy of everything a UI renders
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Artist of the lyrics currently shown
    pub artist: String,
    pub topic: String,
    pub lyrics: String,
    /// Style tags derived from the current lyrics
    pub style: Option<StyleDescriptor>,
    /// Result of the last standalone style analysis
    pub analysis: Option<StyleAnalysis>,
    pub busy: BusyFlags,
    /// Message of the most recent failure, cleared when an action starts
    pub error: Option<String>,
    /// Most recent first
    pub history: Vec<HistoryEntry>,
}
