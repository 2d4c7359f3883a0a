//! Generation request value objects

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// The kind of generation a request asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    /// Write a fresh song from artist style and topic
    NewSong,
    /// Fully reimagine the current lyrics, keeping the topic
    Remix,
    /// Rebuild an extended arrangement around the hook
    HookRemix,
    /// Insert production cues and ad-libs without touching the lyrics
    Enhance,
    /// Structured sound breakdown of an artist or song
    StyleAnalysis,
}

impl GenerationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationMode::NewSong => "new_song",
            GenerationMode::Remix => "remix",
            GenerationMode::HookRemix => "hook_remix",
            GenerationMode::Enhance => "enhance",
            GenerationMode::StyleAnalysis => "style_analysis",
        }
    }

    /// Title-case name for display
    pub fn display_name(&self) -> &'static str {
        match self {
            GenerationMode::NewSong => "New Song",
            GenerationMode::Remix => "Remix",
            GenerationMode::HookRemix => "Hook Remix",
            GenerationMode::Enhance => "Enhance",
            GenerationMode::StyleAnalysis => "Style Analysis",
        }
    }

    /// Verb phrase used in user-facing validation messages
    pub fn verb(&self) -> &'static str {
        match self {
            GenerationMode::NewSong => "generate a song",
            GenerationMode::Remix => "remix",
            GenerationMode::HookRemix => "create a hook remix",
            GenerationMode::Enhance => "enhance",
            GenerationMode::StyleAnalysis => "analyze a style",
        }
    }

    /// Label suffix appended to the artist name in history entries
    pub fn history_suffix(&self) -> Option<&'static str> {
        match self {
            GenerationMode::Remix => Some("(Reimagined)"),
            GenerationMode::HookRemix => Some("(Hook Remix)"),
            GenerationMode::Enhance => Some("(Enhanced)"),
            GenerationMode::NewSong | GenerationMode::StyleAnalysis => None,
        }
    }

    /// Whether the mode operates on previously generated lyrics
    pub fn requires_lyrics(&self) -> bool {
        matches!(
            self,
            GenerationMode::Remix | GenerationMode::HookRemix | GenerationMode::Enhance
        )
    }

    /// Whether a successful generation is followed by a style derivation.
    ///
    /// Enhance only adds annotations, so the sound is assumed unchanged.
    pub fn derives_style(&self) -> bool {
        matches!(
            self,
            GenerationMode::NewSong | GenerationMode::Remix | GenerationMode::HookRemix
        )
    }
}

impl std::fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Everything a prompt builder needs for one generation (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub mode: GenerationMode,
    /// Artist whose lyrical style is imitated (or the subject of a style analysis)
    pub artist: String,
    pub topic: String,
    /// Artist or song whose structure is borrowed; falls back to `artist`
    pub structure_source: Option<String>,
    /// Lyrics being transformed. Their presence selects remix wording.
    pub existing_lyrics: Option<String>,
    /// Lyrics whose themes and mood should inspire a new song
    pub inspiration_lyrics: Option<String>,
    pub include_production_cues: bool,
}

impl GenerationRequest {
    /// A fresh song request with production cues enabled
    pub fn new_song(artist: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            mode: GenerationMode::NewSong,
            artist: artist.into(),
            topic: topic.into(),
            structure_source: None,
            existing_lyrics: None,
            inspiration_lyrics: None,
            include_production_cues: true,
        }
    }

    /// A full reimagining of `lyrics`
    pub fn remix(
        artist: impl Into<String>,
        topic: impl Into<String>,
        lyrics: impl Into<String>,
    ) -> Self {
        Self {
            mode: GenerationMode::Remix,
            existing_lyrics: Some(lyrics.into()),
            ..Self::new_song(artist, topic)
        }
    }

    pub fn hook_remix(lyrics: impl Into<String>, include_production_cues: bool) -> Self {
        Self {
            mode: GenerationMode::HookRemix,
            existing_lyrics: Some(lyrics.into()),
            include_production_cues,
            ..Self::new_song("", "")
        }
    }

    pub fn enhance(lyrics: impl Into<String>) -> Self {
        Self {
            mode: GenerationMode::Enhance,
            existing_lyrics: Some(lyrics.into()),
            ..Self::new_song("", "")
        }
    }

    pub fn style_analysis(artist_or_song: impl Into<String>) -> Self {
        Self {
            mode: GenerationMode::StyleAnalysis,
            ..Self::new_song(artist_or_song, "")
        }
    }

    // ==================== Builder Methods ====================

    pub fn with_structure_source(mut self, source: impl Into<String>) -> Self {
        self.structure_source = Some(source.into());
        self
    }

    pub fn with_inspiration(mut self, lyrics: impl Into<String>) -> Self {
        self.inspiration_lyrics = Some(lyrics.into());
        self
    }

    pub fn with_production_cues(mut self, include: bool) -> Self {
        self.include_production_cues = include;
        self
    }

    // ==================== Queries ====================

    /// The structural reference: `structure_source` when non-blank, else the artist
    pub fn structural_inspiration(&self) -> &str {
        match self.structure_source.as_deref() {
            Some(source) if !source.trim().is_empty() => source,
            _ => &self.artist,
        }
    }

    /// Existing lyrics, if present and non-blank
    pub fn lyrics(&self) -> Option<&str> {
        non_blank(self.existing_lyrics.as_deref())
    }

    /// Inspiration lyrics, if present and non-blank
    pub fn inspiration(&self) -> Option<&str> {
        non_blank(self.inspiration_lyrics.as_deref())
    }

    /// Check the preconditions of the request's mode.
    pub fn validate(&self) -> Result<(), DomainError> {
        let has_artist_and_topic = !self.artist.trim().is_empty() && !self.topic.trim().is_empty();

        match self.mode {
            GenerationMode::NewSong | GenerationMode::Remix if !has_artist_and_topic => {
                Err(DomainError::MissingArtistOrTopic)
            }
            GenerationMode::Remix | GenerationMode::HookRemix | GenerationMode::Enhance
                if self.lyrics().is_none() =>
            {
                Err(DomainError::MissingLyrics(self.mode))
            }
            GenerationMode::StyleAnalysis if self.artist.trim().is_empty() => {
                Err(DomainError::MissingStyleSubject)
            }
            _ => Ok(()),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_song_requires_artist_and_topic() {
        assert!(GenerationRequest::new_song("Drake", "summer").validate().is_ok());
        assert_eq!(
            GenerationRequest::new_song("", "summer").validate(),
            Err(DomainError::MissingArtistOrTopic)
        );
        assert_eq!(
            GenerationRequest::new_song("Drake", "   ").validate(),
            Err(DomainError::MissingArtistOrTopic)
        );
    }

    #[test]
    fn test_lyrics_modes_require_lyrics() {
        assert_eq!(
            GenerationRequest::enhance("").validate(),
            Err(DomainError::MissingLyrics(GenerationMode::Enhance))
        );
        assert_eq!(
            GenerationRequest::hook_remix("  \n", true).validate(),
            Err(DomainError::MissingLyrics(GenerationMode::HookRemix))
        );
        assert_eq!(
            GenerationRequest::remix("Drake", "summer", "").validate(),
            Err(DomainError::MissingLyrics(GenerationMode::Remix))
        );
        assert!(GenerationRequest::enhance("line one").validate().is_ok());
        assert!(GenerationRequest::hook_remix("line one", false).validate().is_ok());
    }

    #[test]
    fn test_remix_also_requires_artist_and_topic() {
        assert_eq!(
            GenerationRequest::remix("", "summer", "la la").validate(),
            Err(DomainError::MissingArtistOrTopic)
        );
        assert_eq!(
            GenerationRequest::remix("Drake", " ", "la la").validate(),
            Err(DomainError::MissingArtistOrTopic)
        );
        assert!(
            GenerationRequest::remix("Drake", "summer", "la la")
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_style_analysis_requires_subject() {
        assert_eq!(
            GenerationRequest::style_analysis(" ").validate(),
            Err(DomainError::MissingStyleSubject)
        );
        assert!(GenerationRequest::style_analysis("Tame Impala").validate().is_ok());
    }

    #[test]
    fn test_structural_inspiration_falls_back_to_artist() {
        let request = GenerationRequest::new_song("Adele", "heartbreak");
        assert_eq!(request.structural_inspiration(), "Adele");

        let request = request.with_structure_source("   ");
        assert_eq!(request.structural_inspiration(), "Adele");

        let request = request.with_structure_source("Bohemian Rhapsody");
        assert_eq!(request.structural_inspiration(), "Bohemian Rhapsody");
    }

    #[test]
    fn test_mode_suffixes_and_style_derivation() {
        assert_eq!(GenerationMode::NewSong.history_suffix(), None);
        assert_eq!(GenerationMode::Remix.history_suffix(), Some("(Reimagined)"));
        assert_eq!(GenerationMode::HookRemix.history_suffix(), Some("(Hook Remix)"));
        assert_eq!(GenerationMode::Enhance.history_suffix(), Some("(Enhanced)"));

        assert!(GenerationMode::NewSong.derives_style());
        assert!(GenerationMode::HookRemix.derives_style());
        assert!(!GenerationMode::Enhance.derives_style());
    }
}
