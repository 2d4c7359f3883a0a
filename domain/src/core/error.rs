//! Domain error types

use crate::song::request::GenerationMode;
use thiserror::Error;

/// Domain-level errors
///
/// Validation variants are raised before any network call is made: a request
/// that fails them never reaches a text generator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Please provide both an artist and a topic.")]
    MissingArtistOrTopic,

    #[error("Cannot {} without existing lyrics.", .0.verb())]
    MissingLyrics(GenerationMode),

    #[error("Please enter an artist or song name.")]
    MissingStyleSubject,

    #[error("Invalid style analysis: {0}")]
    InvalidStyleAnalysis(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_lyrics_display_names_the_action() {
        let error = DomainError::MissingLyrics(GenerationMode::Enhance);
        assert_eq!(error.to_string(), "Cannot enhance without existing lyrics.");

        let error = DomainError::MissingLyrics(GenerationMode::HookRemix);
        assert_eq!(
            error.to_string(),
            "Cannot create a hook remix without existing lyrics."
        );
    }
}
