//! Domain layer for lyricsmith
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Generation
//!
//! Every user action is a [`GenerationRequest`] in one of five
//! [`GenerationMode`]s. A prompt template turns the request into a single
//! prompt string; the model's answer comes back as a [`GenerationResult`].
//!
//! ## Session history
//!
//! Successful generations are remembered as immutable [`HistoryEntry`] values,
//! labeled with the artist and the kind of transformation applied.
//!
//! ## Style
//!
//! A [`StyleDescriptor`] summarizes a song's sound as one line of
//! comma-separated tags. A [`StyleAnalysis`] describes an artist or song in
//! four named parts.

pub mod config;
pub mod core;
pub mod prompt;
pub mod song;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, GenerationBackend, Severity};
pub use core::{
    error::DomainError,
    string::{normalize_model_text, truncate},
};
pub use prompt::{LYRICS_ONLY_RULES, PRODUCTION_OUTPUT_RULES, SongPromptTemplate, StylePromptTemplate};
pub use song::{
    GenerationMode, GenerationRequest, GenerationResult, HistoryEntry, HistoryId, StyleAnalysis,
    StyleDescriptor, history_label, parse_style_analysis, preserves_original_lines,
    strip_history_suffix,
};
