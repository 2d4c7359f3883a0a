//! Application layer for lyricsmith
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    generation_logger::{GenerationEvent, GenerationLogger, NoGenerationLogger},
    session_observer::{NoSessionObserver, SessionObserver},
    text_generator::{GenerationError, TextGenerator},
};
pub use use_cases::analyze_style::{AnalyzeStyleError, AnalyzeStyleUseCase};
pub use use_cases::songwriting_session::{
    BusyFlags, SessionError, SessionSnapshot, SongwritingSession,
};
