//! Logging infrastructure: structured generation transcripts.
//!
//! Provides [`JsonlGenerationLogger`], a JSONL file writer that implements
//! the [`GenerationLogger`](lyricsmith_application::GenerationLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlGenerationLogger;
