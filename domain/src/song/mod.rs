//! Song domain
//!
//! Requests, results, history entries and style descriptors for one
//! songwriting session.

pub mod annotation;
pub mod entities;
pub mod request;
pub mod style;

pub use annotation::preserves_original_lines;
pub use entities::{
    GenerationResult, HistoryEntry, HistoryId, history_label, strip_history_suffix,
};
pub use request::{GenerationMode, GenerationRequest};
pub use style::{StyleAnalysis, StyleDescriptor, parse_style_analysis};
