//! Prompt domain
//!
//! Pure template functions that turn a request into the one prompt string sent
//! to the model. Identical input always yields byte-identical output.

mod style;
mod template;

pub use style::StylePromptTemplate;
pub use template::{LYRICS_ONLY_RULES, PRODUCTION_OUTPUT_RULES, SongPromptTemplate};
