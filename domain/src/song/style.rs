//! Style descriptors derived from lyrics or from an artist/song name.
//!
//! Two shapes exist:
//!
//! - a single-line comma-separated tag string, derived after lyrics are generated
//! - a structured [`StyleAnalysis`] with four named fields, requested directly
//!
//! Neither is persisted. A tag descriptor lives only as long as the lyrics it
//! was derived from.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Structured sound breakdown of an artist or song
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleAnalysis {
    pub style: String,
    pub production_style: String,
    pub bass_element: String,
    pub studio_production: String,
}

impl StyleAnalysis {
    /// The four fields as `(label, value)` pairs, in display order
    pub fn entries(&self) -> [(&'static str, &str); 4] {
        [
            ("Style", self.style.as_str()),
            ("Production Style", self.production_style.as_str()),
            ("Bass Element", self.bass_element.as_str()),
            ("Studio Production", self.studio_production.as_str()),
        ]
    }

    /// All fields joined into one comma-separated style prompt
    pub fn combined(&self) -> String {
        self.entries()
            .iter()
            .map(|(_, value)| *value)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A compact description of a song's sonic character, derived from lyrics
///
/// `"Indie Pop, Rhythmic acoustic guitar, Warm reverb, Male vocals"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleDescriptor(String);

impl StyleDescriptor {
    /// Build a tag descriptor, collapsing a multi-line answer onto one line
    pub fn tags(text: &str) -> Self {
        let line = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        StyleDescriptor(line)
    }

    /// The descriptor as one comma-separated line
    pub fn as_prompt(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StyleDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_prompt())
    }
}

/// Parse a [`StyleAnalysis`] from model response text.
///
/// Accepts, in order:
/// 1. the whole response as JSON
/// 2. JSON inside a ` ```json ` (or bare ` ``` `) fenced block
/// 3. the outermost `{ ... }` span in the text
pub fn parse_style_analysis(response: &str) -> Result<StyleAnalysis, DomainError> {
    let trimmed = response.trim();

    let candidates = [
        Some(trimmed),
        fenced_block(trimmed),
        brace_span(trimmed),
    ];

    for candidate in candidates.into_iter().flatten() {
        if let Ok(analysis) = serde_json::from_str::<StyleAnalysis>(candidate) {
            return validate_analysis(analysis);
        }
    }

    Err(DomainError::InvalidStyleAnalysis(
        "response did not contain a JSON object with style, productionStyle, bassElement and studioProduction".to_string(),
    ))
}

fn validate_analysis(analysis: StyleAnalysis) -> Result<StyleAnalysis, DomainError> {
    if let Some((label, _)) = analysis
        .entries()
        .iter()
        .find(|(_, value)| value.trim().is_empty())
    {
        return Err(DomainError::InvalidStyleAnalysis(format!(
            "{} is empty",
            label
        )));
    }
    Ok(analysis)
}

fn fenced_block(text: &str) -> Option<&str> {
    let start = text.find("```")?;
    let after_fence = &text[start + 3..];
    // Skip an info string such as `json`
    let body_start = after_fence.find('\n')? + 1;
    let body = &after_fence[body_start..];
    let end = body.find("```")?;
    Some(body[..end].trim())
}

fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}
