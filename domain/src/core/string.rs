//! String utilities for the domain layer.

const FENCE: &str = "```";

/// Normalize raw model output into plain text.
///
/// Trims surrounding whitespace, then, if the text both starts and ends with
/// a triple-backtick fence, removes exactly those two markers (3 bytes each)
/// and trims again. Stripping happens once; fences nested inside are kept.
///
/// Returns `None` when nothing usable is left, so callers can report an
/// empty response instead of an empty success.
pub fn normalize_model_text(raw: &str) -> Option<String> {
    let mut text = raw.trim();

    if text.len() >= 2 * FENCE.len() && text.starts_with(FENCE) && text.ends_with(FENCE) {
        text = text[FENCE.len()..text.len() - FENCE.len()].trim();
    }

    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Truncate a string to a maximum length with ellipsis (UTF-8 safe)
///
/// Uses byte length for max_len but ensures truncation occurs at valid
/// UTF-8 character boundaries.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let target = max_len.saturating_sub(3);
        let mut end = target.min(s.len());
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}
