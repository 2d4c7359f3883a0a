//! Checks on annotated (enhanced) lyrics
//!
//! An enhancement may only insert `[production cues]` and `(backing vocals)`.
//! Once those insertions are removed, every original lyric line has to be
//! found again, unchanged and in its original order.

/// Remove bracketed and parenthesized segments and collapse whitespace
fn strip_annotations(line: &str) -> String {
    let mut kept = String::with_capacity(line.len());
    let mut depth = 0usize;
    for c in line.chars() {
        match c {
            '[' | '(' => depth += 1,
            ']' | ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => kept.push(c),
            _ => {}
        }
    }
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn lyric_lines(text: &str) -> impl Iterator<Item = String> + '_ {
    text.lines()
        .map(strip_annotations)
        .filter(|line| !line.is_empty())
}

/// True when every lyric line of `original` reappears in `enhanced`, in order.
///
/// Lines made only of annotations are skipped on both sides, so inserted
/// ad-lib lines are allowed.
pub fn preserves_original_lines(original: &str, enhanced: &str) -> bool {
    let mut enhanced = lyric_lines(enhanced);
    lyric_lines(original).all(|line| enhanced.any(|candidate| candidate == line))
}
