//! Prompt templates for lyric generation and transformation

use crate::song::request::GenerationRequest;

/// Negative constraints shared by every lyrics-only prompt.
///
/// Kept as one block so callers (and tests) can check it is present verbatim.
pub const LYRICS_ONLY_RULES: &str = r#"**CRITICAL OUTPUT RULES:**
- **LYRICS ONLY:** Your entire response must be ONLY the raw song lyrics.
- **NO LABELS:** Do NOT include any structural labels like [Verse], [Chorus], [Intro], [Outro], etc.
- **NO PRODUCTION NOTES:** Do NOT include any bracketed text.
- **NO HARMONIES/AD-LIBS:** Do NOT include any parenthetical text.
- **NO EXTRA TEXT:** Do NOT add any introductory sentences, titles, or concluding remarks."#;

/// Output contract for prompts that ask for production cues
pub const PRODUCTION_OUTPUT_RULES: &str = r#"**OUTPUT FORMAT:**
- Production cues and arrangement notes go in [brackets] on their own line or after the line they affect.
- Vocal delivery, harmonies, and ad-libs go in (parentheses).
- Respond with the song only: no introductory sentences, explanations, or concluding remarks."#;

/// Templates for the songwriting prompts
pub struct SongPromptTemplate;

impl SongPromptTemplate {
    /// Prompt for a new song, or a full reimagining when the request carries lyrics.
    ///
    /// `include_production_cues` selects between the detailed template and the
    /// lyrics-only template.
    pub fn lyrics(request: &GenerationRequest) -> String {
        let context = Self::request_context(request);

        if request.include_production_cues {
            format!(
                r#"You are a creative songwriter and music producer AI.
Your task is to write a complete song based on the user's request.
The song should include lyrics and production cues in [brackets] to guide the musical arrangement.
The vocal delivery, harmonies, and ad-libs should be noted in (parentheses).

{}

{}

Generate the song now, including clear production cues."#,
                context, PRODUCTION_OUTPUT_RULES
            )
        } else {
            format!(
                r#"You are a creative songwriter AI.
Your task is to write the lyrics for a complete song based on the user's request.

{}

{}

Generate the lyrics now."#,
                context, LYRICS_ONLY_RULES
            )
        }
    }

    /// Prompt for an extended remix built around the song's hook
    pub fn hook_remix(lyrics: &str, include_production_cues: bool) -> String {
        if include_production_cues {
            format!(
                r#"You are a master DJ and music producer AI.
Your task is to take the following song and create a 5-6 minute extended remix. The remix must heavily focus on the hook/chorus.

**Instructions:**
1.  **Identify the Hook:** First, analyze the provided lyrics and identify the main hook or chorus.
2.  **Extend and Rebuild:** Create a full 5-6 minute song structure around that hook. Use repetition, variations, build-ups, breakdowns, beat switches, and vocal chops of the hook.
3.  **Add New Elements:** Introduce new instrumental sections (long intros/outros, bridges) and new, complementary ad-libs that fit the original theme and style.
4.  **Formatting:** Include structural and production cues in [brackets] and ad-libs in (parentheses).

**Original Song Lyrics:**
---
{}
---

{}

Generate the 5-6 minute extended hook remix now."#,
                lyrics, PRODUCTION_OUTPUT_RULES
            )
        } else {
            format!(
                r#"You are a master DJ and music producer AI.
Your task is to take the following song and create the lyrics for a 5-6 minute extended remix.

**Instructions:**
1.  **Identify the Hook:** Analyze the provided lyrics and identify the main hook or chorus.
2.  **Extend and Rebuild:** Create a full 5-6 minute song structure around that hook using lyrical repetition, variations, and new complementary bridges or verses.

**Original Song Lyrics:**
---
{}
---

{}

Generate the lyrics for the extended hook remix now."#,
                lyrics, LYRICS_ONLY_RULES
            )
        }
    }

    /// Prompt that annotates lyrics without changing them.
    ///
    /// The original lines must come back unmodified and in order; the model may
    /// only insert bracketed cues and parenthetical backing vocals.
    pub fn enhance(lyrics: &str) -> String {
        format!(
            r#"You are a versatile music production AI. Your task is to enhance the provided lyrics with production cues and vocal suggestions without altering the original lyrics.

1. **Structure**: Preserve every original lyric line exactly as written and in its original order. Do NOT add section tags like [Verse 1], [Chorus], or [Bridge]. Insert ONLY inline production instructions in [brackets] after relevant lines to suggest instrumental transitions or effects (e.g., [rising synth build], [acoustic guitar enters softly], [808 drops]). Use these sparingly to enhance the song's flow.

2. **Harmonies/Background**: Strategically add background vocals, echoes, or ad-libs in (parentheses) after selected phrases. **Do not add them to every line.** Place them where they serve the song best, such as emphasizing a key phrase or building energy. Examples: (oohs fading), (echo: go!), (harmony swells).

3. **Flow**: Infer the genre from the lyrics themselves and tailor your suggestions accordingly.

**CRITICAL OUTPUT RULES:**
- Your entire response MUST be ONLY the enhanced lyrics.
- Do NOT add any introductory sentences, explanations, titles, or concluding remarks.
- Do NOT change, reorder, or remove any of the original lyrics. Only insert production cues and background vocals.

Here are the lyrics to enhance:
---
{}
---

Enhance them now."#,
            lyrics
        )
    }

    /// The `**User Request:**` block shared by both lyrics templates
    fn request_context(request: &GenerationRequest) -> String {
        let mut context = format!(
            r#"**User Request:**
- **Artist Style:** {}
- **Topic:** {}
- **Structural Inspiration:** {}"#,
            request.artist,
            request.topic,
            request.structural_inspiration()
        );

        if let Some(existing) = request.lyrics() {
            context.push_str(&format!(
                r#"
- **Task:** Radically remix and reimagine the following song to give it a completely different feel. Substantially rewrite it: you can change the perspective, mood, or narrative, but keep the core topic. Here are the original lyrics to transform:
---
{}
---"#,
                existing
            ));
        } else if let Some(inspiration) = request.inspiration() {
            context.push_str(&format!(
                r#"
- **Inspiration:** Draw inspiration from the themes, mood, and lyrical style of the following lyrics. Do not copy any of their lines:
---
{}
---"#,
                inspiration
            ));
        }

        context
    }
}
