//! Prompt templates for style descriptors

/// Templates for deriving a song's sound
pub struct StylePromptTemplate;

impl StylePromptTemplate {
    /// Single-line, comma-separated tag prompt for a music generation system.
    ///
    /// Categories are requested in a fixed order: genre/style, instrumentation,
    /// vocal style, production/sound design.
    pub fn style_tags(lyrics: &str, artist: &str) -> String {
        format!(
            r#"You are an expert music producer AI. Based on the provided lyrics and artist style, generate a single-line, comma-separated style prompt suitable for a music generation AI like Suno or Udio.

**CRITICAL RULES:**
1.  The prompt must be a comma-separated list of tags covering, in this order: genre/style, instrumentation, vocal style, production/sound design.
2.  The entire output must be a single line of text.
3.  Do not add any other text, explanations, labels, or formatting.

**Example Output:**
Indie Pop, Rhythmic acoustic guitar, Male vocals, Warm reverb

**Artist Style:** {}
**Lyrics:**
---
{}
---

Generate the music style prompt now."#,
            artist, lyrics
        )
    }

    /// Structured breakdown of an artist's or song's sound as a JSON object
    pub fn style_analysis(artist_or_song: &str) -> String {
        format!(
            r#"You are an expert music producer and sound engineer AI.
Analyze the signature sound of the following artist or song: {}

Respond with ONLY a JSON object with exactly these four string fields:
- "style": the genre and overall style
- "productionStyle": the production approach, drum programming, and arrangement
- "bassElement": the character of the bass (instrument, tone, rhythm)
- "studioProduction": mixing, effects, and studio techniques

Each value should be a short comma-separated phrase usable as a music generation tag.

**Example Output:**
{{"style": "Psychedelic Pop", "productionStyle": "Phased live drums, layered synths", "bassElement": "Melodic fuzz bass", "studioProduction": "Tape saturation, wide stereo reverb"}}

Do not add any other text, explanations, or formatting."#,
            artist_or_song
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_tags_prompt_format() {
        let prompt = StylePromptTemplate::style_tags("line one\nline two", "Drake");
        assert!(prompt.contains("**Artist Style:** Drake"));
        assert!(prompt.contains("---\nline one\nline two\n---"));
        assert!(prompt.contains("single line"));
        assert!(prompt.contains("genre/style, instrumentation, vocal style, production/sound design"));
    }

    #[test]
    fn test_style_analysis_prompt_names_fields() {
        let prompt = StylePromptTemplate::style_analysis("Blinding Lights");
        assert!(prompt.contains("Blinding Lights"));
        for field in ["\"style\"", "\"productionStyle\"", "\"bassElement\"", "\"studioProduction\""] {
            assert!(prompt.contains(field), "missing {}", field);
        }
    }

    #[test]
    fn test_style_analysis_example_is_valid_json() {
        let prompt = StylePromptTemplate::style_analysis("x");
        let example = prompt
            .lines()
            .find(|l| l.starts_with('{'))
            .unwrap();
        assert!(crate::song::style::parse_style_analysis(example).is_ok());
    }
}
