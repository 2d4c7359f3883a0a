//! Analyze Style use case
//!
//! Asks the model for a structured breakdown of an artist's or song's sound.

use crate::ports::generation_logger::{GenerationEvent, GenerationLogger, NoGenerationLogger};
use crate::ports::text_generator::{GenerationError, TextGenerator};
use lyricsmith_domain::{
    DomainError, GenerationRequest, StyleAnalysis, StylePromptTemplate, parse_style_analysis,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during style analysis
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyzeStyleError {
    /// Missing subject, or a response that does not hold the four fields
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

/// Use case for a one-shot style analysis
pub struct AnalyzeStyleUseCase {
    generator: Arc<dyn TextGenerator>,
    logger: Arc<dyn GenerationLogger>,
}

impl AnalyzeStyleUseCase {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            logger: Arc::new(NoGenerationLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn GenerationLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Analyze `artist_or_song`; a blank subject fails before any request
    pub async fn execute(&self, artist_or_song: &str) -> Result<StyleAnalysis, AnalyzeStyleError> {
        GenerationRequest::style_analysis(artist_or_song).validate()?;
        let subject = artist_or_song.trim();

        info!("Analyzing style of '{}' via {}", subject, self.generator.name());
        let prompt = StylePromptTemplate::style_analysis(subject);

        let response = self.generator.generate(&prompt).await?;
        debug!("Style analysis response: {} bytes", response.len());

        let analysis = parse_style_analysis(&response).inspect_err(|e| {
            warn!("Unparseable style analysis for '{}': {}", subject, e);
        })?;

        self.logger.log(GenerationEvent::new(
            "style_analyzed",
            serde_json::json!({
                "subject": subject,
                "style": analysis.style,
                "production_style": analysis.production_style,
                "bass_element": analysis.bass_element,
                "studio_production": analysis.studio_production,
            }),
        ));

        Ok(analysis)
    }
}
