//! Songwriting session use case
//!
//! [`SongwritingSession`] owns the current lyrics, the style derived from them,
//! and the session history. It runs at most one primary generation (new song,
//! remix, hook remix, enhance) at a time and derives the style of freshly
//! generated lyrics in a background task.
//!
//! # Stale results
//!
//! Every time the current lyrics are replaced the session advances an epoch. A style derivation records the epoch it was started in
//! and is dropped if the epoch has moved on by the time it resolves, so a slow
//! answer for old lyrics never overwrites the style of newer ones.

mod types;

pub use types::{BusyFlags, SessionError, SessionSnapshot};

use crate::ports::generation_logger::{GenerationEvent, GenerationLogger, NoGenerationLogger};
use crate::ports::session_observer::{NoSessionObserver, SessionObserver};
use crate::ports::text_generator::{GenerationError, TextGenerator};
use crate::use_cases::analyze_style::AnalyzeStyleUseCase;
use futures::future::join_all;
use lyricsmith_domain::{
    GenerationMode, GenerationRequest, GenerationResult, HistoryEntry, HistoryId, SongPromptTemplate,
    StyleAnalysis, StyleDescriptor, StylePromptTemplate, preserves_original_lines,
};
use serde_json::json;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

struct SessionState {
    artist: String,
    topic: String,
    lyrics: String,
    style: Option<StyleDescriptor>,
    analysis: Option<StyleAnalysis>,
    busy: BusyFlags,
    error: Option<String>,
    history: VecDeque<HistoryEntry>,
    next_history_id: u64,
    epoch: u64,
    style_tasks: Vec<JoinHandle<()>>,
}

impl SessionState {
    fn new() -> Self {
        Self {
            artist: String::new(),
            topic: String::new(),
            lyrics: String::new(),
            style: None,
            analysis: None,
            busy: BusyFlags::default(),
            error: None,
            history: VecDeque::new(),
            next_history_id: 1,
            epoch: 0,
            style_tasks: Vec::new(),
        }
    }

    /// Invalidate any style derivation started for the current lyrics
    fn advance_epoch(&mut self) {
        self.epoch += 1;
        self.busy.style = false;
    }

    fn allocate_history_id(&mut self) -> HistoryId {
        let id = HistoryId(self.next_history_id);
        self.next_history_id += 1;
        id
    }

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            artist: self.artist.clone(),
            topic: self.topic.clone(),
            lyrics: self.lyrics.clone(),
            style: self.style.clone(),
            analysis: self.analysis.clone(),
            busy: self.busy,
            error: self.error.clone(),
            history: self.history.iter().cloned().collect(),
        }
    }
}

/// Orchestrates generations for one interactive songwriting session
///
/// Cloning is cheap and every clone shares the same state.
#[derive(Clone)]
pub struct SongwritingSession {
    generator: Arc<dyn TextGenerator>,
    logger: Arc<dyn GenerationLogger>,
    observer: Arc<dyn SessionObserver>,
    state: Arc<Mutex<SessionState>>,
}

impl SongwritingSession {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            logger: Arc::new(NoGenerationLogger),
            observer: Arc::new(NoSessionObserver),
            state: Arc::new(Mutex::new(SessionState::new())),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn GenerationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn SessionObserver>) -> Self {
        self.observer = observer;
        self
    }

    // ==================== Primary actions ====================

    /// Write a new song from the request's artist, topic and optional
    /// structure source and inspiration lyrics.
    ///
    /// Any `existing_lyrics` on the request are ignored.
    pub async fn request_new_song(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResult, SessionError> {
        self.run_primary(GenerationRequest {
            mode: GenerationMode::NewSong,
            existing_lyrics: None,
            ..request
        })
        .await
    }

    /// Reimagine the current lyrics using the request's artist and topic
    pub async fn request_remix(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResult, SessionError> {
        self.run_primary(GenerationRequest {
            mode: GenerationMode::Remix,
            inspiration_lyrics: None,
            ..request
        })
        .await
    }

    /// Build an extended arrangement around the hook of the current lyrics
    pub async fn request_hook_remix(
        &self,
        include_production_cues: bool,
    ) -> Result<GenerationResult, SessionError> {
        self.run_primary(GenerationRequest::hook_remix("", include_production_cues))
            .await
    }

    /// Annotate the current lyrics with production cues and backing vocals
    pub async fn request_enhance(&self) -> Result<GenerationResult, SessionError> {
        self.run_primary(GenerationRequest::enhance("")).await
    }

    /// Run a standalone style analysis.
    ///
    /// The result goes to its own slot and does not touch the derived style.
    /// On failure the previous analysis is cleared.
    pub async fn request_style_analysis(
        &self,
        artist_or_song: &str,
    ) -> Result<StyleAnalysis, SessionError> {
        {
            let mut state = self.lock_state();
            if state.busy.analysis {
                return Err(SessionError::ActionInFlight(GenerationMode::StyleAnalysis));
            }
            if let Err(e) = GenerationRequest::style_analysis(artist_or_song).validate() {
                state.error = Some(e.to_string());
                return Err(e.into());
            }
            state.busy.analysis = true;
            state.error = None;
        }

        self.observer.on_action_start(GenerationMode::StyleAnalysis);
        let outcome = AnalyzeStyleUseCase::new(Arc::clone(&self.generator))
            .with_logger(Arc::clone(&self.logger))
            .execute(artist_or_song)
            .await
            .map_err(SessionError::from);

        {
            let mut state = self.lock_state();
            state.busy.analysis = false;
            match &outcome {
                Ok(analysis) => state.analysis = Some(analysis.clone()),
                Err(e) => {
                    warn!("Style analysis failed: {}", e);
                    state.analysis = None;
                    state.error = Some(e.to_string());
                }
            }
        }
        self.observer
            .on_action_complete(GenerationMode::StyleAnalysis, outcome.is_ok());

        outcome
    }

    // ==================== History ====================

    /// Make a history entry the current song.
    ///
    /// Restores its lyrics, bare artist name and topic, and clears the style.
    pub fn load_from_history(&self, id: HistoryId) -> Result<HistoryEntry, SessionError> {
        let mut state = self.lock_state();
        let entry = state
            .history
            .iter()
            .find(|entry| entry.id == id)
            .cloned()
            .ok_or(SessionError::HistoryEntryNotFound(id))?;

        state.advance_epoch();
        state.lyrics = entry.lyrics.clone();
        state.artist = entry.artist().to_string();
        state.topic = entry.topic.clone();
        state.style = None;
        state.error = None;
        debug!("Loaded history entry {} ({})", entry.id, entry.label);

        Ok(entry)
    }

    pub fn clear_history(&self) {
        self.lock_state().history.clear();
    }

    // ==================== Queries ====================

    pub fn snapshot(&self) -> SessionSnapshot {
        self.lock_state().snapshot()
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        self.lock_state().history.iter().cloned().collect()
    }

    pub fn lyrics(&self) -> String {
        self.lock_state().lyrics.clone()
    }

    pub fn busy(&self) -> BusyFlags {
        self.lock_state().busy
    }

    /// Wait until every background style derivation has resolved
    pub async fn settle(&self) {
        loop {
            let tasks = std::mem::take(&mut self.lock_state().style_tasks);
            if tasks.is_empty() {
                return;
            }
            for joined in join_all(tasks).await {
                if let Err(e) = joined {
                    warn!("Style derivation task failed: {}", e);
                }
            }
        }
    }

    // ==================== Internals ====================

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn run_primary(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResult, SessionError> {
        let request = self.begin_primary(request)?;
        let mode = request.mode;
        let prompt = build_prompt(&request);

        info!(
            "{} for '{}' via {}",
            mode.display_name(),
            request.artist,
            self.generator.name()
        );
        debug!("Prompt: {} bytes", prompt.len());

        self.observer.on_action_start(mode);
        let outcome = self.generator.generate(&prompt).await;
        let result = self.finish_primary(&request, prompt.len(), outcome);
        self.observer.on_action_complete(mode, result.is_ok());

        result
    }

    /// Check exclusivity and preconditions, then mark the action busy
    fn begin_primary(
        &self,
        mut request: GenerationRequest,
    ) -> Result<GenerationRequest, SessionError> {
        let mode = request.mode;
        let mut state = self.lock_state();

        if let Some(active) = state.busy.primary() {
            debug!("Rejecting {}: {} in flight", mode, active);
            return Err(SessionError::ActionInFlight(active));
        }

        if mode.requires_lyrics() {
            request.existing_lyrics = Some(state.lyrics.clone());
        }
        if matches!(mode, GenerationMode::HookRemix | GenerationMode::Enhance) {
            request.artist = state.artist.clone();
            request.topic = state.topic.clone();
        }

        if let Err(e) = request.validate() {
            state.error = Some(e.to_string());
            return Err(e.into());
        }

        state.busy.set(mode, true);
        state.error = None;

        Ok(request)
    }

    fn finish_primary(
        &self,
        request: &GenerationRequest,
        prompt_bytes: usize,
        outcome: Result<String, GenerationError>,
    ) -> Result<GenerationResult, SessionError> {
        let mode = request.mode;
        let mut state = self.lock_state();
        state.busy.set(mode, false);

        let outcome = outcome.map_err(SessionError::from).and_then(|text| {
            let original = request.lyrics().unwrap_or_default();
            if mode == GenerationMode::Enhance && !preserves_original_lines(original, &text) {
                return Err(SessionError::EnhanceAlteredLyrics);
            }
            Ok(text)
        });

        let text = match outcome {
            Ok(text) => text,
            Err(e) => {
                warn!("{} failed: {}", mode.display_name(), e);
                state.error = Some(e.to_string());
                self.logger.log(GenerationEvent::new(
                    "generation_failed",
                    json!({ "mode": mode.as_str(), "error": e.to_string() }),
                ));
                return Err(e);
            }
        };

        state.advance_epoch();
        if mode.derives_style() {
            state.style = None;
        }
        state.lyrics = text.clone();
        state.artist = request.artist.trim().to_string();
        state.topic = request.topic.trim().to_string();

        let id = state.allocate_history_id();
        let entry = HistoryEntry::new(id, &state.artist, mode, state.topic.clone(), text.clone());
        info!("{} complete: history entry {} ({})", mode.display_name(), id, entry.label);
        state.history.push_front(entry);

        self.logger.log(GenerationEvent::new(
            "lyrics_generated",
            json!({
                "mode": mode.as_str(),
                "history_id": id.0,
                "artist": state.artist,
                "topic": state.topic,
                "include_production_cues": request.include_production_cues,
                "prompt_bytes": prompt_bytes,
                "lyrics": text,
            }),
        ));

        if mode.derives_style() {
            let artist = state.artist.clone();
            self.spawn_style_derivation(&mut state, text.clone(), artist);
        }

        Ok(GenerationResult::new(text, mode))
    }

    fn spawn_style_derivation(&self, state: &mut SessionState, lyrics: String, artist: String) {
        let epoch = state.epoch;
        state.busy.style = true;
        state.style_tasks.retain(|task| !task.is_finished());

        let session = self.clone();
        state.style_tasks.push(tokio::spawn(async move {
            session.derive_style(epoch, &lyrics, &artist).await;
        }));
    }

    async fn derive_style(&self, epoch: u64, lyrics: &str, artist: &str) {
        let prompt = StylePromptTemplate::style_tags(lyrics, artist);
        let outcome = self.generator.generate(&prompt).await;

        match self.apply_style(epoch, outcome) {
            Ok(style) => {
                info!("Style derived: {}", style);
                self.logger.log(GenerationEvent::new(
                    "style_derived",
                    json!({ "artist": artist, "style": style.as_prompt() }),
                ));
                self.observer.on_style_updated(&style);
            }
            Err(SessionError::StaleResult) => {
                debug!("Discarding style derived for superseded lyrics (epoch {})", epoch);
            }
            // Style derivation is best effort; the lyrics stand on their own
            Err(e) => warn!("Style derivation failed: {}", e),
        }
    }

    fn apply_style(
        &self,
        epoch: u64,
        outcome: Result<String, GenerationError>,
    ) -> Result<StyleDescriptor, SessionError> {
        let mut state = self.lock_state();
        if state.epoch != epoch {
            return Err(SessionError::StaleResult);
        }
        state.busy.style = false;

        let style = StyleDescriptor::tags(&outcome?);
        state.style = Some(style.clone());
        Ok(style)
    }
}

fn build_prompt(request: &GenerationRequest) -> String {
    let lyrics = request.lyrics().unwrap_or_default();
    match request.mode {
        GenerationMode::NewSong | GenerationMode::Remix => SongPromptTemplate::lyrics(request),
        GenerationMode::HookRemix => {
            SongPromptTemplate::hook_remix(lyrics, request.include_production_cues)
        }
        GenerationMode::Enhance => SongPromptTemplate::enhance(lyrics),
        GenerationMode::StyleAnalysis => StylePromptTemplate::style_analysis(&request.artist),
    }
}
