//! REPL (Read-Eval-Print Loop) for an interactive songwriting session

use super::command::{HELP, SessionCommand, parse_command};
use crate::ConsoleFormatter;
use crate::ReplConfig;
use crate::SpinnerObserver;
use colored::Colorize;
use lyricsmith_application::{SessionError, SongwritingSession};
use lyricsmith_domain::{GenerationRequest, GenerationResult, HistoryId};
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::ops::ControlFlow;
use std::path::Path;
use tracing::{debug, warn};

const HISTORY_CAPACITY: usize = 500;

/// Song settings being edited between generations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub artist: String,
    pub topic: String,
    pub structure: Option<String>,
    pub inspiration: Option<String>,
    pub include_production_cues: bool,
}

impl Draft {
    pub fn new(include_production_cues: bool) -> Self {
        Self {
            artist: String::new(),
            topic: String::new(),
            structure: None,
            inspiration: None,
            include_production_cues,
        }
    }

    /// Request for a new song from the current settings
    pub fn new_song(&self) -> GenerationRequest {
        let mut request = GenerationRequest::new_song(&self.artist, &self.topic)
            .with_production_cues(self.include_production_cues);
        if let Some(structure) = &self.structure {
            request = request.with_structure_source(structure);
        }
        if let Some(lyrics) = &self.inspiration {
            request = request.with_inspiration(lyrics);
        }
        request
    }

    /// Request for a remix; the session supplies the current lyrics
    pub fn remix(&self) -> GenerationRequest {
        GenerationRequest::remix(&self.artist, &self.topic, "")
            .with_production_cues(self.include_production_cues)
    }
}

/// Interactive songwriting REPL
pub struct SessionRepl {
    session: SongwritingSession,
    config: ReplConfig,
    draft: Draft,
}

impl SessionRepl {
    pub fn new(session: SongwritingSession, config: ReplConfig) -> Self {
        let draft = Draft::new(config.include_production_cues);
        Self {
            session,
            config,
            draft,
        }
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> std::io::Result<()> {
        let mut editor = Reedline::create();
        if let Some(history) = self.config.history_path().and_then(|p| line_history(&p)) {
            editor = editor.with_history(Box::new(history));
        }

        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("lyricsmith".to_string()),
            DefaultPromptSegment::Empty,
        );

        self.print_welcome();

        loop {
            match editor.read_line(&prompt) {
                Ok(Signal::Success(line)) => {
                    let line = line.trim();

                    // Skip empty lines
                    if line.is_empty() {
                        continue;
                    }

                    match parse_command(line) {
                        Ok(command) => {
                            if self.handle(command).await.is_break() {
                                break;
                            }
                        }
                        Err(e) => println!("{}", e),
                    }
                }
                Ok(Signal::CtrlC) => {
                    println!("^C");
                    continue;
                }
                Ok(_) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│          lyricsmith - Session Mode          │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Set an artist with /artist, then type a topic to write a song.");
        println!("Type /help for all commands.");
        println!();
    }

    fn print_help(&self) {
        println!();
        println!("Commands:");
        for (usage, description) in HELP {
            println!("  {:<22} - {}", usage, description);
        }
        println!();
    }

    fn print_settings(&self) {
        let or_unset = |value: &str| {
            if value.is_empty() {
                "(not set)".dimmed().to_string()
            } else {
                value.to_string()
            }
        };
        println!();
        println!("{} {}", "Artist:".bold(), or_unset(&self.draft.artist));
        println!("{} {}", "Topic:".bold(), or_unset(&self.draft.topic));
        println!(
            "{} {}",
            "Structure:".bold(),
            or_unset(self.draft.structure.as_deref().unwrap_or_default())
        );
        println!(
            "{} {}",
            "Inspiration:".bold(),
            if self.draft.inspiration.is_some() {
                "loaded"
            } else {
                "none"
            }
        );
        println!(
            "{} {}",
            "Production cues:".bold(),
            if self.draft.include_production_cues {
                "on"
            } else {
                "off"
            }
        );
    }

    /// Apply one command. Returns `Break` when the session should end.
    pub async fn handle(&mut self, command: SessionCommand) -> ControlFlow<()> {
        debug!("Session command: {:?}", command);
        match command {
            SessionCommand::Artist(artist) => self.draft.artist = artist,
            SessionCommand::Topic(topic) => self.draft.topic = topic,
            SessionCommand::Structure(structure) => self.draft.structure = structure,
            SessionCommand::Inspiration(None) => self.draft.inspiration = None,
            SessionCommand::Inspiration(Some(path)) => self.load_inspiration(&path),
            SessionCommand::Cues(on) => self.draft.include_production_cues = on,
            SessionCommand::Write(topic) => {
                self.draft.topic = topic;
                let outcome = self.session.request_new_song(self.draft.new_song()).await;
                self.report(outcome).await;
            }
            SessionCommand::New => {
                let outcome = self.session.request_new_song(self.draft.new_song()).await;
                self.report(outcome).await;
            }
            SessionCommand::Remix => {
                let outcome = self.session.request_remix(self.draft.remix()).await;
                self.report(outcome).await;
            }
            SessionCommand::Hook => {
                let outcome = self
                    .session
                    .request_hook_remix(self.draft.include_production_cues)
                    .await;
                self.report(outcome).await;
            }
            SessionCommand::Enhance => {
                let outcome = self.session.request_enhance().await;
                self.report(outcome).await;
            }
            SessionCommand::Style(name) => {
                match self.session.request_style_analysis(&name).await {
                    Ok(analysis) => {
                        println!("{}", ConsoleFormatter::format_analysis(name.trim(), &analysis))
                    }
                    Err(e) => eprintln!("{}", ConsoleFormatter::format_error(&e.to_string())),
                }
            }
            SessionCommand::History => {
                print!("{}", ConsoleFormatter::format_history(&self.session.history()));
            }
            SessionCommand::Load(id) => self.load(id),
            SessionCommand::Clear => {
                self.session.clear_history();
                println!("History cleared.");
            }
            SessionCommand::Show => {
                self.print_settings();
                let snapshot = self.session.snapshot();
                if snapshot.lyrics.is_empty() {
                    println!("\n{}", "No lyrics yet.".dimmed());
                } else {
                    println!("{}", ConsoleFormatter::format_song(&snapshot));
                }
            }
            SessionCommand::Help => self.print_help(),
            SessionCommand::Quit => {
                println!("Bye!");
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    fn load_inspiration(&mut self, path: &Path) {
        match std::fs::read_to_string(path) {
            Ok(lyrics) if !lyrics.trim().is_empty() => {
                println!("Loaded inspiration from {}", path.display());
                self.draft.inspiration = Some(lyrics);
            }
            Ok(_) => eprintln!(
                "{}",
                ConsoleFormatter::format_error(&format!("{} is empty", path.display()))
            ),
            Err(e) => eprintln!(
                "{}",
                ConsoleFormatter::format_error(&format!("Cannot read {}: {}", path.display(), e))
            ),
        }
    }

    fn load(&mut self, id: HistoryId) {
        match self.session.load_from_history(id) {
            Ok(entry) => {
                self.draft.artist = entry.artist().to_string();
                self.draft.topic = entry.topic.clone();
                println!("{}", ConsoleFormatter::format_song(&self.session.snapshot()));
            }
            Err(e) => eprintln!("{}", ConsoleFormatter::format_error(&e.to_string())),
        }
    }

    /// Print a primary action's outcome once its style prompt has resolved
    async fn report(&self, outcome: Result<GenerationResult, SessionError>) {
        if let Err(e) = outcome {
            eprintln!("{}", ConsoleFormatter::format_error(&e.to_string()));
            return;
        }

        if self.session.busy().style {
            let spinner = self
                .config
                .show_progress
                .then(|| SpinnerObserver::spinner("Deriving style prompt..."));
            self.session.settle().await;
            if let Some(pb) = spinner {
                pb.finish_and_clear();
            }
        }

        println!("{}", ConsoleFormatter::format_song(&self.session.snapshot()));
    }
}

/// Open the file-backed line history, creating its directory first.
///
/// Returns `None` (after a warning) when the file cannot be used.
fn line_history(path: &Path) -> Option<FileBackedHistory> {
    if let Some(parent) = path.parent()
        && let Err(e) = std::fs::create_dir_all(parent)
    {
        warn!("Cannot create {}: {}", parent.display(), e);
    }
    match FileBackedHistory::with_file(HISTORY_CAPACITY, path.to_path_buf()) {
        Ok(history) => Some(history),
        Err(e) => {
            warn!("Line history disabled ({}): {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use lyricsmith_application::{GenerationError, TextGenerator};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Answers style prompts with tags and everything else with lyrics
    struct EchoGenerator {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TextGenerator for EchoGenerator {
        fn name(&self) -> &str {
            "echo"
        }

        async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if prompt.contains("comma-separated style prompt") {
                Ok("Indie Pop, Warm reverb".to_string())
            } else {
                Ok(format!("[Verse 1]\nTake {}", n))
            }
        }
    }

    fn repl() -> (SessionRepl, Arc<EchoGenerator>) {
        let generator = Arc::new(EchoGenerator {
            calls: AtomicUsize::new(0),
        });
        let config = ReplConfig {
            show_progress: false,
            ..Default::default()
        };
        let repl = SessionRepl::new(SongwritingSession::new(generator.clone()), config);
        (repl, generator)
    }

    #[test]
    fn test_draft_new_song_request() {
        let draft = Draft {
            artist: "Lorde".to_string(),
            topic: "summer".to_string(),
            structure: Some("Royals".to_string()),
            inspiration: None,
            include_production_cues: false,
        };

        let request = draft.new_song();
        assert_eq!(request.artist, "Lorde");
        assert_eq!(request.structure_source.as_deref(), Some("Royals"));
        assert!(!request.include_production_cues);
        assert!(request.existing_lyrics.is_none());
    }

    #[tokio::test]
    async fn test_settings_commands_update_draft() {
        let (mut repl, generator) = repl();

        repl.handle(SessionCommand::Artist("Lorde".to_string())).await;
        repl.handle(SessionCommand::Topic("summer".to_string())).await;
        repl.handle(SessionCommand::Cues(false)).await;

        assert_eq!(repl.draft().artist, "Lorde");
        assert_eq!(repl.draft().topic, "summer");
        assert!(!repl.draft().include_production_cues);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_write_sets_topic_and_generates() {
        let (mut repl, _generator) = repl();
        repl.handle(SessionCommand::Artist("Lorde".to_string())).await;

        let flow = repl
            .handle(SessionCommand::Write("summer rain".to_string()))
            .await;

        assert!(flow.is_continue());
        let snapshot = repl.session.snapshot();
        assert_eq!(snapshot.topic, "summer rain");
        assert_eq!(snapshot.lyrics, "[Verse 1]\nTake 1");
        assert_eq!(
            snapshot.style.map(|s| s.to_string()).as_deref(),
            Some("Indie Pop, Warm reverb")
        );
    }

    #[tokio::test]
    async fn test_new_without_artist_makes_no_request() {
        let (mut repl, generator) = repl();

        repl.handle(SessionCommand::Topic("summer".to_string())).await;
        repl.handle(SessionCommand::New).await;

        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
        assert!(repl.session.snapshot().error.is_some());
    }

    #[tokio::test]
    async fn test_load_restores_draft() {
        let (mut repl, _generator) = repl();
        repl.handle(SessionCommand::Artist("Lorde".to_string())).await;
        repl.handle(SessionCommand::Write("summer".to_string())).await;
        repl.handle(SessionCommand::Remix).await;
        repl.handle(SessionCommand::Artist("Drake".to_string())).await;
        repl.handle(SessionCommand::Topic("winter".to_string())).await;

        let oldest = repl.session.history().last().map(|e| e.id).unwrap();
        repl.handle(SessionCommand::Load(oldest)).await;

        assert_eq!(repl.draft().artist, "Lorde");
        assert_eq!(repl.draft().topic, "summer");
        assert_eq!(repl.session.lyrics(), "[Verse 1]\nTake 1");
    }

    #[tokio::test]
    async fn test_missing_inspiration_file_keeps_draft() {
        let (mut repl, _generator) = repl();

        repl.handle(SessionCommand::Inspiration(Some(
            "/nonexistent/lyricsmith/inspiration.txt".into(),
        )))
        .await;

        assert!(repl.draft().inspiration.is_none());
    }

    #[test]
    fn test_line_history_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("history.txt");

        assert!(line_history(&path).is_some());
        assert!(dir.path().join("nested").is_dir());
    }

    #[test]
    fn test_line_history_disabled_when_directory_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        assert!(line_history(&blocker.join("history.txt")).is_none());
    }

    #[tokio::test]
    async fn test_quit_breaks() {
        let (mut repl, _generator) = repl();
        assert!(repl.handle(SessionCommand::Quit).await.is_break());
    }
}
