//! Progress reporting for songwriting sessions

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use lyricsmith_application::SessionObserver;
use lyricsmith_domain::{GenerationMode, StyleDescriptor};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Shows a spinner while a generation request is in flight
pub struct SpinnerObserver {
    spinner: Mutex<Option<ProgressBar>>,
}

impl SpinnerObserver {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    /// Start a standalone ticking spinner
    pub fn spinner(message: impl Into<String>) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_message(message.into());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    /// Message shown while `mode` is in flight
    pub fn activity(mode: GenerationMode) -> &'static str {
        match mode {
            GenerationMode::NewSong => "Writing lyrics...",
            GenerationMode::Remix => "Reimagining the song...",
            GenerationMode::HookRemix => "Building the hook remix...",
            GenerationMode::Enhance => "Adding production cues...",
            GenerationMode::StyleAnalysis => "Analyzing the sound...",
        }
    }

    fn slot(&self) -> MutexGuard<'_, Option<ProgressBar>> {
        self.spinner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SpinnerObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionObserver for SpinnerObserver {
    fn on_action_start(&self, mode: GenerationMode) {
        let previous = self.slot().replace(Self::spinner(Self::activity(mode)));
        if let Some(pb) = previous {
            pb.finish_and_clear();
        }
    }

    fn on_action_complete(&self, mode: GenerationMode, success: bool) {
        if let Some(pb) = self.slot().take() {
            let status = if success {
                format!("{} {}", "v".green(), mode.display_name())
            } else {
                format!("{} {} failed", "x".red(), mode.display_name())
            };
            pb.finish_with_message(status);
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleObserver;

impl SessionObserver for SimpleObserver {
    fn on_action_start(&self, mode: GenerationMode) {
        println!("{} {}", "->".cyan(), SpinnerObserver::activity(mode).bold());
    }

    fn on_action_complete(&self, mode: GenerationMode, success: bool) {
        if success {
            println!("  {} {}", "v".green(), mode.display_name());
        } else {
            println!("  {} {} (failed)", "x".red(), mode.display_name());
        }
    }

    fn on_style_updated(&self, style: &StyleDescriptor) {
        println!("  {} style: {}", "v".green(), style);
    }
}
