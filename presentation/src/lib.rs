//! Presentation layer for lyricsmith
//!
//! This crate contains CLI definitions, output formatters,
//! progress observers, and the interactive songwriting session.

pub mod cli;
pub mod config;
pub mod output;
pub mod progress;
pub mod session;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, WriteArgs};
pub use config::ReplConfig;
pub use output::console::ConsoleFormatter;
pub use progress::spinner::{SimpleObserver, SpinnerObserver};
pub use session::SessionRepl;
