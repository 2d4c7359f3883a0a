//! CLI command definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for lyricsmith
#[derive(Parser, Debug)]
#[command(name = "lyricsmith")]
#[command(author, version, about = "Songwriting assistant - lyrics, remixes and style prompts")]
#[command(long_about = r#"
lyricsmith writes song lyrics in the style of an artist, then remixes,
extends or annotates them, and derives a short style prompt for music
generation tools.

Without a subcommand an interactive session is started.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./lyricsmith.toml   Project-level config
3. ~/.config/lyricsmith/config.toml   Global config

The provider API key is read from the environment variable named by
provider.api_key_env (default: API_KEY).

Example:
  lyricsmith write --artist "Phoebe Bridgers" --topic "a late train home"
  lyricsmith analyze "Daft Punk"
  lyricsmith serve
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the backend relay that holds the provider credential
    Serve {
        /// Address to bind, overriding relay.bind
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,
    },

    /// Start an interactive songwriting session (default)
    Session,

    /// Write one song and print it with its style prompt
    Write(WriteArgs),

    /// Break down the sound of an artist or song
    Analyze {
        /// Artist or song name
        name: String,
    },
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct WriteArgs {
    /// Artist whose lyrical style to imitate
    #[arg(short, long)]
    pub artist: String,

    /// What the song is about
    #[arg(short, long)]
    pub topic: String,

    /// Artist or song whose structure to borrow
    #[arg(short, long, value_name = "ARTIST_OR_SONG")]
    pub structure: Option<String>,

    /// File with lyrics whose themes and mood should inspire the song
    #[arg(long, value_name = "PATH")]
    pub inspiration_file: Option<PathBuf>,

    /// Plain lyrics without production cues
    #[arg(long)]
    pub no_cues: bool,
}

impl Cli {
    /// The command to run; an interactive session when none is given
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_session() {
        let cli = Cli::parse_from(["lyricsmith"]);
        assert_eq!(cli.command(), Command::Session);
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_write_args() {
        let cli = Cli::parse_from([
            "lyricsmith",
            "write",
            "--artist",
            "Lorde",
            "--topic",
            "summer",
            "--structure",
            "Royals",
            "--no-cues",
        ]);

        let Command::Write(args) = cli.command() else {
            panic!("expected write");
        };
        assert_eq!(args.artist, "Lorde");
        assert_eq!(args.topic, "summer");
        assert_eq!(args.structure.as_deref(), Some("Royals"));
        assert!(args.no_cues);
        assert!(args.inspiration_file.is_none());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["lyricsmith", "analyze", "Daft Punk", "-vv", "--no-config"]);

        assert_eq!(
            cli.command(),
            Command::Analyze {
                name: "Daft Punk".to_string()
            }
        );
        assert_eq!(cli.verbose, 2);
        assert!(cli.no_config);
    }

    #[test]
    fn test_write_requires_artist_and_topic() {
        assert!(Cli::try_parse_from(["lyricsmith", "write", "--artist", "Lorde"]).is_err());
    }

    #[test]
    fn test_serve_bind_override() {
        let cli = Cli::parse_from(["lyricsmith", "serve", "--bind", "0.0.0.0:9000"]);
        assert_eq!(
            cli.command(),
            Command::Serve {
                bind: Some("0.0.0.0:9000".to_string())
            }
        );
    }
}
