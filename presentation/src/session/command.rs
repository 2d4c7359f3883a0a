//! Slash commands understood by the interactive session

use lyricsmith_domain::HistoryId;
use std::fmt;
use std::path::PathBuf;

/// One parsed line of REPL input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Artist(String),
    Topic(String),
    /// `None` clears the structure source
    Structure(Option<String>),
    /// `None` clears the inspiration lyrics
    Inspiration(Option<PathBuf>),
    Cues(bool),
    /// Bare input: use it as the topic and write a new song
    Write(String),
    New,
    Remix,
    Hook,
    Enhance,
    Style(String),
    History,
    Load(HistoryId),
    Clear,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Unknown(String),
    MissingArgument { usage: &'static str },
    InvalidArgument { usage: &'static str, value: String },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Unknown(cmd) => {
                write!(f, "Unknown command: {} (type /help for commands)", cmd)
            }
            ParseError::MissingArgument { usage } => write!(f, "Usage: {}", usage),
            ParseError::InvalidArgument { usage, value } => {
                write!(f, "Invalid argument '{}'. Usage: {}", value, usage)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Command reference shown by `/help`
pub const HELP: &[(&str, &str)] = &[
    ("/artist <name>", "Artist whose style to imitate"),
    ("/topic <text>", "What the song is about"),
    ("/structure [name]", "Borrow structure from an artist or song (no arg clears)"),
    ("/inspiration [file]", "Lyrics file to draw themes from (no arg clears)"),
    ("/cues on|off", "Toggle production cues"),
    ("/new", "Write a new song"),
    ("/remix", "Reimagine the current lyrics"),
    ("/hook", "Extended remix built around the hook"),
    ("/enhance", "Add production cues and backing vocals"),
    ("/style <name>", "Analyze the sound of an artist or song"),
    ("/history", "List previous generations"),
    ("/load <id>", "Restore a history entry"),
    ("/clear", "Clear the history"),
    ("/show", "Show the current song and settings"),
    ("/help, /h, /?", "Show this help"),
    ("/quit, /exit, /q", "Exit the session"),
];

/// Parse one non-empty line of input
pub fn parse_command(line: &str) -> Result<SessionCommand, ParseError> {
    let line = line.trim();
    if !line.starts_with('/') {
        return Ok(SessionCommand::Write(line.to_string()));
    }

    let (name, arg) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };
    let arg = (!arg.is_empty()).then(|| arg.to_string());

    let command = match name {
        "/artist" => SessionCommand::Artist(required(arg, "/artist <name>")?),
        "/topic" => SessionCommand::Topic(required(arg, "/topic <text>")?),
        "/structure" => SessionCommand::Structure(arg),
        "/inspiration" => SessionCommand::Inspiration(arg.map(PathBuf::from)),
        "/cues" => SessionCommand::Cues(parse_toggle(arg)?),
        "/new" => SessionCommand::New,
        "/remix" => SessionCommand::Remix,
        "/hook" => SessionCommand::Hook,
        "/enhance" => SessionCommand::Enhance,
        "/style" => SessionCommand::Style(required(arg, "/style <artist or song>")?),
        "/history" => SessionCommand::History,
        "/load" => SessionCommand::Load(parse_history_id(required(arg, "/load <id>")?)?),
        "/clear" => SessionCommand::Clear,
        "/show" => SessionCommand::Show,
        "/help" | "/h" | "/?" => SessionCommand::Help,
        "/quit" | "/exit" | "/q" => SessionCommand::Quit,
        other => return Err(ParseError::Unknown(other.to_string())),
    };
    Ok(command)
}

fn required(arg: Option<String>, usage: &'static str) -> Result<String, ParseError> {
    arg.ok_or(ParseError::MissingArgument { usage })
}

fn parse_toggle(arg: Option<String>) -> Result<bool, ParseError> {
    const USAGE: &str = "/cues on|off";
    let value = required(arg, USAGE)?;
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        _ => Err(ParseError::InvalidArgument {
            usage: USAGE,
            value,
        }),
    }
}

/// Accepts `3` or `#3`
fn parse_history_id(arg: String) -> Result<HistoryId, ParseError> {
    arg.trim_start_matches('#')
        .parse::<u64>()
        .map(HistoryId)
        .map_err(|_| ParseError::InvalidArgument {
            usage: "/load <id>",
            value: arg,
        })
}
