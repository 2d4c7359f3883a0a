//! Interactive songwriting session

pub mod command;
pub mod repl;

pub use command::{ParseError, SessionCommand, parse_command};
pub use repl::{Draft, SessionRepl};
