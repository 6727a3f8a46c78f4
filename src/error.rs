use std::{io, result};

/// The shell's error taxonomy (kinds, not a wrapper over every possible
/// failure): `Syntax`/`Parse` discard only the current line, `Io` and
/// `CommandNotFound` abort only the current command, `FatalTerminal` is the
/// only variant that unwinds the whole REPL loop.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
  #[error("{0}")]
  Syntax(String),

  #[error("parse error: {0}")]
  Parse(String),

  #[error("{0}: command not found")]
  CommandNotFound(String),

  #[error("IO Error: {0}")]
  Io(#[from] io::Error),

  #[error("UTF8 Error: {0}")]
  Utf8(#[from] std::string::FromUtf8Error),

  #[error("terminal error: {0}")]
  FatalTerminal(String),
}

pub type Result<T> = result::Result<T, ShellError>;
