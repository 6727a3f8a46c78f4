//! The explicit session object spec §9 calls for: a single owner of the
//! three process-wide mutable pieces of state (`TerminalState`,
//! `CompletionState`, the `BuiltinTable`) instead of the module-level
//! statics the original C shell uses. Constructed once in `main` and
//! threaded through the REPL loop.

use crate::builtins::BuiltinTable;
use crate::config::Config;
use crate::terminal::TerminalState;

pub struct Session {
  pub config: Config,
  pub builtins: BuiltinTable,
  pub terminal: TerminalState,
}

impl Session {
  pub fn new(config: Config) -> crate::error::Result<Self> {
    Ok(Self { config, builtins: BuiltinTable::new(), terminal: TerminalState::capture()? })
  }

  /// Rendered prompt for the current working directory (spec §6): the cwd
  /// in a distinguishing style followed by `$ `. Falls back to plain ASCII
  /// `$ ` when stdout isn't a TTY or the cwd can't be read.
  pub fn prompt(&self) -> String {
    use std::io::IsTerminal;

    if !std::io::stdout().is_terminal() {
      return "$ ".to_string();
    }

    match std::env::current_dir() {
      Ok(dir) => format!("\x1b[1;34m{}\x1b[0m$ ", dir.display()),
      Err(_) => "$ ".to_string(),
    }
  }
}
