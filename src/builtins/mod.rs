//! Built-in command dispatch (spec §4.5). The teacher uses a `From<String>
//! for Cmd` enum plus a match-based `exec`; kept here but widened into an
//! explicit [`BuiltinTable`] so completion and `type`/`help` can enumerate
//! builtin names and their help text without re-deriving them from the
//! dispatch enum.

mod cd;
mod echo;
mod exit;
mod help;
mod pwd;
mod type_cmd;

use crate::config::Config;
use crate::parser::Invocation;

/// What a builtin leaves behind after running: an exit status plus
/// anything it wrote to stdout/stderr, so the executor can apply
/// redirection uniformly across builtins and external commands.
pub struct BuiltinOutput {
  pub status: i32,
  pub stdout: String,
  pub stderr: String,
}

impl BuiltinOutput {
  pub fn ok(stdout: impl Into<String>) -> Self {
    Self { status: 0, stdout: stdout.into(), stderr: String::new() }
  }

  pub fn ok_silent() -> Self {
    Self { status: 0, stdout: String::new(), stderr: String::new() }
  }

  pub fn fail(status: i32, stderr: impl Into<String>) -> Self {
    Self { status, stdout: String::new(), stderr: stderr.into() }
  }
}

/// Builtins that only need their own argv use a plain handler; `cd` also
/// needs the resolved `Config` (for `$HOME`); `type` and `help` need to see
/// the whole table (to report on other builtins), so those two are
/// dispatched separately in [`BuiltinTable::run`].
enum Dispatch {
  Plain(fn(&[String]) -> BuiltinOutput),
  WithConfig(fn(&[String], &Config) -> BuiltinOutput),
  NeedsTable,
}

struct Entry {
  name: &'static str,
  dispatch: Dispatch,
  help: &'static str,
}

/// Immutable name -> (handler, help text) mapping. Built once at startup,
/// never mutated (spec §3).
pub struct BuiltinTable {
  entries: Vec<Entry>,
}

impl BuiltinTable {
  pub fn new() -> Self {
    Self {
      entries: vec![
        Entry { name: "cd", dispatch: Dispatch::WithConfig(cd::run), help: cd::HELP },
        Entry { name: "echo", dispatch: Dispatch::Plain(echo::run), help: echo::HELP },
        Entry { name: "pwd", dispatch: Dispatch::Plain(pwd::run), help: pwd::HELP },
        Entry { name: "exit", dispatch: Dispatch::Plain(exit::run), help: exit::HELP },
        Entry { name: "type", dispatch: Dispatch::NeedsTable, help: type_cmd::HELP },
        Entry { name: "help", dispatch: Dispatch::NeedsTable, help: help::HELP },
      ],
    }
  }

  pub fn is_builtin(&self, name: &str) -> bool {
    self.entries.iter().any(|e| e.name == name)
  }

  pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
    self.entries.iter().map(|e| e.name)
  }

  pub fn help_for(&self, name: &str) -> Option<&'static str> {
    self.entries.iter().find(|e| e.name == name).map(|e| e.help)
  }

  pub fn run(&self, invocation: &Invocation, config: &Config) -> Option<BuiltinOutput> {
    let name = invocation.argv.first()?;
    let entry = self.entries.iter().find(|e| e.name == name)?;
    Some(match &entry.dispatch {
      Dispatch::Plain(handler) => handler(&invocation.argv),
      Dispatch::WithConfig(handler) => handler(&invocation.argv, config),
      Dispatch::NeedsTable if entry.name == "type" => {
        type_cmd::run_with_table(&invocation.argv, self, config)
      }
      Dispatch::NeedsTable => help::run_with_table(&invocation.argv, self),
    })
  }
}

impl Default for BuiltinTable {
  fn default() -> Self {
    Self::new()
  }
}
