// Bash impl docs, see https://www.gnu.org/software/bash/manual/bash.html#Redirecting-Output

use std::io::{self, IsTerminal, Write};

use clap::{error::ErrorKind, Parser};

mod ansi_codes;
mod builtins;
mod cli;
mod completion;
mod config;
mod error;
mod executor;
mod lexer;
mod line_editor;
mod logging;
mod parser;
mod session;
mod terminal;
mod trie;
mod utils;

use completion::CompletionEngine;
use config::Config;
use error::ShellError;
use line_editor::ReadOutcome;
use session::Session;

/// Read-parse-execute loop over a line-edited raw-mode terminal (spec §2).
/// Each iteration: draw the prompt, read one logical line (TAB may invoke
/// completion), parse it into an `Invocation`, then execute it. The loop
/// ends on `exit`, end-of-file, or a fatal terminal error.
fn main() -> anyhow::Result<()> {
  let cli = match cli::Cli::try_parse() {
    Ok(cli) => cli,
    Err(e) => {
      let _ = e.print();
      let code = match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
      };
      std::process::exit(code);
    }
  };
  logging::init(cli.verbose);

  let config = Config::resolve(cli.verbose);
  let session = Session::new(config)?;

  let status = if io::stdin().is_terminal() {
    run_interactive(&session)?
  } else {
    run_piped(&session)?
  };

  std::process::exit(status);
}

/// Interactive REPL: raw-mode line editing, completion, the full key
/// table. The one case spec §7 lets terminate the loop with non-zero
/// status: `FatalTerminalError`.
fn run_interactive(session: &Session) -> anyhow::Result<i32> {
  loop {
    let prompt = session.prompt();
    let command_trie = completion::setup_command_trie(&session.builtins, &session.config);
    let mut completion_engine = CompletionEngine::new(&command_trie);

    let raw_guard = match session.terminal.enter_raw() {
      Ok(guard) => guard,
      Err(e) => {
        eprintln!("posh: {e}");
        return Ok(1);
      }
    };

    let outcome = line_editor::read_line(&prompt, &mut completion_engine);
    drop(raw_guard);

    let line = match outcome {
      Ok(ReadOutcome::Accepted(line)) => line,
      Ok(ReadOutcome::Abandoned) => continue,
      Ok(ReadOutcome::Eof) => {
        println!();
        return Ok(0);
      }
      Err(ShellError::FatalTerminal(msg)) => {
        eprintln!("posh: fatal: {msg}");
        return Ok(1);
      }
      Err(e) => {
        eprintln!("posh: {e}");
        continue;
      }
    };

    run_one(session, &line);
  }
}

/// Non-interactive mode: stdin isn't a TTY (piped or redirected input), so
/// there is no line editing or completion to drive — just read whole lines
/// and execute them, echoing the prompt the way a script-fed shell would.
fn run_piped(session: &Session) -> anyhow::Result<i32> {
  let stdin = io::stdin();
  let mut line = String::new();

  loop {
    print!("{}", session.prompt());
    io::stdout().flush()?;

    line.clear();
    let read = stdin.read_line(&mut line)?;
    if read == 0 {
      println!();
      return Ok(0);
    }

    run_one(session, line.trim_end_matches(['\n', '\r']));
  }
}

fn run_one(session: &Session, line: &str) {
  if line.trim().is_empty() {
    return;
  }

  let invocation = match parser::parse(line) {
    Ok(inv) => inv,
    Err(e) => {
      eprintln!("posh: {e}");
      return;
    }
  };

  match executor::execute(&invocation, &session.builtins, &session.config) {
    Ok(_status) => {}
    Err(ShellError::CommandNotFound(_)) => {}
    Err(e) => eprintln!("posh: {e}"),
  }
}
