//! Argument parsing for the shell binary itself (spec §6): `-h/--help`,
//! `-v/--verbose`, `-V/--version`. `clap`'s derive macros are the pattern
//! the pack's other CLI-shaped teacher (`ed-rust`) uses. `main` calls
//! `Cli::try_parse` rather than `Cli::parse` so it can map clap's own exit
//! codes (0 for `--help`/`--version`, 2 for everything else) onto spec §6's
//! contract of exit status 1 for an unknown flag.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "posh", version, about = "A POSIX-style interactive shell core")]
pub struct Cli {
  /// Enable debug-level diagnostics.
  #[arg(short, long)]
  pub verbose: bool,
}
