//! Session-level configuration resolved once at startup from the
//! environment and CLI flags (spec §6 "Environment"). Not a features
//! Non-goal — reading `HOME`/`PATH` once here is the ambient bookkeeping
//! every builtin and the completion engine otherwise re-reads ad hoc.

use std::env;

#[derive(Debug, Clone)]
pub struct Config {
  pub home: Option<String>,
  pub path: Option<String>,
  pub verbose: bool,
}

impl Config {
  pub fn resolve(verbose: bool) -> Self {
    Self { home: env::var("HOME").ok(), path: env::var("PATH").ok(), verbose }
  }
}
