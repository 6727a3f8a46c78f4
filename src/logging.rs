//! `env_logger` initialization. The teacher ships no logging; `km-clay-vicut`
//! (pack sibling) pulls in `log` + `env_logger` for exactly this kind of CLI
//! tool, so the same pairing is adopted here rather than hand-rolled
//! `eprintln!` diagnostics.

use env_logger::Builder;
use log::LevelFilter;

/// `-v` raises the default filter from `warn` to `debug` (spec §6).
pub fn init(verbose: bool) {
  let level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };
  Builder::new().filter_level(level).format_timestamp(None).init();
}
