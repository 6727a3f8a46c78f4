//! Candidate enumeration, longest-common-prefix computation, and the
//! single-vs-double-TAB disposition rules of spec §4.3. The teacher's
//! `trie.rs` builds a static trie of builtin/PATH names and computes LCP by
//! walking it; that structure can't represent filesystem-path candidates
//! (which change every keystroke), so here LCP is computed directly over
//! whatever candidate list was enumerated this TAB press, and the trie is
//! kept only for the fixed command-name universe (see `setup_command_trie`
//! below, grounded in the teacher's `setup_completions`).

use std::time::{Duration, Instant};

use crate::ansi_codes::AnsiCode;
use crate::builtins::BuiltinTable;
use crate::config::Config;
use crate::line_editor::LineBuffer;
use crate::trie::Trie;
use crate::utils::find_all_executables;

const DOUBLE_TAP_WINDOW: Duration = Duration::from_secs(1);

/// Per-session double-tap memory (spec §3's `CompletionState`).
pub struct CompletionState {
  last_tap: Option<(Instant, String)>,
}

impl CompletionState {
  pub fn new() -> Self {
    Self { last_tap: None }
  }

  fn reset(&mut self) {
    self.last_tap = None;
  }

  fn record(&mut self, prefix: &str) {
    self.last_tap = Some((Instant::now(), prefix.to_string()));
  }

  fn is_repeat_of(&self, prefix: &str) -> bool {
    match &self.last_tap {
      Some((when, stored)) => stored == prefix && when.elapsed() <= DOUBLE_TAP_WINDOW,
      None => false,
    }
  }
}

impl Default for CompletionState {
  fn default() -> Self {
    Self::new()
  }
}

/// Builds the trie of first-word candidates: builtin names union PATH
/// executables, deduplicated by name (spec §4.3 source 2). Rebuilt once per
/// prompt the way the teacher's `main.rs::setup_completions` does, so a
/// freshly-installed binary shows up without restarting the shell.
pub fn setup_command_trie(builtins: &BuiltinTable, config: &Config) -> Trie {
  let mut trie = Trie::new();
  for name in builtins.names() {
    trie.insert(name);
  }
  for exe in find_all_executables(config.path.as_deref()) {
    trie.insert(&exe);
  }
  trie
}

pub struct CompletionEngine<'a> {
  command_trie: &'a Trie,
  state: CompletionState,
}

impl<'a> CompletionEngine<'a> {
  pub fn new(command_trie: &'a Trie) -> Self {
    Self { command_trie, state: CompletionState::new() }
  }

  /// Entry point invoked on TAB: extracts the word under the cursor,
  /// enumerates candidates, and applies the disposition rules of spec
  /// §4.3, mutating `buf` in place.
  pub fn complete(&mut self, buf: &mut LineBuffer) -> crate::error::Result<()> {
    let prefix_text = buf.as_str()[..buf.cursor()].to_string();
    let (word_start, last_word) = extract_last_word(&prefix_text);
    let is_first_word = word_start == 0;

    let mut candidates = if last_word.contains('/') {
      path_candidates(&last_word)
    } else if is_first_word {
      command_candidates(&last_word, self.command_trie)
    } else {
      cwd_candidates(&last_word)
    };

    candidates.sort();
    candidates.dedup();

    match candidates.len() {
      0 => {
        AnsiCode::BEL.write();
        self.state.reset();
      }
      1 => {
        let candidate = &candidates[0];
        let is_dir = candidate.ends_with('/');
        let mut replacement = candidate.clone();
        if !is_dir {
          replacement.push(' ');
        }
        buf.replace_range(word_start, buf.cursor(), replacement.as_bytes());
        self.state.reset();
      }
      _ => {
        let lcp = longest_common_prefix(&candidates);
        if lcp.len() > last_word.len() {
          buf.replace_range(word_start, buf.cursor(), lcp.as_bytes());
          self.state.record(&last_word);
        } else if self.state.is_repeat_of(&last_word) {
          log::debug!("listing {} ambiguous candidates for {last_word:?}", candidates.len());
          print!("\r\n{}\r\n", candidates.join("  "));
          self.state.reset();
        } else {
          AnsiCode::BEL.write();
          self.state.record(&last_word);
        }
      }
    }

    Ok(())
  }
}

/// Splits `prefix` (text from start-of-buffer to cursor) into the byte
/// offset of the last word's start and the word itself, where a word
/// boundary is an unescaped space.
fn extract_last_word(prefix: &str) -> (usize, String) {
  let bytes = prefix.as_bytes();
  let mut i = bytes.len();
  while i > 0 {
    if bytes[i - 1] == b' ' && (i < 2 || bytes[i - 2] != b'\\') {
      break;
    }
    i -= 1;
  }
  (i, prefix[i..].to_string())
}

/// Longest common byte prefix across `candidates`: every candidate starts
/// with it, and no longer string shares that property (spec §8 invariant
/// 5).
fn longest_common_prefix(candidates: &[String]) -> String {
  let Some(first) = candidates.first() else {
    return String::new();
  };
  let mut lcp = first.as_bytes();
  for candidate in &candidates[1..] {
    let other = candidate.as_bytes();
    let max = lcp.len().min(other.len());
    let mut common = 0;
    while common < max && lcp[common] == other[common] {
      common += 1;
    }
    lcp = &lcp[..common];
  }
  String::from_utf8_lossy(lcp).into_owned()
}

fn command_candidates(prefix: &str, trie: &Trie) -> Vec<String> {
  trie.get_completions(prefix)
}

fn cwd_candidates(prefix: &str) -> Vec<String> {
  dir_candidates(".", prefix)
}

/// Splits a path-shaped `last_word` into `dir_prefix`/`file_prefix` and
/// enumerates matching entries, marking directories with a trailing `/`
/// (spec §4.3 source 1).
fn path_candidates(last_word: &str) -> Vec<String> {
  let (dir_part, file_prefix) = match last_word.rfind('/') {
    Some(idx) => (&last_word[..idx], &last_word[idx + 1..]),
    None => ("", last_word),
  };

  let dir_prefix = if dir_part.is_empty() {
    if last_word.starts_with('/') { "/" } else { "." }
  } else {
    dir_part
  };

  dir_candidates(dir_prefix, file_prefix)
    .into_iter()
    .map(|name| {
      if dir_prefix == "." {
        name
      } else if dir_prefix.ends_with('/') {
        format!("{dir_prefix}{name}")
      } else {
        format!("{dir_prefix}/{name}")
      }
    })
    .collect()
}

fn dir_candidates(dir: &str, file_prefix: &str) -> Vec<String> {
  let mut out = Vec::new();
  let Ok(entries) = std::fs::read_dir(dir) else {
    return out;
  };
  for entry in entries.flatten() {
    let Ok(name) = entry.file_name().into_string() else {
      continue;
    };
    if !name.starts_with(file_prefix) {
      continue;
    }
    let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
    out.push(if is_dir { format!("{name}/") } else { name });
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn lcp_of_single_candidate_is_itself() {
    assert_eq!(longest_common_prefix(&["echo".to_string()]), "echo");
  }

  #[test]
  fn lcp_across_divergent_candidates() {
    let candidates = vec!["echo".to_string(), "edit".to_string()];
    assert_eq!(longest_common_prefix(&candidates), "e");
  }

  #[test]
  fn lcp_of_empty_list_is_empty() {
    assert_eq!(longest_common_prefix(&[]), "");
  }

  #[test]
  fn extract_last_word_splits_on_space() {
    assert_eq!(extract_last_word("echo hel"), (5, "hel".to_string()));
    assert_eq!(extract_last_word("ec"), (0, "ec".to_string()));
  }
}
