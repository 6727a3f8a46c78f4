//! Quote-aware tokenizer shared by redirection extraction and argument
//! parsing. A single left-to-right scan over the raw line, tracking whether
//! we are inside single or double quotes, matching the teacher's
//! `args.rs::parse_args` scan but generalized for double quotes, escapes,
//! and error reporting (see spec §4.1).

use crate::error::{Result, ShellError};

const SPACE: u8 = b' ';
const TAB: u8 = b'\t';
const SINGLE_QUOTE: u8 = b'\'';
const DOUBLE_QUOTE: u8 = b'"';
const BACKSLASH: u8 = b'\\';

/// Bytes that retain their escaping meaning inside double quotes; anything
/// else following a backslash in double quotes is passed through verbatim
/// (backslash and byte both survive).
const DOUBLE_QUOTE_ESCAPES: [u8; 4] = [b'\\', b'"', b'$', b'\n'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
  Word(String),
}

/// Splits `line` into whitespace-delimited words honoring single/double
/// quoting and backslash escapes. Does not know about redirection operators;
/// callers that need those must extract them first (see [`crate::parser`]).
pub fn tokenize(line: &str) -> Result<Vec<String>> {
  let bytes = line.as_bytes();
  let mut words = Vec::new();
  let mut current = Vec::new();
  let mut has_current = false;
  let mut in_single = false;
  let mut in_double = false;
  let mut i = 0;

  while i < bytes.len() {
    let b = bytes[i];

    if in_single {
      if b == SINGLE_QUOTE {
        in_single = false;
      } else {
        current.push(b);
      }
      i += 1;
      continue;
    }

    if in_double {
      if b == DOUBLE_QUOTE {
        in_double = false;
      } else if b == BACKSLASH && i + 1 < bytes.len() {
        let next = bytes[i + 1];
        if DOUBLE_QUOTE_ESCAPES.contains(&next) {
          current.push(next);
        } else {
          current.push(BACKSLASH);
          current.push(next);
        }
        i += 1;
      } else if b == BACKSLASH {
        return Err(ShellError::Syntax("unclosed quotes".into()));
      } else {
        current.push(b);
      }
      i += 1;
      continue;
    }

    match b {
      SINGLE_QUOTE => {
        in_single = true;
        has_current = true;
      }
      DOUBLE_QUOTE => {
        in_double = true;
        has_current = true;
      }
      BACKSLASH => {
        if i + 1 >= bytes.len() {
          return Err(ShellError::Syntax("unclosed quotes".into()));
        }
        current.push(bytes[i + 1]);
        has_current = true;
        i += 1;
      }
      SPACE | TAB => {
        if has_current {
          words.push(String::from_utf8_lossy(&current).into_owned());
          current.clear();
          has_current = false;
        }
      }
      other => {
        current.push(other);
        has_current = true;
      }
    }

    i += 1;
  }

  if in_single || in_double {
    return Err(ShellError::Syntax("unclosed quotes".into()));
  }

  if has_current {
    words.push(String::from_utf8_lossy(&current).into_owned());
  }

  Ok(words)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn splits_plain_words() {
    assert_eq!(tokenize("echo hello world").unwrap(), vec!["echo", "hello", "world"]);
  }

  #[test]
  fn collapses_runs_of_whitespace() {
    assert_eq!(tokenize("echo   hi").unwrap(), vec!["echo", "hi"]);
  }

  #[test]
  fn single_quotes_are_fully_literal() {
    assert_eq!(tokenize(r#"echo 'a b' 'c\d'"#).unwrap(), vec!["echo", "a b", r"c\d"]);
  }

  #[test]
  fn double_quotes_only_escape_known_set() {
    assert_eq!(tokenize(r#"echo "\$x""#).unwrap(), vec!["echo", "$x"]);
    assert_eq!(tokenize(r#"echo "\n""#).unwrap(), vec!["echo", r"\n"]);
  }

  #[test]
  fn unescaped_backslash_outside_quotes_escapes_any_byte() {
    assert_eq!(tokenize(r"echo \$x").unwrap(), vec!["echo", "$x"]);
  }

  #[test]
  fn unclosed_single_quote_is_syntax_error() {
    assert!(tokenize("echo 'unterminated").is_err());
  }

  #[test]
  fn unclosed_double_quote_is_syntax_error() {
    assert!(tokenize("echo \"unterminated").is_err());
  }

  #[test]
  fn trailing_backslash_is_syntax_error() {
    assert!(tokenize("echo foo\\").is_err());
  }

  #[test]
  fn empty_input_yields_no_words() {
    assert_eq!(tokenize("").unwrap(), Vec::<String>::new());
  }
}
