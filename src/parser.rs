//! Builds an [`Invocation`] from a raw input line: first a quote-aware scan
//! extracts redirection operators and their targets, then the residual text
//! is handed to [`crate::lexer::tokenize`] to build `argv`. Mirrors the
//! teacher's two-phase approach (`args.rs` tokenizes, `writer.rs`'s
//! `Redirection` models the target) but performs both phases over a single
//! quote-aware scan per spec §4.1, rather than the teacher's naive
//! space/single-quote-only split.

use crate::error::{Result, ShellError};
use crate::lexer;

const SINGLE_QUOTE: u8 = b'\'';
const DOUBLE_QUOTE: u8 = b'"';
const BACKSLASH: u8 = b'\\';

/// One redirection target: a file path plus whether to append or truncate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirTarget {
  pub path: String,
  pub append: bool,
}

/// Output-stream redirection extracted from a command line. stdin
/// redirection is out of scope (spec §3).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Redirection {
  pub stdout_target: Option<RedirTarget>,
  pub stderr_target: Option<RedirTarget>,
}

/// The parsed form of one command line: an ordered argument list plus any
/// redirections. An empty `argv` with an unset `Redirection` is a valid
/// no-op (spec §3 invariant).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
  pub argv: Vec<String>,
  pub redir: Redirection,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Stream {
  Stdout,
  Stderr,
}

/// Parses one raw input line into an [`Invocation`].
pub fn parse(line: &str) -> Result<Invocation> {
  let (residual, redir) = extract_redirections(line)?;
  let argv = lexer::tokenize(&residual)?;

  if argv.is_empty() && (redir.stdout_target.is_some() || redir.stderr_target.is_some()) {
    return Err(ShellError::Syntax(
      "syntax error: redirection without a command".into(),
    ));
  }

  Ok(Invocation { argv, redir })
}

fn is_whitespace(b: u8) -> bool {
  b == b' ' || b == b'\t'
}

/// Quote-aware pass that excises redirection operators and their targets
/// from `line`, returning the residual text (still quoted/escaped, for
/// [`lexer::tokenize`] to dequote) and the accumulated [`Redirection`].
fn extract_redirections(line: &str) -> Result<(String, Redirection)> {
  let bytes = line.as_bytes();
  let n = bytes.len();
  let mut residual: Vec<u8> = Vec::with_capacity(n);
  let mut redir = Redirection::default();
  let mut in_single = false;
  let mut in_double = false;
  let mut i = 0;

  while i < n {
    let b = bytes[i];

    if in_single {
      residual.push(b);
      if b == SINGLE_QUOTE {
        in_single = false;
      }
      i += 1;
      continue;
    }

    if in_double {
      residual.push(b);
      if b == DOUBLE_QUOTE {
        in_double = false;
      } else if b == BACKSLASH && i + 1 < n {
        residual.push(bytes[i + 1]);
        i += 1;
      }
      i += 1;
      continue;
    }

    match b {
      SINGLE_QUOTE => {
        in_single = true;
        residual.push(b);
        i += 1;
      }
      DOUBLE_QUOTE => {
        in_double = true;
        residual.push(b);
        i += 1;
      }
      BACKSLASH => {
        residual.push(b);
        if i + 1 < n {
          residual.push(bytes[i + 1]);
          i += 1;
        }
        i += 1;
      }
      b'1' | b'2' if bytes.get(i + 1) == Some(&b'>') => {
        let stream = if b == b'1' { Stream::Stdout } else { Stream::Stderr };
        i = consume_redirection(bytes, i + 1, stream, &mut redir)?;
      }
      b'>' if at_boundary(bytes, i) => {
        i = consume_redirection(bytes, i, Stream::Stdout, &mut redir)?;
      }
      other => {
        residual.push(other);
        i += 1;
      }
    }
  }

  if in_single || in_double {
    return Err(ShellError::Syntax("unclosed quotes".into()));
  }

  Ok((String::from_utf8_lossy(&residual).into_owned(), redir))
}

/// True when position `i` is a valid start for a redirection operator: the
/// start of input, or preceded by whitespace.
fn at_boundary(bytes: &[u8], i: usize) -> bool {
  i == 0 || is_whitespace(bytes[i - 1])
}

/// Consumes a `>`/`>>` operator starting at `bytes[i]` (which must be `>`),
/// then its target path, recording the result on `redir`. Returns the index
/// just past the consumed target.
fn consume_redirection(
  bytes: &[u8],
  i: usize,
  stream: Stream,
  redir: &mut Redirection,
) -> Result<usize> {
  debug_assert_eq!(bytes[i], b'>');
  let mut j = i + 1;
  let append = bytes.get(j) == Some(&b'>');
  if append {
    j += 1;
  }

  while j < bytes.len() && is_whitespace(bytes[j]) {
    j += 1;
  }

  let (path, end) = read_target_word(bytes, j)?;
  if path.is_empty() {
    return Err(ShellError::Syntax(
      "syntax error: redirection operator without a target".into(),
    ));
  }

  let target = RedirTarget { path, append };
  match stream {
    Stream::Stdout => redir.stdout_target = Some(target),
    Stream::Stderr => redir.stderr_target = Some(target),
  }

  Ok(end)
}

/// Reads one quote/escape-aware word starting at `bytes[start]`, stopping at
/// the first unescaped whitespace or the start of a new redirection
/// operator (so `>a>b` assigns `a` to the first target without consuming
/// `>b`). Dequotes inline, since the target never re-enters `tokenize`.
fn read_target_word(bytes: &[u8], start: usize) -> Result<(String, usize)> {
  let n = bytes.len();
  let mut out = Vec::new();
  let mut in_single = false;
  let mut in_double = false;
  let mut i = start;

  while i < n {
    let b = bytes[i];

    if in_single {
      if b == SINGLE_QUOTE {
        in_single = false;
      } else {
        out.push(b);
      }
      i += 1;
      continue;
    }

    if in_double {
      if b == DOUBLE_QUOTE {
        in_double = false;
      } else if b == BACKSLASH && i + 1 < n {
        out.push(bytes[i + 1]);
        i += 1;
      } else {
        out.push(b);
      }
      i += 1;
      continue;
    }

    if is_whitespace(b) || b == b'>' {
      break;
    }

    match b {
      SINGLE_QUOTE => in_single = true,
      DOUBLE_QUOTE => in_double = true,
      BACKSLASH if i + 1 < n => {
        out.push(bytes[i + 1]);
        i += 1;
      }
      other => out.push(other),
    }
    i += 1;
  }

  if in_single || in_double {
    return Err(ShellError::Syntax("unclosed quotes".into()));
  }

  Ok((String::from_utf8_lossy(&out).into_owned(), i))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn argv(line: &str) -> Vec<String> {
    parse(line).unwrap().argv
  }

  #[test]
  fn empty_input_is_a_noop() {
    let inv = parse("").unwrap();
    assert!(inv.argv.is_empty());
    assert_eq!(inv.redir, Redirection::default());
  }

  #[test]
  fn whitespace_only_is_a_noop() {
    let inv = parse("   \t ").unwrap();
    assert!(inv.argv.is_empty());
  }

  #[test]
  fn quoted_redirection_operator_is_literal() {
    assert_eq!(argv(r#"echo ">""#), vec!["echo", ">"]);
  }

  #[test]
  fn bare_stdout_redirection() {
    let inv = parse("echo ok > /tmp/x").unwrap();
    assert_eq!(inv.argv, vec!["echo", "ok"]);
    assert_eq!(
      inv.redir.stdout_target,
      Some(RedirTarget { path: "/tmp/x".into(), append: false })
    );
  }

  #[test]
  fn digit_one_stdout_redirection() {
    let inv = parse("echo 1> out").unwrap();
    assert_eq!(inv.argv, vec!["echo"]);
    assert_eq!(
      inv.redir.stdout_target,
      Some(RedirTarget { path: "out".into(), append: false })
    );
  }

  #[test]
  fn digit_fuses_to_preceding_word_when_not_at_a_boundary() {
    // The digit need only directly precede `>`; it need not itself start a
    // word, so `hi1>` redirects stdout with `hi` as the trailing argument.
    let inv = parse("echo hi1> out").unwrap();
    assert_eq!(inv.argv, vec!["echo", "hi"]);
    assert_eq!(
      inv.redir.stdout_target,
      Some(RedirTarget { path: "out".into(), append: false })
    );
  }

  #[test]
  fn stderr_append_with_trailing_arg() {
    let inv = parse("echo 2>>err msg").unwrap();
    assert_eq!(inv.argv, vec!["echo", "msg"]);
    assert_eq!(
      inv.redir.stderr_target,
      Some(RedirTarget { path: "err".into(), append: true })
    );
  }

  #[test]
  fn last_redirection_on_same_stream_wins() {
    let inv = parse("echo hi > a.txt > b.txt").unwrap();
    assert_eq!(
      inv.redir.stdout_target,
      Some(RedirTarget { path: "b.txt".into(), append: false })
    );
  }

  #[test]
  fn redirection_without_command_is_syntax_error() {
    assert!(parse("> out").is_err());
  }

  #[test]
  fn redirection_without_target_is_syntax_error() {
    assert!(parse("echo >").is_err());
  }

  #[test]
  fn escaped_dollar_in_double_quotes() {
    assert_eq!(argv(r#"echo "\$x""#), vec!["echo", "$x"]);
  }

  #[test]
  fn escaped_dollar_in_single_quotes_stays_literal() {
    assert_eq!(argv(r"echo '\$x'"), vec!["echo", r"\$x"]);
  }

  #[test]
  fn quoted_double_quoted_args_join_with_single_quoted() {
    let inv = parse(r#"echo "a b" 'c d'"#).unwrap();
    assert_eq!(inv.argv, vec!["echo", "a b", "c d"]);
  }
}
