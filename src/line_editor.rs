//! [`LineBuffer`] plus the raw-mode key-read loop that turns terminal bytes
//! into an accepted line. Generalizes the teacher's `main.rs::read_input`
//! (which only handled Enter/Backspace/Tab/Ctrl-C/printable) into the full
//! key table of spec §4.2, and its escape-sequence state machine is
//! grounded in the teacher's (unwired) `input.rs::SequenceState`.

use std::io::{self, Read, Write};

use bytes::BytesMut;

use crate::ansi_codes::AnsiCode;
use crate::completion::CompletionEngine;
use crate::error::Result;

const MIN_CAPACITY: usize = 1024;

/// Editable line text with a byte-addressed cursor. Editing operates on
/// bytes, not chars, matching the source's behavior (spec §3); callers that
/// need a `&str` use [`LineBuffer::as_str`], which falls back to lossy
/// decoding rather than panicking on a mid-multibyte-sequence cursor.
pub struct LineBuffer {
  text: BytesMut,
  cursor: usize,
}

impl LineBuffer {
  pub fn new() -> Self {
    Self { text: BytesMut::with_capacity(MIN_CAPACITY), cursor: 0 }
  }

  pub fn len(&self) -> usize {
    self.text.len()
  }

  pub fn is_empty(&self) -> bool {
    self.text.is_empty()
  }

  pub fn cursor(&self) -> usize {
    self.cursor
  }

  pub fn as_bytes(&self) -> &[u8] {
    &self.text
  }

  pub fn as_str(&self) -> std::borrow::Cow<'_, str> {
    String::from_utf8_lossy(&self.text)
  }

  fn reserve_for(&mut self, extra: usize) {
    if self.text.capacity() - self.text.len() < extra {
      let mut grown = (self.text.capacity().max(MIN_CAPACITY)) * 2;
      while grown - self.text.len() < extra {
        grown *= 2;
      }
      self.text.reserve(grown - self.text.capacity());
    }
  }

  pub fn insert_byte(&mut self, b: u8) {
    self.reserve_for(1);
    let len = self.text.len();
    self.text.resize(len + 1, 0);
    self.text.copy_within(self.cursor..len, self.cursor + 1);
    self.text[self.cursor] = b;
    self.cursor += 1;
  }

  pub fn delete_before_cursor(&mut self) -> bool {
    if self.cursor == 0 {
      return false;
    }
    self.text.copy_within(self.cursor.., self.cursor - 1);
    self.text.truncate(self.text.len() - 1);
    self.cursor -= 1;
    true
  }

  pub fn truncate_at_cursor(&mut self) {
    self.text.truncate(self.cursor);
  }

  pub fn delete_from_start_to_cursor(&mut self) {
    self.text.copy_within(self.cursor.., 0);
    self.text.truncate(self.text.len() - self.cursor);
    self.cursor = 0;
  }

  pub fn delete_previous_word(&mut self) {
    let bytes = &self.text[..self.cursor];
    let mut end = self.cursor;
    while end > 0 && bytes[end - 1].is_ascii_whitespace() {
      end -= 1;
    }
    let mut start = end;
    while start > 0 && !bytes[start - 1].is_ascii_whitespace() {
      start -= 1;
    }
    self.text.copy_within(self.cursor.., start);
    self.text.truncate(self.text.len() - (self.cursor - start));
    self.cursor = start;
  }

  pub fn move_to_start(&mut self) {
    self.cursor = 0;
  }

  pub fn move_to_end(&mut self) {
    self.cursor = self.text.len();
  }

  pub fn move_left(&mut self) {
    if self.cursor > 0 {
      self.cursor -= 1;
    }
  }

  pub fn move_right(&mut self) {
    if self.cursor < self.text.len() {
      self.cursor += 1;
    }
  }

  pub fn replace_range(&mut self, start: usize, end: usize, with: &[u8]) {
    self.reserve_for(with.len());
    let tail_len = self.text.len() - end;
    let new_len = start + with.len() + tail_len;
    if new_len > self.text.len() {
      self.text.resize(new_len, 0);
    }
    self.text.copy_within(end..end + tail_len, start + with.len());
    self.text[start..start + with.len()].copy_from_slice(with);
    self.text.truncate(new_len);
    self.cursor = start + with.len();
  }

  pub fn clear(&mut self) {
    self.text.clear();
    self.cursor = 0;
  }
}

impl Default for LineBuffer {
  fn default() -> Self {
    Self::new()
  }
}

/// Result of one call to [`read_line`].
pub enum ReadOutcome {
  Accepted(String),
  /// Ctrl-C: line discarded, caller should loop and redraw a fresh prompt.
  Abandoned,
  /// Ctrl-D on an empty buffer: end of input, main loop should exit.
  Eof,
}

enum EscapeState {
  None,
  Esc,
  Bracket,
  /// `ESC O <letter>`: the alternate application-mode encoding some
  /// terminals send for arrows/Home/End instead of `ESC [ <letter>`.
  O,
}

/// Reads one logical line from stdin in raw mode, dispatching each byte
/// through the key table of spec §4.2 and invoking `completion` on TAB.
pub fn read_line(prompt: &str, completion: &mut CompletionEngine) -> Result<ReadOutcome> {
  let mut buf = LineBuffer::new();
  let mut stdin = io::stdin();
  let mut stdout = io::stdout();
  let mut esc = EscapeState::None;
  let mut byte = [0u8; 1];

  redraw(prompt, &buf)?;

  loop {
    if stdin.read(&mut byte)? == 0 {
      return Ok(ReadOutcome::Eof);
    }
    let b = byte[0];

    match esc {
      EscapeState::None if b == 0x1b => {
        esc = EscapeState::Esc;
        continue;
      }
      EscapeState::Esc => {
        esc = match b {
          b'[' => EscapeState::Bracket,
          b'O' => EscapeState::O,
          _ => EscapeState::None,
        };
        continue;
      }
      EscapeState::Bracket => {
        esc = EscapeState::None;
        match b {
          b'C' => buf.move_right(),
          b'D' => buf.move_left(),
          b'A' | b'B' => {} // history navigation intentionally ignored (spec §4.2)
          b'1' | b'3' | b'4' => {
            // Home/Delete/End: ESC [ n ~, swallow the trailing '~'.
            let mut tilde = [0u8; 1];
            let _ = stdin.read(&mut tilde);
            match b {
              b'1' => buf.move_to_start(),
              b'4' => buf.move_to_end(),
              b'3' => {
                if buf.cursor() < buf.len() {
                  buf.move_right();
                  buf.delete_before_cursor();
                }
              }
              _ => unreachable!(),
            }
          }
          _ => {}
        }
        redraw(prompt, &buf)?;
        continue;
      }
      EscapeState::O => {
        esc = EscapeState::None;
        match b {
          b'C' => buf.move_right(),
          b'D' => buf.move_left(),
          b'F' => buf.move_to_end(),
          b'H' => buf.move_to_start(),
          b'A' | b'B' => {} // history navigation intentionally ignored (spec §4.2)
          _ => {}
        }
        redraw(prompt, &buf)?;
        continue;
      }
      EscapeState::None => {}
    }

    match b {
      b'\r' | b'\n' => {
        AnsiCode::CRLF.write();
        stdout.flush()?;
        return Ok(ReadOutcome::Accepted(buf.as_str().into_owned()));
      }
      0x03 => {
        print!("^C");
        AnsiCode::CRLF.write();
        stdout.flush()?;
        return Ok(ReadOutcome::Abandoned);
      }
      0x04 => {
        if buf.is_empty() {
          return Ok(ReadOutcome::Eof);
        }
      }
      0x08 | 0x7f => {
        buf.delete_before_cursor();
        redraw(prompt, &buf)?;
      }
      0x01 => {
        buf.move_to_start();
        redraw(prompt, &buf)?;
      }
      0x05 => {
        buf.move_to_end();
        redraw(prompt, &buf)?;
      }
      0x02 => {
        buf.move_left();
        redraw(prompt, &buf)?;
      }
      0x06 => {
        buf.move_right();
        redraw(prompt, &buf)?;
      }
      0x0b => {
        buf.truncate_at_cursor();
        redraw(prompt, &buf)?;
      }
      0x15 => {
        buf.delete_from_start_to_cursor();
        redraw(prompt, &buf)?;
      }
      0x17 => {
        buf.delete_previous_word();
        redraw(prompt, &buf)?;
      }
      0x0c => {
        AnsiCode::ClearScreen.write();
        AnsiCode::CursorHome.write();
        stdout.flush()?;
        redraw(prompt, &buf)?;
      }
      b'\t' => {
        completion.complete(&mut buf)?;
        redraw(prompt, &buf)?;
      }
      printable if printable >= 0x20 => {
        buf.insert_byte(printable);
        redraw(prompt, &buf)?;
      }
      _ => {}
    }
  }
}

/// Re-emits the prompt and buffer, clearing any stale tail, and positions
/// the cursor at `prompt width + byte offset` (spec §4.2 redraw contract).
fn redraw(prompt: &str, buf: &LineBuffer) -> Result<()> {
  let mut stdout = io::stdout();
  print!("\r{}", AnsiCode::ClearToEndOfLine);
  print!("{}{}", prompt, buf.as_str());
  let col = prompt.len() + buf.cursor();
  print!("\r");
  if col > 0 {
    print!("\x1b[{}C", col);
  }
  stdout.flush()?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn insert_and_cursor_stays_in_range() {
    let mut b = LineBuffer::new();
    b.insert_byte(b'h');
    b.insert_byte(b'i');
    assert_eq!(b.as_str(), "hi");
    assert_eq!(b.cursor(), 2);
  }

  #[test]
  fn insert_in_middle() {
    let mut b = LineBuffer::new();
    for c in b"ac" {
      b.insert_byte(*c);
    }
    b.move_left();
    b.insert_byte(b'b');
    assert_eq!(b.as_str(), "abc");
  }

  #[test]
  fn backspace_removes_before_cursor() {
    let mut b = LineBuffer::new();
    for c in b"abc" {
      b.insert_byte(*c);
    }
    b.move_left();
    assert!(b.delete_before_cursor());
    assert_eq!(b.as_str(), "ac");
    assert_eq!(b.cursor(), 1);
  }

  #[test]
  fn ctrl_w_deletes_previous_word() {
    let mut b = LineBuffer::new();
    for c in b"echo hello world" {
      b.insert_byte(*c);
    }
    b.delete_previous_word();
    assert_eq!(b.as_str(), "echo hello ");
  }

  #[test]
  fn ctrl_u_deletes_to_start() {
    let mut b = LineBuffer::new();
    for c in b"hello" {
      b.insert_byte(*c);
    }
    b.move_left();
    b.move_left();
    b.delete_from_start_to_cursor();
    assert_eq!(b.as_str(), "lo");
    assert_eq!(b.cursor(), 0);
  }

  #[test]
  fn ctrl_k_truncates_at_cursor() {
    let mut b = LineBuffer::new();
    for c in b"hello" {
      b.insert_byte(*c);
    }
    b.move_left();
    b.move_left();
    b.truncate_at_cursor();
    assert_eq!(b.as_str(), "hel");
  }

  #[test]
  fn replace_range_updates_cursor() {
    let mut b = LineBuffer::new();
    for c in b"ec /tmp" {
      b.insert_byte(*c);
    }
    b.replace_range(0, 2, b"echo");
    assert_eq!(b.as_str(), "echo /tmp");
    assert_eq!(b.cursor(), 4);
  }
}
