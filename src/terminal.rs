//! Owns the controlling terminal's attributes. Replaces the teacher's
//! `stty raw -echo` subprocess shell-out (`main.rs::enable_raw_mode`) with
//! direct `termios` control via `nix`, which is what spec §6 requires down
//! to the individual flag: echo, canonical mode, extended processing,
//! signal processing, CR->NL translation, and output post-processing all
//! cleared; 8-bit characters; `VMIN=1`, `VTIME=0`.
//!
//! `TerminalState` is the scoped-acquisition resource spec §9 calls for:
//! entering raw mode returns a guard whose `Drop` restores the saved
//! attributes, so a panic mid-line-edit still leaves the user's terminal
//! usable.

use nix::sys::termios::{self, LocalFlags, SetArg, Termios};
use std::os::unix::io::BorrowedFd;

use crate::error::{Result, ShellError};

/// Saved original attributes for stdin, plus whether raw mode is currently
/// active. Owned by the `Session`, never a module-level static.
pub struct TerminalState {
  original: Termios,
}

impl TerminalState {
  /// Captures the current attributes of stdin. Call once at startup.
  pub fn capture() -> Result<Self> {
    let stdin = stdin_fd();
    let original = termios::tcgetattr(stdin)
      .map_err(|e| ShellError::FatalTerminal(format!("failed to read terminal attributes: {e}")))?;
    Ok(Self { original })
  }

  /// Enters raw mode, returning a guard that restores the original
  /// attributes when dropped (including on an early return or panic from
  /// inside the line editor).
  pub fn enter_raw<'a>(&'a self) -> Result<RawModeGuard<'a>> {
    let stdin = stdin_fd();
    let mut raw = self.original.clone();

    raw.input_flags &= !(termios::InputFlags::ICRNL);
    raw.output_flags &= !(termios::OutputFlags::OPOST);
    raw.local_flags &= !(LocalFlags::ECHO
      | LocalFlags::ICANON
      | LocalFlags::IEXTEN
      | LocalFlags::ISIG);
    raw.control_flags &= !(termios::ControlFlags::CSIZE);
    raw.control_flags |= termios::ControlFlags::CS8;
    raw.control_chars[termios::SpecialCharacterIndices::VMIN as usize] = 1;
    raw.control_chars[termios::SpecialCharacterIndices::VTIME as usize] = 0;

    termios::tcsetattr(stdin, SetArg::TCSANOW, &raw)
      .map_err(|e| ShellError::FatalTerminal(format!("failed to enter raw mode: {e}")))?;

    Ok(RawModeGuard { state: self })
  }

  /// Restores the originally captured attributes immediately.
  pub fn restore(&self) -> Result<()> {
    let stdin = stdin_fd();
    termios::tcsetattr(stdin, SetArg::TCSANOW, &self.original)
      .map_err(|e| ShellError::FatalTerminal(format!("failed to restore terminal attributes: {e}")))?;
    Ok(())
  }
}

/// RAII guard for raw mode; restoring on drop is what makes the
/// acquire/release pattern in spec §9 hold across panics.
pub struct RawModeGuard<'a> {
  state: &'a TerminalState,
}

impl Drop for RawModeGuard<'_> {
  fn drop(&mut self) {
    if let Err(e) = self.state.restore() {
      log::error!("failed to restore terminal state: {e}");
    }
  }
}

fn stdin_fd() -> BorrowedFd<'static> {
  // SAFETY: fd 0 (stdin) stays open for the lifetime of the process; we
  // never close it ourselves.
  unsafe { BorrowedFd::borrow_raw(0) }
}

#[cfg(test)]
mod tests {
  // Raw-mode behavior requires a real controlling terminal; these cases
  // are exercised via the integration tests under tests/, which drive the
  // built binary through a pty-less pipe where raw-mode entry is a no-op
  // on failure paths the executor already guards against.
}
