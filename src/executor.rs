//! Dispatches an [`Invocation`] to a builtin or an external process,
//! applying stream redirection at the file-descriptor level so that
//! builtins and forked children share one redirection mechanism (spec
//! §4.4). The teacher instead buffers builtin output as `String`/`Vec<u8>`
//! and threads external-process output through `CmdOutputWriter`
//! (`writer.rs`); real `dup`/`dup2` is the idiom the wider pack reaches for
//! (see `dumitru-stama-Bark`'s `persistent_shell.rs`) and is what lets a
//! single redirection guard cover both builtins (which just `print!`/
//! `eprint!`) and external commands (which inherit fds 1/2 across `fork`).

use std::ffi::CString;
use std::fs::OpenOptions;
use std::os::unix::io::{AsRawFd, RawFd};
use std::path::Path;

use is_executable::IsExecutable;
use nix::unistd::{close, dup, dup2};

use crate::builtins::BuiltinTable;
use crate::config::Config;
use crate::error::{Result, ShellError};
use crate::parser::{Invocation, RedirTarget};

const STDOUT_FD: RawFd = 1;
const STDERR_FD: RawFd = 2;

/// Resolves `name` to an executable path: direct existence/exec-bit check
/// if it contains a `/`, else a left-to-right search over `path_var`.
/// Returns the first match, exactly the order spec §4.4 specifies. Takes
/// `PATH` from the caller's resolved `Config` rather than re-reading the
/// environment.
pub fn resolve_path(name: &str, path_var: Option<&str>) -> Option<String> {
  if name.contains('/') {
    let p = Path::new(name);
    return (p.exists() && p.is_executable()).then(|| name.to_string());
  }

  for dir in path_var?.split(':') {
    let candidate = format!("{dir}/{name}");
    let p = Path::new(&candidate);
    if p.exists() && p.is_executable() {
      return Some(candidate);
    }
  }
  None
}

/// One saved/opened fd pair for a single redirected stream. Restoring is a
/// dup-and-close: dup the saved descriptor back over the live one, then
/// close both the saved copy and the file we opened.
struct StreamRedirect {
  live_fd: RawFd,
  saved_fd: RawFd,
}

impl StreamRedirect {
  fn apply(live_fd: RawFd, target: &RedirTarget) -> Result<Self> {
    let saved_fd = dup(live_fd).map_err(|e| ShellError::Io(io_err(e)))?;

    let mut opts = OpenOptions::new();
    opts.write(true).create(true);
    if target.append {
      opts.append(true);
    } else {
      opts.truncate(true);
    }
    let file = opts.open(&target.path).map_err(|e| {
      let _ = close(saved_fd);
      ShellError::Io(e)
    })?;

    let file_fd = file.as_raw_fd();
    if let Err(e) = dup2(file_fd, live_fd) {
      let _ = close(saved_fd);
      return Err(ShellError::Io(io_err(e)));
    }
    // `file` closes its owned fd on drop; the live descriptor now points at
    // a dup of it via dup2, so the file contents survive the drop.
    drop(file);

    Ok(Self { live_fd, saved_fd })
  }
}

impl Drop for StreamRedirect {
  fn drop(&mut self) {
    if let Err(e) = dup2(self.saved_fd, self.live_fd) {
      log::error!("failed to restore fd {}: {e}", self.live_fd);
    }
    let _ = close(self.saved_fd);
  }
}

fn io_err(e: nix::Error) -> std::io::Error {
  std::io::Error::from_raw_os_error(e as i32)
}

/// Guards the redirections requested by one [`Invocation`], restoring both
/// streams when dropped regardless of how the command finished — this is
/// the "guaranteed-release" contract of spec §4.4.
#[must_use]
struct RedirGuard {
  _stdout: Option<StreamRedirect>,
  _stderr: Option<StreamRedirect>,
}

impl RedirGuard {
  fn apply(invocation: &Invocation) -> Result<Self> {
    let stdout = match &invocation.redir.stdout_target {
      Some(t) => Some(StreamRedirect::apply(STDOUT_FD, t)?),
      None => None,
    };
    // If this fails, `?` returns early and `stdout` (already constructed
    // above) is dropped as part of normal scope unwinding, restoring it.
    let stderr = match &invocation.redir.stderr_target {
      Some(t) => Some(StreamRedirect::apply(STDERR_FD, t)?),
      None => None,
    };
    Ok(Self { _stdout: stdout, _stderr: stderr })
  }
}

/// Runs one invocation end to end: applies redirections, dispatches to a
/// builtin or external process, then restores fds on every exit path
/// (spec §4.4, §5 ordering guarantee — redirection never survives past
/// this call).
pub fn execute(invocation: &Invocation, builtins: &BuiltinTable, config: &Config) -> Result<i32> {
  if invocation.argv.is_empty() {
    // Still apply/revert redirection for symmetry with a non-empty no-op,
    // even though the parser rejects a line that is *only* a redirection.
    let _guard = RedirGuard::apply(invocation)?;
    return Ok(0);
  }

  let _guard = RedirGuard::apply(invocation)?;

  if let Some(output) = builtins.run(invocation, config) {
    print!("{}", output.stdout);
    eprint!("{}", output.stderr);
    use std::io::Write;
    let _ = std::io::stdout().flush();
    let _ = std::io::stderr().flush();
    return Ok(output.status);
  }

  run_external(invocation, config)
}

fn run_external(invocation: &Invocation, config: &Config) -> Result<i32> {
  let name = &invocation.argv[0];
  let Some(path) = resolve_path(name, config.path.as_deref()) else {
    log::debug!("PATH search exhausted for {name:?}");
    eprintln!("{name}: command not found");
    return Err(ShellError::CommandNotFound(name.clone()));
  };
  log::debug!("resolved {name:?} to {path:?}");

  match fork_exec(&path, &invocation.argv) {
    Ok(status) => Ok(status),
    Err(e) => {
      eprintln!("{name}: failed to execute: {e}");
      Ok(1)
    }
  }
}

/// Forks and execs `path` with `argv` (argument 0 is the command name
/// exactly as parsed, per spec §4.4). The child inherits the
/// already-redirected fds 1/2 directly; on any post-fork failure it prints
/// and exits 1 rather than returning into the parent's control flow.
fn fork_exec(path: &str, argv: &[String]) -> Result<i32> {
  use nix::sys::wait::{waitpid, WaitStatus};
  use nix::unistd::{execv, fork, ForkResult};

  let c_path = CString::new(path).map_err(|_| ShellError::Io(std::io::Error::from(std::io::ErrorKind::InvalidInput)))?;
  let c_argv: Vec<CString> = argv
    .iter()
    .map(|a| CString::new(a.as_str()).unwrap_or_else(|_| CString::new("").unwrap()))
    .collect();

  // SAFETY: no additional threads are spawned by this process at the
  // point fork() is called from the main loop.
  match unsafe { fork() } {
    Ok(ForkResult::Parent { child, .. }) => match waitpid(child, None) {
      Ok(WaitStatus::Exited(_, code)) => Ok(code),
      Ok(WaitStatus::Signaled(_, sig, _)) => Ok(128 + sig as i32),
      Ok(_) => Ok(1),
      Err(e) => Err(ShellError::Io(io_err(e))),
    },
    Ok(ForkResult::Child) => {
      let err = execv(&c_path, &c_argv);
      eprintln!("exec failed: {err:?}");
      std::process::exit(1);
    }
    Err(e) => Err(ShellError::Io(io_err(e))),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn resolve_path_finds_direct_path_executables() {
    assert_eq!(resolve_path("/bin/sh", None).or_else(|| resolve_path("/usr/bin/sh", None)).is_some(), true);
  }

  #[test]
  fn resolve_path_rejects_unknown_command() {
    assert!(resolve_path("definitely-not-a-real-command-xyz", std::env::var("PATH").ok().as_deref()).is_none());
  }
}
