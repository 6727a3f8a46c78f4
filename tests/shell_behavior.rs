//! End-to-end scenarios from spec §8, driven through the non-interactive
//! (`run_piped`) path: stdin isn't a TTY under `assert_cmd`, so these
//! exercise the parser/executor/builtins exactly as a scripted invocation
//! of the shell would, without needing a pty.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn shell() -> Command {
  Command::cargo_bin("posh").expect("binary builds")
}

#[test]
fn echo_joins_args_with_spaces() {
  shell()
    .write_stdin("echo hello world\n")
    .assert()
    .success()
    .stdout(predicate::str::contains("hello world\n"));
}

#[test]
fn echo_with_mixed_quoting() {
  shell()
    .write_stdin(r#"echo "a b" 'c d'"#.to_string() + "\n")
    .assert()
    .success()
    .stdout(predicate::str::contains("a b c d\n"));
}

#[test]
fn stdout_redirection_truncates() {
  let dir = tempdir().unwrap();
  let path = dir.path().join("x");
  shell()
    .write_stdin(format!("echo ok > {}\n", path.display()))
    .assert()
    .success();
  assert_eq!(fs::read_to_string(&path).unwrap(), "ok\n");
}

#[test]
fn stdout_redirection_append_accumulates() {
  let dir = tempdir().unwrap();
  let path = dir.path().join("x");
  shell().write_stdin(format!("echo ok > {}\n", path.display())).assert().success();
  shell().write_stdin(format!("echo more >> {}\n", path.display())).assert().success();
  assert_eq!(fs::read_to_string(&path).unwrap(), "ok\nmore\n");
}

#[test]
fn stderr_redirection_keeps_terminal_stderr_empty() {
  let dir = tempdir().unwrap();
  let path = dir.path().join("e");
  shell()
    .write_stdin(format!("ls nonexistent_path_xyz 2> {}\n", path.display()))
    .assert()
    .success()
    .stderr(predicate::str::is_empty());
  let contents = fs::read_to_string(&path).unwrap();
  assert!(!contents.trim().is_empty());
}

#[test]
fn unclosed_quote_is_a_syntax_error_and_does_not_run() {
  shell()
    .write_stdin("echo 'unterminated\n")
    .assert()
    .success()
    .stderr(predicate::str::contains("unclosed quotes"));
}

#[test]
fn empty_line_is_a_noop() {
  shell().write_stdin("\n").assert().success();
}

#[test]
fn exit_foo_reports_numeric_argument_required() {
  shell()
    .write_stdin("exit foo\n")
    .assert()
    .code(2)
    .stderr(predicate::str::contains("numeric argument required"));
}

#[test]
fn exit_with_explicit_code() {
  shell().write_stdin("exit 7\n").assert().code(7);
}

#[test]
fn pwd_prints_current_directory() {
  let cwd = std::env::current_dir().unwrap();
  shell()
    .current_dir(&cwd)
    .write_stdin("pwd\n")
    .assert()
    .success()
    .stdout(predicate::str::contains(cwd.display().to_string()));
}

#[test]
fn type_reports_builtin_and_not_found() {
  shell()
    .write_stdin("type echo\ntype definitely_not_a_command_xyz\n")
    .assert()
    .stdout(predicate::str::contains("echo is a shell builtin"))
    .stderr(predicate::str::contains("not found"));
}

#[test]
fn cd_to_missing_directory_reports_error() {
  shell()
    .write_stdin("cd /no/such/path/xyz\n")
    .assert()
    .stderr(predicate::str::contains("No such file or directory"));
}

#[test]
fn cd_with_no_home_and_no_argument_errors() {
  shell()
    .env_remove("HOME")
    .write_stdin("cd\n")
    .assert()
    .stderr(predicate::str::contains("HOME not set"));
}
