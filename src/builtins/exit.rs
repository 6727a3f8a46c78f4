use super::BuiltinOutput;
use std::process;

pub const HELP: &str = "exit [n]: Exit the shell with status n (default 0).";

/// Every successful branch terminates the process directly — no
/// redirection restoration is possible for `exit` (spec §4.5, §7). Only a
/// malformed invocation (more than one argument) returns normally.
pub fn run(argv: &[String]) -> BuiltinOutput {
  match argv.len() {
    1 => process::exit(0),
    2 => match argv[1].parse::<i32>() {
      Ok(code) => process::exit(code),
      Err(_) => {
        eprintln!("exit: {}: numeric argument required", argv[1]);
        process::exit(2);
      }
    },
    _ => BuiltinOutput::fail(1, "exit: too many arguments\n".to_string()),
  }
}
