use super::BuiltinOutput;
use std::env;

pub const HELP: &str = "pwd: Print the current working directory.";

pub fn run(argv: &[String]) -> BuiltinOutput {
  if argv.len() > 1 {
    return BuiltinOutput::fail(1, "pwd: expected 0 args".to_string());
  }

  match env::current_dir() {
    Ok(dir) => BuiltinOutput::ok(format!("{}\n", dir.display())),
    Err(e) => BuiltinOutput::fail(1, format!("pwd: {e}\n")),
  }
}
