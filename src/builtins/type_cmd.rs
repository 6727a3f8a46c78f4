use super::{BuiltinOutput, BuiltinTable};
use crate::config::Config;
use crate::executor::resolve_path;

pub const HELP: &str = "type name...: Show how each name would be interpreted.";

/// For each name: a builtin reports itself as such, otherwise PATH
/// resolution is attempted, otherwise it's reported not found — and the
/// overall command fails if any name is not found (spec §4.5).
pub fn run_with_table(argv: &[String], builtins: &BuiltinTable, config: &Config) -> BuiltinOutput {
  if argv.len() < 2 {
    return BuiltinOutput::fail(1, "type: expected at least 1 arg\n".to_string());
  }

  let mut stdout = String::new();
  let mut stderr = String::new();
  let mut failed = false;

  for name in &argv[1..] {
    if builtins.is_builtin(name) {
      stdout.push_str(&format!("{name} is a shell builtin\n"));
    } else if let Some(path) = resolve_path(name, config.path.as_deref()) {
      stdout.push_str(&format!("{name} is {path}\n"));
    } else {
      stderr.push_str(&format!("{name}: not found\n"));
      failed = true;
    }
  }

  BuiltinOutput { status: if failed { 1 } else { 0 }, stdout, stderr }
}
