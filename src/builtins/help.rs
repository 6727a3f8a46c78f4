use super::{BuiltinOutput, BuiltinTable};

pub const HELP: &str = "help [name...]: List builtins, or show help for specific ones.";

/// With no args, lists every builtin with its help text; with args, prints
/// help for each named builtin or fails on an unknown name (spec §4.5).
pub fn run_with_table(argv: &[String], builtins: &BuiltinTable) -> BuiltinOutput {
  if argv.len() == 1 {
    let mut stdout = String::new();
    for name in builtins.names() {
      stdout.push_str(&format!("{}\n", builtins.help_for(name).unwrap_or_default()));
    }
    return BuiltinOutput::ok(stdout);
  }

  let mut stdout = String::new();
  let mut stderr = String::new();
  let mut failed = false;

  for name in &argv[1..] {
    match builtins.help_for(name) {
      Some(text) => stdout.push_str(&format!("{text}\n")),
      None => {
        stderr.push_str(&format!("help: no help topics match '{name}'\n"));
        failed = true;
      }
    }
  }

  BuiltinOutput { status: if failed { 1 } else { 0 }, stdout, stderr }
}
