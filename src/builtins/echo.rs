use super::BuiltinOutput;

pub const HELP: &str = "echo [args...]: Join args with a single space and print them.";

/// Arguments arrive already dequoted by the parser; `echo` just joins and
/// appends the trailing newline (spec §4.5).
pub fn run(argv: &[String]) -> BuiltinOutput {
  let joined = argv[1..].join(" ");
  BuiltinOutput::ok(format!("{joined}\n"))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn joins_args_with_single_space() {
    let out = run(&["echo".into(), "hello".into(), "world".into()]);
    assert_eq!(out.stdout, "hello world\n");
    assert_eq!(out.status, 0);
  }

  #[test]
  fn no_args_prints_blank_line() {
    let out = run(&["echo".into()]);
    assert_eq!(out.stdout, "\n");
  }
}
