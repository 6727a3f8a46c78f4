use super::BuiltinOutput;
use crate::config::Config;
use std::env;

pub const HELP: &str = "cd [path]: Change the current working directory.";

/// No arg or a bare `~` resolves to `$HOME` (an error if unset); `~/rest`
/// resolves to `$HOME/rest`; anything else is used verbatim (spec §4.5).
/// `$HOME` comes from the session's resolved `Config`, not a fresh
/// `env::var` read.
pub fn run(argv: &[String], config: &Config) -> BuiltinOutput {
  let requested = match argv.get(1) {
    None => "~".to_string(),
    Some(p) => p.clone(),
  };

  let target = if requested == "~" || requested.is_empty() {
    match &config.home {
      Some(home) => home.clone(),
      None => return BuiltinOutput::fail(1, "cd: HOME not set\n".to_string()),
    }
  } else if let Some(rest) = requested.strip_prefix("~/") {
    match &config.home {
      Some(home) => format!("{home}/{rest}"),
      None => return BuiltinOutput::fail(1, "cd: HOME not set\n".to_string()),
    }
  } else {
    requested.clone()
  };

  match env::set_current_dir(&target) {
    Ok(()) => BuiltinOutput::ok_silent(),
    Err(_) => BuiltinOutput::fail(1, format!("cd: {requested}: No such file or directory\n")),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn nonexistent_path_reports_error() {
    let config = Config { home: None, path: None, verbose: false };
    let out = run(&["cd".into(), "/no/such/path/xyz".into()], &config);
    assert_eq!(out.status, 1);
    assert!(out.stderr.contains("No such file or directory"));
  }

  #[test]
  fn no_home_and_no_argument_errors() {
    let config = Config { home: None, path: None, verbose: false };
    let out = run(&["cd".into()], &config);
    assert_eq!(out.status, 1);
    assert!(out.stderr.contains("HOME not set"));
  }
}
