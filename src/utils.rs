use is_executable::IsExecutable;
use std::fs;

/// Walks every `PATH` component and collects the names of regular,
/// executable-by-anyone files, used by the completion engine to build the
/// first-word candidate universe alongside builtin names (spec §4.3 source
/// 2). `cd`'s `~`/`$HOME` expansion and PATH-to-single-path resolution live
/// next to their callers (`builtins::cd`, `executor::resolve_path`) since
/// each has its own error-reporting shape. Takes `PATH` from the resolved
/// `Config` rather than re-reading the environment itself.
pub fn find_all_executables(path: Option<&str>) -> Vec<String> {
  let mut executables = Vec::new();
  let Some(path) = path else {
    return executables;
  };

  for dir in path.split(':') {
    let Ok(items) = fs::read_dir(dir) else {
      continue;
    };

    for item in items.flatten() {
      let item = item.path();
      if item.is_executable() {
        if let Some(name) = item.file_name().and_then(|n| n.to_str()) {
          executables.push(name.to_string());
        }
      }
    }
  }

  executables
}
