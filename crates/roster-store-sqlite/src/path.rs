//! Store path helpers shared by the server and the importer.

use std::path::{Path, PathBuf};

/// Expand a leading `~/` to the user's home directory (`$HOME`).
///
/// Paths without the prefix, or with no `HOME` set, are returned unchanged.
pub fn expand_tilde(path: &Path) -> PathBuf {
  expand_with_home(path, std::env::var_os("HOME").map(PathBuf::from))
}

fn expand_with_home(path: &Path, home: Option<PathBuf>) -> PathBuf {
  match (path.strip_prefix("~"), home) {
    (Ok(rest), Some(home)) => home.join(rest),
    _ => path.to_path_buf(),
  }
}
