/* src/cli/core/src/build/desktop/pointer.rs */

// The Electron main script reads the page to load from a small JSON file in the
// project root. It only exists while the desktop step runs.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::write_json;

#[derive(Debug, Serialize)]
struct IndexPointer<'a> {
  path: &'a str,
}

/// Owns the pointer file; removed on drop.
#[derive(Debug)]
pub struct IndexPointerFile {
  path: PathBuf,
}

impl IndexPointerFile {
  /// Write `{ "path": "./<build_rel>/index.html" }` to `<base_dir>/<file_name>`.
  pub fn write(base_dir: &Path, file_name: &str, build_rel: &str) -> Result<Self> {
    let path = base_dir.join(file_name);
    let html = format!("./{build_rel}/index.html");
    write_json(&path, &IndexPointer { path: &html })
      .with_context(|| format!("failed to write {file_name}"))?;
    debug!(path = %path.display(), html = %html, "wrote index pointer");
    Ok(Self { path })
  }
}

impl Drop for IndexPointerFile {
  fn drop(&mut self) {
    match std::fs::remove_file(&self.path) {
      Ok(()) => debug!(path = %self.path.display(), "removed index pointer"),
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
      Err(e) => warn!("failed to remove {}: {e}", self.path.display()),
    }
  }
}
