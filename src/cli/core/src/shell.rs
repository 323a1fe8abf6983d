/* src/cli/core/src/shell.rs */

// Locating the JS toolchain binaries the build shells out to.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Result, anyhow};

/// Resolve `node_modules/.bin/<name>` the way npm scripts do.
pub(crate) fn node_bin(base_dir: &Path, name: &str) -> Result<PathBuf> {
  find_node_bin(base_dir, name).ok_or_else(|| {
    anyhow!("{name} not found in node_modules/.bin -- run `npm install` in {}", base_dir.display())
  })
}

/// Like [`node_bin`], `None` when not installed.
pub(crate) fn find_node_bin(base_dir: &Path, name: &str) -> Option<PathBuf> {
  if cfg!(windows)
    && let Some(shim) = resolve_node_module(base_dir, &format!(".bin/{name}.cmd"))
  {
    return Some(shim);
  }
  resolve_node_module(base_dir, &format!(".bin/{name}"))
}

/// Resolve a path inside node_modules by walking up parent directories.
/// Mirrors Node.js module resolution: checks `<dir>/node_modules/<suffix>` at each level.
pub(crate) fn resolve_node_module(start: &Path, suffix: &str) -> Option<PathBuf> {
  let mut dir = start.to_path_buf();
  loop {
    let candidate = dir.join("node_modules").join(suffix);
    if candidate.exists() {
      return Some(candidate);
    }
    if !dir.pop() {
      return None;
    }
  }
}

/// Check if a command exists on PATH.
pub(crate) fn which_exists(cmd: &str) -> bool {
  let finder = if cfg!(windows) { "where" } else { "which" };
  Command::new(finder)
    .arg(cmd)
    .stdout(std::process::Stdio::null())
    .stderr(std::process::Stdio::null())
    .status()
    .map(|s| s.success())
    .unwrap_or(false)
}
