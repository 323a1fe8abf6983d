/* src/cli/core/src/config/loader.rs */

use std::path::Path;
use std::sync::OnceLock;

use anyhow::{Context, Result, bail};
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::ProjectConfig;
use crate::error::BuildError;

pub const CONFIG_FILE: &str = "next2d.toml";
const DEFAULT_OUT_DIR: &str = "dist";

/// Load `next2d.toml` from the project root; defaults when the file is absent.
pub fn load_project_config(base_dir: &Path) -> Result<ProjectConfig> {
  let path = base_dir.join(CONFIG_FILE);
  if !path.is_file() {
    debug!(path = %path.display(), "no project config, using defaults");
    return Ok(ProjectConfig::default());
  }
  let content =
    std::fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;
  let config: ProjectConfig =
    toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))?;
  Ok(config)
}

/// Read the bundler config source; its absence is fatal.
pub fn read_bundler_config(base_dir: &Path, config: &ProjectConfig) -> Result<String> {
  let path = base_dir.join(&config.build.bundler_config);
  if !path.is_file() {
    return Err(BuildError::ConfigMissing { path }.into());
  }
  std::fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))
}

/// `build.out_dir` from next2d.toml, else a literal `outDir` in the bundler config, else `dist`.
/// The result is relative to the project root; an absolute `build.out_dir` is rejected.
pub fn resolve_out_dir(config: &ProjectConfig, bundler_source: &str) -> Result<String> {
  let raw = match config.build.out_dir.as_deref().map(str::trim) {
    Some(dir) if is_absolute(dir) => {
      bail!("`build.out_dir` must be relative to the project root, got `{dir}` in {CONFIG_FILE}")
    }
    Some(dir) => dir.to_string(),
    None => scan_out_dir(bundler_source).unwrap_or_default(),
  };
  let trimmed = raw.trim().trim_end_matches('/');
  Ok(if trimmed.is_empty() { DEFAULT_OUT_DIR.to_string() } else { trimmed.to_string() })
}

fn is_absolute(dir: &str) -> bool {
  dir.starts_with('/') || dir.starts_with('\\') || Path::new(dir).is_absolute()
}

fn out_dir_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r#"\boutDir\s*:\s*["'`]([^"'`]+)["'`]"#).unwrap())
}

/// Find `outDir: "..."` in the bundler config. Only string literals are recognized;
/// comment lines and absolute paths are skipped.
fn scan_out_dir(source: &str) -> Option<String> {
  let found = source
    .lines()
    .map(str::trim_start)
    .filter(|line| !(line.starts_with("//") || line.starts_with("/*") || line.starts_with('*')))
    .find_map(|line| out_dir_re().captures(line)?.get(1))?
    .as_str();
  if is_absolute(found) {
    debug!(out_dir = %found, "ignoring absolute outDir from bundler config");
    return None;
  }
  debug!(out_dir = %found, "outDir taken from bundler config");
  Some(found.to_string())
}

/// Read a JSON file whose top level must be an object.
pub fn read_json_object(path: &Path) -> Result<Map<String, Value>> {
  if !path.is_file() {
    return Err(BuildError::ConfigMissing { path: path.to_path_buf() }.into());
  }
  let content =
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  let value: Value =
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))?;
  match value {
    Value::Object(map) => Ok(map),
    _ => bail!("{} must contain a JSON object", path.display()),
  }
}

/// Write pretty JSON (2-space indent) with a trailing newline.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
  let mut json = serde_json::to_string_pretty(value)?;
  json.push('\n');
  std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
  debug!(path = %path.display(), "rewrote json");
  Ok(())
}
