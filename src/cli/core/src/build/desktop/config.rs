/* src/cli/core/src/build/desktop/config.rs */

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::{DesktopSection, read_json_object};
use crate::error::BuildError;
use crate::platform::DesktopOs;

const APP_ID: &str = "appId";
const DIRECTORIES: &str = "directories";
const OUTPUT: &str = "output";
const FILES: &str = "files";
const TARGET: &str = "target";

/// The packager config as written by the user, validated to carry an `appId`.
#[derive(Debug, Clone)]
pub struct PackagingConfig {
  path: PathBuf,
  fields: Map<String, Value>,
}

impl PackagingConfig {
  pub fn load(path: &Path) -> Result<Self> {
    let fields = read_json_object(path)?;
    Self::from_fields(path, fields).map_err(Into::into)
  }

  pub fn from_fields(path: &Path, fields: Map<String, Value>) -> Result<Self, BuildError> {
    let has_app_id = fields.get(APP_ID).and_then(Value::as_str).is_some_and(|id| !id.trim().is_empty());
    if !has_app_id {
      return Err(BuildError::MissingField { field: APP_ID, path: path.to_path_buf() });
    }
    Ok(Self { path: path.to_path_buf(), fields })
  }

  pub fn app_id(&self) -> &str {
    self.fields.get(APP_ID).and_then(Value::as_str).unwrap_or_default()
  }

  pub fn fields(&self) -> &Map<String, Value> {
    &self.fields
  }

  /// Per-platform config handed to the packager. The loaded config is left as is.
  ///
  /// - keeps the section for `os` (adding `{ "target": <default> }` when absent) and drops
  ///   the other two OS sections;
  /// - `directories.output` becomes `<existing output or out_dir>/<platform_dir>/build`;
  /// - `<out_dir>/<platform_dir>/<env>/` is appended to `files` unless already listed.
  pub fn derive(
    &self,
    os: DesktopOs,
    out_dir: &str,
    platform_dir: &str,
    environment: &str,
    desktop: &DesktopSection,
  ) -> Self {
    let mut fields = self.fields.clone();

    if !fields.contains_key(os.section()) {
      let mut section = Map::new();
      section.insert(TARGET.to_string(), Value::String(os.default_target().to_string()));
      fields.insert(os.section().to_string(), Value::Object(section));
    }
    for other in DesktopOs::ALL.into_iter().filter(|o| *o != os) {
      fields.shift_remove(other.section());
    }

    set_output_dir(&mut fields, out_dir, platform_dir);
    add_build_files(&mut fields, &format!("{out_dir}/{platform_dir}/{environment}/"), desktop);

    debug!(os = os.as_str(), source = %self.path.display(), "derived packager config");
    Self { path: self.path.clone(), fields }
  }

  /// `directories.output`, if set.
  pub fn output_dir(&self) -> Option<&str> {
    self.fields.get(DIRECTORIES)?.get(OUTPUT)?.as_str()
  }

  /// Entries of `files`, skipping anything that is not a string.
  pub fn files(&self) -> Vec<&str> {
    match self.fields.get(FILES) {
      Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
      Some(Value::String(item)) => vec![item.as_str()],
      _ => Vec::new(),
    }
  }
}

fn set_output_dir(fields: &mut Map<String, Value>, out_dir: &str, platform_dir: &str) {
  let directories = fields.entry(DIRECTORIES).or_insert_with(|| Value::Object(Map::new()));
  if !directories.is_object() {
    *directories = Value::Object(Map::new());
  }
  let Value::Object(directories) = directories else { return };

  let base = directories
    .get(OUTPUT)
    .and_then(Value::as_str)
    .map(|s| s.trim_end_matches('/'))
    .filter(|s| !s.is_empty())
    .unwrap_or(out_dir)
    .to_string();
  directories.insert(OUTPUT.to_string(), Value::String(format!("{base}/{platform_dir}/build")));
}

fn add_build_files(fields: &mut Map<String, Value>, entry: &str, desktop: &DesktopSection) {
  let files = fields.entry(FILES).or_insert_with(|| {
    Value::Array(vec![Value::String(desktop.main.clone()), Value::String(desktop.index_file.clone())])
  });
  if let Value::String(single) = files {
    let single = std::mem::take(single);
    *files = Value::Array(vec![Value::String(single)]);
  }
  if let Value::Array(items) = files
    && !items.iter().any(|v| v.as_str() == Some(entry))
  {
    items.push(Value::String(entry.to_string()));
  }
}
