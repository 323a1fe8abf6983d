/* src/cli/core/src/manifest.rs */

// The project's package.json: the build relies on `"type": "module"`, while the
// Electron main script needs CommonJS for as long as the desktop runtime is up.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::{read_json_object, write_json};

pub const MANIFEST_FILE: &str = "package.json";
const TYPE_FIELD: &str = "type";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleType {
  Module,
  CommonJs,
}

impl ModuleType {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Module => "module",
      Self::CommonJs => "commonjs",
    }
  }
}

#[derive(Debug)]
pub struct PackageManifest {
  path: PathBuf,
  fields: Map<String, Value>,
}

impl PackageManifest {
  pub fn load(base_dir: &Path) -> Result<Self> {
    let path = base_dir.join(MANIFEST_FILE);
    let fields = read_json_object(&path)?;
    Ok(Self { path, fields })
  }

  pub fn module_type(&self) -> Option<&str> {
    self.fields.get(TYPE_FIELD).and_then(Value::as_str)
  }

  /// Returns whether the field changed.
  pub fn set_module_type(&mut self, ty: ModuleType) -> bool {
    if self.module_type() == Some(ty.as_str()) {
      return false;
    }
    self.fields.insert(TYPE_FIELD.to_string(), Value::String(ty.as_str().to_string()));
    true
  }

  pub fn save(&self) -> Result<()> {
    write_json(&self.path, &self.fields)
  }
}

/// Make sure package.json declares ES modules. Returns whether the file was rewritten;
/// an already-conforming manifest is left untouched.
pub fn ensure_module_type(base_dir: &Path) -> Result<bool> {
  let mut manifest = PackageManifest::load(base_dir)?;
  if !manifest.set_module_type(ModuleType::Module) {
    return Ok(false);
  }
  manifest.save()?;
  debug!(path = %manifest.path.display(), "set package.json type to module");
  Ok(true)
}

/// Switches package.json to CommonJS while alive and puts the previous `type` back on drop.
#[derive(Debug)]
pub struct CommonJsGuard {
  base_dir: PathBuf,
  previous: Option<Value>,
}

impl CommonJsGuard {
  pub fn acquire(base_dir: &Path) -> Result<Self> {
    let mut manifest = PackageManifest::load(base_dir)?;
    let previous = manifest.fields.get(TYPE_FIELD).cloned();
    if manifest.set_module_type(ModuleType::CommonJs) {
      manifest.save()?;
    }
    Ok(Self { base_dir: base_dir.to_path_buf(), previous })
  }

  fn restore(&self) -> Result<()> {
    let mut manifest = PackageManifest::load(&self.base_dir)?;
    let changed = match &self.previous {
      Some(value) => {
        let replaced = manifest.fields.insert(TYPE_FIELD.to_string(), value.clone());
        replaced.as_ref() != Some(value)
      }
      None => manifest.fields.shift_remove(TYPE_FIELD).is_some(),
    };
    if changed {
      manifest.save()?;
    }
    Ok(())
  }
}

impl Drop for CommonJsGuard {
  fn drop(&mut self) {
    if let Err(e) = self.restore() {
      warn!("failed to restore package.json type: {e:#}");
    }
  }
}
