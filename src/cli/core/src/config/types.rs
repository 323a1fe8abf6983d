/* src/cli/core/src/config/types.rs */

use serde::Deserialize;

/// Contents of the optional `next2d.toml` in the project root.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectConfig {
  #[serde(default)]
  pub build: BuildSection,
  #[serde(default)]
  pub desktop: DesktopSection,
  #[serde(default)]
  pub mobile: MobileSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuildSection {
  /// Overrides the `outDir` found in the bundler config.
  pub out_dir: Option<String>,
  /// Bundler binary under `node_modules/.bin`.
  #[serde(default = "default_bundler")]
  pub bundler: String,
  #[serde(default = "default_bundler_config")]
  pub bundler_config: String,
}

impl Default for BuildSection {
  fn default() -> Self {
    Self { out_dir: None, bundler: default_bundler(), bundler_config: default_bundler_config() }
  }
}

fn default_bundler() -> String {
  "vite".to_string()
}

fn default_bundler_config() -> String {
  "vite.config.ts".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct DesktopSection {
  /// Packager config, must declare `appId`.
  #[serde(default = "default_desktop_config")]
  pub config: String,
  #[serde(default = "default_runtime")]
  pub runtime: String,
  #[serde(default = "default_packager")]
  pub packager: String,
  /// Electron main script.
  #[serde(default = "default_main")]
  pub main: String,
  /// Transient file telling the main script where the built `index.html` is.
  #[serde(default = "default_index_file")]
  pub index_file: String,
}

impl Default for DesktopSection {
  fn default() -> Self {
    Self {
      config: default_desktop_config(),
      runtime: default_runtime(),
      packager: default_packager(),
      main: default_main(),
      index_file: default_index_file(),
    }
  }
}

fn default_desktop_config() -> String {
  "electron.build.json".to_string()
}

fn default_runtime() -> String {
  "electron".to_string()
}

fn default_packager() -> String {
  "electron-builder".to_string()
}

fn default_main() -> String {
  "electron.js".to_string()
}

fn default_index_file() -> String {
  "electron.index.json".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct MobileSection {
  /// Bridge binary under `node_modules/.bin`, falls back to `npx <bridge>`.
  #[serde(default = "default_bridge")]
  pub bridge: String,
  #[serde(default = "default_bridge_config")]
  pub bridge_config: String,
}

impl Default for MobileSection {
  fn default() -> Self {
    Self { bridge: default_bridge(), bridge_config: default_bridge_config() }
  }
}

fn default_bridge() -> String {
  "cap".to_string()
}

fn default_bridge_config() -> String {
  "capacitor.config.json".to_string()
}
