/* src/cli/core/src/build/context.rs */

// Everything the later steps need, resolved once by the config step and
// passed along explicitly.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use super::desktop::PackagingConfig;
use super::mobile::{BridgeCli, BridgeConfig};
use crate::cli::BuildRequest;
use crate::config::{ProjectConfig, load_project_config, read_bundler_config, resolve_out_dir};
use crate::error::BuildError;
use crate::manifest::ensure_module_type;
use crate::platform::Platform;
use crate::process::Invocation;
use crate::shell::node_bin;
use crate::ui;

/// Environment label exported to child processes.
pub const ENV_VAR_ENVIRONMENT: &str = "NEXT2D_EBUILD_ENVIRONMENT";
/// Platform token exported to child processes.
pub const ENV_VAR_PLATFORM: &str = "NEXT2D_TARGET_PLATFORM";

/// What the platform step needs, checked before the bundler runs.
#[derive(Debug)]
pub enum Target {
  Web,
  DesktopPreview { runtime: PathBuf, main: PathBuf },
  DesktopPackage { packager: PathBuf, config: PackagingConfig },
  Mobile { cli: BridgeCli, config: BridgeConfig },
}

#[derive(Debug)]
pub struct BuildContext {
  pub base_dir: PathBuf,
  /// Output root relative to `base_dir`, without trailing slash.
  pub out_dir: String,
  /// `<out_dir>/<platform dir>/<env>`, relative to `base_dir`.
  pub build_rel: String,
  /// Absolute form of `build_rel`.
  pub build_dir: PathBuf,
  pub project: ProjectConfig,
  pub bundler: PathBuf,
  pub target: Target,
  env_vars: Vec<(String, String)>,
}

impl BuildContext {
  /// Read and validate every config and tool the request needs, then create the build
  /// directory. Nothing is spawned here, so these problems surface before any child runs.
  pub fn load(request: &BuildRequest, base_dir: &Path) -> Result<Self> {
    let project = load_project_config(base_dir)?;
    let bundler_source = read_bundler_config(base_dir, &project)?;
    let out_dir = resolve_out_dir(&project, &bundler_source)?;

    let target = load_target(request, base_dir, &project)?;
    let bundler = node_bin(base_dir, &project.build.bundler)?;

    if ensure_module_type(base_dir)? {
      ui::detail_ok("package.json: set \"type\" to \"module\"");
    }

    let build_rel = build_rel(&out_dir, request.platform.dir(), &request.environment);
    let build_dir = base_dir.join(&build_rel);
    if !build_dir.exists() {
      std::fs::create_dir_all(&build_dir)
        .with_context(|| format!("failed to create {}", build_dir.display()))?;
      ui::detail_ok(&format!("create build dir: {}", build_dir.display()));
    }
    debug!(out_dir = %out_dir, build_dir = %build_dir.display(), ?target, "build context ready");

    let env_vars = vec![
      (ENV_VAR_ENVIRONMENT.to_string(), request.environment.clone()),
      (ENV_VAR_PLATFORM.to_string(), request.platform.token().to_string()),
    ];

    Ok(Self {
      base_dir: base_dir.to_path_buf(),
      out_dir,
      build_rel,
      build_dir,
      project,
      bundler,
      target,
      env_vars,
    })
  }

  /// A child process rooted at the project with the build environment exported.
  pub fn invocation(&self, label: &'static str, program: impl Into<PathBuf>) -> Invocation {
    Invocation::new(label, program, &self.base_dir).envs(&self.env_vars)
  }
}

/// Config files first, then the binaries that will consume them.
fn load_target(request: &BuildRequest, base_dir: &Path, project: &ProjectConfig) -> Result<Target> {
  let target = match request.platform.platform() {
    Platform::Web => Target::Web,
    Platform::Desktop { .. } if request.preview => {
      let main = base_dir.join(&project.desktop.main);
      if !main.is_file() {
        return Err(BuildError::ConfigMissing { path: main }.into());
      }
      Target::DesktopPreview { runtime: node_bin(base_dir, &project.desktop.runtime)?, main }
    }
    Platform::Desktop { .. } => {
      let config = PackagingConfig::load(&base_dir.join(&project.desktop.config))?;
      Target::DesktopPackage { packager: node_bin(base_dir, &project.desktop.packager)?, config }
    }
    Platform::Mobile(_) => {
      let config = BridgeConfig::load(&base_dir.join(&project.mobile.bridge_config))?;
      Target::Mobile { cli: BridgeCli::resolve(base_dir, &project.mobile.bridge)?, config }
    }
  };
  Ok(target)
}

/// `<out_dir>/<platform_dir>/<env>` with `/` separators.
pub fn build_rel(out_dir: &str, platform_dir: &str, environment: &str) -> String {
  format!("{out_dir}/{platform_dir}/{environment}")
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::cli::parse_request;
  use crate::error::BuildError;

  fn request(args: &[&str]) -> BuildRequest {
    parse_request(std::iter::once("next2d-builder").chain(args.iter().copied())).unwrap()
  }

  fn project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("package.json"), r#"{"name":"app"}"#).unwrap();
    std::fs::write(dir.path().join("vite.config.ts"), "export default {}").unwrap();
    std::fs::write(dir.path().join("electron.js"), "").unwrap();
    let bin = dir.path().join("node_modules/.bin");
    std::fs::create_dir_all(&bin).unwrap();
    for name in ["vite", "electron", "electron-builder", "cap"] {
      std::fs::write(bin.join(name), "").unwrap();
    }
    dir
  }

  #[test]
  fn build_rel_joins_segments() {
    assert_eq!(build_rel("dist", "web", "prd"), "dist/web/prd");
    assert_eq!(build_rel("dist", "steam/macos", "stage"), "dist/steam/macos/stage");
  }

  #[test]
  fn creates_build_dir() {
    let dir = project();
    let ctx = BuildContext::load(
      &request(&["--platform", "steam:linux", "--env", "stage", "--preview"]),
      dir.path(),
    )
    .unwrap();
    assert_eq!(ctx.build_rel, "dist/steam/linux/stage");
    assert_eq!(ctx.build_dir, dir.path().join("dist/steam/linux/stage"));
    assert!(ctx.build_dir.is_dir());
    assert!(ctx.bundler.ends_with("vite"));
  }

  #[test]
  fn exports_environment_to_children() {
    let dir = project();
    let ctx = BuildContext::load(&request(&["--platform", "WEB", "--env", "dev"]), dir.path()).unwrap();
    let inv = ctx.invocation("bundler", "vite");
    assert_eq!(inv.cwd, dir.path());
    assert!(inv.env.contains(&(ENV_VAR_ENVIRONMENT.to_string(), "dev".to_string())));
    assert!(inv.env.contains(&(ENV_VAR_PLATFORM.to_string(), "web".to_string())));
  }

  #[test]
  fn desktop_preview_resolves_runtime_and_main() {
    let dir = project();
    let ctx = BuildContext::load(
      &request(&["--platform", "windows", "--env", "prd", "--preview"]),
      dir.path(),
    )
    .unwrap();
    match ctx.target {
      Target::DesktopPreview { runtime, main } => {
        assert!(runtime.ends_with("electron"));
        assert_eq!(main, dir.path().join("electron.js"));
      }
      other => panic!("unexpected target: {other:?}"),
    }
  }

  #[test]
  fn desktop_preview_requires_main_script() {
    let dir = project();
    std::fs::remove_file(dir.path().join("electron.js")).unwrap();
    let err = BuildContext::load(
      &request(&["--platform", "macos", "--env", "dev", "--preview"]),
      dir.path(),
    )
    .unwrap_err();
    match err.downcast_ref::<BuildError>() {
      Some(BuildError::ConfigMissing { path }) => assert!(path.ends_with("electron.js")),
      other => panic!("unexpected error: {other:?}"),
    }
    assert!(!dir.path().join("dist/macos/dev").exists());
  }

  #[test]
  fn desktop_package_requires_packager_binary() {
    let dir = project();
    std::fs::write(dir.path().join("electron.build.json"), r#"{"appId":"a.b"}"#).unwrap();
    std::fs::remove_file(dir.path().join("node_modules/.bin/electron-builder")).unwrap();
    let err =
      BuildContext::load(&request(&["--platform", "linux", "--env", "prd"]), dir.path()).unwrap_err();
    assert!(err.to_string().contains("electron-builder not found"));
  }

  #[test]
  fn desktop_package_requires_packaging_config() {
    let dir = project();
    let err =
      BuildContext::load(&request(&["--platform", "windows", "--env", "prd"]), dir.path()).unwrap_err();
    assert!(matches!(err.downcast_ref::<BuildError>(), Some(BuildError::ConfigMissing { .. })));
  }

  #[test]
  fn mobile_requires_bridge_config() {
    let dir = project();
    let err =
      BuildContext::load(&request(&["--platform", "android", "--env", "prd"]), dir.path()).unwrap_err();
    match err.downcast_ref::<BuildError>() {
      Some(BuildError::ConfigMissing { path }) => assert!(path.ends_with("capacitor.config.json")),
      other => panic!("unexpected error: {other:?}"),
    }
  }
}
