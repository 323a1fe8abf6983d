/* src/cli/core/src/build/desktop/mod.rs */

mod config;
mod pointer;

pub use config::PackagingConfig;

use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::debug;

use self::pointer::IndexPointerFile;
use super::context::{BuildContext, Target};
use crate::cli::BuildRequest;
use crate::config::write_json;
use crate::error::BuildError;
use crate::manifest::CommonJsGuard;
use crate::platform::DesktopOs;
use crate::process::Runner;
use crate::ui::{self, DIM, RESET};

/// Preview the app in the desktop runtime, or package it for `os`.
/// The pointer file and the package.json toggle are undone on every exit path.
pub(crate) async fn run_desktop<R: Runner>(
  runner: &mut R,
  ctx: &BuildContext,
  request: &BuildRequest,
  os: DesktopOs,
) -> Result<()> {
  if request.open || request.build {
    ui::warn("`--open` and `--build` only apply to ios and android, ignoring");
  }
  match &ctx.target {
    Target::DesktopPreview { runtime, main } => preview(runner, ctx, runtime, main).await,
    Target::DesktopPackage { packager, config } => {
      package(runner, ctx, request, os, packager, config).await
    }
    other => bail!("desktop step started for a {other:?} target"),
  }
}

async fn preview<R: Runner>(
  runner: &mut R,
  ctx: &BuildContext,
  runtime: &Path,
  main: &Path,
) -> Result<()> {
  let desktop = &ctx.project.desktop;
  let _commonjs = CommonJsGuard::acquire(&ctx.base_dir)?;
  let _pointer = IndexPointerFile::write(&ctx.base_dir, &desktop.index_file, &ctx.build_rel)?;

  ui::detail(&format!("{DIM}close the window or press Ctrl+C to stop{RESET}"));
  let invocation = ctx.invocation("electron", runtime).arg(main.to_string_lossy());
  runner.session(&invocation).await?;
  ui::detail_ok("preview closed");
  Ok(())
}

async fn package<R: Runner>(
  runner: &mut R,
  ctx: &BuildContext,
  request: &BuildRequest,
  os: DesktopOs,
  packager: &Path,
  packaging: &PackagingConfig,
) -> Result<()> {
  let desktop = &ctx.project.desktop;
  let derived = packaging.derive(
    os,
    &ctx.out_dir,
    request.platform.dir(),
    &request.environment,
    desktop,
  );
  let derived_file = tempfile::Builder::new()
    .prefix(".electron.build.")
    .suffix(".json")
    .tempfile_in(&ctx.base_dir)
    .context("failed to create temporary packager config")?;
  write_json(derived_file.path(), derived.fields())?;
  debug!(path = %derived_file.path().display(), files = ?derived.files(), "derived packager config written");

  let _commonjs = CommonJsGuard::acquire(&ctx.base_dir)?;
  let _pointer = IndexPointerFile::write(&ctx.base_dir, &desktop.index_file, &ctx.build_rel)?;

  ui::detail(&format!("appId {}", derived.app_id()));
  let invocation = ctx
    .invocation("electron-builder", packager)
    .arg("--projectDir")
    .arg(ctx.base_dir.to_string_lossy())
    .arg("--config")
    .arg(derived_file.path().to_string_lossy())
    .arg(os.packager_flag());
  if let Err(e) = runner.run(&invocation).await {
    if matches!(e.downcast_ref::<BuildError>(), Some(BuildError::Interrupted { .. })) {
      return Err(e);
    }
    return Err(BuildError::Packaging(format!("{e:#}")).into());
  }

  let output = derived.output_dir().unwrap_or_default();
  ui::detail_ok(&format!("packaged into {output}"));
  Ok(())
}
