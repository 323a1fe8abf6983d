/* src/cli/core/src/build/run/mod.rs */

use std::fmt;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use super::context::BuildContext;
use super::desktop::run_desktop;
use super::mobile::run_mobile;
use super::web::run_web_build;
use crate::cli::BuildRequest;
use crate::platform::Platform;
use crate::process::Runner;
use crate::ui::{self, DIM, RESET};


/// Pipeline stages, in order. Errors carry the stage they happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
  LoadConfig,
  BuildWeb,
  PackageDesktop,
  BridgeMobile,
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::LoadConfig => "load config",
      Self::BuildWeb => "build web assets",
      Self::PackageDesktop => "desktop step",
      Self::BridgeMobile => "mobile step",
    })
  }
}

/// Load config, bundle, then hand off to the platform step. Strictly sequential.
pub(crate) async fn run_build<R: Runner>(
  request: &BuildRequest,
  base_dir: &Path,
  runner: &mut R,
) -> Result<()> {
  let started = Instant::now();
  let platform = request.platform.platform();
  let total = if platform == Platform::Web { 2 } else { 3 };
  ui::banner(request.platform.token(), &request.environment);

  ui::step(1, total, "Loading config");
  let ctx = BuildContext::load(request, base_dir).context(Stage::LoadConfig)?;

  ui::step(2, total, "Building web assets");
  run_web_build(runner, &ctx).await.context(Stage::BuildWeb)?;

  match platform {
    Platform::Web => {}
    Platform::Desktop { os, steam } => {
      let label = if steam { "Steam " } else { "" };
      let msg = if request.preview {
        format!("Launching {label}{} preview", os.as_str())
      } else {
        format!("Packaging {label}{} app", os.as_str())
      };
      ui::step(3, total, &msg);
      run_desktop(runner, &ctx, request, os).await.context(Stage::PackageDesktop)?;
    }
    Platform::Mobile(os) => {
      ui::step(3, total, &format!("Preparing {} project", os.as_str()));
      run_mobile(runner, &ctx, request, os).await.context(Stage::BridgeMobile)?;
    }
  }

  let elapsed = started.elapsed().as_secs_f64();
  info!(platform = request.platform.token(), elapsed, "build finished");
  ui::blank();
  ui::ok(&format!("done {DIM}in {elapsed:.1}s{RESET}"));
  ui::blank();
  Ok(())
}
