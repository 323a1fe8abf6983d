/* src/cli/core/src/build/web.rs */

use anyhow::Result;

use super::context::BuildContext;
use crate::process::Runner;
use crate::ui;

/// Run the bundler's production build into the build directory.
pub(crate) async fn run_web_build<R: Runner>(runner: &mut R, ctx: &BuildContext) -> Result<()> {
  let invocation = ctx
    .invocation("bundler", &ctx.bundler)
    .arg("--outDir")
    .arg(ctx.build_dir.to_string_lossy())
    .arg("build");
  runner.run(&invocation).await?;
  ui::detail_ok(&format!("HTML and JavaScript written to {}", ctx.build_rel));
  Ok(())
}
