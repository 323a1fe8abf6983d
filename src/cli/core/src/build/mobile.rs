/* src/cli/core/src/build/mobile.rs */

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use serde_json::{Map, Value};
use tracing::debug;

use super::context::{BuildContext, Target};
use crate::cli::BuildRequest;
use crate::config::{read_json_object, write_json};
use crate::platform::MobileOs;
use crate::process::{Invocation, Runner};
use crate::shell::{find_node_bin, which_exists};
use crate::ui;

const WEB_DIR: &str = "webDir";

/// The bridge's JSON config; only `webDir` is ever touched.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
  path: PathBuf,
  fields: Map<String, Value>,
}

impl BridgeConfig {
  pub fn load(path: &Path) -> Result<Self> {
    let fields = read_json_object(path)?;
    Ok(Self { path: path.to_path_buf(), fields })
  }

  pub fn web_dir(&self) -> Option<&str> {
    self.fields.get(WEB_DIR).and_then(Value::as_str)
  }

  /// Returns whether the value changed. Other keys keep their position.
  pub fn set_web_dir(&mut self, web_dir: &str) -> bool {
    if self.web_dir() == Some(web_dir) {
      return false;
    }
    self.fields.insert(WEB_DIR.to_string(), Value::String(web_dir.to_string()));
    true
  }

  pub fn save(&self) -> Result<()> {
    write_json(&self.path, &self.fields)
  }
}

/// What to do once the native project points at the build output.
/// `--preview` wins over `--open`, which wins over `--build`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeAction {
  Run,
  Open,
  Build,
  None,
}

impl BridgeAction {
  pub fn from_request(request: &BuildRequest) -> Self {
    if request.preview {
      Self::Run
    } else if request.open {
      Self::Open
    } else if request.build {
      Self::Build
    } else {
      Self::None
    }
  }

  /// Bridge subcommands, in order.
  pub fn commands(self) -> &'static [&'static str] {
    match self {
      Self::Run => &["run"],
      Self::Open => &["sync", "open"],
      Self::Build => &["sync", "build"],
      Self::None => &[],
    }
  }
}

/// How to call the bridge CLI: `node_modules/.bin/<name>` when installed, otherwise `npx <name>`.
#[derive(Debug, Clone)]
pub struct BridgeCli {
  program: PathBuf,
  prefix: Vec<String>,
}

impl BridgeCli {
  pub fn resolve(base_dir: &Path, name: &str) -> Result<Self> {
    if let Some(bin) = find_node_bin(base_dir, name) {
      return Ok(Self { program: bin, prefix: Vec::new() });
    }
    if which_exists("npx") {
      debug!(name, "bridge not installed locally, using npx");
      return Ok(Self { program: PathBuf::from("npx"), prefix: vec![name.to_string()] });
    }
    bail!("{name} not found in node_modules/.bin and npx is unavailable -- run `npm install`")
  }

  fn invocation(&self, ctx: &BuildContext, args: &[&str]) -> Invocation {
    ctx
      .invocation("cap", &self.program)
      .args(self.prefix.iter().cloned())
      .args(args.iter().copied())
  }
}

pub(crate) async fn run_mobile<R: Runner>(
  runner: &mut R,
  ctx: &BuildContext,
  request: &BuildRequest,
  os: MobileOs,
) -> Result<()> {
  let Target::Mobile { cli, config } = &ctx.target else {
    bail!("mobile step started for a {:?} target", ctx.target)
  };

  if !ctx.base_dir.join(os.as_str()).exists() {
    runner.run(&cli.invocation(ctx, &["add", os.as_str()])).await?;
    ui::detail_ok(&format!("Successfully generated {} project", os.as_str()));
  }

  let mut bridge = config.clone();
  let web_dir = format!("{}/", ctx.build_rel);
  if bridge.set_web_dir(&web_dir) {
    bridge.save()?;
    ui::detail_ok(&format!("{}: webDir set to {web_dir}", ctx.project.mobile.bridge_config));
  }

  let action = BridgeAction::from_request(request);
  debug!(?action, os = os.as_str(), "bridge action");
  for &command in action.commands() {
    runner.run(&cli.invocation(ctx, &[command, os.as_str()])).await?;
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::cli::parse_request;

  fn action(args: &[&str]) -> BridgeAction {
    let argv = ["next2d-builder", "--platform", "ios", "--env", "prd"].into_iter().chain(args.iter().copied());
    BridgeAction::from_request(&parse_request(argv).unwrap())
  }

  #[test]
  fn action_precedence() {
    assert_eq!(action(&[]), BridgeAction::None);
    assert_eq!(action(&["--build"]), BridgeAction::Build);
    assert_eq!(action(&["--build", "--open"]), BridgeAction::Open);
    assert_eq!(action(&["--open", "--preview", "--build"]), BridgeAction::Run);
  }

  #[test]
  fn action_commands() {
    assert_eq!(BridgeAction::Run.commands(), ["run"]);
    assert_eq!(BridgeAction::Open.commands(), ["sync", "open"]);
    assert_eq!(BridgeAction::Build.commands(), ["sync", "build"]);
    assert!(BridgeAction::None.commands().is_empty());
  }

  #[test]
  fn web_dir_rewrite_keeps_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("capacitor.config.json");
    std::fs::write(&path, r#"{"appId":"a.b","webDir":"dist","appName":"Game"}"#).unwrap();

    let mut bridge = BridgeConfig::load(&path).unwrap();
    assert!(bridge.set_web_dir("dist/ios/prd/"));
    bridge.save().unwrap();
    assert!(!bridge.set_web_dir("dist/ios/prd/"));

    let reloaded = BridgeConfig::load(&path).unwrap();
    assert_eq!(reloaded.web_dir(), Some("dist/ios/prd/"));
    let keys: Vec<_> = reloaded.fields.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["appId", "webDir", "appName"]);
  }

  #[test]
  fn local_bridge_preferred() {
    let dir = tempfile::tempdir().unwrap();
    let bin = dir.path().join("node_modules/.bin");
    std::fs::create_dir_all(&bin).unwrap();
    std::fs::write(bin.join("cap"), "").unwrap();
    let cli = BridgeCli::resolve(dir.path(), "cap").unwrap();
    assert_eq!(cli.program, bin.join("cap"));
    assert!(cli.prefix.is_empty());
  }
}
