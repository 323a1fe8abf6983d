/* src/cli/core/src/cli.rs */

use clap::{CommandFactory, Parser};

use crate::error::BuildError;
use crate::platform::PlatformSpec;

const VALUE_FLAGS: [&str; 2] = ["--platform", "--env"];
const SWITCH_FLAGS: [&str; 5] = ["--preview", "--open", "--build", "--help", "--h"];

const EXAMPLES: &str = "\
`--platform` can be specified for web, windows, macos, linux, ios, android,
and steam:windows, steam:macos, steam:linux. It is not case sensitive.

For build example:
  next2d-builder --platform web --env prd

For preview example:
  next2d-builder --preview --platform windows --env prd";

#[derive(Debug, Parser)]
#[command(
  name = "next2d-builder",
  about = "Build next2d apps for web, desktop and mobile",
  disable_help_flag = true,
  disable_version_flag = true,
  args_override_self = true,
  after_help = EXAMPLES
)]
struct Args {
  /// Target platform (web, windows, macos, linux, ios, android, steam:<os>)
  #[arg(long, value_name = "PLATFORM")]
  platform: Option<String>,
  /// Environment label, used as an output path segment
  #[arg(long, value_name = "ENV")]
  env: Option<String>,
  /// Run the app without producing a distributable package
  #[arg(long)]
  preview: bool,
  /// Sync assets and open the native IDE project (mobile)
  #[arg(long)]
  open: bool,
  /// Sync assets and run the native build tooling (mobile)
  #[arg(long)]
  build: bool,
  /// Print help
  #[arg(long, alias = "h")]
  help: bool,
}

/// A validated invocation, immutable once parsed.
#[derive(Debug, Clone)]
pub struct BuildRequest {
  pub platform: PlatformSpec,
  pub environment: String,
  pub preview: bool,
  pub open: bool,
  pub build: bool,
}

/// Parse a full argument vector (program name first) into a request.
pub fn parse_request<I, T>(argv: I) -> Result<BuildRequest, BuildError>
where
  I: IntoIterator<Item = T>,
  T: Into<String>,
{
  let args = Args::try_parse_from(known_args(argv)).map_err(usage_error)?;
  if args.help {
    return Err(BuildError::Help);
  }

  let token = args.platform.unwrap_or_default();
  let environment = args.env.unwrap_or_default();
  if token.trim().is_empty() {
    return Err(BuildError::Usage("`--platform` is required".into()));
  }
  if environment.trim().is_empty() {
    return Err(BuildError::Usage("`--env` is required".into()));
  }
  let platform = PlatformSpec::resolve(&token)
    .ok_or_else(|| BuildError::Usage(format!("unknown platform `{token}`")))?;

  Ok(BuildRequest { platform, environment, preview: args.preview, open: args.open, build: args.build })
}

/// clap's own message, first line only; the full help is printed separately.
fn usage_error(e: clap::Error) -> BuildError {
  let rendered = e.to_string();
  let line = rendered.lines().next().unwrap_or_default();
  BuildError::Usage(line.strip_prefix("error: ").unwrap_or(line).trim().to_string())
}

/// Rendered usage text.
pub fn help_text() -> String {
  Args::command().render_help().to_string()
}

/// Keep recognized flags (and their values), drop everything else.
/// Values are re-attached with `=` so they are taken verbatim even when they start with `-`.
fn known_args<I, T>(argv: I) -> Vec<String>
where
  I: IntoIterator<Item = T>,
  T: Into<String>,
{
  let mut iter = argv.into_iter().map(Into::into);
  let mut out: Vec<String> = iter.next().into_iter().collect();
  while let Some(arg) = iter.next() {
    if VALUE_FLAGS.contains(&arg.as_str()) {
      if let Some(value) = iter.next() {
        out.push(format!("{arg}={value}"));
      }
    } else if SWITCH_FLAGS.contains(&arg.as_str())
      || VALUE_FLAGS.iter().any(|flag| arg.strip_prefix(flag).is_some_and(|rest| rest.starts_with('=')))
    {
      out.push(arg);
    }
  }
  out
}
