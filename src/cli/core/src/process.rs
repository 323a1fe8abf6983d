/* src/cli/core/src/process.rs */

// Every child process the build starts goes through a `Runner`, one at a time.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use anyhow::{Context, Result};
use tokio::process::{Child, Command};
use tokio::signal;
use tracing::debug;

use crate::error::BuildError;
use crate::ui::{self, DIM, RESET};

/// A fully described child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
  pub label: &'static str,
  pub program: PathBuf,
  pub args: Vec<String>,
  pub cwd: PathBuf,
  pub env: Vec<(String, String)>,
}

impl Invocation {
  pub fn new(label: &'static str, program: impl Into<PathBuf>, cwd: &Path) -> Self {
    Self { label, program: program.into(), args: Vec::new(), cwd: cwd.to_path_buf(), env: Vec::new() }
  }

  pub fn arg(mut self, arg: impl Into<String>) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }

  pub fn envs(mut self, vars: &[(String, String)]) -> Self {
    self.env.extend(vars.iter().cloned());
    self
  }

  /// Program file name plus arguments, for display.
  pub fn command_line(&self) -> String {
    let program = self.program.file_name().map_or_else(
      || self.program.to_string_lossy(),
      |name| name.to_string_lossy(),
    );
    std::iter::once(program.into_owned()).chain(self.args.iter().cloned()).collect::<Vec<_>>().join(" ")
  }
}

impl fmt::Display for Invocation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} ({})", self.label, self.command_line())
  }
}

pub(crate) trait Runner {
  /// Run to completion with inherited stdio; a non-zero exit is a `BuildError::Subprocess`,
  /// Ctrl+C stops the child and yields `BuildError::Interrupted`.
  async fn run(&mut self, invocation: &Invocation) -> Result<()>;

  /// Run an interactive child until it exits or the user presses Ctrl+C.
  /// A user stop is a normal end of the session.
  async fn session(&mut self, invocation: &Invocation) -> Result<()>;
}

/// Spawns real processes.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl Runner for SystemRunner {
  async fn run(&mut self, invocation: &Invocation) -> Result<()> {
    let mut child = spawn(invocation)?;
    match wait_or_interrupt(&mut child, invocation).await? {
      Exit::Status(status) if status.success() => Ok(()),
      Exit::Status(status) if stopped_by_interrupt(status) => {
        Err(BuildError::Interrupted { label: invocation.label.to_string() }.into())
      }
      Exit::Status(status) => {
        Err(BuildError::Subprocess { label: invocation.label.to_string(), code: status.code() }.into())
      }
      Exit::Interrupted => Err(BuildError::Interrupted { label: invocation.label.to_string() }.into()),
    }
  }

  async fn session(&mut self, invocation: &Invocation) -> Result<()> {
    let mut child = spawn(invocation)?;
    match wait_or_interrupt(&mut child, invocation).await? {
      Exit::Status(status) if status.success() => Ok(()),
      Exit::Status(status) if stopped_by_interrupt(status) => {
        ui::detail(&format!("{DIM}{} stopped{RESET}", invocation.label));
        Ok(())
      }
      Exit::Status(status) => {
        Err(BuildError::Subprocess { label: invocation.label.to_string(), code: status.code() }.into())
      }
      Exit::Interrupted => Ok(()),
    }
  }
}

enum Exit {
  Status(ExitStatus),
  Interrupted,
}

fn spawn(invocation: &Invocation) -> Result<Child> {
  command(invocation).spawn().with_context(|| format!("failed to start {}", invocation.label))
}

/// Wait for the child, or kill it on Ctrl+C. Either way the child is gone on return,
/// so callers unwind normally and drop guards run.
async fn wait_or_interrupt(child: &mut Child, invocation: &Invocation) -> Result<Exit> {
  let exited = tokio::select! {
    status = child.wait() => Some(status),
    Ok(()) = signal::ctrl_c() => None,
  };

  match exited {
    Some(status) => {
      let status = status.with_context(|| format!("failed to wait for {}", invocation.label))?;
      debug!(label = invocation.label, ?status, "child exited");
      Ok(Exit::Status(status))
    }
    None => {
      ui::blank();
      ui::detail(&format!("{DIM}interrupted, stopping {}...{RESET}", invocation.label));
      child.kill().await.with_context(|| format!("failed to stop {}", invocation.label))?;
      debug!(label = invocation.label, "child killed after Ctrl+C");
      Ok(Exit::Interrupted)
    }
  }
}

/// The child shares our process group, so Ctrl+C can reach it before we notice.
#[cfg(unix)]
fn stopped_by_interrupt(status: ExitStatus) -> bool {
  use std::os::unix::process::ExitStatusExt;
  const SIGINT: i32 = 2;
  status.signal() == Some(SIGINT) || status.code() == Some(128 + SIGINT)
}

#[cfg(windows)]
fn stopped_by_interrupt(status: ExitStatus) -> bool {
  // STATUS_CONTROL_C_EXIT
  status.code() == Some(-1_073_741_510)
}

#[cfg(not(any(unix, windows)))]
fn stopped_by_interrupt(_status: ExitStatus) -> bool {
  false
}

fn command(invocation: &Invocation) -> Command {
  ui::detail(&format!("{DIM}{}{RESET}", invocation.command_line()));
  debug!(
    label = invocation.label,
    program = %invocation.program.display(),
    args = ?invocation.args,
    cwd = %invocation.cwd.display(),
    "spawning"
  );
  let mut cmd = Command::new(&invocation.program);
  cmd.args(&invocation.args);
  cmd.current_dir(&invocation.cwd);
  for (key, val) in &invocation.env {
    cmd.env(key, val);
  }
  cmd.stdin(Stdio::inherit());
  cmd.stdout(Stdio::inherit());
  cmd.stderr(Stdio::inherit());
  cmd.kill_on_drop(true);
  cmd
}
