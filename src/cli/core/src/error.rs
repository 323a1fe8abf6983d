/* src/cli/core/src/error.rs */

// Failure taxonomy of a build invocation. Everything else travels as a plain
// anyhow error with path context.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
  /// `--help` / `--h` was given.
  #[error("help requested")]
  Help,

  /// Missing or invalid flags.
  #[error("{0}")]
  Usage(String),

  /// A required configuration file is absent.
  #[error("the file `{}` could not be found", path.display())]
  ConfigMissing { path: PathBuf },

  /// A required field is absent from a configuration file.
  #[error("`{field}` is not set -- please set `{field}` in `{}`", path.display())]
  MissingField { field: &'static str, path: PathBuf },

  /// A child process exited unsuccessfully.
  #[error("{label} exited with {}", status_text(.code))]
  Subprocess { label: String, code: Option<i32> },

  /// Ctrl+C while a child was running; the child has been stopped.
  #[error("interrupted while {label} was running")]
  Interrupted { label: String },

  /// The desktop packager rejected the build.
  #[error("packaging failed: {0}")]
  Packaging(String),
}

fn status_text(code: &Option<i32>) -> String {
  match code {
    Some(code) => format!("status {code}"),
    None => "no status (terminated by signal)".to_string(),
  }
}
