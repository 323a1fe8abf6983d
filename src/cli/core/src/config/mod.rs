/* src/cli/core/src/config/mod.rs */

mod loader;
mod types;

#[cfg(test)]
mod tests;

pub use loader::{
  load_project_config, read_bundler_config, read_json_object, resolve_out_dir, write_json,
};
pub use types::{DesktopSection, ProjectConfig};
