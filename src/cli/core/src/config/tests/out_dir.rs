/* src/cli/core/src/config/tests/out_dir.rs */

use crate::config::{ProjectConfig, read_bundler_config, resolve_out_dir};
use crate::error::BuildError;

const VITE_CONFIG: &str = r#"
import { defineConfig } from "vite";

export default defineConfig({
  build: {
    outDir: "build/web",
    target: "es2020",
  },
});
"#;

#[test]
fn defaults_to_dist() {
  let config = ProjectConfig::default();
  assert_eq!(resolve_out_dir(&config, "export default {}").unwrap(), "dist");
}

#[test]
fn reads_literal_from_bundler_config() {
  let config = ProjectConfig::default();
  assert_eq!(resolve_out_dir(&config, VITE_CONFIG).unwrap(), "build/web");
}

#[test]
fn single_quotes_and_trailing_slash() {
  let config = ProjectConfig::default();
  assert_eq!(resolve_out_dir(&config, "build: { outDir: 'out/' }").unwrap(), "out");
}

#[test]
fn project_config_wins() {
  let config: ProjectConfig = toml::from_str("[build]\nout_dir = \"public\"").unwrap();
  assert_eq!(resolve_out_dir(&config, VITE_CONFIG).unwrap(), "public");
}

#[test]
fn non_literal_out_dir_is_ignored() {
  let config = ProjectConfig::default();
  assert_eq!(resolve_out_dir(&config, "build: { outDir: resolve(__dirname, 'x') }").unwrap(), "dist");
}

#[test]
fn blank_override_falls_back_to_dist() {
  let config: ProjectConfig = toml::from_str("[build]\nout_dir = \" \"").unwrap();
  assert_eq!(resolve_out_dir(&config, VITE_CONFIG).unwrap(), "dist");
}

#[test]
fn absolute_override_is_rejected() {
  let config: ProjectConfig = toml::from_str("[build]\nout_dir = \"/srv/www\"").unwrap();
  let err = resolve_out_dir(&config, VITE_CONFIG).unwrap_err();
  assert!(err.to_string().contains("must be relative"));
}

#[test]
fn absolute_bundler_out_dir_is_ignored() {
  let config = ProjectConfig::default();
  assert_eq!(resolve_out_dir(&config, "build: { outDir: \"/tmp/site\" }").unwrap(), "dist");
}

#[test]
fn commented_out_dir_is_skipped() {
  let source = "build: {\n  // outDir: \"old\",\n  /* outDir: \"older\" */\n  outDir: \"www\",\n}";
  assert_eq!(resolve_out_dir(&ProjectConfig::default(), source).unwrap(), "www");
  let only_comment = "build: {\n  // outDir: \"old\",\n}";
  assert_eq!(resolve_out_dir(&ProjectConfig::default(), only_comment).unwrap(), "dist");
}

#[test]
fn missing_bundler_config_is_config_missing() {
  let dir = tempfile::tempdir().unwrap();
  let err = read_bundler_config(dir.path(), &ProjectConfig::default()).unwrap_err();
  match err.downcast_ref::<BuildError>() {
    Some(BuildError::ConfigMissing { path }) => assert!(path.ends_with("vite.config.ts")),
    other => panic!("unexpected error: {other:?}"),
  }
}

#[test]
fn reads_bundler_config_source() {
  let dir = tempfile::tempdir().unwrap();
  std::fs::write(dir.path().join("vite.config.ts"), VITE_CONFIG).unwrap();
  let source = read_bundler_config(dir.path(), &ProjectConfig::default()).unwrap();
  assert!(source.contains("defineConfig"));
}
