/* src/cli/core/src/config/tests/json.rs */

use serde_json::json;

use crate::config::{read_json_object, write_json};
use crate::error::BuildError;

#[test]
fn keeps_key_order_through_rewrite() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("app.json");
  std::fs::write(&path, r#"{"zeta":1,"alpha":{"b":2,"a":1},"mid":true}"#).unwrap();

  let mut map = read_json_object(&path).unwrap();
  map.insert("added".into(), json!("x"));
  write_json(&path, &map).unwrap();

  let written = std::fs::read_to_string(&path).unwrap();
  let keys: Vec<_> = read_json_object(&path).unwrap().keys().cloned().collect();
  assert_eq!(keys, vec!["zeta", "alpha", "mid", "added"]);
  assert!(written.ends_with("}\n"));
  assert!(written.contains("\n  \"alpha\": {\n    \"b\": 2,"));
}

#[test]
fn missing_file_is_config_missing() {
  let dir = tempfile::tempdir().unwrap();
  let err = read_json_object(&dir.path().join("nope.json")).unwrap_err();
  assert!(matches!(err.downcast_ref::<BuildError>(), Some(BuildError::ConfigMissing { .. })));
}

#[test]
fn non_object_is_error() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("list.json");
  std::fs::write(&path, "[1, 2]").unwrap();
  let err = read_json_object(&path).unwrap_err();
  assert!(err.to_string().contains("must contain a JSON object"));
}

#[test]
fn invalid_json_mentions_path() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("broken.json");
  std::fs::write(&path, "{ nope").unwrap();
  let err = read_json_object(&path).unwrap_err();
  assert!(err.to_string().contains("broken.json"));
}
