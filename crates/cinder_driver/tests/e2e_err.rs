mod common;

use cinder_config::CinderConfig;
use cinder_driver::{build_files, transpile_file};
use tempfile::TempDir;

#[test]
fn e2e_type_errors_fail_the_build() {
  let out = TempDir::new().unwrap();
  let config = common::build_config(&["rebind.json"], out.path(), vec![], None, false);

  assert!(build_files(config).is_err());
  assert!(!out.path().join("rebind.cpp").exists());
}

#[test]
fn e2e_one_failure_fails_the_batch() {
  let out = TempDir::new().unwrap();
  let config = common::build_config(&["guarded.json", "rebind.json"], out.path(), vec![], None, false);

  assert!(build_files(config).is_err());
  // Files that lowered cleanly are still written.
  assert!(out.path().join("guarded.cpp").exists());
}

#[test]
fn e2e_malformed_input() {
  let config = CinderConfig::new_basic(false, vec![], true, 0);
  assert!(transpile_file(&config, &common::fixture("malformed.json")).is_err());
}

#[test]
fn e2e_missing_input() {
  let config = CinderConfig::new_basic(false, vec![], true, 0);
  assert!(transpile_file(&config, &common::fixture("does_not_exist.json")).is_err());
}

#[test]
fn e2e_without_inputs() {
  let out = TempDir::new().unwrap();
  let config = common::build_config(&[], out.path(), vec![], None, false);
  assert!(build_files(config).is_err());
}
