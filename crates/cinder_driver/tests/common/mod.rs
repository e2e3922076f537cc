#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use cinder_config::{CinderBuildConfig, CinderConfig, DumpKind};

pub fn fixture(name: &str) -> String {
  format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

/// Quiet configuration building `files` into `output_dir`.
pub fn build_config(
  files: &[&str],
  output_dir: &Path,
  dump: Vec<DumpKind>,
  dump_dir: Option<&Path>,
  check_mode: bool,
) -> Arc<CinderConfig> {
  let mut config = CinderConfig::new_basic(false, vec![], true, 0);
  config.build_config = Some(CinderBuildConfig::new(
    files.iter().map(|file| fixture(file)).collect(),
    output_dir.display().to_string(),
    dump,
    dump_dir.map(|dir| dir.display().to_string()),
    false,
    check_mode,
  ));
  Arc::new(config)
}

pub fn read_output(
  output_dir: &Path,
  stem: &str,
) -> String {
  let path = output_dir.join(format!("{}.cpp", stem));
  std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("missing output {}: {}", path.display(), e))
}
