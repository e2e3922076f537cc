use serde::{Deserialize, Serialize};

/// Runtime support library the emitted C++ links against.
///
/// Expected format in cinder.toml:
/// ```toml
/// [runtime]
/// namespace = "pycpp"
/// sys_header = "pycpp/runtime/sys.h"
/// range_header = "cppitertools/range.hpp"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
  /// Namespace holding `sys::argv`
  pub namespace: String,
  /// Header declaring the argument vector
  pub sys_header: String,
  /// Header providing `iter::range`
  pub range_header: String,
}

impl Default for RuntimeConfig {
  fn default() -> Self {
    Self {
      namespace: "pycpp".to_string(),
      sys_header: "pycpp/runtime/sys.h".to_string(),
      range_header: "cppitertools/range.hpp".to_string(),
    }
  }
}

/// Layout of the generated translation unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitConfig {
  /// Spaces per nesting level
  pub indent_width: usize,
  /// Append `// NOLINT(build/include_order)` to include lines
  pub nolint_includes: bool,
}

impl Default for EmitConfig {
  fn default() -> Self {
    Self {
      indent_width: 2,
      nolint_includes: true,
    }
  }
}

/// Contents of an optional `cinder.toml` next to the sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CinderProjectConfig {
  #[serde(default)]
  pub runtime: RuntimeConfig,
  #[serde(default)]
  pub emit: EmitConfig,
}

impl CinderProjectConfig {
  pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
    toml::from_str(content)
  }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum DumpKind {
  Ast,
  Typed,
  Symbols,
  Cpp,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum DebugTrace {
  Analyzer,
  Lowering,
  Codegen,
  Driver,
}

/// Controls the verbosity level of CLI output.
///
/// - `Quiet`: No output except errors
/// - `Detailed`: Structured progress output (default)
/// - `Verbose`: Detailed output with internal phases
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum OutputLevel {
  Quiet,
  #[default]
  Detailed,
  Verbose,
}

#[derive(Debug, Clone, Default)]
pub struct CinderBuildConfig {
  pub files: Vec<String>,
  pub output_dir: String,
  pub dump: Vec<DumpKind>,
  pub dump_dir: Option<String>,
  pub stdout: bool,
  pub check_mode: bool,
}

impl CinderBuildConfig {
  pub fn new(
    files: Vec<String>,
    output_dir: String,
    dump: Vec<DumpKind>,
    dump_dir: Option<String>,
    stdout: bool,
    check_mode: bool,
  ) -> Self {
    Self {
      files,
      output_dir,
      dump,
      dump_dir,
      stdout,
      check_mode,
    }
  }
}

#[derive(Debug, Clone, Default)]
pub struct CinderConfig {
  pub project: CinderProjectConfig,
  pub build_config: Option<CinderBuildConfig>,
  pub debug: bool,
  pub debug_trace: Vec<DebugTrace>,
  pub quiet: bool,
  pub verbose: u8,
  pub output_level: OutputLevel,
}

impl CinderConfig {
  pub fn new_basic(
    debug: bool,
    debug_trace: Vec<DebugTrace>,
    quiet: bool,
    verbose: u8,
  ) -> Self {
    let output_level = if quiet {
      OutputLevel::Quiet
    } else if verbose > 0 {
      OutputLevel::Verbose
    } else {
      OutputLevel::Detailed
    };

    Self {
      debug,
      debug_trace,
      quiet,
      verbose,
      output_level,
      ..Self::default()
    }
  }

  pub fn dump_requested(
    &self,
    kind: DumpKind,
  ) -> bool {
    self
      .build_config
      .as_ref()
      .map(|bc| bc.dump.contains(&kind))
      .unwrap_or(false)
  }
}
