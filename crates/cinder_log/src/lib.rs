//! Stderr logging for the transpiler.
//!
//! Every input file goes through the same phases (reading, lowering,
//! emitting), and the driver reports each one with an arrow line. Debug traces
//! are grouped by the category of the component that produced them, and plain
//! debug/trace lines are gated on `-v`. Generated C++ may be printed to stdout,
//! so nothing here writes there.

use std::fmt;

use cinder_config::{CinderConfig, DebugTrace};
use colored::Colorize;

/// Kind of arrow line printed for a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
  /// A phase starting on a file; indented under the file list.
  Step,
  /// A file finished its last phase.
  Done,
  /// Something failed but the batch goes on.
  Warn,
}

/// Verbosity-gated message levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
  Info = 1,
  Debug = 2,
  Trace = 3,
}

/// Verbosity after `--quiet` and `--debug` are applied.
pub fn effective_verbose(config: &CinderConfig) -> u8 {
  match (config.quiet, config.debug) {
    (true, _) => 0,
    (false, true) => config.verbose.max(Level::Debug as u8),
    (false, false) => config.verbose,
  }
}

pub fn enabled(
  config: &CinderConfig,
  level: Level,
) -> bool {
  effective_verbose(config) >= level as u8
}

pub fn trace_enabled(
  config: &CinderConfig,
  trace: DebugTrace,
) -> bool {
  !config.quiet && (config.debug || config.debug_trace.contains(&trace))
}

pub fn category(trace: DebugTrace) -> &'static str {
  match trace {
    DebugTrace::Analyzer => "analyzer",
    DebugTrace::Lowering => "lowering",
    DebugTrace::Codegen => "codegen",
    DebugTrace::Driver => "driver",
  }
}

pub fn phase(
  config: &CinderConfig,
  marker: Marker,
  message: fmt::Arguments<'_>,
) {
  if config.quiet {
    return;
  }

  match marker {
    Marker::Step => eprintln!("    {} {}", "-->".bright_green().bold(), message),
    Marker::Done => eprintln!("{} {}", "-->".bright_green().bold(), message),
    Marker::Warn => eprintln!("{} {}", "-->".bright_yellow().bold(), message),
  }
}

pub fn trace(
  config: &CinderConfig,
  trace: DebugTrace,
  message: fmt::Arguments<'_>,
) {
  if trace_enabled(config, trace) {
    eprintln!("debug[{}]: {}", category(trace), message);
  }
}

pub fn verbose(
  config: &CinderConfig,
  level: Level,
  message: fmt::Arguments<'_>,
) {
  if !enabled(config, level) {
    return;
  }

  match level {
    Level::Info => eprintln!("{}", message),
    Level::Debug => eprintln!("debug: {}", message),
    Level::Trace => eprintln!("trace: {}", message),
  }
}

/// Announces a phase on one file: `    --> Lowering... a.json`.
#[macro_export]
macro_rules! phase_log {
  ($config:expr, $($arg:tt)+) => {
    $crate::phase($config, $crate::Marker::Step, format_args!($($arg)+))
  };
}

/// Reports a file that made it through every phase.
#[macro_export]
macro_rules! phase_ok {
  ($config:expr, $($arg:tt)+) => {
    $crate::phase($config, $crate::Marker::Done, format_args!($($arg)+))
  };
}

#[macro_export]
macro_rules! phase_warn {
  ($config:expr, $($arg:tt)+) => {
    $crate::phase($config, $crate::Marker::Warn, format_args!($($arg)+))
  };
}

/// `debug[lowering]: declared a: int` when that category is traced.
#[macro_export]
macro_rules! trace_dbg {
  ($config:expr, $trace:expr, $($arg:tt)+) => {
    $crate::trace($config, $trace, format_args!($($arg)+))
  };
}

#[macro_export]
macro_rules! log_dbg {
  ($config:expr, $($arg:tt)+) => {
    $crate::verbose($config, $crate::Level::Debug, format_args!($($arg)+))
  };
}

#[macro_export]
macro_rules! log_trc {
  ($config:expr, $($arg:tt)+) => {
    $crate::verbose($config, $crate::Level::Trace, format_args!($($arg)+))
  };
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn quiet_silences_everything() {
    let config = CinderConfig::new_basic(true, vec![DebugTrace::Lowering], true, 3);
    assert_eq!(effective_verbose(&config), 0);
    assert!(!enabled(&config, Level::Info));
    assert!(!trace_enabled(&config, DebugTrace::Lowering));
  }

  #[test]
  fn debug_implies_debug_verbosity() {
    let config = CinderConfig::new_basic(true, vec![], false, 0);
    assert!(enabled(&config, Level::Debug));
    assert!(!enabled(&config, Level::Trace));
    assert!(trace_enabled(&config, DebugTrace::Codegen));

    let louder = CinderConfig::new_basic(true, vec![], false, 3);
    assert_eq!(effective_verbose(&louder), 3);
  }

  #[test]
  fn traces_are_selected_by_category() {
    let config = CinderConfig::new_basic(false, vec![DebugTrace::Analyzer], false, 0);
    assert!(trace_enabled(&config, DebugTrace::Analyzer));
    assert!(!trace_enabled(&config, DebugTrace::Driver));
    assert!(!enabled(&config, Level::Info));
    assert_eq!(category(DebugTrace::Lowering), "lowering");
  }
}
