mod buffer;
mod emit;
mod format;
mod lower;

use cinder_ast::ASTModule;
use cinder_config::{CinderConfig, DebugTrace};
use cinder_diagnostics::message::DiagnosticMessage;
use cinder_log::trace_dbg;

pub use buffer::EmissionBuffer;
pub use emit::{function_header, CppEmitter};
pub use format::{cpp_type, expression, identifier, quoted};
pub use lower::{HeaderSet, LoweredFunction, LoweredMain, LoweredModule, ModuleLowerer};

/// Infers and lowers every function of `module` plus its entry point.
pub fn lower_module(
  module: &ASTModule,
  config: &CinderConfig,
) -> Result<LoweredModule, DiagnosticMessage> {
  ModuleLowerer::new(module, config)?.lower(module)
}

/// Renders a lowered module as a C++ translation unit.
pub fn emit_cpp(
  lowered: &LoweredModule,
  config: &CinderConfig,
) -> String {
  trace_dbg!(
    config,
    DebugTrace::Codegen,
    "emitting {} functions, {} forward declarations",
    lowered.functions.len(),
    lowered.forward_declarations.len()
  );

  CppEmitter::new(lowered, &config.project).emit()
}

/// Lowers and emits `module` in one step.
pub fn transpile(
  module: &ASTModule,
  config: &CinderConfig,
) -> Result<String, DiagnosticMessage> {
  let lowered = lower_module(module, config)?;
  Ok(emit_cpp(&lowered, config))
}
