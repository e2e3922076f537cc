use cinder_analyzer::{CallResolver, Environment, ScopeKind, TypedExpr};
use cinder_diagnostics::message::DiagnosticMessage;
use cinder_type::{span::Span, types::Type};

/// Resolver for expressions that must not contain calls.
pub struct NoCalls;

impl CallResolver for NoCalls {
  fn resolve_call(
    &mut self,
    callee: &str,
    _args: &[TypedExpr],
    span: Span,
  ) -> Result<Type, DiagnosticMessage> {
    Err(DiagnosticMessage::UnknownFunction {
      name: callee.to_string(),
      span,
    })
  }
}

/// Function environment binding every name in `bindings`.
pub fn environment(bindings: &[(&str, Type)]) -> Environment {
  let mut env = Environment::new(ScopeKind::Function);
  for (idx, (name, ty)) in bindings.iter().enumerate() {
    env
      .declare(name, *ty, Span::new(idx as u32 + 1, 1))
      .expect("test bindings are distinct");
  }
  env
}
