use std::collections::HashMap;

use cinder_diagnostics::message::DiagnosticMessage;
use cinder_type::{lattice::assignable, span::Span, types::Type};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScopeKind {
  Module,
  Function,
  Block,
  Loop,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Symbol {
  pub name: String,
  pub ty: Type,
  pub depth: usize,
  pub declared_at: Span,
}

#[derive(Debug, Clone)]
pub struct Scope {
  pub kind: ScopeKind,
  symbols: HashMap<String, Symbol>,
  order: Vec<String>,
}

impl Scope {
  fn new(kind: ScopeKind) -> Self {
    Self {
      kind,
      symbols: HashMap::new(),
      order: Vec::new(),
    }
  }

  /// Symbols in declaration order.
  pub fn symbols(&self) -> Vec<&Symbol> {
    self.order.iter().filter_map(|name| self.symbols.get(name)).collect()
  }
}

/// Outcome of [`Environment::declare`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Declaration {
  /// A new binding was created in the innermost frame.
  Fresh,
  /// The innermost frame already held the name with the same type.
  Existing,
}

/// Stack of lexical frames mapping names to inferred types.
///
/// The root frame (`Module` or `Function`) lives as long as the environment.
#[derive(Debug, Clone)]
pub struct Environment {
  frames: Vec<Scope>,
}

impl Environment {
  pub fn new(root: ScopeKind) -> Self {
    Self {
      frames: vec![Scope::new(root)],
    }
  }

  pub fn push_scope(
    &mut self,
    kind: ScopeKind,
  ) {
    self.frames.push(Scope::new(kind));
  }

  /// Pops the innermost frame. The root frame is never popped.
  pub fn pop_scope(&mut self) -> Option<Scope> {
    if self.frames.len() > 1 {
      self.frames.pop()
    } else {
      None
    }
  }

  /// Number of frames above the root.
  pub fn depth(&self) -> usize {
    self.frames.len() - 1
  }

  pub fn innermost_kind(&self) -> ScopeKind {
    self.frames.last().map(|frame| frame.kind).unwrap_or(ScopeKind::Module)
  }

  pub fn in_loop(&self) -> bool {
    self.frames.iter().any(|frame| frame.kind == ScopeKind::Loop)
  }

  /// Binds `name` in the innermost frame.
  pub fn declare(
    &mut self,
    name: &str,
    ty: Type,
    span: Span,
  ) -> Result<Declaration, DiagnosticMessage> {
    let depth = self.depth();
    let Some(frame) = self.frames.last_mut() else {
      return Ok(Declaration::Fresh);
    };

    if let Some(existing) = frame.symbols.get(name) {
      if existing.ty == ty {
        return Ok(Declaration::Existing);
      }

      return Err(DiagnosticMessage::IncompatibleRebinding {
        name: name.to_string(),
        declared: existing.ty,
        assigned: ty,
        declared_at: existing.declared_at,
        span,
      });
    }

    frame.order.push(name.to_string());
    frame.symbols.insert(
      name.to_string(),
      Symbol {
        name: name.to_string(),
        ty,
        depth,
        declared_at: span,
      },
    );

    Ok(Declaration::Fresh)
  }

  /// Innermost binding of `name`.
  pub fn lookup(
    &self,
    name: &str,
  ) -> Option<&Symbol> {
    self.frames.iter().rev().find_map(|frame| frame.symbols.get(name))
  }

  pub fn resolve(
    &self,
    name: &str,
    span: Span,
  ) -> Result<&Symbol, DiagnosticMessage> {
    self.lookup(name).ok_or_else(|| DiagnosticMessage::UnboundName {
      name: name.to_string(),
      span,
    })
  }

  /// Checks that a value of type `value` may be stored into the existing
  /// binding `name` and returns the binding's type.
  pub fn check_store(
    &self,
    name: &str,
    value: Type,
    span: Span,
  ) -> Result<Type, DiagnosticMessage> {
    let symbol = self.resolve(name, span)?;
    if assignable(symbol.ty, value) {
      return Ok(symbol.ty);
    }

    Err(DiagnosticMessage::IncompatibleRebinding {
      name: name.to_string(),
      declared: symbol.ty,
      assigned: value,
      declared_at: symbol.declared_at,
      span,
    })
  }

  /// Symbols of the root frame, in declaration order.
  pub fn root_symbols(&self) -> Vec<&Symbol> {
    self.frames.first().map(|frame| frame.symbols()).unwrap_or_default()
  }
}
