use std::collections::HashMap;

use cinder_ast::{statements::function::ASTFunction, statements::ASTStatement, ASTModule};
use cinder_diagnostics::message::DiagnosticMessage;
use cinder_type::{span::Span, types::Type};
use serde::Serialize;

/// Name reserved for the generated entry point.
pub const ENTRY_POINT: &str = "main";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionSignature {
  pub name: String,
  pub params: Vec<(String, Type)>,
  pub returns: Type,
}

impl FunctionSignature {
  pub fn param_types(&self) -> impl Iterator<Item = Type> + '_ {
    self.params.iter().map(|(_, ty)| *ty)
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FunctionState {
  /// Not lowered yet.
  Pending,
  /// Its body is being lowered; its signature is not known yet.
  InProgress,
  Resolved(FunctionSignature),
}

#[derive(Debug, Clone)]
pub struct FunctionEntry<'a> {
  pub definition: &'a ASTFunction,
  /// Position among the module's function definitions.
  pub order: usize,
  pub state: FunctionState,
}

/// Every top-level function of a module, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct FunctionTable<'a> {
  entries: Vec<FunctionEntry<'a>>,
  index: HashMap<String, usize>,
}

impl<'a> FunctionTable<'a> {
  /// Collects the top-level function definitions of `module`.
  pub fn collect(module: &'a ASTModule) -> Result<Self, DiagnosticMessage> {
    let mut table = Self::default();

    for statement in &module.body {
      let ASTStatement::Function(function) = statement else {
        continue;
      };

      if function.name == ENTRY_POINT {
        return Err(DiagnosticMessage::ReservedFunctionName {
          name: function.name.clone(),
          span: function.span,
        });
      }

      if let Some(&existing) = table.index.get(&function.name) {
        return Err(DiagnosticMessage::FunctionAlreadyDefined {
          name: function.name.clone(),
          span: function.span,
          previous_span: table.entries[existing].definition.span,
        });
      }

      let order = table.entries.len();
      table.index.insert(function.name.clone(), order);
      table.entries.push(FunctionEntry {
        definition: function,
        order,
        state: FunctionState::Pending,
      });
    }

    Ok(table)
  }

  pub fn get(
    &self,
    name: &str,
  ) -> Option<&FunctionEntry<'a>> {
    self.index.get(name).map(|&idx| &self.entries[idx])
  }

  pub fn contains(
    &self,
    name: &str,
  ) -> bool {
    self.index.contains_key(name)
  }

  pub fn entries(&self) -> &[FunctionEntry<'a>] {
    &self.entries
  }

  /// Marks a pending function as being lowered. Callers check for a resolved
  /// signature first, so any other state means the call graph loops back.
  pub fn begin(
    &mut self,
    name: &str,
    span: Span,
  ) -> Result<&'a ASTFunction, DiagnosticMessage> {
    let entry = self.entry_mut(name, span)?;
    match entry.state {
      FunctionState::Pending => {
        entry.state = FunctionState::InProgress;
        Ok(entry.definition)
      },
      _ => Err(DiagnosticMessage::CyclicInference {
        function: name.to_string(),
        span,
      }),
    }
  }

  pub fn finish(
    &mut self,
    signature: FunctionSignature,
  ) {
    if let Some(&idx) = self.index.get(&signature.name) {
      self.entries[idx].state = FunctionState::Resolved(signature);
    }
  }

  pub fn signature(
    &self,
    name: &str,
  ) -> Option<&FunctionSignature> {
    match &self.get(name)?.state {
      FunctionState::Resolved(signature) => Some(signature),
      _ => None,
    }
  }

  /// Resolved signatures in definition order.
  pub fn signatures(&self) -> Vec<&FunctionSignature> {
    self
      .entries
      .iter()
      .filter_map(|entry| match &entry.state {
        FunctionState::Resolved(signature) => Some(signature),
        _ => None,
      })
      .collect()
  }

  /// First function still waiting for a call site to fix its parameters.
  pub fn first_pending(&self) -> Option<&FunctionEntry<'a>> {
    self.entries.iter().find(|entry| entry.state == FunctionState::Pending)
  }

  fn entry_mut(
    &mut self,
    name: &str,
    span: Span,
  ) -> Result<&mut FunctionEntry<'a>, DiagnosticMessage> {
    match self.index.get(name) {
      Some(&idx) => Ok(&mut self.entries[idx]),
      None => Err(DiagnosticMessage::UnknownFunction {
        name: name.to_string(),
        span,
      }),
    }
  }
}
