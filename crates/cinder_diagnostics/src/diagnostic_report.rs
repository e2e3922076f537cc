use cinder_type::span::Span;

use crate::message::ErrorKind;

/// An earlier location the error refers back to, such as the first binding
/// of a name.
#[derive(Debug, Clone, PartialEq)]
pub struct Related {
  pub span: Span,
  pub message: String,
}

/// Printable form of a lowering error. Lowering stops at the first error, so
/// a report is always an error of one taxonomy kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
  pub kind: ErrorKind,
  pub code: String,
  pub message: String,
  pub span: Span,
  pub related: Vec<Related>,
  pub notes: Vec<String>,
}

impl Diagnostic {
  pub fn new(
    kind: ErrorKind,
    code: String,
    message: String,
    span: Span,
  ) -> Self {
    Self {
      kind,
      code,
      message,
      span,
      related: Vec::new(),
      notes: Vec::new(),
    }
  }

  pub fn with_related(
    mut self,
    span: Span,
    message: String,
  ) -> Self {
    self.related.push(Related { span, message });
    self
  }

  pub fn with_note(
    mut self,
    note: String,
  ) -> Self {
    self.notes.push(note);
    self
  }
}
