use cinder_type::span::Span;
use serde::{Deserialize, Serialize};

use crate::{expressions::ASTExpression, statements::ASTStatement};

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ASTWhile {
  pub test: ASTExpression,
  pub body: Vec<ASTStatement>,
  /// Runs when the loop finishes without `break`.
  #[serde(default)]
  pub orelse: Vec<ASTStatement>,
  #[serde(default)]
  pub span: Span,
}

impl ASTWhile {
  pub fn new(
    test: ASTExpression,
    body: Vec<ASTStatement>,
    orelse: Vec<ASTStatement>,
    span: Span,
  ) -> Self {
    Self {
      test,
      body,
      orelse,
      span,
    }
  }
}
