use cinder_type::span::Span;
use serde::{Deserialize, Serialize};

use crate::expressions::ASTExpression;

/// Call of a named function. Only plain names are callable.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ASTCall {
  pub callee: String,
  #[serde(default)]
  pub args: Vec<ASTExpression>,
  #[serde(default)]
  pub span: Span,
}

impl ASTCall {
  pub fn new(
    callee: String,
    args: Vec<ASTExpression>,
    span: Span,
  ) -> Self {
    Self { callee, args, span }
  }
}
