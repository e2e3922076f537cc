use cinder_type::{operation::BinaryOperation, span::Span};
use serde::{Deserialize, Serialize};

use crate::expressions::ASTExpression;

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ASTAssign {
  pub target: String,
  pub value: ASTExpression,
  #[serde(default)]
  pub span: Span,
}

impl ASTAssign {
  pub fn new(
    target: String,
    value: ASTExpression,
    span: Span,
  ) -> Self {
    Self { target, value, span }
  }
}

/// `target op= value`
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ASTAugAssign {
  pub target: String,
  pub operator: BinaryOperation,
  pub value: ASTExpression,
  #[serde(default)]
  pub span: Span,
}

impl ASTAugAssign {
  pub fn new(
    target: String,
    operator: BinaryOperation,
    value: ASTExpression,
    span: Span,
  ) -> Self {
    Self {
      target,
      operator,
      value,
      span,
    }
  }
}
