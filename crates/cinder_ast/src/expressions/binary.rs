use cinder_type::{operation::BinaryOperation, span::Span};
use serde::{Deserialize, Serialize};

use crate::expressions::ASTExpression;

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ASTBinary {
  pub operator: BinaryOperation,
  pub left: Box<ASTExpression>,
  pub right: Box<ASTExpression>,
  #[serde(default)]
  pub span: Span,
}

impl ASTBinary {
  pub fn new(
    operator: BinaryOperation,
    left: ASTExpression,
    right: ASTExpression,
    span: Span,
  ) -> Self {
    Self {
      operator,
      left: Box::new(left),
      right: Box::new(right),
      span,
    }
  }
}
