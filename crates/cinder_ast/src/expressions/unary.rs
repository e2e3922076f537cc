use cinder_type::{operation::UnaryOperation, span::Span};
use serde::{Deserialize, Serialize};

use crate::expressions::ASTExpression;

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ASTUnary {
  pub operator: UnaryOperation,
  pub operand: Box<ASTExpression>,
  #[serde(default)]
  pub span: Span,
}

impl ASTUnary {
  pub fn new(
    operator: UnaryOperation,
    operand: ASTExpression,
    span: Span,
  ) -> Self {
    Self {
      operator,
      operand: Box::new(operand),
      span,
    }
  }
}
