use cinder_type::span::Span;
use serde::{Deserialize, Serialize};

use crate::expressions::ASTExpression;

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ASTAssert {
  pub test: ASTExpression,
  #[serde(default)]
  pub msg: Option<ASTExpression>,
  #[serde(default)]
  pub span: Span,
}

impl ASTAssert {
  pub fn new(
    test: ASTExpression,
    msg: Option<ASTExpression>,
    span: Span,
  ) -> Self {
    Self { test, msg, span }
  }
}
