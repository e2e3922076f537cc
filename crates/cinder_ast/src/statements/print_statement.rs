use cinder_type::span::Span;
use serde::{Deserialize, Serialize};

use crate::expressions::ASTExpression;

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ASTPrint {
  #[serde(default)]
  pub args: Vec<ASTExpression>,
  #[serde(default)]
  pub span: Span,
}

impl ASTPrint {
  pub fn new(
    args: Vec<ASTExpression>,
    span: Span,
  ) -> Self {
    Self { args, span }
  }
}
