use cinder_type::span::Span;
use serde::{Deserialize, Serialize};

use crate::expressions::ASTExpression;

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ASTReturn {
  #[serde(default)]
  pub value: Option<ASTExpression>,
  #[serde(default)]
  pub span: Span,
}

impl ASTReturn {
  pub fn new(
    value: Option<ASTExpression>,
    span: Span,
  ) -> Self {
    Self { value, span }
  }
}
