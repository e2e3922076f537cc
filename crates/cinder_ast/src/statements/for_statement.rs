use cinder_type::span::Span;
use serde::{Deserialize, Serialize};

use crate::{expressions::ASTExpression, statements::ASTStatement};

/// `for target in iter:`. Only `range(...)` calls are accepted as `iter`.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ASTFor {
  pub target: String,
  pub iter: ASTExpression,
  pub body: Vec<ASTStatement>,
  #[serde(default)]
  pub orelse: Vec<ASTStatement>,
  #[serde(default)]
  pub span: Span,
}

impl ASTFor {
  pub fn new(
    target: String,
    iter: ASTExpression,
    body: Vec<ASTStatement>,
    orelse: Vec<ASTStatement>,
    span: Span,
  ) -> Self {
    Self {
      target,
      iter,
      body,
      orelse,
      span,
    }
  }
}
