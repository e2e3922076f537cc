use cinder_type::span::Span;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ASTName {
  pub id: String,
  #[serde(default)]
  pub span: Span,
}

impl ASTName {
  pub fn new(
    id: String,
    span: Span,
  ) -> Self {
    Self { id, span }
  }
}
