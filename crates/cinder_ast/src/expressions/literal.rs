use cinder_type::span::Span;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ASTLiteralValue {
  Integer(i128),
  Float(f64),
  Str(String),
  Bool(bool),
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ASTLiteral {
  pub value: ASTLiteralValue,
  #[serde(default)]
  pub span: Span,
}

impl ASTLiteral {
  pub fn new(
    value: ASTLiteralValue,
    span: Span,
  ) -> Self {
    Self { value, span }
  }

  pub fn is_str(&self) -> bool {
    matches!(self.value, ASTLiteralValue::Str(_))
  }
}
