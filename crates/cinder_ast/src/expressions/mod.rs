use cinder_type::span::Span;
use serde::{Deserialize, Serialize};

use crate::expressions::{
  binary::ASTBinary,
  call::ASTCall,
  literal::{ASTLiteral, ASTLiteralValue},
  name::ASTName,
  unary::ASTUnary,
};

pub mod binary;
pub mod call;
pub mod literal;
pub mod name;
pub mod unary;

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ASTExpression {
  Literal(ASTLiteral),
  Name(ASTName),
  Binary(ASTBinary),
  Unary(ASTUnary),
  Call(ASTCall),
}

impl ASTExpression {
  pub fn span(&self) -> Span {
    match self {
      ASTExpression::Literal(expr) => expr.span,
      ASTExpression::Name(expr) => expr.span,
      ASTExpression::Binary(expr) => expr.span,
      ASTExpression::Unary(expr) => expr.span,
      ASTExpression::Call(expr) => expr.span,
    }
  }

  pub fn integer(
    value: i128,
    span: Span,
  ) -> Self {
    ASTExpression::Literal(ASTLiteral::new(ASTLiteralValue::Integer(value), span))
  }

  pub fn float(
    value: f64,
    span: Span,
  ) -> Self {
    ASTExpression::Literal(ASTLiteral::new(ASTLiteralValue::Float(value), span))
  }

  pub fn string(
    value: &str,
    span: Span,
  ) -> Self {
    ASTExpression::Literal(ASTLiteral::new(ASTLiteralValue::Str(value.to_string()), span))
  }

  pub fn boolean(
    value: bool,
    span: Span,
  ) -> Self {
    ASTExpression::Literal(ASTLiteral::new(ASTLiteralValue::Bool(value), span))
  }

  pub fn name(
    id: &str,
    span: Span,
  ) -> Self {
    ASTExpression::Name(ASTName::new(id.to_string(), span))
  }

  /// Name of the called function when this is a call expression.
  pub fn callee(&self) -> Option<&str> {
    match self {
      ASTExpression::Call(call) => Some(call.callee.as_str()),
      _ => None,
    }
  }
}
