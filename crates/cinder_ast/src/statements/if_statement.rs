use cinder_type::{operation::BinaryOperation, span::Span};
use serde::{Deserialize, Serialize};

use crate::{
  expressions::{literal::ASTLiteralValue, ASTExpression},
  statements::ASTStatement,
};

/// `elif` chains arrive as an `orelse` holding a single nested `If`.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ASTIf {
  pub test: ASTExpression,
  pub body: Vec<ASTStatement>,
  #[serde(default)]
  pub orelse: Vec<ASTStatement>,
  #[serde(default)]
  pub span: Span,
}

impl ASTIf {
  pub fn new(
    test: ASTExpression,
    body: Vec<ASTStatement>,
    orelse: Vec<ASTStatement>,
    span: Span,
  ) -> Self {
    Self {
      test,
      body,
      orelse,
      span,
    }
  }

  /// Whether this is the `if __name__ == "__main__":` guard.
  pub fn is_main_guard(&self) -> bool {
    let ASTExpression::Binary(binary) = &self.test else {
      return false;
    };

    if binary.operator != BinaryOperation::Equal {
      return false;
    }

    let is_dunder_name = |expr: &ASTExpression| matches!(expr, ASTExpression::Name(name) if name.id == "__name__");
    let is_main_literal = |expr: &ASTExpression| {
      matches!(
        expr,
        ASTExpression::Literal(literal) if literal.value == ASTLiteralValue::Str("__main__".to_string())
      )
    };

    (is_dunder_name(&binary.left) && is_main_literal(&binary.right))
      || (is_main_literal(&binary.left) && is_dunder_name(&binary.right))
  }
}
