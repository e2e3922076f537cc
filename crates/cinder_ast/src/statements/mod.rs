use cinder_type::span::Span;
use serde::{Deserialize, Serialize};

use crate::{
  expressions::ASTExpression,
  statements::{
    assert_statement::ASTAssert,
    assignment::{ASTAssign, ASTAugAssign},
    for_statement::ASTFor,
    function::ASTFunction,
    if_statement::ASTIf,
    print_statement::ASTPrint,
    return_statement::ASTReturn,
    while_statement::ASTWhile,
  },
};

pub mod assert_statement;
pub mod assignment;
pub mod for_statement;
pub mod function;
pub mod if_statement;
pub mod print_statement;
pub mod return_statement;
pub mod while_statement;

/// Statement evaluated for its effect, e.g. a call or a docstring.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ASTExpressionStatement {
  pub value: ASTExpression,
  #[serde(default)]
  pub span: Span,
}

/// Marker statements that carry nothing but their location.
#[derive(Debug, PartialEq, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ASTMarker {
  #[serde(default)]
  pub span: Span,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ASTStatement {
  Assign(ASTAssign),
  AugAssign(ASTAugAssign),
  Expression(ASTExpressionStatement),
  If(ASTIf),
  While(ASTWhile),
  For(ASTFor),
  Break(ASTMarker),
  Continue(ASTMarker),
  Return(ASTReturn),
  Assert(ASTAssert),
  Print(ASTPrint),
  Pass(ASTMarker),
  Function(ASTFunction),
}

impl ASTStatement {
  pub fn span(&self) -> Span {
    match self {
      ASTStatement::Assign(stmt) => stmt.span,
      ASTStatement::AugAssign(stmt) => stmt.span,
      ASTStatement::Expression(stmt) => stmt.span,
      ASTStatement::If(stmt) => stmt.span,
      ASTStatement::While(stmt) => stmt.span,
      ASTStatement::For(stmt) => stmt.span,
      ASTStatement::Break(stmt) | ASTStatement::Continue(stmt) | ASTStatement::Pass(stmt) => stmt.span,
      ASTStatement::Return(stmt) => stmt.span,
      ASTStatement::Assert(stmt) => stmt.span,
      ASTStatement::Print(stmt) => stmt.span,
      ASTStatement::Function(stmt) => stmt.span,
    }
  }

  pub fn expression(
    value: ASTExpression,
    span: Span,
  ) -> Self {
    ASTStatement::Expression(ASTExpressionStatement { value, span })
  }

  pub fn break_at(span: Span) -> Self {
    ASTStatement::Break(ASTMarker { span })
  }

  pub fn continue_at(span: Span) -> Self {
    ASTStatement::Continue(ASTMarker { span })
  }

  pub fn pass_at(span: Span) -> Self {
    ASTStatement::Pass(ASTMarker { span })
  }
}
