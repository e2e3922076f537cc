use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOperation {
  // Arithmetic
  Add,
  Sub,
  Mul,
  Div,
  Mod,
  FloorDiv,
  Pow,

  // Logical
  And,
  Or,

  // Comparison
  Equal,
  NotEqual,
  LessThan,
  LessEqual,
  GreaterThan,
  GreaterEqual,

  // Bitwise
  BitAnd,
  BitOr,
  BitXor,
  BitShiftLeft,
  BitShiftRight,
}

impl BinaryOperation {
  pub fn is_comparison(&self) -> bool {
    matches!(
      self,
      BinaryOperation::Equal
        | BinaryOperation::NotEqual
        | BinaryOperation::LessThan
        | BinaryOperation::LessEqual
        | BinaryOperation::GreaterThan
        | BinaryOperation::GreaterEqual
    )
  }

  pub fn is_logical(&self) -> bool {
    matches!(self, BinaryOperation::And | BinaryOperation::Or)
  }

  /// `+` and `*` may overflow the common operand width, so fixed-width integer
  /// results step up one width.
  pub fn is_widening(&self) -> bool {
    matches!(self, BinaryOperation::Add | BinaryOperation::Mul)
  }

  /// Operators the restricted grammar accepts.
  pub fn is_supported(&self) -> bool {
    !matches!(
      self,
      BinaryOperation::Mod
        | BinaryOperation::FloorDiv
        | BinaryOperation::Pow
        | BinaryOperation::BitAnd
        | BinaryOperation::BitOr
        | BinaryOperation::BitXor
        | BinaryOperation::BitShiftLeft
        | BinaryOperation::BitShiftRight
    )
  }

  /// Source-level spelling, used in diagnostics.
  pub fn symbol(&self) -> &'static str {
    match self {
      BinaryOperation::Add => "+",
      BinaryOperation::Sub => "-",
      BinaryOperation::Mul => "*",
      BinaryOperation::Div => "/",
      BinaryOperation::Mod => "%",
      BinaryOperation::FloorDiv => "//",
      BinaryOperation::Pow => "**",
      BinaryOperation::And => "and",
      BinaryOperation::Or => "or",
      BinaryOperation::Equal => "==",
      BinaryOperation::NotEqual => "!=",
      BinaryOperation::LessThan => "<",
      BinaryOperation::LessEqual => "<=",
      BinaryOperation::GreaterThan => ">",
      BinaryOperation::GreaterEqual => ">=",
      BinaryOperation::BitAnd => "&",
      BinaryOperation::BitOr => "|",
      BinaryOperation::BitXor => "^",
      BinaryOperation::BitShiftLeft => "<<",
      BinaryOperation::BitShiftRight => ">>",
    }
  }
}

impl std::fmt::Display for BinaryOperation {
  fn fmt(
    &self,
    f: &mut std::fmt::Formatter<'_>,
  ) -> std::fmt::Result {
    write!(f, "{}", self.symbol())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOperation {
  Not,
  Neg,
  Plus,
  BitNot,
}

impl UnaryOperation {
  pub fn symbol(&self) -> &'static str {
    match self {
      UnaryOperation::Not => "not",
      UnaryOperation::Neg => "-",
      UnaryOperation::Plus => "+",
      UnaryOperation::BitNot => "~",
    }
  }
}

impl std::fmt::Display for UnaryOperation {
  fn fmt(
    &self,
    f: &mut std::fmt::Formatter<'_>,
  ) -> std::fmt::Result {
    write!(f, "{}", self.symbol())
  }
}
