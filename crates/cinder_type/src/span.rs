use serde::{Deserialize, Serialize};

/// Source location reported by the external parser.
///
/// Lines and columns are 1-based; a zeroed span means the location is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
  pub line: u32,
  pub column: u32,
}

impl Span {
  pub fn new(
    line: u32,
    column: u32,
  ) -> Self {
    Self { line, column }
  }

  pub fn is_unknown(&self) -> bool {
    self.line == 0
  }
}

impl std::fmt::Display for Span {
  fn fmt(
    &self,
    f: &mut std::fmt::Formatter<'_>,
  ) -> std::fmt::Result {
    write!(f, "{}:{}", self.line, self.column)
  }
}
