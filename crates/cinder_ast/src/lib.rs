//! Statement tree handed over by the front end.
//!
//! The tree arrives as JSON: `{"body": [statement, ...]}` where every
//! statement and expression object is tagged by a `"kind"` field and carries a
//! `"span": {"line": L, "column": C}`.

pub mod expressions;
pub mod statements;

use serde::{Deserialize, Serialize};

use crate::statements::ASTStatement;

#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct ASTModule {
  pub body: Vec<ASTStatement>,
}

impl ASTModule {
  pub fn new(body: Vec<ASTStatement>) -> Self {
    Self { body }
  }

  pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
    serde_json::from_str(source)
  }

  pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(self)
  }
}
