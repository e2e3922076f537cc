use cinder_type::span::Span;
use serde::{Deserialize, Serialize};

use crate::statements::ASTStatement;

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ASTParameter {
  pub name: String,
  #[serde(default)]
  pub annotation: Option<String>,
  #[serde(default)]
  pub span: Span,
}

impl ASTParameter {
  pub fn new(
    name: String,
    annotation: Option<String>,
    span: Span,
  ) -> Self {
    Self { name, annotation, span }
  }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ASTFunction {
  pub name: String,
  #[serde(default)]
  pub params: Vec<ASTParameter>,
  #[serde(default)]
  pub returns: Option<String>,
  pub body: Vec<ASTStatement>,
  #[serde(default)]
  pub span: Span,
}

impl ASTFunction {
  pub fn new(
    name: String,
    params: Vec<ASTParameter>,
    returns: Option<String>,
    body: Vec<ASTStatement>,
    span: Span,
  ) -> Self {
    Self {
      name,
      params,
      returns,
      body,
      span,
    }
  }

  pub fn is_fully_annotated(&self) -> bool {
    self.params.iter().all(|param| param.annotation.is_some())
  }
}
