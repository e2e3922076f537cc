use std::fmt;

use cinder_type::{
  operation::{BinaryOperation, UnaryOperation},
  span::Span,
  types::Type,
};

use super::diagnostic_report::Diagnostic;

/// The four failure classes every diagnostic belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
  UnboundName,
  TypeMismatch,
  UnsupportedConstruct,
  CyclicInference,
}

impl fmt::Display for ErrorKind {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    match self {
      ErrorKind::UnboundName => write!(f, "unbound name"),
      ErrorKind::TypeMismatch => write!(f, "type mismatch"),
      ErrorKind::UnsupportedConstruct => write!(f, "unsupported construct"),
      ErrorKind::CyclicInference => write!(f, "cyclic inference"),
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosticMessage {
  // #region Names
  UnboundName {
    name: String,
    span: Span,
  },
  UnknownFunction {
    name: String,
    span: Span,
  },
  // #endregion Names
  // #region Types
  InvalidOperandTypes {
    operator: BinaryOperation,
    left: Type,
    right: Type,
    span: Span,
  },
  InvalidUnaryOperand {
    operator: UnaryOperation,
    operand: Type,
    span: Span,
  },
  IncompatibleRebinding {
    name: String,
    declared: Type,
    assigned: Type,
    declared_at: Span,
    span: Span,
  },
  NonBooleanCondition {
    construct: &'static str,
    found: Type,
    span: Span,
  },
  ArgumentCountMismatch {
    function: String,
    expected: usize,
    got: usize,
    span: Span,
  },
  ArgumentTypeMismatch {
    function: String,
    parameter: String,
    expected: Type,
    got: Type,
    span: Span,
  },
  ReturnTypeMismatch {
    function: String,
    expected: Type,
    got: Type,
    span: Span,
  },
  NonIntegerRangeBound {
    found: Type,
    span: Span,
  },
  // #endregion Types
  // #region Unsupported
  UnsupportedConstruct {
    construct: String,
    span: Span,
  },
  UnsupportedOperator {
    operator: String,
    span: Span,
  },
  IntegerLiteralOutOfRange {
    value: i128,
    span: Span,
  },
  NonFiniteFloatLiteral {
    span: Span,
  },
  UnknownAnnotation {
    annotation: String,
    span: Span,
  },
  LoopControlOutsideLoop {
    keyword: &'static str,
    span: Span,
  },
  ReturnOutsideFunction {
    span: Span,
  },
  ReservedFunctionName {
    name: String,
    span: Span,
  },
  FunctionAlreadyDefined {
    name: String,
    span: Span,
    previous_span: Span,
  },
  UninferableParameters {
    function: String,
    span: Span,
  },
  // #endregion Unsupported
  CyclicInference {
    function: String,
    span: Span,
  },
}

impl fmt::Display for DiagnosticMessage {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    match self {
      DiagnosticMessage::UnboundName { name, .. } => write!(f, "Name '{}' is not bound in this scope", name),
      DiagnosticMessage::UnknownFunction { name, .. } => write!(f, "Call to undefined function '{}'", name),

      DiagnosticMessage::InvalidOperandTypes {
        operator, left, right, ..
      } => {
        write!(f, "Operator '{}' cannot be applied to '{}' and '{}'", operator, left, right)
      },
      DiagnosticMessage::InvalidUnaryOperand { operator, operand, .. } => {
        write!(f, "Unary operator '{}' cannot be applied to '{}'", operator, operand)
      },
      DiagnosticMessage::IncompatibleRebinding {
        name,
        declared,
        assigned,
        ..
      } => write!(
        f,
        "Cannot assign a value of type '{}' to '{}', which has type '{}'",
        assigned, name, declared
      ),
      DiagnosticMessage::NonBooleanCondition { construct, found, .. } => {
        write!(f, "Condition of '{}' must be 'bool', found '{}'", construct, found)
      },
      DiagnosticMessage::ArgumentCountMismatch {
        function,
        expected,
        got,
        ..
      } => write!(f, "Function '{}' expects {} arguments, but got {}", function, expected, got),
      DiagnosticMessage::ArgumentTypeMismatch {
        function,
        parameter,
        expected,
        got,
        ..
      } => write!(
        f,
        "Argument '{}' of '{}' expects '{}', but got '{}'",
        parameter, function, expected, got
      ),
      DiagnosticMessage::ReturnTypeMismatch {
        function,
        expected,
        got,
        ..
      } => write!(f, "Function '{}' returns '{}', but this returns '{}'", function, expected, got),
      DiagnosticMessage::NonIntegerRangeBound { found, .. } => {
        write!(f, "Range bounds must be integers, found '{}'", found)
      },

      DiagnosticMessage::UnsupportedConstruct { construct, .. } => write!(f, "Unsupported construct: {}", construct),
      DiagnosticMessage::UnsupportedOperator { operator, .. } => write!(f, "Operator '{}' is not supported", operator),
      DiagnosticMessage::IntegerLiteralOutOfRange { value, .. } => {
        write!(f, "Integer literal {} does not fit in 64 bits", value)
      },
      DiagnosticMessage::NonFiniteFloatLiteral { .. } => write!(f, "Float literal must be finite"),
      DiagnosticMessage::UnknownAnnotation { annotation, .. } => {
        write!(f, "Unknown type annotation '{}'", annotation)
      },
      DiagnosticMessage::LoopControlOutsideLoop { keyword, .. } => write!(f, "'{}' outside of a loop", keyword),
      DiagnosticMessage::ReturnOutsideFunction { .. } => write!(f, "'return' outside of a function"),
      DiagnosticMessage::ReservedFunctionName { name, .. } => {
        write!(f, "Function name '{}' is reserved for the entry point", name)
      },
      DiagnosticMessage::FunctionAlreadyDefined { name, .. } => write!(f, "Function '{}' is already defined", name),
      DiagnosticMessage::UninferableParameters { function, .. } => write!(
        f,
        "Parameter types of '{}' cannot be inferred: it is never called and not annotated",
        function
      ),

      DiagnosticMessage::CyclicInference { function, .. } => {
        write!(f, "Cannot infer '{}': its signature depends on itself", function)
      },
    }
  }
}

impl DiagnosticMessage {
  pub fn primary_span(&self) -> Span {
    match self {
      DiagnosticMessage::UnboundName { span, .. }
      | DiagnosticMessage::UnknownFunction { span, .. }
      | DiagnosticMessage::InvalidOperandTypes { span, .. }
      | DiagnosticMessage::InvalidUnaryOperand { span, .. }
      | DiagnosticMessage::IncompatibleRebinding { span, .. }
      | DiagnosticMessage::NonBooleanCondition { span, .. }
      | DiagnosticMessage::ArgumentCountMismatch { span, .. }
      | DiagnosticMessage::ArgumentTypeMismatch { span, .. }
      | DiagnosticMessage::ReturnTypeMismatch { span, .. }
      | DiagnosticMessage::NonIntegerRangeBound { span, .. }
      | DiagnosticMessage::UnsupportedConstruct { span, .. }
      | DiagnosticMessage::UnsupportedOperator { span, .. }
      | DiagnosticMessage::IntegerLiteralOutOfRange { span, .. }
      | DiagnosticMessage::NonFiniteFloatLiteral { span }
      | DiagnosticMessage::UnknownAnnotation { span, .. }
      | DiagnosticMessage::LoopControlOutsideLoop { span, .. }
      | DiagnosticMessage::ReturnOutsideFunction { span }
      | DiagnosticMessage::ReservedFunctionName { span, .. }
      | DiagnosticMessage::FunctionAlreadyDefined { span, .. }
      | DiagnosticMessage::UninferableParameters { span, .. }
      | DiagnosticMessage::CyclicInference { span, .. } => *span,
    }
  }

  pub fn kind(&self) -> ErrorKind {
    match self {
      DiagnosticMessage::UnboundName { .. } | DiagnosticMessage::UnknownFunction { .. } => ErrorKind::UnboundName,

      DiagnosticMessage::InvalidOperandTypes { .. }
      | DiagnosticMessage::InvalidUnaryOperand { .. }
      | DiagnosticMessage::IncompatibleRebinding { .. }
      | DiagnosticMessage::NonBooleanCondition { .. }
      | DiagnosticMessage::ArgumentCountMismatch { .. }
      | DiagnosticMessage::ArgumentTypeMismatch { .. }
      | DiagnosticMessage::ReturnTypeMismatch { .. }
      | DiagnosticMessage::NonIntegerRangeBound { .. } => ErrorKind::TypeMismatch,

      DiagnosticMessage::UnsupportedConstruct { .. }
      | DiagnosticMessage::UnsupportedOperator { .. }
      | DiagnosticMessage::IntegerLiteralOutOfRange { .. }
      | DiagnosticMessage::NonFiniteFloatLiteral { .. }
      | DiagnosticMessage::UnknownAnnotation { .. }
      | DiagnosticMessage::LoopControlOutsideLoop { .. }
      | DiagnosticMessage::ReturnOutsideFunction { .. }
      | DiagnosticMessage::ReservedFunctionName { .. }
      | DiagnosticMessage::FunctionAlreadyDefined { .. }
      | DiagnosticMessage::UninferableParameters { .. } => ErrorKind::UnsupportedConstruct,

      DiagnosticMessage::CyclicInference { .. } => ErrorKind::CyclicInference,
    }
  }

  pub fn code(&self) -> String {
    match self {
      DiagnosticMessage::UnboundName { .. } => "C0001",
      DiagnosticMessage::UnknownFunction { .. } => "C0002",
      DiagnosticMessage::InvalidOperandTypes { .. } => "C0101",
      DiagnosticMessage::InvalidUnaryOperand { .. } => "C0102",
      DiagnosticMessage::IncompatibleRebinding { .. } => "C0103",
      DiagnosticMessage::NonBooleanCondition { .. } => "C0104",
      DiagnosticMessage::ArgumentCountMismatch { .. } => "C0105",
      DiagnosticMessage::ArgumentTypeMismatch { .. } => "C0106",
      DiagnosticMessage::ReturnTypeMismatch { .. } => "C0107",
      DiagnosticMessage::NonIntegerRangeBound { .. } => "C0108",
      DiagnosticMessage::UnsupportedConstruct { .. } => "C0201",
      DiagnosticMessage::UnsupportedOperator { .. } => "C0202",
      DiagnosticMessage::IntegerLiteralOutOfRange { .. } => "C0203",
      DiagnosticMessage::NonFiniteFloatLiteral { .. } => "C0204",
      DiagnosticMessage::UnknownAnnotation { .. } => "C0205",
      DiagnosticMessage::LoopControlOutsideLoop { .. } => "C0206",
      DiagnosticMessage::ReturnOutsideFunction { .. } => "C0207",
      DiagnosticMessage::ReservedFunctionName { .. } => "C0208",
      DiagnosticMessage::FunctionAlreadyDefined { .. } => "C0209",
      DiagnosticMessage::UninferableParameters { .. } => "C0210",
      DiagnosticMessage::CyclicInference { .. } => "C0301",
    }
    .to_string()
  }

  fn related(&self) -> Vec<(Span, String)> {
    match self {
      DiagnosticMessage::IncompatibleRebinding {
        declared_at, declared, ..
      } => {
        vec![(*declared_at, format!("First bound here with type '{}'", declared))]
      },
      DiagnosticMessage::FunctionAlreadyDefined { previous_span, .. } => {
        vec![(*previous_span, "Previous definition here".to_string())]
      },
      _ => vec![],
    }
  }

  fn notes(&self) -> Vec<String> {
    match self {
      DiagnosticMessage::UninferableParameters { .. } => {
        vec!["annotate every parameter or call the function at least once".to_string()]
      },
      DiagnosticMessage::CyclicInference { .. } => vec!["recursive functions are not supported".to_string()],
      _ => vec![],
    }
  }

  pub fn report(&self) -> Diagnostic {
    let mut diagnostic = Diagnostic::new(self.kind(), self.code(), self.to_string(), self.primary_span());
    for (span, message) in self.related() {
      diagnostic = diagnostic.with_related(span, message);
    }
    for note in self.notes() {
      diagnostic = diagnostic.with_note(note);
    }
    diagnostic
  }
}
