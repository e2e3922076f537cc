//! C++ spellings of types, names and typed expressions.

use std::borrow::Cow;

use cinder_analyzer::typed::{TypedExpr, TypedExprKind, TypedLiteral};
use cinder_type::{
  operation::{BinaryOperation, UnaryOperation},
  types::{FloatWidth, IntWidth, Type},
};

const CPP_KEYWORDS: &[&str] = &[
  "alignas",
  "alignof",
  "and",
  "and_eq",
  "asm",
  "auto",
  "bitand",
  "bitor",
  "bool",
  "case",
  "catch",
  "char",
  "class",
  "compl",
  "const",
  "const_cast",
  "constexpr",
  "decltype",
  "default",
  "delete",
  "do",
  "double",
  "dynamic_cast",
  "enum",
  "explicit",
  "export",
  "extern",
  "float",
  "friend",
  "goto",
  "inline",
  "int",
  "long",
  "mutable",
  "namespace",
  "new",
  "noexcept",
  "not",
  "not_eq",
  "nullptr",
  "operator",
  "or",
  "or_eq",
  "private",
  "protected",
  "public",
  "register",
  "reinterpret_cast",
  "short",
  "signed",
  "sizeof",
  "static",
  "static_assert",
  "static_cast",
  "struct",
  "switch",
  "template",
  "this",
  "thread_local",
  "throw",
  "typedef",
  "typeid",
  "typename",
  "union",
  "unsigned",
  "using",
  "virtual",
  "void",
  "volatile",
  "wchar_t",
  "xor",
  "xor_eq",
];

pub fn cpp_type(ty: Type) -> &'static str {
  match ty {
    Type::Bool => "bool",
    Type::Integer => "int",
    Type::Int {
      width: IntWidth::W8,
      signed: true,
    } => "int8_t",
    Type::Int {
      width: IntWidth::W16,
      signed: true,
    } => "int16_t",
    Type::Int {
      width: IntWidth::W32,
      signed: true,
    } => "int32_t",
    Type::Int {
      width: IntWidth::W64,
      signed: true,
    } => "int64_t",
    Type::Int {
      width: IntWidth::W8,
      signed: false,
    } => "uint8_t",
    Type::Int {
      width: IntWidth::W16,
      signed: false,
    } => "uint16_t",
    Type::Int {
      width: IntWidth::W32,
      signed: false,
    } => "uint32_t",
    Type::Int {
      width: IntWidth::W64,
      signed: false,
    } => "uint64_t",
    Type::Float { width: FloatWidth::W32 } => "float",
    Type::Float { width: FloatWidth::W64 } => "double",
    Type::Str => "std::string",
    Type::Void => "void",
  }
}

/// Source identifiers that collide with C++ keywords get a trailing `_`.
pub fn identifier(name: &str) -> Cow<'_, str> {
  if CPP_KEYWORDS.contains(&name) {
    Cow::Owned(format!("{}_", name))
  } else {
    Cow::Borrowed(name)
  }
}

/// Double-quoted C++ string literal.
pub fn quoted(value: &str) -> String {
  let mut out = String::with_capacity(value.len() + 2);
  out.push('"');
  for ch in value.chars() {
    match ch {
      '"' => out.push_str("\\\""),
      '\\' => out.push_str("\\\\"),
      '\n' => out.push_str("\\n"),
      '\t' => out.push_str("\\t"),
      '\r' => out.push_str("\\r"),
      '\0' => out.push_str("\\0"),
      ch if (ch as u32) < 0x20 || ch as u32 == 0x7f => out.push_str(&format!("\\{:03o}", ch as u32)),
      ch => out.push(ch),
    }
  }
  out.push('"');
  out
}

pub fn literal(
  value: &TypedLiteral,
  ty: Type,
) -> String {
  match value {
    TypedLiteral::Integer(value) => integer_literal(*value, ty),
    TypedLiteral::Float(value) => float_literal(*value),
    TypedLiteral::Str(value) => format!("std::string{{{}}}", quoted(value)),
    TypedLiteral::Bool(true) => "true".to_string(),
    TypedLiteral::Bool(false) => "false".to_string(),
  }
}

fn integer_literal(
  value: i128,
  ty: Type,
) -> String {
  if ty == Type::U64 {
    return format!("{}ULL", value);
  }

  // The magnitude of the smallest int64 has no literal of its own.
  if value == i64::MIN as i128 {
    return format!("({}LL - 1)", i64::MIN + 1);
  }

  value.to_string()
}

fn float_literal(value: f64) -> String {
  let text = format!("{:?}", value);
  if text.contains(|c| matches!(c, '.' | 'e' | 'E')) {
    text
  } else {
    format!("{}.0", text)
  }
}

fn binary_symbol(operator: BinaryOperation) -> &'static str {
  match operator {
    BinaryOperation::Add => "+",
    BinaryOperation::Sub => "-",
    BinaryOperation::Mul => "*",
    BinaryOperation::Div => "/",
    BinaryOperation::Mod => "%",
    BinaryOperation::And => "&&",
    BinaryOperation::Or => "||",
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
    BinaryOperation::FloorDiv | BinaryOperation::Pow => "/",
  }
}

fn unary_symbol(operator: UnaryOperation) -> &'static str {
  match operator {
    UnaryOperation::Not => "!",
    UnaryOperation::Neg => "-",
    UnaryOperation::Plus => "+",
    UnaryOperation::BitNot => "~",
  }
}

/// C++ precedence rank; lower binds tighter, 0 is atomic.
fn precedence(expr: &TypedExpr) -> u8 {
  match &expr.kind {
    TypedExprKind::Binary { operator, .. } => match operator {
      BinaryOperation::Mul | BinaryOperation::Div | BinaryOperation::Mod => 5,
      BinaryOperation::Add | BinaryOperation::Sub => 6,
      BinaryOperation::BitShiftLeft | BinaryOperation::BitShiftRight => 7,
      BinaryOperation::LessThan
      | BinaryOperation::LessEqual
      | BinaryOperation::GreaterThan
      | BinaryOperation::GreaterEqual => 9,
      BinaryOperation::Equal | BinaryOperation::NotEqual => 10,
      BinaryOperation::BitAnd => 11,
      BinaryOperation::BitXor => 12,
      BinaryOperation::BitOr => 13,
      BinaryOperation::And => 14,
      BinaryOperation::Or => 15,
      BinaryOperation::FloorDiv | BinaryOperation::Pow => 5,
    },
    TypedExprKind::Unary { .. } => 3,
    TypedExprKind::Literal { value } => match value {
      TypedLiteral::Integer(v) if *v < 0 => 3,
      TypedLiteral::Float(v) if v.is_sign_negative() => 3,
      _ => 0,
    },
    TypedExprKind::Name { .. } | TypedExprKind::Call { .. } => 0,
  }
}

fn operand(
  child: &TypedExpr,
  parent: u8,
  right_side: bool,
) -> String {
  let rank = precedence(child);
  let text = expression(child);
  if rank > parent || (right_side && rank == parent) {
    format!("({})", text)
  } else {
    text
  }
}

/// C++ text of a typed expression, with conversions made explicit.
pub fn expression(expr: &TypedExpr) -> String {
  match &expr.kind {
    TypedExprKind::Literal { value } => literal(value, expr.ty),
    TypedExprKind::Name { id } => identifier(id).into_owned(),
    TypedExprKind::Binary {
      operator, left, right, ..
    } => {
      let rank = precedence(expr);
      let lhs = match expr.operand_conversion() {
        Some(ty) => format!("static_cast<{}>({})", cpp_type(ty), expression(left)),
        None => operand(left, rank, false),
      };
      let rhs = operand(right, rank, true);
      format!("{} {} {}", lhs, binary_symbol(*operator), rhs)
    },
    TypedExprKind::Unary {
      operator, operand, ..
    } => {
      let inner = match expr.unary_conversion() {
        Some(ty) => format!("static_cast<{}>({})", cpp_type(ty), expression(operand)),
        None => expression(operand),
      };
      format!("{}({})", unary_symbol(*operator), inner)
    },
    TypedExprKind::Call { callee, args } => {
      let args: Vec<_> = args.iter().map(expression).collect();
      format!("{}({})", identifier(callee), args.join(", "))
    },
  }
}
