use cinder_type::{
  operation::{BinaryOperation, UnaryOperation},
  span::Span,
  types::{IntWidth, Type},
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypedLiteral {
  Integer(i128),
  Float(f64),
  Str(String),
  Bool(bool),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypedExprKind {
  Literal {
    value: TypedLiteral,
  },
  Name {
    id: String,
  },
  Binary {
    operator: BinaryOperation,
    left: Box<TypedExpr>,
    right: Box<TypedExpr>,
    /// Type both operands convert to before the operation.
    compute: Type,
  },
  Unary {
    operator: UnaryOperation,
    operand: Box<TypedExpr>,
    compute: Type,
  },
  Call {
    callee: String,
    args: Vec<TypedExpr>,
  },
}

/// Expression annotated with its inferred type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypedExpr {
  pub kind: TypedExprKind,
  pub ty: Type,
  pub span: Span,
}

impl TypedExpr {
  pub fn new(
    kind: TypedExprKind,
    ty: Type,
    span: Span,
  ) -> Self {
    Self { kind, ty, span }
  }

  pub fn is_call(&self) -> bool {
    matches!(self.kind, TypedExprKind::Call { .. })
  }

  pub fn is_str_literal(&self) -> bool {
    matches!(
      self.kind,
      TypedExprKind::Literal {
        value: TypedLiteral::Str(_)
      }
    )
  }

  /// Explicit conversion the left operand of a binary node needs so that the
  /// target language computes in the inferred type rather than in the
  /// operands' own types.
  ///
  /// Integer division would truncate, and 32-bit operands would overflow
  /// before reaching a 64-bit result. Narrow unsigned operands promote to a
  /// signed `int` first, so a wider unsigned result needs the conversion too.
  pub fn operand_conversion(&self) -> Option<Type> {
    let TypedExprKind::Binary {
      operator,
      left,
      right,
      compute,
    } = &self.kind
    else {
      return None;
    };

    if operator.is_comparison() || operator.is_logical() {
      return None;
    }

    match compute {
      Type::Float { .. } if !left.ty.is_float() && !right.ty.is_float() => Some(*compute),
      Type::Int {
        width: IntWidth::W64, ..
      } if !is_64_bit(left.ty) && !is_64_bit(right.ty) => Some(*compute),
      Type::Int { width, signed: false } if widens_both(*width, left.ty, right.ty) => Some(*compute),
      _ => None,
    }
  }

  /// Conversion applied to the operand of a unary node: negating an unsigned
  /// integer goes through the wider signed type.
  pub fn unary_conversion(&self) -> Option<Type> {
    match &self.kind {
      TypedExprKind::Unary { operand, compute, .. } if operand.ty.is_fixed_int() && operand.ty != *compute => {
        Some(*compute)
      },
      _ => None,
    }
  }

  /// Visits this node and all of its descendants, parents first.
  pub fn walk(
    &self,
    visit: &mut dyn FnMut(&TypedExpr),
  ) {
    visit(self);
    match &self.kind {
      TypedExprKind::Binary { left, right, .. } => {
        left.walk(visit);
        right.walk(visit);
      },
      TypedExprKind::Unary { operand, .. } => operand.walk(visit),
      TypedExprKind::Call { args, .. } => {
        for arg in args {
          arg.walk(visit);
        }
      },
      TypedExprKind::Literal { .. } | TypedExprKind::Name { .. } => {},
    }
  }
}

fn is_64_bit(ty: Type) -> bool {
  matches!(
    ty,
    Type::Int {
      width: IntWidth::W64,
      ..
    }
  )
}

fn widens_both(
  width: IntWidth,
  left: Type,
  right: Type,
) -> bool {
  [left, right]
    .iter()
    .all(|ty| ty.integer_parts().is_some_and(|(operand, _)| operand < width))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn name(
    id: &str,
    ty: Type,
  ) -> TypedExpr {
    TypedExpr::new(TypedExprKind::Name { id: id.to_string() }, ty, Span::default())
  }

  fn binary(
    operator: BinaryOperation,
    left: TypedExpr,
    right: TypedExpr,
    compute: Type,
  ) -> TypedExpr {
    TypedExpr::new(
      TypedExprKind::Binary {
        operator,
        left: Box::new(left),
        right: Box::new(right),
        compute,
      },
      compute,
      Span::default(),
    )
  }

  #[test]
  fn integer_division_converts_to_float() {
    let expr = binary(
      BinaryOperation::Div,
      name("a", Type::Integer),
      name("b", Type::Integer),
      Type::F64,
    );
    assert_eq!(expr.operand_conversion(), Some(Type::F64));

    let mixed = binary(
      BinaryOperation::Div,
      name("a", Type::Integer),
      name("d", Type::F64),
      Type::F64,
    );
    assert_eq!(mixed.operand_conversion(), None);
  }

  #[test]
  fn widening_into_64_bits_converts() {
    let expr = binary(BinaryOperation::Add, name("x", Type::I32), name("y", Type::I32), Type::I64);
    assert_eq!(expr.operand_conversion(), Some(Type::I64));

    let already_wide = binary(BinaryOperation::Add, name("x", Type::I64), name("y", Type::I64), Type::I64);
    assert_eq!(already_wide.operand_conversion(), None);

    let small = binary(BinaryOperation::Add, name("x", Type::I8), name("y", Type::I8), Type::I16);
    assert_eq!(small.operand_conversion(), None);
  }

  #[test]
  fn widening_unsigned_results_convert() {
    let product = binary(BinaryOperation::Mul, name("x", Type::U16), name("y", Type::U16), Type::U32);
    assert_eq!(product.operand_conversion(), Some(Type::U32));

    let mixed = binary(BinaryOperation::Add, name("x", Type::I8), name("y", Type::U16), Type::U32);
    assert_eq!(mixed.operand_conversion(), Some(Type::U32));

    let same_width = binary(BinaryOperation::Sub, name("x", Type::U32), name("y", Type::U16), Type::U32);
    assert_eq!(same_width.operand_conversion(), None);
  }

  #[test]
  fn walk_visits_every_node() {
    let expr = binary(BinaryOperation::Sub, name("x", Type::I8), name("y", Type::I8), Type::I8);
    let mut seen = 0;
    expr.walk(&mut |_| seen += 1);
    assert_eq!(seen, 3);
  }
}
