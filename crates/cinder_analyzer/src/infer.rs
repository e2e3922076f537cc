use cinder_ast::expressions::{
  binary::ASTBinary,
  call::ASTCall,
  literal::{ASTLiteral, ASTLiteralValue},
  unary::ASTUnary,
  ASTExpression,
};
use cinder_diagnostics::message::DiagnosticMessage;
use cinder_type::{
  lattice::{promote, result_of, unary_result, LatticeError},
  operation::{BinaryOperation, UnaryOperation},
  span::Span,
  types::Type,
};

use crate::{
  scope::Environment,
  typed::{TypedExpr, TypedExprKind, TypedLiteral},
};

/// Resolves the signature of a called function.
///
/// The resolver may lower the callee's body on first use; a call into a
/// function whose signature is still being resolved must fail with
/// `CyclicInference`.
pub trait CallResolver {
  /// Returns the result type of `callee(args...)`.
  fn resolve_call(
    &mut self,
    callee: &str,
    args: &[TypedExpr],
    span: Span,
  ) -> Result<Type, DiagnosticMessage>;
}

pub struct ExpressionInferencer<'env, 'res> {
  env: &'env Environment,
  resolver: &'res mut dyn CallResolver,
}

impl<'env, 'res> ExpressionInferencer<'env, 'res> {
  pub fn new(
    env: &'env Environment,
    resolver: &'res mut dyn CallResolver,
  ) -> Self {
    Self { env, resolver }
  }

  pub fn infer(
    &mut self,
    expr: &ASTExpression,
  ) -> Result<TypedExpr, DiagnosticMessage> {
    match expr {
      ASTExpression::Literal(literal) => infer_literal(literal),
      ASTExpression::Name(name) => {
        let symbol = self.env.resolve(&name.id, name.span)?;
        Ok(TypedExpr::new(
          TypedExprKind::Name { id: name.id.clone() },
          symbol.ty,
          name.span,
        ))
      },
      ASTExpression::Binary(binary) => self.infer_binary(binary),
      ASTExpression::Unary(unary) => self.infer_unary(unary),
      ASTExpression::Call(call) => self.infer_call(call),
    }
  }

  fn infer_binary(
    &mut self,
    binary: &ASTBinary,
  ) -> Result<TypedExpr, DiagnosticMessage> {
    let left = self.infer(&binary.left)?;
    let right = self.infer(&binary.right)?;
    let operator = binary.operator;

    let ty = result_of(operator, left.ty, right.ty)
      .map_err(|err| binary_error(err, operator, left.ty, right.ty, binary.span))?;

    let compute = if operator.is_logical() {
      Type::Bool
    } else if operator.is_comparison() {
      if left.ty == Type::Str {
        Type::Str
      } else {
        promote(left.ty, right.ty).map_err(|err| binary_error(err, operator, left.ty, right.ty, binary.span))?
      }
    } else {
      ty
    };

    Ok(TypedExpr::new(
      TypedExprKind::Binary {
        operator,
        left: Box::new(left),
        right: Box::new(right),
        compute,
      },
      ty,
      binary.span,
    ))
  }

  fn infer_unary(
    &mut self,
    unary: &ASTUnary,
  ) -> Result<TypedExpr, DiagnosticMessage> {
    if unary.operator == UnaryOperation::Neg {
      if let Some(folded) = fold_negative_literal(&unary.operand, unary.span) {
        return folded;
      }
    }

    let operand = self.infer(&unary.operand)?;
    let operator = unary.operator;

    let ty = unary_result(operator, operand.ty).map_err(|err| match err {
      LatticeError::Mismatch => DiagnosticMessage::InvalidUnaryOperand {
        operator,
        operand: operand.ty,
        span: unary.span,
      },
      LatticeError::Unsupported => DiagnosticMessage::UnsupportedOperator {
        operator: operator.symbol().to_string(),
        span: unary.span,
      },
    })?;

    let compute = if operator == UnaryOperation::Not {
      operand.ty
    } else {
      ty
    };

    Ok(TypedExpr::new(
      TypedExprKind::Unary {
        operator,
        operand: Box::new(operand),
        compute,
      },
      ty,
      unary.span,
    ))
  }

  fn infer_call(
    &mut self,
    call: &ASTCall,
  ) -> Result<TypedExpr, DiagnosticMessage> {
    match call.callee.as_str() {
      "range" => {
        return Err(DiagnosticMessage::UnsupportedConstruct {
          construct: "range() outside of a for loop".to_string(),
          span: call.span,
        })
      },
      "print" => {
        return Err(DiagnosticMessage::UnsupportedConstruct {
          construct: "print() used as a value".to_string(),
          span: call.span,
        })
      },
      _ => {},
    }

    let args = call
      .args
      .iter()
      .map(|arg| self.infer(arg))
      .collect::<Result<Vec<_>, _>>()?;

    let ty = self.resolver.resolve_call(&call.callee, &args, call.span)?;

    Ok(TypedExpr::new(
      TypedExprKind::Call {
        callee: call.callee.clone(),
        args,
      },
      ty,
      call.span,
    ))
  }
}

/// Infers `expr` against `env`, resolving calls through `resolver`.
pub fn infer(
  expr: &ASTExpression,
  env: &Environment,
  resolver: &mut dyn CallResolver,
) -> Result<TypedExpr, DiagnosticMessage> {
  ExpressionInferencer::new(env, resolver).infer(expr)
}

/// Narrowest type of an integer literal: the default integer when it fits in
/// 32 signed bits, then `int64`, then `uint64`.
pub fn integer_literal_type(value: i128) -> Option<Type> {
  if i32::try_from(value).is_ok() {
    Some(Type::Integer)
  } else if i64::try_from(value).is_ok() {
    Some(Type::I64)
  } else if u64::try_from(value).is_ok() {
    Some(Type::U64)
  } else {
    None
  }
}

fn infer_literal(literal: &ASTLiteral) -> Result<TypedExpr, DiagnosticMessage> {
  let (value, ty) = match &literal.value {
    ASTLiteralValue::Integer(value) => {
      let ty = integer_literal_type(*value).ok_or_else(|| DiagnosticMessage::IntegerLiteralOutOfRange {
        value: *value,
        span: literal.span,
      })?;
      (TypedLiteral::Integer(*value), ty)
    },
    ASTLiteralValue::Float(value) => {
      if !value.is_finite() {
        return Err(DiagnosticMessage::NonFiniteFloatLiteral { span: literal.span });
      }
      (TypedLiteral::Float(*value), Type::F64)
    },
    ASTLiteralValue::Str(value) => (TypedLiteral::Str(value.clone()), Type::Str),
    ASTLiteralValue::Bool(value) => (TypedLiteral::Bool(*value), Type::Bool),
  };

  Ok(TypedExpr::new(TypedExprKind::Literal { value }, ty, literal.span))
}

fn fold_negative_literal(
  operand: &ASTExpression,
  span: Span,
) -> Option<Result<TypedExpr, DiagnosticMessage>> {
  let ASTExpression::Literal(literal) = operand else {
    return None;
  };

  let value = match &literal.value {
    ASTLiteralValue::Integer(value) => ASTLiteralValue::Integer(value.checked_neg()?),
    ASTLiteralValue::Float(value) => ASTLiteralValue::Float(-value),
    _ => return None,
  };

  Some(infer_literal(&ASTLiteral::new(value, span)))
}

fn binary_error(
  err: LatticeError,
  operator: BinaryOperation,
  left: Type,
  right: Type,
  span: Span,
) -> DiagnosticMessage {
  match err {
    LatticeError::Mismatch => DiagnosticMessage::InvalidOperandTypes {
      operator,
      left,
      right,
      span,
    },
    LatticeError::Unsupported => DiagnosticMessage::UnsupportedOperator {
      operator: operator.symbol().to_string(),
      span,
    },
  }
}

#[cfg(test)]
mod tests {
  use cinder_ast::expressions::{binary::ASTBinary, unary::ASTUnary};
  use cinder_diagnostics::message::ErrorKind;

  use super::*;
  use crate::scope::ScopeKind;

  struct FixedCalls(Type);

  impl CallResolver for FixedCalls {
    fn resolve_call(
      &mut self,
      _callee: &str,
      _args: &[TypedExpr],
      _span: Span,
    ) -> Result<Type, DiagnosticMessage> {
      Ok(self.0)
    }
  }

  fn at(column: u32) -> Span {
    Span::new(1, column)
  }

  fn env_with(bindings: &[(&str, Type)]) -> Environment {
    let mut env = Environment::new(ScopeKind::Function);
    for (name, ty) in bindings {
      env.declare(name, *ty, at(1)).unwrap();
    }
    env
  }

  fn bin(
    operator: BinaryOperation,
    left: ASTExpression,
    right: ASTExpression,
  ) -> ASTExpression {
    ASTExpression::Binary(ASTBinary::new(operator, left, right, at(3)))
  }

  fn neg(operand: ASTExpression) -> ASTExpression {
    ASTExpression::Unary(ASTUnary::new(UnaryOperation::Neg, operand, at(2)))
  }

  #[test]
  fn literal_magnitudes_pick_the_narrowest_type() {
    assert_eq!(integer_literal_type(7), Some(Type::Integer));
    assert_eq!(integer_literal_type(i32::MIN as i128), Some(Type::Integer));
    assert_eq!(integer_literal_type(3_000_000_000), Some(Type::I64));
    assert_eq!(integer_literal_type(u64::MAX as i128), Some(Type::U64));
    assert_eq!(integer_literal_type(u64::MAX as i128 + 1), None);
    assert_eq!(integer_literal_type(i64::MIN as i128 - 1), None);
  }

  #[test]
  fn names_take_their_bound_type() {
    let env = env_with(&[("a", Type::I8)]);
    let typed = infer(&ASTExpression::name("a", at(1)), &env, &mut FixedCalls(Type::Void)).unwrap();
    assert_eq!(typed.ty, Type::I8);

    let err = infer(&ASTExpression::name("b", at(4)), &env, &mut FixedCalls(Type::Void)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnboundName);
    assert_eq!(err.primary_span(), at(4));
  }

  #[test]
  fn binary_nodes_record_their_computation_type() {
    let env = env_with(&[("x", Type::I8), ("y", Type::I8)]);
    let typed = infer(
      &bin(
        BinaryOperation::Add,
        ASTExpression::name("x", at(1)),
        ASTExpression::name("y", at(5)),
      ),
      &env,
      &mut FixedCalls(Type::Void),
    )
    .unwrap();

    assert_eq!(typed.ty, Type::I16);
    assert!(matches!(typed.kind, TypedExprKind::Binary { compute: Type::I16, .. }));
  }

  #[test]
  fn comparisons_compute_in_the_common_type() {
    let env = env_with(&[("i", Type::Integer), ("d", Type::F64)]);
    let typed = infer(
      &bin(
        BinaryOperation::LessThan,
        ASTExpression::name("i", at(1)),
        ASTExpression::name("d", at(5)),
      ),
      &env,
      &mut FixedCalls(Type::Void),
    )
    .unwrap();

    assert_eq!(typed.ty, Type::Bool);
    assert!(matches!(typed.kind, TypedExprKind::Binary { compute: Type::F64, .. }));
  }

  #[test]
  fn string_arithmetic_reports_both_operand_types() {
    let env = env_with(&[]);
    let err = infer(
      &bin(
        BinaryOperation::Add,
        ASTExpression::string("a", at(1)),
        ASTExpression::integer(1, at(7)),
      ),
      &env,
      &mut FixedCalls(Type::Void),
    )
    .unwrap_err();

    assert_eq!(
      err,
      DiagnosticMessage::InvalidOperandTypes {
        operator: BinaryOperation::Add,
        left: Type::Str,
        right: Type::Integer,
        span: at(3),
      }
    );
  }

  #[test]
  fn modulo_is_unsupported() {
    let env = env_with(&[]);
    let err = infer(
      &bin(
        BinaryOperation::Mod,
        ASTExpression::integer(5, at(1)),
        ASTExpression::integer(2, at(5)),
      ),
      &env,
      &mut FixedCalls(Type::Void),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedConstruct);
  }

  #[test]
  fn negative_literals_fold() {
    let env = env_with(&[]);
    let typed = infer(&neg(ASTExpression::float(3.0, at(3))), &env, &mut FixedCalls(Type::Void)).unwrap();
    assert_eq!(
      typed.kind,
      TypedExprKind::Literal {
        value: TypedLiteral::Float(-3.0)
      }
    );

    let min = infer(
      &neg(ASTExpression::integer(2_147_483_648, at(3))),
      &env,
      &mut FixedCalls(Type::Void),
    )
    .unwrap();
    assert_eq!(min.ty, Type::Integer);
  }

  #[test]
  fn negating_unsigned_names_widens() {
    let env = env_with(&[("u", Type::U8)]);
    let typed = infer(&neg(ASTExpression::name("u", at(3))), &env, &mut FixedCalls(Type::Void)).unwrap();
    assert_eq!(typed.ty, Type::I16);
    assert_eq!(typed.unary_conversion(), Some(Type::I16));
  }

  #[test]
  fn calls_go_through_the_resolver() {
    let env = env_with(&[]);
    let call = ASTExpression::Call(ASTCall::new(
      "fadd1".to_string(),
      vec![ASTExpression::integer(6, at(7)), ASTExpression::float(6.0, at(10))],
      at(1),
    ));

    let typed = infer(&call, &env, &mut FixedCalls(Type::F64)).unwrap();
    assert_eq!(typed.ty, Type::F64);
    assert!(typed.is_call());
  }

  #[test]
  fn range_is_only_valid_as_a_loop_iterable() {
    let env = env_with(&[]);
    let call = ASTExpression::Call(ASTCall::new(
      "range".to_string(),
      vec![ASTExpression::integer(4, at(7))],
      at(1),
    ));
    let err = infer(&call, &env, &mut FixedCalls(Type::Integer)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedConstruct);
  }
}
