//! Promotion rules between primitive types.
//!
//! Everything here is a pure function over the closed [`Type`] set. The
//! analyzer attaches spans and turns a [`LatticeError`] into a diagnostic.

use crate::{
  operation::{BinaryOperation, UnaryOperation},
  types::Type,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatticeError {
  /// The operator is not defined for these operand types.
  Mismatch,
  /// The operator is outside the accepted grammar.
  Unsupported,
}

pub type LatticeResult = Result<Type, LatticeError>;

/// Common computation type of two operands, without operator-specific
/// widening.
pub fn promote(
  a: Type,
  b: Type,
) -> LatticeResult {
  match (a, b) {
    (Type::Float { width: wa }, Type::Float { width: wb }) => Ok(Type::Float { width: wa.max(wb) }),
    (Type::Float { width }, other) | (other, Type::Float { width }) if other.is_integral() => {
      Ok(Type::Float { width })
    },
    (Type::Integer, Type::Integer) => Ok(Type::Integer),
    _ => promote_integers(a, b),
  }
}

fn promote_integers(
  a: Type,
  b: Type,
) -> LatticeResult {
  let ((width_a, signed_a), (width_b, signed_b)) = match (a.integer_parts(), b.integer_parts()) {
    (Some(left), Some(right)) => (left, right),
    _ => return Err(LatticeError::Mismatch),
  };

  // The default integer only turns into a fixed width when the other side is one.
  let defaulted = (a == Type::Integer || b == Type::Integer) && !a.is_fixed_int() && !b.is_fixed_int();
  if defaulted {
    return Ok(Type::Integer);
  }

  let width = width_a.max(width_b);
  let signed = if width_a == width_b {
    signed_a && signed_b
  } else if width_a > width_b {
    signed_a
  } else {
    signed_b
  };

  Ok(Type::Int { width, signed })
}

/// Result type of `a op b`.
pub fn result_of(
  op: BinaryOperation,
  a: Type,
  b: Type,
) -> LatticeResult {
  if !op.is_supported() {
    return Err(LatticeError::Unsupported);
  }

  if op.is_comparison() {
    return comparable(a, b).then_some(Type::Bool).ok_or(LatticeError::Mismatch);
  }

  if op.is_logical() {
    return if a == Type::Bool && b == Type::Bool {
      Ok(Type::Bool)
    } else {
      Err(LatticeError::Mismatch)
    };
  }

  match op {
    BinaryOperation::Add if a == Type::Str && b == Type::Str => Ok(Type::Str),
    BinaryOperation::Div => {
      if a.is_numeric() && b.is_numeric() {
        Ok(Type::F64)
      } else {
        Err(LatticeError::Mismatch)
      }
    },
    _ => {
      if !a.is_numeric() || !b.is_numeric() {
        return Err(LatticeError::Mismatch);
      }

      match promote(a, b)? {
        Type::Int { width, signed } if op.is_widening() => Ok(Type::Int {
          width: width.widened(),
          signed,
        }),
        common => Ok(common),
      }
    },
  }
}

fn comparable(
  a: Type,
  b: Type,
) -> bool {
  match (a, b) {
    (Type::Str, Type::Str) => true,
    _ => a.is_numeric() && b.is_numeric(),
  }
}

/// Computation type (which is also the result type) of a unary operation.
///
/// Negating an unsigned integer moves to the signed type one width up so that
/// negative results stay representable; `uint64` can only go to `int64`.
pub fn unary_result(
  op: UnaryOperation,
  operand: Type,
) -> LatticeResult {
  match op {
    UnaryOperation::BitNot => Err(LatticeError::Unsupported),
    UnaryOperation::Not => {
      if operand.is_numeric() {
        Ok(Type::Bool)
      } else {
        Err(LatticeError::Mismatch)
      }
    },
    UnaryOperation::Neg | UnaryOperation::Plus => match operand {
      Type::Bool => Ok(Type::Integer),
      Type::Int { width, signed: false } if op == UnaryOperation::Neg => Ok(Type::Int {
        width: width.widened(),
        signed: true,
      }),
      Type::Integer | Type::Int { .. } | Type::Float { .. } => Ok(operand),
      _ => Err(LatticeError::Mismatch),
    },
  }
}

/// Whether a value of type `value` may be stored into a binding of type
/// `target` without changing the binding's type.
pub fn assignable(
  target: Type,
  value: Type,
) -> bool {
  target == value || (target.is_fixed_int() && value == Type::Integer)
}

/// Whether an argument may be passed to a parameter. Besides what a binding
/// accepts, only conversions that keep every value of the argument type are
/// allowed: the target language would otherwise truncate silently.
pub fn argument_compatible(
  parameter: Type,
  argument: Type,
) -> bool {
  assignable(parameter, argument) || widens(argument, parameter)
}

fn widens(
  from: Type,
  to: Type,
) -> bool {
  match to {
    Type::Float { width } => match from {
      Type::Float { width: from_width } => from_width <= width,
      // Integers that fit in the significand convert exactly.
      _ => from
        .integer_parts()
        .is_some_and(|(from_width, _)| from_width.bits() <= width.mantissa_bits()),
    },
    Type::Integer | Type::Int { .. } => match (from.integer_parts(), to.integer_parts()) {
      (Some((from_width, from_signed)), Some((to_width, to_signed))) => {
        (from_width == to_width && from_signed == to_signed) || (from_width < to_width && (to_signed || !from_signed))
      },
      _ => false,
    },
    _ => false,
  }
}

/// Non-widening common type of integer range bounds.
pub fn range_bound_type(bounds: &[Type]) -> LatticeResult {
  let mut iter = bounds.iter().copied();
  let first = iter.next().unwrap_or(Type::Integer);

  if !first.is_integral() {
    return Err(LatticeError::Mismatch);
  }

  iter.try_fold(first, |acc, bound| {
    if !bound.is_integral() {
      return Err(LatticeError::Mismatch);
    }
    promote(acc, bound)
  })
  .map(|ty| if ty == Type::Bool { Type::Integer } else { ty })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::{FloatWidth, IntWidth};
  use proptest::prelude::*;
  use BinaryOperation::*;

  const WIDTHS: [IntWidth; 4] = [IntWidth::W8, IntWidth::W16, IntWidth::W32, IntWidth::W64];

  #[test]
  fn widening_add_matches_reference_signatures() {
    assert_eq!(result_of(Add, Type::I8, Type::I8), Ok(Type::I16));
    assert_eq!(result_of(Add, Type::I16, Type::I16), Ok(Type::I32));
    assert_eq!(result_of(Add, Type::I32, Type::I32), Ok(Type::I64));
    assert_eq!(result_of(Add, Type::I64, Type::I64), Ok(Type::I64));
    assert_eq!(result_of(Add, Type::U8, Type::U8), Ok(Type::U16));
    assert_eq!(result_of(Add, Type::U16, Type::U16), Ok(Type::U32));
    assert_eq!(result_of(Add, Type::U32, Type::U32), Ok(Type::U64));
    assert_eq!(result_of(Add, Type::U64, Type::U64), Ok(Type::U64));
    assert_eq!(result_of(Add, Type::I8, Type::U16), Ok(Type::U32));
    assert_eq!(result_of(Add, Type::U32, Type::U16), Ok(Type::U64));
    assert_eq!(result_of(Mul, Type::I8, Type::I8), Ok(Type::I16));
  }

  #[test]
  fn subtraction_does_not_widen() {
    assert_eq!(result_of(Sub, Type::I8, Type::I8), Ok(Type::I8));
    assert_eq!(result_of(Sub, Type::U32, Type::U16), Ok(Type::U32));
  }

  #[test]
  fn subtraction_table_follows_width_and_signedness() {
    for (i, &wa) in WIDTHS.iter().enumerate() {
      for (j, &wb) in WIDTHS.iter().enumerate() {
        for sa in [true, false] {
          for sb in [true, false] {
            let got = result_of(Sub, Type::int(wa, sa), Type::int(wb, sb)).unwrap();
            let expected_signed = if i == j {
              sa && sb
            } else if i > j {
              sa
            } else {
              sb
            };
            assert_eq!(got, Type::int(wa.max(wb), expected_signed), "{:?}{} - {:?}{}", wa, sa, wb, sb);
          }
        }
      }
    }
  }

  #[test]
  fn default_integer_stays_default() {
    assert_eq!(result_of(Add, Type::Integer, Type::Integer), Ok(Type::Integer));
    assert_eq!(result_of(Mul, Type::Integer, Type::Bool), Ok(Type::Integer));
    assert_eq!(result_of(Sub, Type::Integer, Type::I8), Ok(Type::I32));
    assert_eq!(result_of(Add, Type::Integer, Type::I8), Ok(Type::I64));
  }

  #[test]
  fn bool_counts_as_unsigned_byte() {
    assert_eq!(promote(Type::Bool, Type::Bool), Ok(Type::U8));
    assert_eq!(result_of(Add, Type::Bool, Type::Bool), Ok(Type::U16));
    assert_eq!(result_of(Sub, Type::Bool, Type::I16), Ok(Type::I16));
  }

  #[test]
  fn floats_absorb_integers() {
    assert_eq!(result_of(Add, Type::I8, Type::F64), Ok(Type::F64));
    assert_eq!(result_of(Mul, Type::F32, Type::U64), Ok(Type::F32));
    assert_eq!(result_of(Sub, Type::F32, Type::F64), Ok(Type::F64));
    assert_eq!(result_of(Add, Type::Integer, Type::F64), Ok(Type::F64));
  }

  #[test]
  fn division_is_always_float64() {
    let numeric = [Type::Bool, Type::Integer, Type::I8, Type::U64, Type::F32, Type::F64];
    for a in numeric {
      for b in numeric {
        assert_eq!(result_of(Div, a, b), Ok(Type::F64));
      }
    }
  }

  #[test]
  fn string_arithmetic_is_a_mismatch() {
    assert_eq!(result_of(Add, Type::Str, Type::Integer), Err(LatticeError::Mismatch));
    assert_eq!(result_of(Mul, Type::Str, Type::Integer), Err(LatticeError::Mismatch));
    assert_eq!(result_of(Add, Type::Str, Type::Str), Ok(Type::Str));
    assert_eq!(result_of(Equal, Type::Str, Type::Str), Ok(Type::Bool));
    assert_eq!(result_of(Equal, Type::Str, Type::F64), Err(LatticeError::Mismatch));
  }

  #[test]
  fn comparisons_and_logic_yield_bool() {
    assert_eq!(result_of(LessThan, Type::I8, Type::F64), Ok(Type::Bool));
    assert_eq!(result_of(Equal, Type::Bool, Type::Bool), Ok(Type::Bool));
    assert_eq!(result_of(And, Type::Bool, Type::Bool), Ok(Type::Bool));
    assert_eq!(result_of(Or, Type::Integer, Type::Bool), Err(LatticeError::Mismatch));
  }

  #[test]
  fn operators_outside_the_grammar_are_unsupported() {
    assert_eq!(result_of(Mod, Type::Integer, Type::Integer), Err(LatticeError::Unsupported));
    assert_eq!(result_of(Pow, Type::Integer, Type::Integer), Err(LatticeError::Unsupported));
    assert_eq!(
      unary_result(UnaryOperation::BitNot, Type::Integer),
      Err(LatticeError::Unsupported)
    );
  }

  #[test]
  fn negating_unsigned_moves_to_wider_signed() {
    assert_eq!(unary_result(UnaryOperation::Neg, Type::U8), Ok(Type::I16));
    assert_eq!(unary_result(UnaryOperation::Neg, Type::U64), Ok(Type::I64));
    assert_eq!(unary_result(UnaryOperation::Neg, Type::I8), Ok(Type::I8));
    assert_eq!(unary_result(UnaryOperation::Neg, Type::Bool), Ok(Type::Integer));
    assert_eq!(unary_result(UnaryOperation::Neg, Type::Str), Err(LatticeError::Mismatch));
    assert_eq!(unary_result(UnaryOperation::Not, Type::Integer), Ok(Type::Bool));
  }

  #[test]
  fn default_integer_is_assignable_to_fixed_widths() {
    assert!(assignable(Type::I8, Type::Integer));
    assert!(assignable(Type::F64, Type::F64));
    assert!(!assignable(Type::Integer, Type::F64));
    assert!(!assignable(Type::I8, Type::I16));
    assert!(argument_compatible(Type::I8, Type::Integer));
    assert!(argument_compatible(Type::F64, Type::I8));
    assert!(!argument_compatible(Type::Str, Type::Integer));
  }

  #[test]
  fn arguments_only_widen() {
    assert!(argument_compatible(Type::Integer, Type::I16));
    assert!(argument_compatible(Type::Integer, Type::Bool));
    assert!(argument_compatible(Type::I64, Type::U32));
    assert!(argument_compatible(Type::F64, Type::Integer));
    assert!(argument_compatible(Type::F64, Type::F32));

    assert!(!argument_compatible(Type::Integer, Type::F64));
    assert!(!argument_compatible(Type::I8, Type::F32));
    assert!(!argument_compatible(Type::I16, Type::I32));
    assert!(!argument_compatible(Type::U32, Type::I8));
    assert!(!argument_compatible(Type::I32, Type::U32));
    assert!(!argument_compatible(Type::F32, Type::F64));
    assert!(!argument_compatible(Type::F64, Type::I64));
    assert!(!argument_compatible(Type::Bool, Type::Integer));
  }

  #[test]
  fn range_bounds_share_the_narrowest_common_type() {
    assert_eq!(range_bound_type(&[Type::Integer]), Ok(Type::Integer));
    assert_eq!(range_bound_type(&[Type::Integer, Type::I64]), Ok(Type::I64));
    assert_eq!(range_bound_type(&[Type::Bool]), Ok(Type::Integer));
    assert_eq!(range_bound_type(&[Type::F64]), Err(LatticeError::Mismatch));
  }

  fn any_type() -> impl Strategy<Value = Type> {
    prop_oneof![
      Just(Type::Bool),
      Just(Type::Integer),
      Just(Type::Str),
      Just(Type::Float { width: FloatWidth::W32 }),
      Just(Type::Float { width: FloatWidth::W64 }),
      (0..4usize, any::<bool>()).prop_map(|(idx, signed)| Type::int(WIDTHS[idx], signed)),
    ]
  }

  fn any_supported_operator() -> impl Strategy<Value = BinaryOperation> {
    prop_oneof![
      Just(Add),
      Just(Sub),
      Just(Mul),
      Just(Div),
      Just(Equal),
      Just(LessThan),
      Just(And),
    ]
  }

  proptest! {
    #[test]
    fn promotion_is_symmetric(a in any_type(), b in any_type()) {
      prop_assert_eq!(promote(a, b), promote(b, a));
    }

    #[test]
    fn results_are_symmetric_and_stable(op in any_supported_operator(), a in any_type(), b in any_type()) {
      let first = result_of(op, a, b);
      prop_assert_eq!(first, result_of(op, b, a));
      prop_assert_eq!(first, result_of(op, a, b));
    }

    #[test]
    fn fixed_integer_results_never_narrow(a in any_type(), b in any_type()) {
      if let (Ok(Type::Int { width, .. }), Some((wa, _)), Some((wb, _))) =
        (result_of(Add, a, b), a.integer_parts(), b.integer_parts())
      {
        prop_assert!(width >= wa.max(wb));
      }
    }
  }
}
