use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IntWidth {
  W8,
  W16,
  W32,
  W64,
}

impl IntWidth {
  pub fn bits(&self) -> u32 {
    match self {
      IntWidth::W8 => 8,
      IntWidth::W16 => 16,
      IntWidth::W32 => 32,
      IntWidth::W64 => 64,
    }
  }

  pub fn from_bits(bits: u32) -> Option<Self> {
    match bits {
      8 => Some(IntWidth::W8),
      16 => Some(IntWidth::W16),
      32 => Some(IntWidth::W32),
      64 => Some(IntWidth::W64),
      _ => None,
    }
  }

  /// Next width up, capped at 64 bits.
  pub fn widened(&self) -> Self {
    match self {
      IntWidth::W8 => IntWidth::W16,
      IntWidth::W16 => IntWidth::W32,
      IntWidth::W32 | IntWidth::W64 => IntWidth::W64,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FloatWidth {
  W32,
  W64,
}

impl FloatWidth {
  pub fn bits(&self) -> u32 {
    match self {
      FloatWidth::W32 => 32,
      FloatWidth::W64 => 64,
    }
  }

  /// Significand precision, including the implicit bit.
  pub fn mantissa_bits(&self) -> u32 {
    match self {
      FloatWidth::W32 => 24,
      FloatWidth::W64 => 53,
    }
  }
}

/// Static type of a lowered value.
///
/// `Integer` is the source language's default integer: it behaves as a signed
/// 32-bit integer, but unlike `Int { W32, signed }` it is not a fixed-width
/// annotation, so `Integer + Integer` stays `Integer` instead of widening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
  Bool,
  Integer,
  Int { width: IntWidth, signed: bool },
  Float { width: FloatWidth },
  Str,
  Void,
}

impl Type {
  pub const I8: Type = Type::Int {
    width: IntWidth::W8,
    signed: true,
  };
  pub const I16: Type = Type::Int {
    width: IntWidth::W16,
    signed: true,
  };
  pub const I32: Type = Type::Int {
    width: IntWidth::W32,
    signed: true,
  };
  pub const I64: Type = Type::Int {
    width: IntWidth::W64,
    signed: true,
  };
  pub const U8: Type = Type::Int {
    width: IntWidth::W8,
    signed: false,
  };
  pub const U16: Type = Type::Int {
    width: IntWidth::W16,
    signed: false,
  };
  pub const U32: Type = Type::Int {
    width: IntWidth::W32,
    signed: false,
  };
  pub const U64: Type = Type::Int {
    width: IntWidth::W64,
    signed: false,
  };
  pub const F32: Type = Type::Float { width: FloatWidth::W32 };
  pub const F64: Type = Type::Float { width: FloatWidth::W64 };

  pub fn int(
    width: IntWidth,
    signed: bool,
  ) -> Self {
    Type::Int { width, signed }
  }

  /// Bool, the default integer and fixed-width integers.
  pub fn is_integral(&self) -> bool {
    matches!(self, Type::Bool | Type::Integer | Type::Int { .. })
  }

  pub fn is_float(&self) -> bool {
    matches!(self, Type::Float { .. })
  }

  /// Anything arithmetic accepts as an operand.
  pub fn is_numeric(&self) -> bool {
    self.is_integral() || self.is_float()
  }

  pub fn is_fixed_int(&self) -> bool {
    matches!(self, Type::Int { .. })
  }

  pub fn is_unsigned(&self) -> bool {
    matches!(self, Type::Int { signed: false, .. } | Type::Bool)
  }

  /// Width and signedness used for integer promotion. `Bool` counts as an
  /// unsigned 8-bit integer and `Integer` as a signed 32-bit one.
  pub fn integer_parts(&self) -> Option<(IntWidth, bool)> {
    match self {
      Type::Bool => Some((IntWidth::W8, false)),
      Type::Integer => Some((IntWidth::W32, true)),
      Type::Int { width, signed } => Some((*width, *signed)),
      _ => None,
    }
  }

  /// Maps a source-level annotation name to a type.
  ///
  /// Accepts the builtin names (`int`, `float`, `bool`, `str`), the ctypes
  /// spellings (`c_int8`, `c_uint64`, ...) and the short ones (`i8`, `u64`,
  /// `f32`, ...).
  pub fn from_annotation(name: &str) -> Option<Self> {
    let name = name.trim();
    let name = name.strip_prefix("c_").unwrap_or(name);

    let ty = match name {
      "bool" => Type::Bool,
      "int" => Type::Integer,
      "float" | "double" | "float64" | "f64" => Type::F64,
      "float32" | "f32" => Type::F32,
      "str" => Type::Str,
      "None" => Type::Void,
      "int8" | "i8" => Type::I8,
      "int16" | "i16" => Type::I16,
      "int32" | "i32" => Type::I32,
      "int64" | "i64" => Type::I64,
      "uint8" | "u8" => Type::U8,
      "uint16" | "u16" => Type::U16,
      "uint32" | "u32" => Type::U32,
      "uint64" | "u64" => Type::U64,
      _ => return None,
    };

    Some(ty)
  }
}

impl Display for Type {
  fn fmt(
    &self,
    f: &mut std::fmt::Formatter<'_>,
  ) -> std::fmt::Result {
    match self {
      Type::Bool => write!(f, "bool"),
      Type::Integer => write!(f, "int"),
      Type::Int { width, signed: true } => write!(f, "int{}", width.bits()),
      Type::Int { width, signed: false } => write!(f, "uint{}", width.bits()),
      Type::Float { width } => write!(f, "float{}", width.bits()),
      Type::Str => write!(f, "str"),
      Type::Void => write!(f, "None"),
    }
  }
}
