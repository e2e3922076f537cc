pub mod lattice;
pub mod operation;
pub mod span;
pub mod types;

pub use lattice::{argument_compatible, assignable, promote, range_bound_type, result_of, unary_result, LatticeError};
pub use operation::{BinaryOperation, UnaryOperation};
pub use span::Span;
pub use types::{FloatWidth, IntWidth, Type};
