//! Name resolution and type inference for the restricted source subset.

pub mod functions;
pub mod infer;
pub mod scope;
pub mod typed;

pub use functions::{FunctionSignature, FunctionState, FunctionTable, ENTRY_POINT};
pub use infer::{infer, integer_literal_type, CallResolver, ExpressionInferencer};
pub use scope::{Declaration, Environment, ScopeKind, Symbol};
pub use typed::{TypedExpr, TypedExprKind, TypedLiteral};
