#![allow(dead_code)]

use cinder_ast::{
  expressions::{binary::ASTBinary, call::ASTCall, unary::ASTUnary, ASTExpression},
  statements::{
    assert_statement::ASTAssert,
    assignment::{ASTAssign, ASTAugAssign},
    for_statement::ASTFor,
    function::{ASTFunction, ASTParameter},
    if_statement::ASTIf,
    print_statement::ASTPrint,
    return_statement::ASTReturn,
    while_statement::ASTWhile,
    ASTStatement,
  },
  ASTModule,
};
use cinder_codegen_cpp::{lower_module, transpile, LoweredModule};
use cinder_config::CinderConfig;
use cinder_diagnostics::message::DiagnosticMessage;
use cinder_type::{
  operation::{BinaryOperation, UnaryOperation},
  span::Span,
};

pub fn at() -> Span {
  Span::new(1, 1)
}

/// Lower and emit a module, panicking on diagnostics.
pub fn compile_to_cpp(body: Vec<ASTStatement>) -> String {
  let module = ASTModule::new(body);
  let config = CinderConfig::default();
  match transpile(&module, &config) {
    Ok(output) => output,
    Err(err) => panic!("Lowering failed: {} ({})", err, err.code()),
  }
}

pub fn lower(body: Vec<ASTStatement>) -> LoweredModule {
  let module = ASTModule::new(body);
  let config = CinderConfig::default();
  lower_module(&module, &config).expect("Lowering failed")
}

/// Lower a module that must fail and return the first diagnostic.
pub fn lower_err(body: Vec<ASTStatement>) -> DiagnosticMessage {
  let module = ASTModule::new(body);
  let config = CinderConfig::default();
  match lower_module(&module, &config) {
    Ok(_) => panic!("Expected lowering to fail"),
    Err(err) => err,
  }
}

pub fn assert_code(
  body: Vec<ASTStatement>,
  code: &str,
) {
  let err = lower_err(body);
  assert_eq!(err.code(), code, "unexpected diagnostic: {}", err);
}

// Expressions

pub fn int(value: i128) -> ASTExpression {
  ASTExpression::integer(value, at())
}

pub fn float(value: f64) -> ASTExpression {
  ASTExpression::float(value, at())
}

pub fn string(value: &str) -> ASTExpression {
  ASTExpression::string(value, at())
}

pub fn boolean(value: bool) -> ASTExpression {
  ASTExpression::boolean(value, at())
}

pub fn name(id: &str) -> ASTExpression {
  ASTExpression::name(id, at())
}

pub fn bin(
  operator: BinaryOperation,
  left: ASTExpression,
  right: ASTExpression,
) -> ASTExpression {
  ASTExpression::Binary(ASTBinary::new(operator, left, right, at()))
}

pub fn not(operand: ASTExpression) -> ASTExpression {
  ASTExpression::Unary(ASTUnary::new(UnaryOperation::Not, operand, at()))
}

pub fn neg(operand: ASTExpression) -> ASTExpression {
  ASTExpression::Unary(ASTUnary::new(UnaryOperation::Neg, operand, at()))
}

pub fn call(
  callee: &str,
  args: Vec<ASTExpression>,
) -> ASTExpression {
  ASTExpression::Call(ASTCall::new(callee.to_string(), args, at()))
}

// Statements

pub fn assign(
  target: &str,
  value: ASTExpression,
) -> ASTStatement {
  ASTStatement::Assign(ASTAssign::new(target.to_string(), value, at()))
}

pub fn aug(
  target: &str,
  operator: BinaryOperation,
  value: ASTExpression,
) -> ASTStatement {
  ASTStatement::AugAssign(ASTAugAssign::new(target.to_string(), operator, value, at()))
}

pub fn expr(value: ASTExpression) -> ASTStatement {
  ASTStatement::expression(value, at())
}

pub fn call_stmt(
  callee: &str,
  args: Vec<ASTExpression>,
) -> ASTStatement {
  expr(call(callee, args))
}

pub fn print(args: Vec<ASTExpression>) -> ASTStatement {
  ASTStatement::Print(ASTPrint::new(args, at()))
}

pub fn if_(
  test: ASTExpression,
  body: Vec<ASTStatement>,
  orelse: Vec<ASTStatement>,
) -> ASTStatement {
  ASTStatement::If(ASTIf::new(test, body, orelse, at()))
}

pub fn while_(
  test: ASTExpression,
  body: Vec<ASTStatement>,
  orelse: Vec<ASTStatement>,
) -> ASTStatement {
  ASTStatement::While(ASTWhile::new(test, body, orelse, at()))
}

pub fn for_range(
  target: &str,
  bounds: Vec<ASTExpression>,
  body: Vec<ASTStatement>,
  orelse: Vec<ASTStatement>,
) -> ASTStatement {
  ASTStatement::For(ASTFor::new(target.to_string(), call("range", bounds), body, orelse, at()))
}

pub fn brk() -> ASTStatement {
  ASTStatement::break_at(at())
}

pub fn cont() -> ASTStatement {
  ASTStatement::continue_at(at())
}

pub fn pass() -> ASTStatement {
  ASTStatement::pass_at(at())
}

pub fn ret(value: ASTExpression) -> ASTStatement {
  ASTStatement::Return(ASTReturn::new(Some(value), at()))
}

pub fn assert_(test: ASTExpression) -> ASTStatement {
  ASTStatement::Assert(ASTAssert::new(test, None, at()))
}

pub fn assert_msg(
  test: ASTExpression,
  msg: &str,
) -> ASTStatement {
  ASTStatement::Assert(ASTAssert::new(test, Some(string(msg)), at()))
}

/// `def name(params) -> returns:` where each param is `(name, annotation)`.
pub fn def(
  name: &str,
  params: &[(&str, Option<&str>)],
  returns: Option<&str>,
  body: Vec<ASTStatement>,
) -> ASTStatement {
  let params = params
    .iter()
    .map(|(param, annotation)| ASTParameter::new(param.to_string(), annotation.map(str::to_string), at()))
    .collect();

  ASTStatement::Function(ASTFunction::new(
    name.to_string(),
    params,
    returns.map(str::to_string),
    body,
    at(),
  ))
}

/// `if __name__ == "__main__":`
pub fn main_guard(body: Vec<ASTStatement>) -> ASTStatement {
  if_(bin(BinaryOperation::Equal, name("__name__"), string("__main__")), body, vec![])
}
