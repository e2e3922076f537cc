use std::collections::BTreeSet;

use cinder_analyzer::{
  functions::{FunctionSignature, FunctionState, FunctionTable},
  infer::{CallResolver, ExpressionInferencer},
  scope::{Environment, ScopeKind, Symbol},
  typed::TypedExpr,
};
use cinder_ast::{
  expressions::{literal::ASTLiteralValue, ASTExpression},
  statements::{
    assert_statement::ASTAssert,
    assignment::{ASTAssign, ASTAugAssign},
    for_statement::ASTFor,
    function::ASTFunction,
    if_statement::ASTIf,
    return_statement::ASTReturn,
    while_statement::ASTWhile,
    ASTStatement,
  },
  ASTModule,
};
use cinder_config::{CinderConfig, DebugTrace};
use cinder_diagnostics::message::DiagnosticMessage;
use cinder_log::{log_trc, trace_dbg};
use cinder_type::{
  lattice::{argument_compatible, assignable, range_bound_type, result_of, LatticeError},
  operation::BinaryOperation,
  span::Span,
  types::Type,
};
use serde::Serialize;

use crate::{
  buffer::EmissionBuffer,
  format::{cpp_type, expression, identifier, quoted},
};

/// Library headers the lowered code depends on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HeaderSet {
  pub assert: bool,
  pub iostream: bool,
  pub range: bool,
  pub cstdint: bool,
}

impl HeaderSet {
  pub fn note_type(
    &mut self,
    ty: Type,
  ) {
    if ty.is_fixed_int() {
      self.cstdint = true;
    }
  }

  pub fn note_expression(
    &mut self,
    expr: &TypedExpr,
  ) {
    expr.walk(&mut |node| {
      self.note_type(node.ty);
      if let Some(ty) = node.operand_conversion().or(node.unary_conversion()) {
        self.note_type(ty);
      }
    });
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoweredFunction {
  pub signature: FunctionSignature,
  /// Position among the module's function definitions.
  pub order: usize,
  /// Body lines, already indented one level.
  pub body: Vec<String>,
  /// Every expression inferred while lowering the body, in source order.
  pub typed: Vec<TypedExpr>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LoweredMain {
  pub body: Vec<String>,
  pub typed: Vec<TypedExpr>,
}

/// Result of lowering one module, ready for [`crate::emit::CppEmitter`].
#[derive(Debug, Clone, Serialize)]
pub struct LoweredModule {
  /// Lowered functions in definition order.
  pub functions: Vec<LoweredFunction>,
  /// Functions called before their definition.
  pub forward_declarations: Vec<FunctionSignature>,
  pub main: LoweredMain,
  /// Bindings of the entry point's top-level frame.
  pub symbols: Vec<Symbol>,
  pub headers: HeaderSet,
}

impl LoweredModule {
  pub fn signature(
    &self,
    name: &str,
  ) -> Option<&FunctionSignature> {
    self
      .functions
      .iter()
      .map(|function| &function.signature)
      .find(|signature| signature.name == name)
  }

  pub fn symbol(
    &self,
    name: &str,
  ) -> Option<&Symbol> {
    self.symbols.iter().find(|symbol| symbol.name == name)
  }
}

/// Lowers a whole module: every reachable function plus the entry point.
pub struct ModuleLowerer<'a> {
  config: &'a CinderConfig,
  functions: FunctionTable<'a>,
  lowered: Vec<Option<LoweredFunction>>,
  forward: BTreeSet<usize>,
  headers: HeaderSet,
  /// Definition order of the functions being lowered; `None` is the entry point.
  callers: Vec<Option<usize>>,
}

impl<'a> ModuleLowerer<'a> {
  pub fn new(
    module: &'a ASTModule,
    config: &'a CinderConfig,
  ) -> Result<Self, DiagnosticMessage> {
    let functions = FunctionTable::collect(module)?;
    let lowered = vec![None; functions.entries().len()];

    Ok(Self {
      config,
      functions,
      lowered,
      forward: BTreeSet::new(),
      headers: HeaderSet::default(),
      callers: Vec::new(),
    })
  }

  pub fn lower(
    mut self,
    module: &'a ASTModule,
  ) -> Result<LoweredModule, DiagnosticMessage> {
    // Signatures that do not depend on a call site are lowered up front.
    for idx in 0..self.functions.entries().len() {
      let entry = &self.functions.entries()[idx];
      if entry.state == FunctionState::Pending && entry.definition.is_fully_annotated() {
        let definition = entry.definition;
        let params = annotated_params(definition)?;
        self.functions.begin(&definition.name, definition.span)?;
        self.lower_function(definition, params)?;
      }
    }

    let statements = entry_statements(module)?;
    self.callers.push(None);
    let lowerer = FunctionLowerer::for_entry(&mut self);
    let (main, symbols) = lowerer.lower_entry(statements)?;
    self.callers.pop();

    if let Some(entry) = self.functions.first_pending() {
      return Err(DiagnosticMessage::UninferableParameters {
        function: entry.definition.name.clone(),
        span: entry.definition.span,
      });
    }

    let forward_declarations = self
      .forward
      .iter()
      .filter_map(|&idx| self.lowered[idx].as_ref().map(|f| f.signature.clone()))
      .collect();

    Ok(LoweredModule {
      functions: self.lowered.into_iter().flatten().collect(),
      forward_declarations,
      main,
      symbols,
      headers: self.headers,
    })
  }

  fn lower_function(
    &mut self,
    definition: &'a ASTFunction,
    params: Vec<(String, Type)>,
  ) -> Result<(), DiagnosticMessage> {
    let order = self.functions.get(&definition.name).map(|entry| entry.order).unwrap_or(0);
    trace_dbg!(
      self.config,
      DebugTrace::Lowering,
      "lowering {}({})",
      definition.name,
      params
        .iter()
        .map(|(name, ty)| format!("{}: {}", name, ty))
        .collect::<Vec<_>>()
        .join(", ")
    );

    self.callers.push(Some(order));
    let result =
      FunctionLowerer::for_function(self, definition, params).and_then(|lowerer| lowerer.lower_function(definition));
    self.callers.pop();

    let (signature, body, typed) = result?;
    trace_dbg!(
      self.config,
      DebugTrace::Lowering,
      "resolved {} -> {}",
      signature.name,
      signature.returns
    );

    self.headers.note_type(signature.returns);
    for ty in signature.param_types() {
      self.headers.note_type(ty);
    }

    self.functions.finish(signature.clone());
    self.lowered[order] = Some(LoweredFunction {
      signature,
      order,
      body,
      typed,
    });

    Ok(())
  }
}

impl<'a> CallResolver for ModuleLowerer<'a> {
  fn resolve_call(
    &mut self,
    callee: &str,
    args: &[TypedExpr],
    span: Span,
  ) -> Result<Type, DiagnosticMessage> {
    let Some(entry) = self.functions.get(callee) else {
      return Err(DiagnosticMessage::UnknownFunction {
        name: callee.to_string(),
        span,
      });
    };

    let order = entry.order;
    let definition = entry.definition;

    if let Some(Some(caller)) = self.callers.last() {
      if order > *caller {
        self.forward.insert(order);
      }
    }

    for arg in args {
      require_value(arg)?;
    }

    if let Some(signature) = self.functions.signature(callee) {
      check_arguments(callee, &signature.params, args, span)?;
      return Ok(signature.returns);
    }

    if definition.params.len() != args.len() {
      return Err(DiagnosticMessage::ArgumentCountMismatch {
        function: callee.to_string(),
        expected: definition.params.len(),
        got: args.len(),
        span,
      });
    }

    let mut params = Vec::with_capacity(args.len());
    for (param, arg) in definition.params.iter().zip(args) {
      let ty = match &param.annotation {
        Some(annotation) => annotation_type(annotation, param.span)?,
        None => arg.ty,
      };
      params.push((param.name.clone(), ty));
    }
    check_arguments(callee, &params, args, span)?;

    self.functions.begin(callee, span)?;
    log_trc!(self.config, "first call of {} fixes its parameters", callee);
    self.lower_function(definition, params)?;

    Ok(self.functions.signature(callee).map(|sig| sig.returns).unwrap_or(Type::Void))
  }
}

fn check_arguments(
  function: &str,
  params: &[(String, Type)],
  args: &[TypedExpr],
  span: Span,
) -> Result<(), DiagnosticMessage> {
  if params.len() != args.len() {
    return Err(DiagnosticMessage::ArgumentCountMismatch {
      function: function.to_string(),
      expected: params.len(),
      got: args.len(),
      span,
    });
  }

  for ((name, expected), arg) in params.iter().zip(args) {
    if !argument_compatible(*expected, arg.ty) {
      return Err(DiagnosticMessage::ArgumentTypeMismatch {
        function: function.to_string(),
        parameter: name.clone(),
        expected: *expected,
        got: arg.ty,
        span: arg.span,
      });
    }
  }

  Ok(())
}

/// Top-level statements that make up the entry point, with the body of an
/// `if __name__ == "__main__":` guard inlined.
fn entry_statements(module: &ASTModule) -> Result<Vec<&ASTStatement>, DiagnosticMessage> {
  let mut statements = Vec::new();

  for statement in &module.body {
    match statement {
      ASTStatement::Function(_) => {},
      ASTStatement::If(guard) if guard.is_main_guard() => {
        if !guard.orelse.is_empty() {
          return Err(DiagnosticMessage::UnsupportedConstruct {
            construct: "'else' branch on the __main__ guard".to_string(),
            span: guard.span,
          });
        }
        statements.extend(guard.body.iter());
      },
      other => statements.push(other),
    }
  }

  Ok(statements)
}

fn annotation_type(
  annotation: &str,
  span: Span,
) -> Result<Type, DiagnosticMessage> {
  Type::from_annotation(annotation).ok_or_else(|| DiagnosticMessage::UnknownAnnotation {
    annotation: annotation.to_string(),
    span,
  })
}

fn annotated_params(definition: &ASTFunction) -> Result<Vec<(String, Type)>, DiagnosticMessage> {
  definition
    .params
    .iter()
    .map(|param| {
      let annotation = param.annotation.as_deref().unwrap_or_default();
      Ok((param.name.clone(), annotation_type(annotation, param.span)?))
    })
    .collect()
}

/// Values of type `None` only make sense as call statements.
fn require_value(expr: &TypedExpr) -> Result<(), DiagnosticMessage> {
  if expr.ty == Type::Void {
    return Err(DiagnosticMessage::UnsupportedConstruct {
      construct: "using the result of a function that returns None".to_string(),
      span: expr.span,
    });
  }
  Ok(())
}

fn lattice_error(
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
      operator: format!("{}=", operator.symbol()),
      span,
    },
  }
}

/// Whether `body` contains a `break` that leaves this loop rather than a
/// nested one.
fn breaks_out(body: &[ASTStatement]) -> bool {
  body.iter().any(|statement| match statement {
    ASTStatement::Break(_) => true,
    ASTStatement::If(stmt) => breaks_out(&stmt.body) || breaks_out(&stmt.orelse),
    _ => false,
  })
}

struct FunctionContext {
  name: String,
  params: Vec<(String, Type)>,
  declared_return: Option<Type>,
  inferred_return: Option<Type>,
}

struct LoopContext {
  /// Completion flag set before each `break` when the loop has an `else`.
  broken_flag: Option<String>,
}

/// Lowers the statements of one function, or of the entry point.
struct FunctionLowerer<'m, 'a> {
  module: &'m mut ModuleLowerer<'a>,
  env: Environment,
  buffer: EmissionBuffer,
  loops: Vec<LoopContext>,
  loop_flags: usize,
  function: Option<FunctionContext>,
  typed: Vec<TypedExpr>,
}

impl<'m, 'a> FunctionLowerer<'m, 'a> {
  fn for_entry(module: &'m mut ModuleLowerer<'a>) -> Self {
    let indent_width = module.config.project.emit.indent_width;
    Self {
      module,
      env: Environment::new(ScopeKind::Module),
      buffer: EmissionBuffer::with_depth(indent_width, 1),
      loops: Vec::new(),
      loop_flags: 0,
      function: None,
      typed: Vec::new(),
    }
  }

  fn for_function(
    module: &'m mut ModuleLowerer<'a>,
    definition: &ASTFunction,
    params: Vec<(String, Type)>,
  ) -> Result<Self, DiagnosticMessage> {
    let declared_return = match &definition.returns {
      Some(annotation) => Some(annotation_type(annotation, definition.span)?),
      None => None,
    };

    let mut env = Environment::new(ScopeKind::Function);
    for ((name, ty), param) in params.iter().zip(&definition.params) {
      env.declare(name, *ty, param.span)?;
    }

    let indent_width = module.config.project.emit.indent_width;
    Ok(Self {
      module,
      env,
      buffer: EmissionBuffer::with_depth(indent_width, 1),
      loops: Vec::new(),
      loop_flags: 0,
      function: Some(FunctionContext {
        name: definition.name.clone(),
        params,
        declared_return,
        inferred_return: None,
      }),
      typed: Vec::new(),
    })
  }

  fn lower_function(
    mut self,
    definition: &ASTFunction,
  ) -> Result<(FunctionSignature, Vec<String>, Vec<TypedExpr>), DiagnosticMessage> {
    self.lower_block(&definition.body)?;

    let Some(context) = self.function else {
      return Err(DiagnosticMessage::ReturnOutsideFunction { span: definition.span });
    };

    let signature = FunctionSignature {
      name: context.name,
      params: context.params,
      returns: context.declared_return.or(context.inferred_return).unwrap_or(Type::Void),
    };

    Ok((signature, self.buffer.into_lines(), self.typed))
  }

  fn lower_entry<'s>(
    mut self,
    statements: impl IntoIterator<Item = &'s ASTStatement>,
  ) -> Result<(LoweredMain, Vec<Symbol>), DiagnosticMessage> {
    self.lower_block(statements)?;

    let symbols = self.env.root_symbols().into_iter().cloned().collect();
    let main = LoweredMain {
      body: self.buffer.into_lines(),
      typed: self.typed,
    };

    Ok((main, symbols))
  }

  fn infer(
    &mut self,
    expr: &ASTExpression,
  ) -> Result<TypedExpr, DiagnosticMessage> {
    let typed = ExpressionInferencer::new(&self.env, &mut *self.module).infer(expr)?;
    self.module.headers.note_expression(&typed);
    self.typed.push(typed.clone());
    Ok(typed)
  }

  /// Infers a value that is stored, passed or printed.
  fn infer_value(
    &mut self,
    expr: &ASTExpression,
  ) -> Result<TypedExpr, DiagnosticMessage> {
    let typed = self.infer(expr)?;
    require_value(&typed)?;
    Ok(typed)
  }

  fn condition(
    &mut self,
    test: &ASTExpression,
    construct: &'static str,
  ) -> Result<String, DiagnosticMessage> {
    let typed = self.infer(test)?;
    if typed.ty != Type::Bool {
      return Err(DiagnosticMessage::NonBooleanCondition {
        construct,
        found: typed.ty,
        span: typed.span,
      });
    }
    Ok(expression(&typed))
  }

  fn lower_block<'s>(
    &mut self,
    statements: impl IntoIterator<Item = &'s ASTStatement>,
  ) -> Result<(), DiagnosticMessage> {
    for statement in statements {
      self.lower_statement(statement)?;
    }
    Ok(())
  }

  /// Lowers `statements` inside a new frame and one indentation level deeper.
  fn lower_scoped(
    &mut self,
    statements: &[ASTStatement],
    kind: ScopeKind,
  ) -> Result<(), DiagnosticMessage> {
    self.env.push_scope(kind);
    self.buffer.indent();
    self.lower_block(statements)?;
    self.buffer.dedent();
    self.env.pop_scope();
    Ok(())
  }

  fn lower_statement(
    &mut self,
    statement: &ASTStatement,
  ) -> Result<(), DiagnosticMessage> {
    match statement {
      ASTStatement::Assign(assign) => self.lower_assign(assign),
      ASTStatement::AugAssign(assign) => self.lower_aug_assign(assign),
      ASTStatement::Expression(stmt) => self.lower_expression_statement(&stmt.value),
      ASTStatement::If(stmt) => self.lower_if(stmt),
      ASTStatement::While(stmt) => self.lower_while(stmt),
      ASTStatement::For(stmt) => self.lower_for(stmt),
      ASTStatement::Break(marker) => self.lower_break(marker.span),
      ASTStatement::Continue(marker) => {
        if self.loops.is_empty() {
          return Err(DiagnosticMessage::LoopControlOutsideLoop {
            keyword: "continue",
            span: marker.span,
          });
        }
        self.buffer.push_line("continue;");
        Ok(())
      },
      ASTStatement::Return(stmt) => self.lower_return(stmt),
      ASTStatement::Assert(stmt) => self.lower_assert(stmt),
      ASTStatement::Print(stmt) => self.lower_print(&stmt.args),
      ASTStatement::Pass(_) => Ok(()),
      ASTStatement::Function(function) => Err(DiagnosticMessage::UnsupportedConstruct {
        construct: format!("nested function definition '{}'", function.name),
        span: function.span,
      }),
    }
  }

  fn lower_assign(
    &mut self,
    assign: &ASTAssign,
  ) -> Result<(), DiagnosticMessage> {
    let value = self.infer_value(&assign.value)?;
    let name = identifier(&assign.target).into_owned();

    if self.env.lookup(&assign.target).is_some() {
      self.env.check_store(&assign.target, value.ty, assign.span)?;
      self.buffer.push_line(format!("{} = {};", name, expression(&value)));
      return Ok(());
    }

    self.env.declare(&assign.target, value.ty, assign.span)?;
    trace_dbg!(
      self.module.config,
      DebugTrace::Lowering,
      "declared {}: {} at depth {}",
      assign.target,
      value.ty,
      self.env.depth()
    );

    self.module.headers.note_type(value.ty);
    self
      .buffer
      .push_line(format!("{} {} = {};", cpp_type(value.ty), name, expression(&value)));
    Ok(())
  }

  fn lower_aug_assign(
    &mut self,
    assign: &ASTAugAssign,
  ) -> Result<(), DiagnosticMessage> {
    let operator = assign.operator;
    if !matches!(
      operator,
      BinaryOperation::Add | BinaryOperation::Sub | BinaryOperation::Mul | BinaryOperation::Div
    ) {
      return Err(DiagnosticMessage::UnsupportedOperator {
        operator: format!("{}=", operator.symbol()),
        span: assign.span,
      });
    }

    let target = self.env.resolve(&assign.target, assign.span)?.clone();
    let value = self.infer_value(&assign.value)?;
    let result =
      result_of(operator, target.ty, value.ty).map_err(|err| lattice_error(err, operator, target.ty, value.ty, assign.span))?;

    let integer_target = matches!(target.ty, Type::Integer | Type::Int { .. });
    let storable = assignable(target.ty, result) || (integer_target && result.is_integral());
    if !storable {
      return Err(DiagnosticMessage::IncompatibleRebinding {
        name: target.name,
        declared: target.ty,
        assigned: result,
        declared_at: target.declared_at,
        span: assign.span,
      });
    }

    self.buffer.push_line(format!(
      "{} {}= {};",
      identifier(&assign.target),
      operator.symbol(),
      expression(&value)
    ));
    Ok(())
  }

  fn lower_expression_statement(
    &mut self,
    value: &ASTExpression,
  ) -> Result<(), DiagnosticMessage> {
    match value {
      ASTExpression::Call(call) if call.callee == "print" => self.lower_print(&call.args),
      ASTExpression::Literal(literal) if literal.is_str() => Ok(()),
      _ => {
        let typed = self.infer(value)?;
        let text = expression(&typed);
        if typed.is_call() {
          self.buffer.push_line(format!("{};", text));
        } else {
          self.buffer.push_line(format!("static_cast<void>({});", text));
        }
        Ok(())
      },
    }
  }

  fn lower_if(
    &mut self,
    stmt: &ASTIf,
  ) -> Result<(), DiagnosticMessage> {
    let condition = self.condition(&stmt.test, "if")?;
    self.buffer.push_line(format!("if ({}) {{", condition));
    self.lower_if_branches(stmt)
  }

  fn lower_if_branches(
    &mut self,
    stmt: &ASTIf,
  ) -> Result<(), DiagnosticMessage> {
    self.lower_scoped(&stmt.body, ScopeKind::Block)?;

    match stmt.orelse.as_slice() {
      [] => {
        self.buffer.push_line("}");
        Ok(())
      },
      [ASTStatement::If(elif)] => {
        let condition = self.condition(&elif.test, "elif")?;
        self.buffer.push_line(format!("}} else if ({}) {{", condition));
        self.lower_if_branches(elif)
      },
      orelse => {
        self.buffer.push_line("} else {");
        self.lower_scoped(orelse, ScopeKind::Block)?;
        self.buffer.push_line("}");
        Ok(())
      },
    }
  }

  fn lower_while(
    &mut self,
    stmt: &ASTWhile,
  ) -> Result<(), DiagnosticMessage> {
    let condition = self.condition(&stmt.test, "while")?;
    self.lower_loop(format!("while ({})", condition), None, &stmt.body, &stmt.orelse)
  }

  fn lower_for(
    &mut self,
    stmt: &ASTFor,
  ) -> Result<(), DiagnosticMessage> {
    let ASTExpression::Call(call) = &stmt.iter else {
      return Err(DiagnosticMessage::UnsupportedConstruct {
        construct: "iteration over anything but range()".to_string(),
        span: stmt.iter.span(),
      });
    };

    if call.callee != "range" {
      return Err(DiagnosticMessage::UnsupportedConstruct {
        construct: format!("iteration over {}()", call.callee),
        span: call.span,
      });
    }

    if call.args.is_empty() || call.args.len() > 3 {
      return Err(DiagnosticMessage::ArgumentCountMismatch {
        function: "range".to_string(),
        expected: call.args.len().clamp(1, 3),
        got: call.args.len(),
        span: call.span,
      });
    }

    let mut bounds = Vec::with_capacity(call.args.len());
    for arg in &call.args {
      let typed = self.infer(arg)?;
      if !typed.ty.is_integral() {
        return Err(DiagnosticMessage::NonIntegerRangeBound {
          found: typed.ty,
          span: typed.span,
        });
      }
      bounds.push(typed);
    }

    let bound_types: Vec<_> = bounds.iter().map(|bound| bound.ty).collect();
    let induction = range_bound_type(&bound_types).map_err(|_| DiagnosticMessage::NonIntegerRangeBound {
      found: bound_types[0],
      span: call.span,
    })?;

    // The range template takes a single bound type.
    self.module.headers.range = true;
    self.module.headers.note_type(induction);
    let args: Vec<_> = bounds
      .iter()
      .map(|bound| {
        if bound.ty == induction {
          expression(bound)
        } else {
          format!("static_cast<{}>({})", cpp_type(induction), expression(bound))
        }
      })
      .collect();
    let header = format!(
      "for (auto {} : iter::range({}))",
      identifier(&stmt.target),
      args.join(", ")
    );

    self.lower_loop(header, Some((&stmt.target, induction, stmt.span)), &stmt.body, &stmt.orelse)
  }

  /// Emits a loop with its optional `else` body.
  ///
  /// Without a `break` the `else` body always runs, so it follows the loop
  /// directly. Otherwise a completion flag guards it. Either way names bound
  /// in the body stay inside it.
  fn lower_loop(
    &mut self,
    header: String,
    induction: Option<(&str, Type, Span)>,
    body: &[ASTStatement],
    orelse: &[ASTStatement],
  ) -> Result<(), DiagnosticMessage> {
    let broken_flag = if !orelse.is_empty() && breaks_out(body) {
      let flag = format!("loop_broken_{}", self.loop_flags);
      self.loop_flags += 1;
      self.buffer.push_line(format!("bool {} = false;", flag));
      Some(flag)
    } else {
      None
    };

    self.buffer.open_block(header);
    self.env.push_scope(ScopeKind::Loop);
    if let Some((name, ty, span)) = induction {
      self.env.declare(name, ty, span)?;
    }

    self.loops.push(LoopContext {
      broken_flag: broken_flag.clone(),
    });
    self.lower_block(body)?;
    self.loops.pop();

    self.env.pop_scope();
    self.buffer.close_block();

    match broken_flag {
      Some(flag) if !orelse.is_empty() => {
        self.buffer.push_line(format!("if (!{}) {{", flag));
        self.lower_scoped(orelse, ScopeKind::Block)?;
        self.buffer.push_line("}");
        Ok(())
      },
      _ if self.declares_names(orelse) => {
        self.buffer.push_line("{");
        self.lower_scoped(orelse, ScopeKind::Block)?;
        self.buffer.push_line("}");
        Ok(())
      },
      _ => {
        self.env.push_scope(ScopeKind::Block);
        self.lower_block(orelse)?;
        self.env.pop_scope();
        Ok(())
      },
    }
  }

  /// Whether `statements` bind a name that is not visible yet.
  fn declares_names(
    &self,
    statements: &[ASTStatement],
  ) -> bool {
    statements
      .iter()
      .any(|statement| matches!(statement, ASTStatement::Assign(assign) if self.env.lookup(&assign.target).is_none()))
  }

  fn lower_break(
    &mut self,
    span: Span,
  ) -> Result<(), DiagnosticMessage> {
    let Some(context) = self.loops.last() else {
      return Err(DiagnosticMessage::LoopControlOutsideLoop { keyword: "break", span });
    };

    if let Some(flag) = &context.broken_flag {
      let line = format!("{} = true;", flag);
      self.buffer.push_line(line);
    }
    self.buffer.push_line("break;");
    Ok(())
  }

  fn lower_return(
    &mut self,
    stmt: &ASTReturn,
  ) -> Result<(), DiagnosticMessage> {
    if self.function.is_none() {
      return Err(DiagnosticMessage::ReturnOutsideFunction { span: stmt.span });
    }

    let value = match &stmt.value {
      Some(value) => Some(self.infer(value)?),
      None => None,
    };
    let ty = value.as_ref().map(|value| value.ty).unwrap_or(Type::Void);

    let Some(context) = self.function.as_mut() else {
      return Err(DiagnosticMessage::ReturnOutsideFunction { span: stmt.span });
    };

    let expected = context.declared_return.or(context.inferred_return);
    match expected {
      Some(expected) if !assignable(expected, ty) => {
        return Err(DiagnosticMessage::ReturnTypeMismatch {
          function: context.name.clone(),
          expected,
          got: ty,
          span: stmt.span,
        });
      },
      Some(_) => {},
      None => context.inferred_return = Some(ty),
    }

    match value {
      Some(value) => self.buffer.push_line(format!("return {};", expression(&value))),
      None => self.buffer.push_line("return;"),
    }
    Ok(())
  }

  fn lower_assert(
    &mut self,
    stmt: &ASTAssert,
  ) -> Result<(), DiagnosticMessage> {
    let condition = self.condition(&stmt.test, "assert")?;
    self.module.headers.assert = true;

    match &stmt.msg {
      None => self.buffer.push_line(format!("assert({});", condition)),
      Some(ASTExpression::Literal(literal)) => match &literal.value {
        ASTLiteralValue::Str(message) => {
          self
            .buffer
            .push_line(format!("assert(({}) && {});", condition, quoted(message)))
        },
        _ => return Err(assert_message_error(literal.span)),
      },
      Some(other) => return Err(assert_message_error(other.span())),
    }
    Ok(())
  }

  fn lower_print(
    &mut self,
    args: &[ASTExpression],
  ) -> Result<(), DiagnosticMessage> {
    self.module.headers.iostream = true;

    for (idx, arg) in args.iter().enumerate() {
      let value = self.infer_value(arg)?;
      if idx > 0 {
        self.buffer.push_line("std::cout << \" \";");
      }
      self.buffer.push_line(format!("std::cout << {};", expression(&value)));
    }
    self.buffer.push_line("std::cout << std::endl;");
    Ok(())
  }
}

fn assert_message_error(span: Span) -> DiagnosticMessage {
  DiagnosticMessage::UnsupportedConstruct {
    construct: "assert message that is not a string literal".to_string(),
    span,
  }
}
