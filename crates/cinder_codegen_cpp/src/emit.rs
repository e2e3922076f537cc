use std::fmt::Write;

use cinder_analyzer::functions::FunctionSignature;
use cinder_config::CinderProjectConfig;

use crate::{
  format::{cpp_type, identifier},
  lower::{LoweredFunction, LoweredModule},
};

const NOLINT: &str = "// NOLINT(build/include_order)";

/// C++ translation unit emitter for lowered modules.
pub struct CppEmitter<'a> {
  module: &'a LoweredModule,
  config: &'a CinderProjectConfig,
  output: String,
}

impl<'a> CppEmitter<'a> {
  pub fn new(
    module: &'a LoweredModule,
    config: &'a CinderProjectConfig,
  ) -> Self {
    Self {
      module,
      config,
      output: String::new(),
    }
  }

  pub fn emit(mut self) -> String {
    self.emit_headers();
    self.emit_forward_declarations();
    self.emit_functions();
    self.emit_main();
    self.output
  }

  /// Library headers the module needs, sorted by path.
  pub fn system_headers(&self) -> Vec<&'a str> {
    let headers = &self.module.headers;
    let mut paths = Vec::new();

    if headers.assert {
      paths.push("cassert");
    }
    if headers.iostream {
      paths.push("iostream");
    }
    if headers.range {
      paths.push(self.config.runtime.range_header.as_str());
    }
    if headers.cstdint {
      paths.push("cstdint");
    }

    paths.sort_unstable();
    paths
  }

  fn emit_headers(&mut self) {
    let system: Vec<_> = self
      .system_headers()
      .into_iter()
      .map(|path| format!("#include <{}>", path))
      .collect();

    if !system.is_empty() {
      self.emit_include_group(&system);
      writeln!(self.output).unwrap();
    }

    let runtime = format!("#include \"{}\"", self.config.runtime.sys_header);
    self.emit_include_group(&[runtime]);
  }

  /// Writes include lines with their lint markers aligned in one column.
  fn emit_include_group(
    &mut self,
    includes: &[String],
  ) {
    if !self.config.emit.nolint_includes {
      for include in includes {
        writeln!(self.output, "{}", include).unwrap();
      }
      return;
    }

    let column = includes.iter().map(|include| include.len()).max().unwrap_or(0) + 2;
    for include in includes {
      writeln!(self.output, "{:column$}{}", include, NOLINT, column = column).unwrap();
    }
  }

  fn emit_forward_declarations(&mut self) {
    if self.module.forward_declarations.is_empty() {
      return;
    }

    for signature in &self.module.forward_declarations {
      let declaration = function_header(signature);
      writeln!(self.output, "{};", declaration).unwrap();
    }
    writeln!(self.output).unwrap();
  }

  fn emit_functions(&mut self) {
    for function in &self.module.functions {
      self.emit_function(function);
    }
  }

  fn emit_function(
    &mut self,
    function: &LoweredFunction,
  ) {
    writeln!(self.output, "{} {{", function_header(&function.signature)).unwrap();
    for line in &function.body {
      writeln!(self.output, "{}", line).unwrap();
    }
    writeln!(self.output, "}}\n").unwrap();
  }

  fn emit_main(&mut self) {
    let indent = " ".repeat(self.config.emit.indent_width);

    writeln!(self.output, "int main(int argc, char** argv) {{").unwrap();
    writeln!(
      self.output,
      "{}{}::sys::argv = std::vector<std::string>(argv, argv + argc);",
      indent, self.config.runtime.namespace
    )
    .unwrap();
    for line in &self.module.main.body {
      writeln!(self.output, "{}", line).unwrap();
    }
    writeln!(self.output, "}}").unwrap();
  }
}

/// `inline T name(T a, T b)` for a resolved signature.
pub fn function_header(signature: &FunctionSignature) -> String {
  let params: Vec<_> = signature
    .params
    .iter()
    .map(|(name, ty)| format!("{} {}", cpp_type(*ty), identifier(name)))
    .collect();

  format!(
    "inline {} {}({})",
    cpp_type(signature.returns),
    identifier(&signature.name),
    params.join(", ")
  )
}

#[cfg(test)]
mod tests {
  use cinder_type::types::Type;

  use super::*;
  use crate::lower::{HeaderSet, LoweredMain};

  fn module(headers: HeaderSet) -> LoweredModule {
    LoweredModule {
      functions: vec![],
      forward_declarations: vec![],
      main: LoweredMain::default(),
      symbols: vec![],
      headers,
    }
  }

  #[test]
  fn includes_are_sorted_and_aligned() {
    let lowered = module(HeaderSet {
      iostream: true,
      range: true,
      ..HeaderSet::default()
    });
    let config = CinderProjectConfig::default();
    let output = CppEmitter::new(&lowered, &config).emit();

    assert!(output.starts_with(
      "#include <cppitertools/range.hpp>  // NOLINT(build/include_order)\n\
       #include <iostream>                // NOLINT(build/include_order)\n\
       \n\
       #include \"pycpp/runtime/sys.h\"  // NOLINT(build/include_order)\n\
       int main(int argc, char** argv) {\n"
    ));
  }

  #[test]
  fn lint_markers_can_be_disabled() {
    let lowered = module(HeaderSet {
      cstdint: true,
      ..HeaderSet::default()
    });
    let mut config = CinderProjectConfig::default();
    config.emit.nolint_includes = false;
    config.runtime.namespace = "rt".to_string();

    let output = CppEmitter::new(&lowered, &config).emit();
    assert_eq!(
      output,
      "#include <cstdint>\n\
       \n\
       #include \"pycpp/runtime/sys.h\"\n\
       int main(int argc, char** argv) {\n  \
       rt::sys::argv = std::vector<std::string>(argv, argv + argc);\n\
       }\n"
    );
  }

  #[test]
  fn function_headers_rename_keywords() {
    let signature = FunctionSignature {
      name: "delete".to_string(),
      params: vec![("new".to_string(), Type::I8), ("b".to_string(), Type::F64)],
      returns: Type::I16,
    };
    assert_eq!(function_header(&signature), "inline int16_t delete_(int8_t new_, double b)");
  }
}
