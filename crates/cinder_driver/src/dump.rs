use std::path::Path;

use ascii_table::AsciiTable;
use cinder_analyzer::{functions::FunctionSignature, typed::TypedExpr};
use cinder_codegen_cpp::{cpp_type, LoweredModule};
use cinder_config::CinderConfig;
use colored::*;
use serde::Serialize;

#[derive(Serialize)]
struct FunctionDump<'a> {
  signature: &'a FunctionSignature,
  expressions: &'a [TypedExpr],
}

#[derive(Serialize)]
struct TypedDump<'a> {
  functions: Vec<FunctionDump<'a>>,
  main: &'a [TypedExpr],
}

/// Typed expressions of every lowered function and of the entry point, as JSON.
pub fn typed_dump(lowered: &LoweredModule) -> Result<String, serde_json::Error> {
  let dump = TypedDump {
    functions: lowered
      .functions
      .iter()
      .map(|function| FunctionDump {
        signature: &function.signature,
        expressions: &function.typed,
      })
      .collect(),
    main: &lowered.main.typed,
  };

  serde_json::to_string_pretty(&dump)
}

/// Top-level bindings and function signatures as text tables.
pub fn format_symbols(lowered: &LoweredModule) -> String {
  let mut symbols = AsciiTable::default();
  symbols.column(0).set_header("Name");
  symbols.column(1).set_header("Type");
  symbols.column(2).set_header("C++");
  symbols.column(3).set_header("Declared At");

  let rows: Vec<Vec<String>> = lowered
    .symbols
    .iter()
    .map(|symbol| {
      vec![
        symbol.name.clone(),
        symbol.ty.to_string(),
        cpp_type(symbol.ty).to_string(),
        symbol.declared_at.to_string(),
      ]
    })
    .collect();

  let mut functions = AsciiTable::default();
  functions.column(0).set_header("Function");
  functions.column(1).set_header("Parameters");
  functions.column(2).set_header("Returns");

  let signatures: Vec<Vec<String>> = lowered
    .functions
    .iter()
    .map(|function| {
      let params: Vec<_> = function
        .signature
        .params
        .iter()
        .map(|(name, ty)| format!("{}: {}", name, ty))
        .collect();
      vec![
        function.signature.name.clone(),
        params.join(", "),
        function.signature.returns.to_string(),
      ]
    })
    .collect();

  let mut output = symbols.format(rows);
  if !signatures.is_empty() {
    output.push('\n');
    output.push_str(&functions.format(signatures));
  }
  output
}

/// File-name-safe stem of an input path.
pub(crate) fn dump_stem(file_path: &str) -> String {
  let stem = Path::new(file_path)
    .file_stem()
    .map(|stem| stem.to_string_lossy().into_owned())
    .unwrap_or_else(|| "module".to_string());

  sanitize_dump_name(&stem)
}

fn sanitize_dump_name(name: &str) -> String {
  name
    .chars()
    .map(|ch| {
      if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
        ch
      } else {
        '_'
      }
    })
    .collect()
}

/// Writes a dump into the dump directory, or prints it when none is set.
pub(crate) fn write_dump_output(
  config: &CinderConfig,
  file_name: &str,
  content: &str,
) -> Result<(), ()> {
  if let Some(build_config) = config.build_config.as_ref() {
    if let Some(dump_dir) = &build_config.dump_dir {
      let output_dir = Path::new(dump_dir);
      if let Err(e) = std::fs::create_dir_all(output_dir) {
        eprintln!(
          "{} Failed to create dump directory '{}': {}",
          "Error:".red().bold(),
          output_dir.display(),
          e
        );
        return Err(());
      }

      let output_path = output_dir.join(file_name);
      if let Err(e) = std::fs::write(&output_path, content) {
        eprintln!(
          "{} Failed to write dump file '{}': {}",
          "Error:".red().bold(),
          output_path.display(),
          e
        );
        return Err(());
      }

      return Ok(());
    }
  }

  println!("\n{}", content);
  Ok(())
}
