mod common;

use cinder_config::{CinderConfig, DumpKind};
use cinder_driver::{build_files, transpile_file};
use tempfile::TempDir;

#[test]
fn e2e_guarded_entry_point() {
  let out = TempDir::new().unwrap();
  let config = common::build_config(&["guarded.json"], out.path(), vec![], None, false);

  assert!(build_files(config).is_ok());

  let cpp = common::read_output(out.path(), "guarded");
  assert!(cpp.contains("inline int16_t add1(int8_t x, int8_t y) {\n  return x + y;\n}\n"));
  assert!(cpp.contains("  int16_t total = add1(1, 2);\n  std::cout << total;\n"));
  assert!(cpp.starts_with("#include <cstdint>   // NOLINT(build/include_order)\n"));
  assert!(cpp.ends_with("}\n"));
}

#[test]
fn e2e_loop_else_with_break() {
  let out = TempDir::new().unwrap();
  let config = common::build_config(&["search.json"], out.path(), vec![], None, false);

  assert!(build_files(config).is_ok());

  let cpp = common::read_output(out.path(), "search");
  assert!(cpp.contains("inline void search(int limit) {\n  bool loop_broken_0 = false;\n"));
  assert!(cpp.contains("      loop_broken_0 = true;\n      break;\n"));
  assert!(cpp.contains("  if (!loop_broken_0) {\n    std::cout << std::string{\"missing\"};\n"));
  assert!(cpp.contains("  search(10);\n"));
}

#[test]
fn e2e_files_are_built_in_parallel() {
  let out = TempDir::new().unwrap();
  let config = common::build_config(&["guarded.json", "search.json"], out.path(), vec![], None, false);

  assert!(build_files(config).is_ok());
  assert!(out.path().join("guarded.cpp").exists());
  assert!(out.path().join("search.cpp").exists());
}

#[test]
fn e2e_check_mode_writes_nothing() {
  let out = TempDir::new().unwrap();
  let target = out.path().join("build");
  let config = common::build_config(&["guarded.json"], &target, vec![], None, true);

  assert!(build_files(config).is_ok());
  assert!(!target.exists());
}

#[test]
fn e2e_dumps_go_to_the_dump_directory() {
  let out = TempDir::new().unwrap();
  let dumps = out.path().join("dumps");
  let config = common::build_config(
    &["guarded.json"],
    out.path(),
    vec![DumpKind::Ast, DumpKind::Typed, DumpKind::Symbols, DumpKind::Cpp],
    Some(&dumps),
    true,
  );

  assert!(build_files(config).is_ok());

  let ast = std::fs::read_to_string(dumps.join("guarded-ast.json")).unwrap();
  assert!(ast.contains("\"kind\": \"function\""));

  let typed: serde_json::Value =
    serde_json::from_str(&std::fs::read_to_string(dumps.join("guarded-typed.json")).unwrap()).unwrap();
  assert_eq!(typed["functions"][0]["signature"]["name"], "add1");
  assert_eq!(typed["main"][0]["kind"]["kind"], "call");

  let symbols = std::fs::read_to_string(dumps.join("guarded-symbols.txt")).unwrap();
  assert!(symbols.contains("total"));
  assert!(symbols.contains("int16_t"));
  assert!(symbols.contains("x: int8, y: int8"));

  let cpp = std::fs::read_to_string(dumps.join("guarded.cpp")).unwrap();
  assert!(cpp.contains("int main(int argc, char** argv) {"));
}

#[test]
fn e2e_runtime_namespace_is_configurable() {
  let mut config = CinderConfig::new_basic(false, vec![], true, 0);
  config.project.runtime.namespace = "rt".to_string();
  config.project.runtime.sys_header = "rt/sys.h".to_string();

  let cpp = transpile_file(&config, &common::fixture("guarded.json")).unwrap();
  assert!(cpp.contains("#include \"rt/sys.h\"  // NOLINT(build/include_order)\n"));
  assert!(cpp.contains("  rt::sys::argv = std::vector<std::string>(argv, argv + argc);\n"));
}
