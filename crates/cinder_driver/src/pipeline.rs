use std::path::Path;
use std::sync::Arc;

use cinder_ast::ASTModule;
use cinder_codegen_cpp::{emit_cpp, lower_module};
use cinder_config::{CinderBuildConfig, CinderConfig, DebugTrace, DumpKind};
use cinder_log::{log_dbg, log_trc, phase_log, phase_ok, phase_warn, trace_dbg};
use colored::*;

use crate::dump::{dump_stem, format_symbols, typed_dump, write_dump_output};

fn read_module(
  config: &CinderConfig,
  file_path: &str,
) -> Result<ASTModule, ()> {
  let text = match std::fs::read_to_string(file_path) {
    Ok(content) => content,
    Err(e) => {
      eprintln!("{} Failed to read file '{}': {}", "Error:".red().bold(), file_path, e);
      return Err(());
    },
  };

  phase_log!(config, "Reading... {}", file_path);

  match ASTModule::from_json(&text) {
    Ok(module) => Ok(module),
    Err(e) => {
      eprintln!(
        "{} Malformed statement tree in '{}' at {}:{}: {}",
        "Error:".red().bold(),
        file_path,
        e.line(),
        e.column(),
        e
      );
      Err(())
    },
  }
}

/// Lowers one input file to C++, rendering diagnostics and writing the
/// requested dumps on the way.
pub fn transpile_file(
  config: &CinderConfig,
  file_path: &str,
) -> Result<String, ()> {
  let module = read_module(config, file_path)?;
  let stem = dump_stem(file_path);

  log_dbg!(config, "{} top-level statements in {}", module.body.len(), file_path);

  if config.dump_requested(DumpKind::Ast) {
    match module.to_json_pretty() {
      Ok(json) => write_dump_output(config, &format!("{}-ast.json", stem), &json)?,
      Err(e) => {
        eprintln!("{} Failed to serialize AST: {}", "Error:".red().bold(), e);
        return Err(());
      },
    }
  }

  phase_log!(config, "Lowering... {}", file_path);

  let lowered = match lower_module(&module, config) {
    Ok(lowered) => lowered,
    Err(err) => {
      trace_dbg!(config, DebugTrace::Driver, "lowering {} failed with {}", file_path, err.code());
      cinder_diagnostics::render(&err.report(), file_path);
      return Err(());
    },
  };

  trace_dbg!(
    config,
    DebugTrace::Driver,
    "{}: {} functions, {} top-level symbols",
    file_path,
    lowered.functions.len(),
    lowered.symbols.len()
  );

  if config.dump_requested(DumpKind::Typed) {
    match typed_dump(&lowered) {
      Ok(json) => write_dump_output(config, &format!("{}-typed.json", stem), &json)?,
      Err(e) => {
        eprintln!("{} Failed to serialize typed tree: {}", "Error:".red().bold(), e);
        return Err(());
      },
    }
  }

  if config.dump_requested(DumpKind::Symbols) {
    write_dump_output(config, &format!("{}-symbols.txt", stem), &format_symbols(&lowered))?;
  }

  phase_log!(config, "Emitting... {}", file_path);
  let cpp = emit_cpp(&lowered, config);
  log_trc!(config, "{} emitted {} bytes", file_path, cpp.len());

  if config.dump_requested(DumpKind::Cpp) {
    write_dump_output(config, &format!("{}.cpp", stem), &cpp)?;
  }

  Ok(cpp)
}

fn write_cpp(
  config: &CinderConfig,
  build_config: &CinderBuildConfig,
  file_path: &str,
  cpp: &str,
) -> Result<(), ()> {
  let output_dir = Path::new(&build_config.output_dir);
  if let Err(e) = std::fs::create_dir_all(output_dir) {
    eprintln!(
      "{} Failed to create output directory '{}': {}",
      "Error:".red().bold(),
      output_dir.display(),
      e
    );
    return Err(());
  }

  let output_path = output_dir.join(format!("{}.cpp", dump_stem(file_path)));
  if let Err(e) = std::fs::write(&output_path, cpp) {
    eprintln!(
      "{} Failed to write '{}': {}",
      "Error:".red().bold(),
      output_path.display(),
      e
    );
    return Err(());
  }

  phase_ok!(config, "Wrote {}", output_path.display());
  Ok(())
}

/// Transpiles every input of the build configuration, one thread per file.
///
/// Outputs are written in input order once every file has been lowered.
pub fn build_files(config: Arc<CinderConfig>) -> Result<(), ()> {
  let Some(build_config) = config.build_config.as_ref() else {
    eprintln!("{} No build configuration given", "Error:".red().bold());
    return Err(());
  };

  if build_config.files.is_empty() {
    eprintln!("{} No input files", "Error:".red().bold());
    return Err(());
  }

  trace_dbg!(&config, DebugTrace::Driver, "spawning {} workers", build_config.files.len());

  let results: Vec<Result<String, ()>> = std::thread::scope(|scope| {
    let handles: Vec<_> = build_config
      .files
      .iter()
      .map(|file| {
        let config = &config;
        scope.spawn(move || transpile_file(config, file))
      })
      .collect();

    handles.into_iter().map(|handle| handle.join().unwrap_or(Err(()))).collect()
  });

  let mut failed = 0;
  for (file, result) in build_config.files.iter().zip(results) {
    let Ok(cpp) = result else {
      failed += 1;
      continue;
    };

    if build_config.check_mode {
      phase_ok!(&config, "{} checked", file);
    } else if build_config.stdout {
      print!("{}", cpp);
    } else if write_cpp(&config, build_config, file, &cpp).is_err() {
      failed += 1;
    }
  }

  if failed > 0 {
    phase_warn!(&config, "{} of {} files failed", failed, build_config.files.len());
    return Err(());
  }

  Ok(())
}
