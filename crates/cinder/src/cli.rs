use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use cinder_config::{DebugTrace, DumpKind};

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum DumpKindCli {
  /// Dump the input statement tree as JSON
  Ast,
  /// Dump inferred expression types as JSON
  Typed,
  /// Dump top-level bindings and function signatures
  Symbols,
  /// Dump the generated C++
  Cpp,
}

impl From<DumpKindCli> for DumpKind {
  fn from(value: DumpKindCli) -> DumpKind {
    match value {
      DumpKindCli::Ast => DumpKind::Ast,
      DumpKindCli::Typed => DumpKind::Typed,
      DumpKindCli::Symbols => DumpKind::Symbols,
      DumpKindCli::Cpp => DumpKind::Cpp,
    }
  }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum DebugTraceCli {
  Analyzer,
  Lowering,
  Codegen,
  Driver,
}

impl From<DebugTraceCli> for DebugTrace {
  fn from(value: DebugTraceCli) -> DebugTrace {
    match value {
      DebugTraceCli::Analyzer => DebugTrace::Analyzer,
      DebugTraceCli::Lowering => DebugTrace::Lowering,
      DebugTraceCli::Codegen => DebugTrace::Codegen,
      DebugTraceCli::Driver => DebugTrace::Driver,
    }
  }
}

#[derive(Parser, Debug, Clone, PartialEq)]
pub struct BuildCommand {
  /// Statement trees (JSON) to transpile
  #[arg(required = true)]
  pub files: Vec<String>,

  /// Output directory
  #[arg(short = 'o', long, default_value = "build")]
  pub output_dir: String,

  /// Print the generated C++ instead of writing files
  #[arg(long)]
  pub stdout: bool,
}

#[derive(Parser, Debug, Clone, PartialEq)]
pub struct CheckCommand {
  /// Statement trees (JSON) to type-check
  #[arg(required = true)]
  pub files: Vec<String>,
}

#[derive(Subcommand, Clone, Debug, PartialEq)]
pub enum SubCommand {
  /// Infer types and write one C++ translation unit per input
  Build(BuildCommand),
  /// Infer types and report diagnostics without writing output
  Check(CheckCommand),
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Type inference and C++ lowering for a Python subset", long_about = None)]
#[command(propagate_version = true)]
#[command(color = ColorChoice::Always)]
pub struct Cli {
  #[command(subcommand)]
  pub subcommand: SubCommand,

  /// Dump internal representations
  #[arg(long, value_enum, action = clap::ArgAction::Append, global = true)]
  pub dump: Vec<DumpKindCli>,

  /// Write dumps to this directory (otherwise stdout)
  #[arg(long, global = true)]
  pub dump_dir: Option<String>,

  /// Runtime namespace (overrides cinder.toml)
  #[arg(long, global = true)]
  pub namespace: Option<String>,

  /// Enable internal debug mode
  #[arg(long, default_value = "false", global = true)]
  pub debug: bool,

  /// Enable debug tracing for subsystems
  #[arg(long, value_enum, action = clap::ArgAction::Append, global = true)]
  pub debug_trace: Vec<DebugTraceCli>,

  /// Don't print any output
  #[arg(long, short = 'q', default_value = "false", global = true)]
  pub quiet: bool,

  /// Use verbose output
  #[arg(long, short, action = clap::ArgAction::Count, global = true)]
  pub verbose: u8,
}
