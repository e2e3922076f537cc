mod cli;

use std::path::Path;
use std::sync::Arc;

use clap::Parser as ClapParser;
use cinder_config::{CinderBuildConfig, CinderConfig, CinderProjectConfig};
use cinder_driver::build_files;
use colored::*;

use cli::{Cli, SubCommand};

const PROJECT_FILE: &str = "cinder.toml";

/// Reads `cinder.toml` from the working directory, if there is one.
fn load_project_config() -> Result<CinderProjectConfig, ()> {
  let path = match std::env::current_dir() {
    Ok(dir) => dir.join(PROJECT_FILE),
    Err(_) => Path::new(PROJECT_FILE).to_path_buf(),
  };

  if !path.exists() {
    return Ok(CinderProjectConfig::default());
  }

  let content = match std::fs::read_to_string(&path) {
    Ok(content) => content,
    Err(e) => {
      eprintln!("{} Failed to read '{}': {}", "Error:".red().bold(), path.display(), e);
      return Err(());
    },
  };

  CinderProjectConfig::from_toml(&content).map_err(|e| {
    eprintln!("{} Invalid '{}': {}", "Error:".red().bold(), path.display(), e);
  })
}

fn parse_cli_to_config(cli: &Cli) -> Result<Arc<CinderConfig>, ()> {
  let mut config = CinderConfig::new_basic(
    cli.debug,
    cli.debug_trace.iter().copied().map(Into::into).collect(),
    cli.quiet,
    cli.verbose,
  );

  config.project = load_project_config()?;
  if let Some(namespace) = &cli.namespace {
    config.project.runtime.namespace = namespace.clone();
  }

  let dump = cli.dump.iter().copied().map(Into::into).collect();

  config.build_config = Some(match &cli.subcommand {
    SubCommand::Build(build) => CinderBuildConfig::new(
      build.files.clone(),
      build.output_dir.clone(),
      dump,
      cli.dump_dir.clone(),
      build.stdout,
      false,
    ),
    SubCommand::Check(check) => {
      CinderBuildConfig::new(check.files.clone(), String::new(), dump, cli.dump_dir.clone(), false, true)
    },
  });

  Ok(Arc::new(config))
}

fn main() {
  let cli = Cli::parse();

  let Ok(config) = parse_cli_to_config(&cli) else {
    std::process::exit(1);
  };

  if build_files(config).is_err() {
    std::process::exit(1);
  }
}
