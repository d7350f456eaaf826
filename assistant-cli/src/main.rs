//! # git-assistant Entry Point
//!
//! Parses the command line, sets up tracing and hands over to
//! [`assistant_cli::app::run`]. Failures are printed to stderr and turned
//! into a non-zero exit status.

use std::process::ExitCode;

use assistant_cli::app;
use assistant_cli::cli::Cli;
use assistant_core::{DispatchError, print_error};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> ExitCode {
  let cli = Cli::parse();

  let level = match cli.verbose {
    0 => tracing::Level::WARN,  // Default: warnings and errors
    1 => tracing::Level::INFO,  // -v: info, warnings, and errors
    2 => tracing::Level::DEBUG, // -vv: debug, info, warnings, and errors
    _ => tracing::Level::TRACE, // -vvv or more: trace and everything else
  };

  // Tool output owns stdout, so diagnostics go to stderr
  tracing_subscriber::registry()
    .with(fmt::layer().with_writer(std::io::stderr))
    .with(EnvFilter::from_default_env().add_directive(level.into()))
    .init();

  debug!("Tracing initialized with level: {}", level);

  match app::run(cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&format!("{err:#}"));
      exit_code_for(&err)
    }
  }
}

/// Mirror the external tool's exit status when it has one.
fn exit_code_for(err: &anyhow::Error) -> ExitCode {
  match err.downcast_ref::<DispatchError>() {
    Some(DispatchError::Failed { code: Some(code), .. }) => u8::try_from(*code)
      .ok()
      .filter(|code| *code != 0)
      .map_or(ExitCode::FAILURE, ExitCode::from),
    _ => ExitCode::FAILURE,
  }
}
