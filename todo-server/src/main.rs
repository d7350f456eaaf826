//! # todo-server Entry Point
//!
//! Reads `PORT`, then serves the to-do routes until the process is stopped.
//! A missing port or a bind/serve failure is logged and exits non-zero.

use std::process::ExitCode;

use todo_server::{Settings, server};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("todo_server=info"));
  tracing_subscriber::fmt().with_env_filter(filter).init();

  let settings = match Settings::from_env() {
    Ok(settings) => settings,
    Err(err) => {
      error!(error = %err, "Invalid server settings");
      return ExitCode::FAILURE;
    }
  };

  if let Err(err) = server::run(&settings).await {
    error!("Server stopped: {err:#}");
    return ExitCode::FAILURE;
  }

  ExitCode::SUCCESS
}
