//! # Run Loop
//!
//! Loads settings, dispatches the chosen subcommand through a live
//! [`ProcessRunner`], and writes the settings back when the command
//! succeeds. Settings problems are logged and never fail the command.

use std::path::PathBuf;

use anyhow::Result;
use assistant_core::config::{self, ConfigError};
use assistant_core::{CommandRegistry, CommandRunner, ConfigStore, ProcessRunner, dispatch};
use clap::CommandFactory;
use tracing::{debug, warn};

use crate::cli::Cli;

/// Run `cli` against real processes in the current directory.
pub fn run(cli: Cli) -> Result<()> {
  run_with(cli, &mut ProcessRunner::inherit())
}

/// Run `cli`, sending every external call through `runner`.
pub fn run_with<R>(cli: Cli, runner: &mut R) -> Result<()>
where
  R: CommandRunner + ?Sized,
{
  cli.colors.apply();

  let Some(command) = cli.command else {
    Cli::command().print_help()?;
    return Ok(());
  };

  let store = load_settings(config::resolve_path(cli.config));
  let registry = CommandRegistry::git_defaults();
  let (name, input) = command.into_request();

  dispatch(&registry, store.git_program(), name, &input, runner)?;

  save_settings(&store);
  Ok(())
}

fn load_settings(path: PathBuf) -> ConfigStore {
  match ConfigStore::load(&path) {
    Ok(store) => store,
    Err(ConfigError::NotFound(missing)) => {
      debug!(path = %missing.display(), "No settings file found, using defaults");
      ConfigStore::new(missing)
    }
    Err(err) => {
      warn!(error = %err, "Ignoring unreadable settings file");
      ConfigStore::new(path)
    }
  }
}

// Only files that already existed are rewritten, so running a command never
// drops a fresh config.toml into the working tree.
fn save_settings(store: &ConfigStore) {
  if !store.is_on_disk() {
    debug!(path = %store.path().display(), "Settings file absent, skipping write-back");
    return;
  }

  if let Err(err) = store.save() {
    warn!(error = %err, "Failed to save settings");
  }
}

#[cfg(test)]
mod tests {
  use std::fs;
  use std::io;

  use assistant_core::{Invocation, RunOutcome};
  use clap::Parser;
  use tempfile::TempDir;

  use super::*;

  #[derive(Default)]
  struct RecordingRunner {
    calls: Vec<Invocation>,
    exit_code: i32,
  }

  impl CommandRunner for RecordingRunner {
    fn run(&mut self, invocation: &Invocation) -> io::Result<RunOutcome> {
      self.calls.push(invocation.clone());
      Ok(RunOutcome::exited(self.exit_code))
    }
  }

  fn parse(dir: &TempDir, args: &[&str]) -> Cli {
    let config = dir.path().join("config.toml");
    let mut argv = vec!["git-assistant", "--colors", "never", "--config", config.to_str().unwrap()];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
  }

  #[test]
  fn test_settings_override_program() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.toml"), "[git]\nprogram = \"/opt/git/bin/git\"\n").unwrap();

    let mut runner = RecordingRunner::default();
    run_with(parse(&dir, &["status"]), &mut runner).unwrap();

    assert_eq!(runner.calls.len(), 1);
    assert_eq!(runner.calls[0].program, "/opt/git/bin/git");
    assert_eq!(runner.calls[0].args, vec!["status".to_string()]);
  }

  #[test]
  fn test_existing_settings_are_written_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "retries = 3\n\n[git]\nprogram = \"git\"\n").unwrap();

    run_with(parse(&dir, &["push"]), &mut RecordingRunner::default()).unwrap();

    let reloaded = ConfigStore::load(&path).unwrap();
    assert_eq!(reloaded.get("git.program"), Some("git"));

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("retries = 3"), "{text}");
    assert!(text.contains("[git]"), "{text}");
  }

  #[test]
  fn test_missing_settings_file_is_not_created() {
    let dir = TempDir::new().unwrap();

    run_with(parse(&dir, &["init"]), &mut RecordingRunner::default()).unwrap();

    assert!(!dir.path().join("config.toml").exists());
  }

  #[test]
  fn test_failed_command_skips_write_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[git]\nprogram = \"git\"\n").unwrap();

    let mut runner = RecordingRunner {
      exit_code: 1,
      ..Default::default()
    };
    assert!(run_with(parse(&dir, &["push"]), &mut runner).is_err());

    // Untouched: still the nested-table form written above
    assert_eq!(fs::read_to_string(&path).unwrap(), "[git]\nprogram = \"git\"\n");
  }

  #[test]
  fn test_validation_failure_runs_nothing() {
    let dir = TempDir::new().unwrap();
    let mut runner = RecordingRunner::default();

    let err = run_with(parse(&dir, &["configure", "--name", "Alice"]), &mut runner).unwrap_err();

    assert!(err.to_string().contains("email"));
    assert!(runner.calls.is_empty());
  }

  #[test]
  fn test_unreadable_settings_fall_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.toml"), "not = = toml").unwrap();

    let mut runner = RecordingRunner::default();
    run_with(parse(&dir, &["status"]), &mut runner).unwrap();

    assert_eq!(runner.calls[0].program, assistant_core::consts::GIT_EXECUTABLE);
  }
}
