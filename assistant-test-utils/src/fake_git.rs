//! A recording stand-in for the git binary
//!
//! [`FakeGitGuard`] writes a small shell script that appends its argument
//! vector to a log file and exits with the code found in
//! [`FakeGitGuard::EXIT_CODE_VAR`] (default 0). Pointing git-assistant at
//! the script lets tests assert the exact calls a command makes without
//! touching the user's global git configuration.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tempfile::TempDir;

/// Temporary directory holding the fake git script and its call log
pub struct FakeGitGuard {
  pub temp_dir: TempDir,
  script: PathBuf,
  log: PathBuf,
}

impl FakeGitGuard {
  /// Environment variable read by the script to choose its exit code
  pub const EXIT_CODE_VAR: &'static str = "FAKE_GIT_EXIT";

  /// Create the script and an empty call log
  #[cfg(unix)]
  pub fn new() -> Self {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let script = temp_dir.path().join("fake-git");
    let log = temp_dir.path().join("calls.log");

    // Each call becomes one line: every argument followed by a tab.
    let body = format!(
      "#!/bin/sh\nfor arg in \"$@\"; do printf '%s\\t' \"$arg\" >> '{log}'; done\nprintf '\\n' >> '{log}'\nexit \"${{{var}:-0}}\"\n",
      log = log.display(),
      var = Self::EXIT_CODE_VAR,
    );
    fs::write(&script, body).expect("Failed to write fake git script");
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).expect("Failed to mark fake git executable");
    fs::write(&log, "").expect("Failed to create fake git log");

    Self { temp_dir, script, log }
  }

  /// Path of the executable script
  pub fn program(&self) -> &Path {
    &self.script
  }

  /// Write a settings file at `path` that points git-assistant at the script
  pub fn write_config(&self, path: &Path) -> Result<()> {
    let content = format!("\"git.program\" = {:?}\n", self.script.display().to_string());
    fs::write(path, content)?;
    Ok(())
  }

  /// Every recorded call, oldest first, as argument vectors
  pub fn calls(&self) -> Result<Vec<Vec<String>>> {
    let content = fs::read_to_string(&self.log)?;
    Ok(content.lines().map(parse_call).collect())
  }
}

#[cfg(unix)]
impl Default for FakeGitGuard {
  fn default() -> Self {
    Self::new()
  }
}

fn parse_call(line: &str) -> Vec<String> {
  let mut args: Vec<String> = line.split('\t').map(str::to_string).collect();
  // Every argument is tab-terminated, so the final piece is always empty
  args.pop();
  args
}

#[cfg(all(test, unix))]
mod tests {
  use std::process::Command;

  use super::*;

  #[test]
  fn test_records_arguments_including_empty_ones() {
    let fake = FakeGitGuard::new();

    let status = Command::new(fake.program())
      .args(["commit", "-m", ""])
      .status()
      .unwrap();
    assert!(status.success());

    let status = Command::new(fake.program()).status().unwrap();
    assert!(status.success());

    assert_eq!(
      fake.calls().unwrap(),
      vec![vec!["commit".to_string(), "-m".to_string(), String::new()], Vec::<String>::new()]
    );
  }

  #[test]
  fn test_exit_code_is_configurable() {
    let fake = FakeGitGuard::new();

    let status = Command::new(fake.program())
      .arg("push")
      .env(FakeGitGuard::EXIT_CODE_VAR, "4")
      .status()
      .unwrap();

    assert_eq!(status.code(), Some(4));
  }
}
