//! # External Process Helpers
//!
//! Spawning of external tool sub-processes. Every call goes through the
//! [`CommandRunner`] trait so the dispatcher can be exercised without a real
//! git binary; [`ProcessRunner`] is the implementation backed by
//! [`std::process::Command`].

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::trace;

/// A single external tool call: the program plus its argument vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
  pub program: String,
  pub args: Vec<String>,
}

impl Invocation {
  pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      program: program.into(),
      args: args.into_iter().map(Into::into).collect(),
    }
  }

  /// The argument vector as borrowed string slices.
  pub fn arg_strs(&self) -> Vec<&str> {
    self.args.iter().map(String::as_str).collect()
  }
}

impl fmt::Display for Invocation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.program)?;
    for arg in &self.args {
      if arg.is_empty() || arg.contains(char::is_whitespace) {
        write!(f, " {arg:?}")?;
      } else {
        write!(f, " {arg}")?;
      }
    }
    Ok(())
  }
}

/// Result of running an [`Invocation`] to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
  /// Whether the process exited with status code 0.
  pub success: bool,
  /// Exit code, `None` when the process was terminated by a signal.
  pub code: Option<i32>,
  /// Combined stdout and stderr text. Always empty when the streams were
  /// forwarded to the caller's console.
  pub output: String,
}

impl RunOutcome {
  /// Outcome of a process that exited cleanly without captured output.
  pub const fn success() -> Self {
    Self {
      success: true,
      code: Some(0),
      output: String::new(),
    }
  }

  /// Outcome of a process that exited with `code`.
  pub fn exited(code: i32) -> Self {
    Self {
      success: code == 0,
      code: Some(code),
      output: String::new(),
    }
  }
}

/// Runs invocations synchronously and reports how they ended.
///
/// An `Err` means the process could not be started at all (binary missing,
/// permission denied). A process that started and exited non-zero is an
/// `Ok` outcome with `success == false`.
pub trait CommandRunner {
  fn run(&mut self, invocation: &Invocation) -> io::Result<RunOutcome>;
}

/// How the child's standard streams are wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamMode {
  /// Forward stdin/stdout/stderr to the caller's console as they happen.
  #[default]
  Inherit,
  /// Collect stdout and stderr into [`RunOutcome::output`].
  Capture,
}

/// [`CommandRunner`] that spawns real processes.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
  mode: StreamMode,
  current_dir: Option<PathBuf>,
}

impl ProcessRunner {
  /// Runner that streams the child's output live.
  pub fn inherit() -> Self {
    Self::default()
  }

  /// Runner that captures the child's output.
  pub fn capture() -> Self {
    Self {
      mode: StreamMode::Capture,
      current_dir: None,
    }
  }

  /// Run children in `dir` instead of the current working directory.
  pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.current_dir = Some(dir.into());
    self
  }

  fn command(&self, invocation: &Invocation) -> Command {
    let mut command = Command::new(&invocation.program);
    command.args(&invocation.args);
    if let Some(dir) = &self.current_dir {
      command.current_dir(dir);
    }
    command
  }
}

impl CommandRunner for ProcessRunner {
  fn run(&mut self, invocation: &Invocation) -> io::Result<RunOutcome> {
    trace!(%invocation, mode = ?self.mode, "spawning process");
    let mut command = self.command(invocation);

    match self.mode {
      StreamMode::Inherit => {
        let status = command
          .stdin(Stdio::inherit())
          .stdout(Stdio::inherit())
          .stderr(Stdio::inherit())
          .status()?;

        Ok(RunOutcome {
          success: status.success(),
          code: status.code(),
          output: String::new(),
        })
      }
      StreamMode::Capture => {
        let output = command.output()?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        let mut combined = String::new();
        if !stdout.is_empty() {
          combined.push_str(&stdout);
        }
        if !stderr.is_empty() {
          if !combined.is_empty() {
            combined.push('\n');
          }
          combined.push_str(&stderr);
        }

        Ok(RunOutcome {
          success: output.status.success(),
          code: output.status.code(),
          output: combined,
        })
      }
    }
  }
}
