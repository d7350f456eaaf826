//! # Command Dispatch
//!
//! Validates a command's input against its [`CommandSpec`] and runs the
//! resulting invocations in order through a [`CommandRunner`].

use std::io;

use thiserror::Error;
use tracing::{debug, info};

use crate::commands::{CommandInput, CommandRegistry, Field};
use crate::process::{CommandRunner, Invocation, RunOutcome};

/// Why a command did not complete.
#[derive(Debug, Error)]
pub enum DispatchError {
  #[error("unknown command '{0}'")]
  UnknownCommand(String),

  #[error("{command}: {} required", describe_fields(.fields))]
  MissingFields { command: &'static str, fields: Vec<Field> },

  #[error("{command}: refusing to run '{program}' with no arguments")]
  EmptyInvocation { command: &'static str, program: String },

  #[error("failed to start '{invocation}'")]
  Spawn {
    invocation: String,
    #[source]
    source: io::Error,
  },

  #[error("'{invocation}' {}", describe_exit(.code))]
  Failed { invocation: String, code: Option<i32> },
}

impl DispatchError {
  /// True for errors raised before any external process was started.
  pub const fn is_validation(&self) -> bool {
    matches!(
      self,
      DispatchError::UnknownCommand(_) | DispatchError::MissingFields { .. } | DispatchError::EmptyInvocation { .. }
    )
  }
}

fn describe_fields(fields: &[Field]) -> String {
  fields.iter().map(|field| field.as_str()).collect::<Vec<_>>().join(", ")
}

fn describe_exit(code: &Option<i32>) -> String {
  match code {
    Some(code) => format!("exited with status {code}"),
    None => "was terminated by a signal".to_string(),
  }
}

/// Record of the invocations a successful dispatch ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
  pub command: &'static str,
  pub runs: Vec<(Invocation, RunOutcome)>,
}

/// Run `name` with `input`, using `program` as the external tool.
///
/// Validation happens before anything is spawned. Invocations run one after
/// the other and the first failure stops the command.
pub fn dispatch<R>(
  registry: &CommandRegistry,
  program: &str,
  name: &str,
  input: &CommandInput,
  runner: &mut R,
) -> Result<DispatchReport, DispatchError>
where
  R: CommandRunner + ?Sized,
{
  let spec = registry
    .get(name)
    .ok_or_else(|| DispatchError::UnknownCommand(name.to_string()))?;

  let missing = spec.missing_fields(input);
  if !missing.is_empty() {
    return Err(DispatchError::MissingFields {
      command: spec.name,
      fields: missing,
    });
  }

  let invocations = spec.invocations(program, input);
  if let Some(empty) = invocations.iter().find(|invocation| invocation.args.is_empty()) {
    return Err(DispatchError::EmptyInvocation {
      command: spec.name,
      program: empty.program.clone(),
    });
  }

  let mut runs = Vec::with_capacity(invocations.len());
  for invocation in invocations {
    debug!(command = spec.name, %invocation, "Running external tool");

    let outcome = runner.run(&invocation).map_err(|source| DispatchError::Spawn {
      invocation: invocation.to_string(),
      source,
    })?;

    if !outcome.success {
      return Err(DispatchError::Failed {
        invocation: invocation.to_string(),
        code: outcome.code,
      });
    }

    runs.push((invocation, outcome));
  }

  info!(command = spec.name, runs = runs.len(), "Command completed");

  Ok(DispatchReport {
    command: spec.name,
    runs,
  })
}
