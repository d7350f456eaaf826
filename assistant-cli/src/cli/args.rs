//! Argument structs for the subcommands that take values.
//!
//! Values are optional at parse time; the command table decides which ones
//! are required.

use assistant_core::{CommandInput, Field};
use clap::Args;
use tracing::warn;

/// Arguments for the configure command
#[derive(Args, Debug)]
pub struct ConfigureArgs {
  /// User name to record in the global git config
  #[arg(long, value_name = "NAME")]
  pub name: Option<String>,

  /// Email address to record in the global git config
  #[arg(long, value_name = "EMAIL")]
  pub email: Option<String>,
}

impl ConfigureArgs {
  pub fn into_input(self) -> CommandInput {
    let mut input = CommandInput::new();
    input.set(Field::Name, self.name);
    input.set(Field::Email, self.email);
    input
  }
}

/// Arguments for the branch command
#[derive(Args, Debug)]
pub struct BranchArgs {
  /// Name of the branch to create
  #[arg(value_name = "NAME")]
  pub name: Option<String>,
}

impl BranchArgs {
  pub fn into_input(self) -> CommandInput {
    let mut input = CommandInput::new();
    input.set(Field::Name, self.name);
    input
  }
}

/// Arguments for the commit command
#[derive(Args, Debug)]
pub struct CommitArgs {
  /// Commit message
  #[arg(value_name = "MESSAGE")]
  pub message: Option<String>,

  /// Words after the message, accepted and ignored
  #[arg(hide = true, value_name = "IGNORED")]
  pub extra: Vec<String>,
}

impl CommitArgs {
  pub fn into_input(self) -> CommandInput {
    if !self.extra.is_empty() {
      warn!(ignored = ?self.extra, "Only the first commit argument is used as the message; quote multi-word messages");
    }

    let mut input = CommandInput::new();
    input.set(Field::Message, self.message);
    input
  }
}

/// Arguments for the add-remote-branch command
#[derive(Args, Debug)]
pub struct AddRemoteBranchArgs {
  /// Remote to push to
  #[arg(long, value_name = "REMOTE")]
  pub remote: Option<String>,

  /// Branch to push and track
  #[arg(long, value_name = "BRANCH")]
  pub branch: Option<String>,
}

impl AddRemoteBranchArgs {
  pub fn into_input(self) -> CommandInput {
    let mut input = CommandInput::new();
    input.set(Field::Remote, self.remote);
    input.set(Field::Branch, self.branch);
    input
  }
}

/// Arguments for the rebase command
#[derive(Args, Debug)]
pub struct RebaseArgs {
  /// Branch to rebase onto
  #[arg(long, value_name = "BRANCH")]
  pub branch: Option<String>,
}

impl RebaseArgs {
  pub fn into_input(self) -> CommandInput {
    let mut input = CommandInput::new();
    input.set(Field::Branch, self.branch);
    input
  }
}
