//! # Command Table
//!
//! Descriptors for every subcommand git-assistant understands. Each
//! [`CommandSpec`] names the input fields it requires and knows how to turn a
//! [`CommandInput`] into the git argument vectors to run. The full table is
//! built once at startup with [`CommandRegistry::git_defaults`] and handed to
//! [`crate::dispatch`].

use std::collections::BTreeMap;
use std::fmt;

use crate::process::Invocation;

/// Named values a subcommand can receive from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
  Name,
  Email,
  Message,
  Remote,
  Branch,
}

impl Field {
  pub const fn as_str(self) -> &'static str {
    match self {
      Field::Name => "name",
      Field::Email => "email",
      Field::Message => "message",
      Field::Remote => "remote",
      Field::Branch => "branch",
    }
  }
}

impl fmt::Display for Field {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Values collected for one command invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandInput {
  values: BTreeMap<Field, String>,
}

impl CommandInput {
  pub fn new() -> Self {
    Self::default()
  }

  /// Builder-style setter.
  pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
    self.values.insert(field, value.into());
    self
  }

  /// Store `value` when present, leave the field unset otherwise.
  pub fn set(&mut self, field: Field, value: Option<String>) {
    if let Some(value) = value {
      self.values.insert(field, value);
    }
  }

  pub fn get(&self, field: Field) -> Option<&str> {
    self.values.get(&field).map(String::as_str)
  }

  /// The field's value, or the empty string when unset.
  pub fn value(&self, field: Field) -> &str {
    self.get(field).unwrap_or_default()
  }

  /// Whether `field` holds something other than whitespace.
  pub fn is_filled(&self, field: Field) -> bool {
    self.get(field).is_some_and(|value| !value.trim().is_empty())
  }
}

type ArgsBuilder = fn(&CommandInput) -> Vec<Vec<String>>;

/// Descriptor for a single subcommand.
#[derive(Clone)]
pub struct CommandSpec {
  pub name: &'static str,
  pub required: &'static [Field],
  build: ArgsBuilder,
}

impl fmt::Debug for CommandSpec {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CommandSpec")
      .field("name", &self.name)
      .field("required", &self.required)
      .finish_non_exhaustive()
  }
}

impl CommandSpec {
  pub const fn new(name: &'static str, required: &'static [Field], build: ArgsBuilder) -> Self {
    Self { name, required, build }
  }

  /// Required fields that are unset or blank in `input`, in declaration
  /// order.
  pub fn missing_fields(&self, input: &CommandInput) -> Vec<Field> {
    self
      .required
      .iter()
      .copied()
      .filter(|field| !input.is_filled(*field))
      .collect()
  }

  /// Build the external tool calls for `input`, in the order they must run.
  ///
  /// Does not validate; callers check [`CommandSpec::missing_fields`] first.
  pub fn invocations(&self, program: &str, input: &CommandInput) -> Vec<Invocation> {
    (self.build)(input)
      .into_iter()
      .map(|args| Invocation::new(program, args))
      .collect()
  }
}

fn args<const N: usize>(parts: [&str; N]) -> Vec<String> {
  parts.iter().map(|part| (*part).to_string()).collect()
}

fn configure_args(input: &CommandInput) -> Vec<Vec<String>> {
  vec![
    args(["config", "--global", "user.name", input.value(Field::Name)]),
    args(["config", "--global", "user.email", input.value(Field::Email)]),
  ]
}

fn init_args(_: &CommandInput) -> Vec<Vec<String>> {
  vec![args(["init"])]
}

fn branch_args(input: &CommandInput) -> Vec<Vec<String>> {
  vec![args(["branch", input.value(Field::Name)])]
}

fn list_branches_args(_: &CommandInput) -> Vec<Vec<String>> {
  vec![args(["branch"])]
}

fn status_args(_: &CommandInput) -> Vec<Vec<String>> {
  vec![args(["status"])]
}

// An empty message is passed through as-is; git decides whether to accept it.
fn commit_args(input: &CommandInput) -> Vec<Vec<String>> {
  vec![args(["commit", "-m", input.value(Field::Message)])]
}

fn push_args(_: &CommandInput) -> Vec<Vec<String>> {
  vec![args(["push"])]
}

fn add_remote_branch_args(input: &CommandInput) -> Vec<Vec<String>> {
  vec![args([
    "push",
    "--set-upstream",
    input.value(Field::Remote),
    input.value(Field::Branch),
  ])]
}

fn rebase_args(input: &CommandInput) -> Vec<Vec<String>> {
  vec![args(["rebase", input.value(Field::Branch)])]
}

/// Lookup table of every known [`CommandSpec`].
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
  specs: Vec<CommandSpec>,
}

impl CommandRegistry {
  pub fn new(specs: Vec<CommandSpec>) -> Self {
    Self { specs }
  }

  /// The git-backed command set.
  pub fn git_defaults() -> Self {
    Self::new(vec![
      CommandSpec::new("configure", &[Field::Name, Field::Email], configure_args),
      CommandSpec::new("init", &[], init_args),
      CommandSpec::new("branch", &[Field::Name], branch_args),
      CommandSpec::new("list-branches", &[], list_branches_args),
      CommandSpec::new("status", &[], status_args),
      CommandSpec::new("commit", &[], commit_args),
      CommandSpec::new("push", &[], push_args),
      CommandSpec::new("add-remote-branch", &[Field::Remote, Field::Branch], add_remote_branch_args),
      CommandSpec::new("rebase", &[Field::Branch], rebase_args),
    ])
  }

  pub fn get(&self, name: &str) -> Option<&CommandSpec> {
    self.specs.iter().find(|spec| spec.name == name)
  }

  pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
    self.specs.iter().map(|spec| spec.name)
  }
}
