//! # Command Line Interface
//!
//! Defines the CLI structure for git-assistant. Every subcommand converts
//! into a command name plus a [`CommandInput`]; validation is left to the
//! dispatcher so a missing value never reaches git.

mod args;

use std::path::PathBuf;

use assistant_core::{ColorMode, CommandInput};
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Parser, Subcommand};

pub use self::args::{AddRemoteBranchArgs, BranchArgs, CommitArgs, ConfigureArgs, RebaseArgs};

/// Top-level CLI command for git-assistant
#[derive(Parser, Debug)]
#[command(name = "git-assistant")]
#[command(about = "A command-line assistant for everyday git operations")]
#[command(long_about = "A command-line assistant for everyday git operations.\n\n\
        Each subcommand runs the matching git command in the current directory,\n\
        streaming its output and exiting with its status. Required values that\n\
        are empty or contain only whitespace are rejected before git runs.")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"))]
#[command(propagate_version = true)]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    global = true,
    action = ArgAction::Count,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(
    long,
    global = true,
    value_enum,
    ignore_case = true,
    default_value_t = ColorMode::Auto,
  )]
  pub colors: ColorMode,

  /// Settings file to load and save (defaults to ./config.toml)
  #[arg(
    long,
    global = true,
    value_name = "PATH",
    long_help = "Settings file to load at start and write back after a successful command.\n\n\
             Falls back to $GIT_ASSISTANT_CONFIG, then to config.toml in the current directory."
  )]
  pub config: Option<PathBuf>,

  /// Subcommands
  #[command(subcommand)]
  pub command: Option<Commands>,
}

/// Subcommands for git-assistant
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Set the global git user name and email
  #[command(long_about = "Set the global git user name and email.\n\n\
            Runs `git config --global user.name` followed by\n\
            `git config --global user.email`. Both values are required and\n\
            must not be blank or whitespace-only.")]
  Configure(ConfigureArgs),

  /// Initialize a new git repository
  Init,

  /// Create a new branch
  Branch(BranchArgs),

  /// List all branches in the repository
  ListBranches,

  /// Show the repository status
  Status,

  /// Commit staged changes
  #[command(long_about = "Commit staged changes.\n\n\
            The message is optional; without one an empty message is passed\n\
            to git, which will normally refuse it. Only the first argument is\n\
            used, so quote multi-word messages; any further words are ignored.")]
  Commit(CommitArgs),

  /// Push changes to the remote repository
  Push,

  /// Push a branch and track it on a remote
  #[command(long_about = "Push a branch to a remote and set it as the upstream.\n\n\
            Runs `git push --set-upstream <remote> <branch>`.")]
  AddRemoteBranch(AddRemoteBranchArgs),

  /// Rebase the current branch onto another
  Rebase(RebaseArgs),
}

impl Commands {
  /// The command table entry this subcommand runs, and its input values.
  pub fn into_request(self) -> (&'static str, CommandInput) {
    match self {
      Commands::Configure(args) => ("configure", args.into_input()),
      Commands::Init => ("init", CommandInput::new()),
      Commands::Branch(args) => ("branch", args.into_input()),
      Commands::ListBranches => ("list-branches", CommandInput::new()),
      Commands::Status => ("status", CommandInput::new()),
      Commands::Commit(args) => ("commit", args.into_input()),
      Commands::Push => ("push", CommandInput::new()),
      Commands::AddRemoteBranch(args) => ("add-remote-branch", args.into_input()),
      Commands::Rebase(args) => ("rebase", args.into_input()),
    }
  }
}

#[cfg(test)]
mod tests {
  use assistant_core::{CommandRegistry, Field};
  use clap::CommandFactory;

  use super::*;

  fn request(argv: &[&str]) -> (&'static str, CommandInput) {
    let cli = Cli::try_parse_from(argv).unwrap();
    cli.command.unwrap().into_request()
  }

  #[test]
  fn test_cli_definition_is_consistent() {
    Cli::command().debug_assert();
  }

  #[test]
  fn test_no_subcommand_parses() {
    let cli = Cli::try_parse_from(["git-assistant"]).unwrap();
    assert!(cli.command.is_none());
  }

  #[test]
  fn test_every_subcommand_has_a_table_entry() {
    let registry = CommandRegistry::git_defaults();
    let argvs: [&[&str]; 9] = [
      &["git-assistant", "configure"],
      &["git-assistant", "init"],
      &["git-assistant", "branch"],
      &["git-assistant", "list-branches"],
      &["git-assistant", "status"],
      &["git-assistant", "commit"],
      &["git-assistant", "push"],
      &["git-assistant", "add-remote-branch"],
      &["git-assistant", "rebase"],
    ];

    for argv in argvs {
      let (name, _) = request(argv);
      assert_eq!(name, argv[1]);
      assert!(registry.get(name).is_some(), "{name} missing from the command table");
    }
  }

  #[test]
  fn test_configure_flags() {
    let (name, input) = request(&["git-assistant", "configure", "--name", "Alice", "--email", "a@example.com"]);

    assert_eq!(name, "configure");
    assert_eq!(input.get(Field::Name), Some("Alice"));
    assert_eq!(input.get(Field::Email), Some("a@example.com"));
  }

  #[test]
  fn test_branch_and_commit_positionals() {
    let (_, input) = request(&["git-assistant", "branch", "feature/login"]);
    assert_eq!(input.get(Field::Name), Some("feature/login"));

    let (_, input) = request(&["git-assistant", "commit", "fix the build"]);
    assert_eq!(input.get(Field::Message), Some("fix the build"));

    let (_, input) = request(&["git-assistant", "commit"]);
    assert_eq!(input.get(Field::Message), None);
  }

  #[test]
  fn test_commit_ignores_words_after_the_message() {
    let (name, input) = request(&["git-assistant", "commit", "first", "second", "third"]);

    assert_eq!(name, "commit");
    assert_eq!(input.get(Field::Message), Some("first"));
  }

  #[test]
  fn test_help_mentions_blank_values_are_rejected() {
    let help = Cli::command().render_long_help().to_string();
    assert!(help.contains("whitespace"), "{help}");

    let mut command = Cli::command();
    let configure = command.find_subcommand_mut("configure").unwrap();
    let help = configure.render_long_help().to_string();
    assert!(help.contains("whitespace-only"), "{help}");
  }

  #[test]
  fn test_remote_branch_and_rebase_flags() {
    let (_, input) = request(&["git-assistant", "add-remote-branch", "--remote", "origin", "--branch", "feature"]);
    assert_eq!(input.get(Field::Remote), Some("origin"));
    assert_eq!(input.get(Field::Branch), Some("feature"));

    let (_, input) = request(&["git-assistant", "rebase", "--branch", "main"]);
    assert_eq!(input.get(Field::Branch), Some("main"));
  }

  #[test]
  fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["git-assistant", "status", "-vv", "--colors", "never", "--config", "x.toml"]).unwrap();

    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.colors, ColorMode::Never);
    assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
  }
}
