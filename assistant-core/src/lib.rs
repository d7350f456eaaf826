//! # git-assistant core library
//!
//! Building blocks shared by the `git-assistant` binary: the command table
//! that maps subcommands to git argument vectors, the dispatcher that runs
//! them through a [`CommandRunner`], the flat settings store, and the styled
//! terminal output helpers.

pub mod commands;
pub mod config;
pub mod consts;
pub mod dispatch;
pub mod output;
pub mod process;

pub use commands::{CommandInput, CommandRegistry, CommandSpec, Field};
pub use config::{ConfigError, ConfigStore};
pub use dispatch::{DispatchError, DispatchReport, dispatch};
pub use output::{ColorMode, print_error};
pub use process::{CommandRunner, Invocation, ProcessRunner, RunOutcome, StreamMode};
