//! # git-assistant CLI Library
//!
//! Argument parsing and the run loop for the `git-assistant` binary. The
//! command table and process plumbing live in `assistant-core`.

pub mod app;
pub mod cli;
