//! Test utilities shared across the git-assistant workspace
//!
//! This crate provides common testing infrastructure including:
//! - Environment variable isolation ([`EnvVarGuard`])
//! - Throwaway git repositories ([`GitRepoTestGuard`])
//! - A recording stand-in for the git binary ([`FakeGitGuard`])
//!
//! The dead_code lint is disabled for this crate because test utilities may
//! not be used by all tests, and the compiler cannot detect usage across
//! crate boundaries in development dependencies.

#![allow(dead_code)]

pub mod env;
pub mod fake_git;
pub mod git;

// Re-export commonly used items
pub use env::EnvVarGuard;
pub use fake_git::FakeGitGuard;
pub use git::{GitRepoTestGuard, branch_exists, create_commit};
