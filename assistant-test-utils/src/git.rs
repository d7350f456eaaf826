//! Git repository management for testing
//!
//! Creates throwaway repositories in temporary directories so tests can run
//! real git commands without touching anything outside the sandbox.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use git2::{BranchType, Repository, Signature};
use tempfile::TempDir;

/// A temporary directory holding a freshly initialized git repository
pub struct GitRepoTestGuard {
  /// The temporary directory containing the git repository
  pub temp_dir: TempDir,
  /// The git repository
  pub repo: Repository,
}

impl GitRepoTestGuard {
  /// Create a new test git repository with a local test identity
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let temp_path = temp_dir.path();

    let repo = Repository::init(temp_path).expect("Failed to initialize git repository");

    // Set test user configuration
    let mut config = repo.config().expect("Failed to get repository config");
    config
      .set_str("user.name", "Assistant Test User")
      .expect("Failed to set user.name");
    config
      .set_str("user.email", "assistant-test@example.com")
      .expect("Failed to set user.email");

    assert!(
      temp_path.join(".git").exists(),
      "Git repository was not properly initialized"
    );

    Self { temp_dir, repo }
  }

  /// Create a test repository that already has one commit on its default
  /// branch
  pub fn with_initial_commit() -> Self {
    let guard = Self::new();
    create_commit(&guard.repo, "README.md", "hello", "initial commit").expect("Failed to create initial commit");
    guard
  }

  /// Get the path to the git repository
  pub fn path(&self) -> &Path {
    self.temp_dir.path()
  }
}

impl Default for GitRepoTestGuard {
  fn default() -> Self {
    Self::new()
  }
}

/// Helper function to create a commit in a repository
pub fn create_commit(repo: &Repository, file_name: &str, content: &str, message: &str) -> Result<()> {
  let repo_path = repo.workdir().context("Repository has no working directory")?;
  fs::write(repo_path.join(file_name), content)?;

  // Stage the file
  let mut index = repo.index()?;
  index.add_path(Path::new(file_name))?;
  index.write()?;

  let tree_id = index.write_tree()?;
  let tree = repo.find_tree(tree_id)?;
  let signature = Signature::now("Test User", "test@example.com")?;

  match repo.head().ok().and_then(|head| head.peel_to_commit().ok()) {
    Some(parent) => repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &[&parent])?,
    None => repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &[])?,
  };

  Ok(())
}

/// Whether a local branch named `branch_name` exists
pub fn branch_exists(repo: &Repository, branch_name: &str) -> bool {
  repo.find_branch(branch_name, BranchType::Local).is_ok()
}
