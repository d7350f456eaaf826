//! Environment variable management for testing
//!
//! Overrides a single variable for the lifetime of a guard and restores the
//! previous value when the guard is dropped.

use std::env;
use std::ffi::{OsStr, OsString};

/// Sets or removes one environment variable, restoring it on drop
pub struct EnvVarGuard {
  key: OsString,
  original: Option<OsString>,
}

impl EnvVarGuard {
  /// Set `key` to `value` until the guard is dropped
  pub fn set(key: impl AsRef<OsStr>, value: impl AsRef<OsStr>) -> Self {
    let key = key.as_ref().to_os_string();
    let original = env::var_os(&key);

    // SAFETY: tests that touch the environment must not run concurrently with
    // other readers of the same variable.
    unsafe {
      env::set_var(&key, value);
    }

    Self { key, original }
  }

  /// Remove `key` until the guard is dropped
  pub fn remove(key: impl AsRef<OsStr>) -> Self {
    let key = key.as_ref().to_os_string();
    let original = env::var_os(&key);

    // SAFETY: see `EnvVarGuard::set`.
    unsafe {
      env::remove_var(&key);
    }

    Self { key, original }
  }
}

impl Drop for EnvVarGuard {
  fn drop(&mut self) {
    match &self.original {
      // SAFETY: see `EnvVarGuard::set`.
      Some(value) => unsafe {
        env::set_var(&self.key, value);
      },
      // SAFETY: see `EnvVarGuard::set`.
      None => unsafe {
        env::remove_var(&self.key);
      },
    }
  }
}
