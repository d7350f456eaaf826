//! Server settings read from the process environment.

use std::env;
use std::net::{Ipv4Addr, SocketAddr};
use std::num::ParseIntError;

use thiserror::Error;

/// Environment variable holding the listening port
pub const ENV_PORT: &str = "PORT";

#[derive(Debug, Error)]
pub enum SettingsError {
  #[error("PORT is not set")]
  MissingPort,

  #[error("PORT={value:?} is not a valid port number")]
  InvalidPort {
    value: String,
    #[source]
    source: ParseIntError,
  },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
  pub port: u16,
}

impl Settings {
  /// Read settings from the process environment.
  pub fn from_env() -> Result<Self, SettingsError> {
    Self::from_lookup(|key| env::var(key).ok())
  }

  /// Read settings through `lookup`, which maps a variable name to its value.
  pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let raw = lookup(ENV_PORT).ok_or(SettingsError::MissingPort)?;
    let value = raw.trim();
    if value.is_empty() {
      return Err(SettingsError::MissingPort);
    }

    let port = value.parse().map_err(|source| SettingsError::InvalidPort {
      value: value.to_string(),
      source,
    })?;

    Ok(Self { port })
  }

  /// Every interface on the configured port.
  pub const fn listen_addr(&self) -> SocketAddr {
    SocketAddr::new(std::net::IpAddr::V4(Ipv4Addr::UNSPECIFIED), self.port)
  }
}
