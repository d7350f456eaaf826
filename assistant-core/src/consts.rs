//! Constants shared across git-assistant components.

/// Platform-specific Git executable name
#[cfg(windows)]
pub const GIT_EXECUTABLE: &str = "git.exe";

/// Platform-specific Git executable name
#[cfg(not(windows))]
pub const GIT_EXECUTABLE: &str = "git";

/// Environment variable that overrides the settings file location
pub const ENV_CONFIG_PATH: &str = "GIT_ASSISTANT_CONFIG";

/// Settings file looked up in the working directory when nothing overrides it
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Settings key naming the external tool to run instead of [`GIT_EXECUTABLE`]
pub const CONFIG_KEY_GIT_PROGRAM: &str = "git.program";
