//! # Settings Store
//!
//! A TOML settings file read once at startup and written back when a command
//! finishes cleanly. The parsed document is kept as-is, so keys the assistant
//! never touches keep their types and layout on write-back. Lookups take a
//! dotted key: `"git.program" = "..."` and `[git] program = "..."` both answer
//! `git.program`, with the literal dotted key winning when both exist.

use std::path::{Path, PathBuf};
use std::{env, fs, io};

use thiserror::Error;
use toml::{Table, Value};
use tracing::debug;

use crate::consts::{CONFIG_KEY_GIT_PROGRAM, DEFAULT_CONFIG_FILE, ENV_CONFIG_PATH, GIT_EXECUTABLE};

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("config file {} not found", .0.display())]
  NotFound(PathBuf),

  #[error("failed to read config from {}", .path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to parse config from {}", .path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },

  #[error("failed to serialize config")]
  Serialize(#[from] toml::ser::Error),

  #[error("failed to write config to {}", .path.display())]
  Write {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// Pick the settings file: explicit path, then [`ENV_CONFIG_PATH`], then
/// [`DEFAULT_CONFIG_FILE`] in the working directory.
pub fn resolve_path(explicit: Option<PathBuf>) -> PathBuf {
  explicit
    .or_else(|| env::var_os(ENV_CONFIG_PATH).filter(|value| !value.is_empty()).map(PathBuf::from))
    .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Key-value settings backed by a TOML file.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigStore {
  path: PathBuf,
  table: Table,
  on_disk: bool,
}

impl ConfigStore {
  /// An empty store for `path`. Nothing is read from disk.
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self {
      path: path.into(),
      table: Table::new(),
      on_disk: false,
    }
  }

  /// Read the settings file at `path`.
  pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
    let path = path.into();

    let content = match fs::read_to_string(&path) {
      Ok(content) => content,
      Err(err) if err.kind() == io::ErrorKind::NotFound => return Err(ConfigError::NotFound(path)),
      Err(source) => return Err(ConfigError::Read { path, source }),
    };

    let table: Table = toml::from_str(&content).map_err(|source| ConfigError::Parse {
      path: path.clone(),
      source,
    })?;
    debug!(path = %path.display(), keys = count_leaves(&table), "Loaded settings");

    Ok(Self {
      path,
      table,
      on_disk: true,
    })
  }

  /// Write the document back to [`ConfigStore::path`], creating parent
  /// directories as needed.
  pub fn save(&self) -> Result<(), ConfigError> {
    if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
      fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
        path: self.path.clone(),
        source,
      })?;
    }

    let content = toml::to_string_pretty(&self.table)?;
    fs::write(&self.path, content).map_err(|source| ConfigError::Write {
      path: self.path.clone(),
      source,
    })?;

    debug!(path = %self.path.display(), keys = self.len(), "Saved settings");
    Ok(())
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Whether the store was read from an existing file.
  pub const fn is_on_disk(&self) -> bool {
    self.on_disk
  }

  /// The raw value stored under dotted `key`.
  pub fn get_value(&self, key: &str) -> Option<&Value> {
    let path = locate(&self.table, key)?;
    lookup(&self.table, &path)
  }

  /// The string stored under dotted `key`. Non-string values yield `None`.
  pub fn get(&self, key: &str) -> Option<&str> {
    self.get_value(key).and_then(Value::as_str)
  }

  /// Store a string under `key`. An existing entry is replaced where it
  /// lives; a new key is written as a literal dotted key at the top level.
  pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
    let key = key.into();
    let value = Value::String(value.into());

    if let Some(slot) = locate(&self.table, &key).and_then(|path| lookup_mut(&mut self.table, &path)) {
      *slot = value;
      return;
    }
    self.table.insert(key, value);
  }

  /// Number of settings, counting every non-table value.
  pub fn len(&self) -> usize {
    count_leaves(&self.table)
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// The external tool to run, honouring a `git.program` override.
  pub fn git_program(&self) -> &str {
    self
      .get(CONFIG_KEY_GIT_PROGRAM)
      .filter(|program| !program.trim().is_empty())
      .unwrap_or(GIT_EXECUTABLE)
  }
}

/// Resolve dotted `key` to the table path of a non-table value. A literal key
/// is preferred over descending into a nested table.
fn locate(table: &Table, key: &str) -> Option<Vec<String>> {
  if table.get(key).is_some_and(|value| !value.is_table()) {
    return Some(vec![key.to_string()]);
  }

  key.match_indices('.').find_map(|(index, _)| {
    let nested = table.get(&key[..index])?.as_table()?;
    let mut path = locate(nested, &key[index + 1..])?;
    path.insert(0, key[..index].to_string());
    Some(path)
  })
}

fn lookup<'a>(table: &'a Table, path: &[String]) -> Option<&'a Value> {
  let (last, parents) = path.split_last()?;
  let mut current = table;
  for segment in parents {
    current = current.get(segment)?.as_table()?;
  }
  current.get(last)
}

fn lookup_mut<'a>(table: &'a mut Table, path: &[String]) -> Option<&'a mut Value> {
  let (last, parents) = path.split_last()?;
  let mut current = table;
  for segment in parents {
    current = current.get_mut(segment)?.as_table_mut()?;
  }
  current.get_mut(last)
}

fn count_leaves(table: &Table) -> usize {
  table
    .values()
    .map(|value| match value {
      Value::Table(nested) => count_leaves(nested),
      _ => 1,
    })
    .sum()
}

#[cfg(test)]
mod tests {
  use assistant_test_utils::EnvVarGuard;
  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_missing_file_is_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");

    let err = ConfigStore::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::NotFound(ref missing) if missing == &path));
  }

  #[test]
  fn test_nested_and_dotted_keys_resolve() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(
      &path,
      r#"
"editor.name" = "vim"
retries = 3
verbose = true

[git]
program = "/usr/local/bin/git"
"#,
    )
    .unwrap();

    let store = ConfigStore::load(&path).unwrap();

    assert!(store.is_on_disk());
    assert_eq!(store.get("editor.name"), Some("vim"));
    assert_eq!(store.get("git.program"), Some("/usr/local/bin/git"));
    assert_eq!(store.get_value("retries"), Some(&Value::Integer(3)));
    assert_eq!(store.get("verbose"), None);
    assert_eq!(store.len(), 4);
    assert_eq!(store.git_program(), "/usr/local/bin/git");
  }

  #[test]
  fn test_save_then_load_preserves_keys() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("config.toml");

    let mut store = ConfigStore::new(&path);
    store.set("git.program", "git");
    store.set("theme", "dark");
    store.save().unwrap();

    let reloaded = ConfigStore::load(&path).unwrap();
    assert_eq!(reloaded.get("git.program"), Some("git"));
    assert_eq!(reloaded.get("theme"), Some("dark"));
    assert_eq!(reloaded.len(), 2);
  }

  #[test]
  fn test_save_keeps_value_types_and_layout() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(
      &path,
      r#"retries = 3
verbose = true
tags = ["a", "b"]

[git]
program = "git"
"#,
    )
    .unwrap();

    ConfigStore::load(&path).unwrap().save().unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("retries = 3"), "{text}");
    assert!(text.contains("verbose = true"), "{text}");
    assert!(text.contains("[git]"), "{text}");

    let table: Table = toml::from_str(&text).unwrap();
    assert_eq!(table["retries"].as_integer(), Some(3));
    assert_eq!(table["verbose"].as_bool(), Some(true));
    assert_eq!(
      table["tags"].as_array().unwrap(),
      &vec![Value::from("a"), Value::from("b")]
    );
    assert_eq!(table["git"]["program"].as_str(), Some("git"));
  }

  #[test]
  fn test_literal_and_nested_keys_stay_distinct() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, "\"git.program\" = \"/opt/git\"\n\n[git]\nprogram = \"/usr/bin/git\"\n").unwrap();

    let mut store = ConfigStore::load(&path).unwrap();
    assert_eq!(store.git_program(), "/opt/git");
    assert_eq!(store.len(), 2);

    store.set("git.program", "/usr/local/bin/git");
    store.save().unwrap();

    let table: Table = toml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(table["git.program"].as_str(), Some("/usr/local/bin/git"));
    assert_eq!(table["git"]["program"].as_str(), Some("/usr/bin/git"));
  }

  #[test]
  fn test_set_replaces_nested_entry_in_place() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, "[git]\nprogram = \"git\"\n").unwrap();

    let mut store = ConfigStore::load(&path).unwrap();
    store.set("git.program", "/usr/bin/git");
    store.set("theme", "dark");
    store.save().unwrap();

    let table: Table = toml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(table["git"]["program"].as_str(), Some("/usr/bin/git"));
    assert_eq!(table["theme"].as_str(), Some("dark"));
    assert!(!table.contains_key("git.program"));
  }

  #[test]
  fn test_invalid_toml_is_a_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, "this is = = not toml").unwrap();

    assert!(matches!(ConfigStore::load(&path), Err(ConfigError::Parse { .. })));
  }

  #[test]
  fn test_git_program_defaults_when_unset_or_blank() {
    let mut store = ConfigStore::new("config.toml");
    assert_eq!(store.git_program(), GIT_EXECUTABLE);
    assert!(!store.is_on_disk());

    store.set(CONFIG_KEY_GIT_PROGRAM, "  ");
    assert_eq!(store.git_program(), GIT_EXECUTABLE);
  }

  #[test]
  fn test_resolve_path_precedence() {
    let explicit = PathBuf::from("/tmp/elsewhere.toml");

    {
      let _guard = EnvVarGuard::set(ENV_CONFIG_PATH, "/etc/assistant.toml");
      assert_eq!(resolve_path(Some(explicit.clone())), explicit);
      assert_eq!(resolve_path(None), PathBuf::from("/etc/assistant.toml"));
    }

    let _guard = EnvVarGuard::remove(ENV_CONFIG_PATH);
    assert_eq!(resolve_path(None), PathBuf::from(DEFAULT_CONFIG_FILE));
  }
}
