use medialib_config::{ConfigBackend, ConfigError, ConfigSection, MedialibPaths, TomlConfigBackend};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const JOURNAL_MODES: &[&str] = &["DELETE", "TRUNCATE", "PERSIST", "MEMORY", "WAL", "OFF"];

/// `[storage]` section of `medialib.toml`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct StorageConfig {
  /// Relative paths are resolved against the data directory.
  pub db_path: PathBuf,
  /// SQLite journal mode, any case. `None` keeps the SQLite default.
  pub journal_mode: Option<String>,
  #[serde(default = "default_busy_timeout_ms")]
  pub busy_timeout_ms: u32,
  #[serde(default = "default_pool_size")]
  pub pool_size: u32,
}

fn default_busy_timeout_ms() -> u32 {
  5_000
}

fn default_pool_size() -> u32 {
  4
}

impl Default for StorageConfig {
  fn default() -> Self {
    StorageConfig {
      db_path: PathBuf::from("medialib.db"),
      journal_mode: Some("WAL".to_string()),
      busy_timeout_ms: default_busy_timeout_ms(),
      pool_size: default_pool_size(),
    }
  }
}

impl ConfigSection for StorageConfig {
  const NAME: &'static str = "storage";

  fn validate(&self) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid { section: Self::NAME, reason };

    if self.db_path.as_os_str().is_empty() {
      return Err(invalid("db_path cannot be empty".into()));
    }
    if self.pool_size == 0 {
      return Err(invalid("pool_size must be at least 1".into()));
    }
    if let Some(mode) = self.journal_mode_pragma() {
      if !JOURNAL_MODES.contains(&mode.as_str()) {
        return Err(invalid(format!("unsupported journal_mode {mode:?}, expected one of {JOURNAL_MODES:?}")));
      }
    }
    Ok(())
  }
}

impl StorageConfig {
  /// Loads the section (defaults when absent) and writes it back so the
  /// file always lists every option.
  pub fn load(backend: &TomlConfigBackend) -> Result<Self, ConfigError> {
    backend.load_or_init()
  }

  pub fn save(&self, backend: &TomlConfigBackend) -> Result<(), ConfigError> {
    backend.save(self)
  }

  /// Journal mode as it goes into the PRAGMA.
  pub fn journal_mode_pragma(&self) -> Option<String> {
    self.journal_mode.as_deref().map(|mode| mode.trim().to_ascii_uppercase())
  }

  pub fn resolve_db_path(&self, paths: &MedialibPaths) -> PathBuf {
    if self.db_path.is_absolute() { self.db_path.clone() } else { paths.data_dir.join(&self.db_path) }
  }
}
