use directories::ProjectDirs;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable that relocates every directory under one base (portable mode).
pub const BASE_DIR_ENV: &str = "MEDIALIB_BASE_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
  #[error("toml error: {0}")]
  Toml(#[from] toml::de::Error),
  #[error("directories error: could not determine home directory")]
  Directories,
  #[error("invalid [{section}] section: {reason}")]
  Invalid { section: &'static str, reason: String },
  #[error("other: {0}")]
  Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedialibPaths {
  pub base_dir: PathBuf,
  pub config_dir: PathBuf,
  pub data_dir: PathBuf,
  pub cache_dir: PathBuf,
}

impl MedialibPaths {
  /// Resolves the directories from `MEDIALIB_BASE_DIR` or the platform
  /// defaults, creating them if needed.
  pub fn detect() -> Result<Self, ConfigError> {
    if let Ok(env_base) = std::env::var(BASE_DIR_ENV) {
      return Self::from_base(env_base);
    }

    let proj_dirs = ProjectDirs::from("com", "medialib", "medialib").ok_or(ConfigError::Directories)?;
    let paths = Self {
      base_dir: proj_dirs.config_dir().to_path_buf(),
      config_dir: proj_dirs.config_dir().to_path_buf(),
      data_dir: proj_dirs.data_dir().to_path_buf(),
      cache_dir: proj_dirs.cache_dir().to_path_buf(),
    };
    paths.create_dirs()?;
    Ok(paths)
  }

  /// Lays out `config/`, `data/` and `cache/` under `base`.
  pub fn from_base(base: impl Into<PathBuf>) -> Result<Self, ConfigError> {
    let base_dir = base.into();
    let paths = Self {
      config_dir: base_dir.join("config"),
      data_dir: base_dir.join("data"),
      cache_dir: base_dir.join("cache"),
      base_dir,
    };
    paths.create_dirs()?;
    Ok(paths)
  }

  fn create_dirs(&self) -> Result<(), ConfigError> {
    std::fs::create_dir_all(&self.config_dir)?;
    std::fs::create_dir_all(&self.data_dir)?;
    std::fs::create_dir_all(&self.cache_dir)?;
    Ok(())
  }

  pub fn config_file(&self) -> PathBuf {
    self.config_dir.join("medialib.toml")
  }
}
