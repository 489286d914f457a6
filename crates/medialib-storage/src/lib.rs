pub mod config;
pub mod db;
pub mod error;
pub mod media_repository;
pub mod models;
pub mod playlist_repository;
pub mod schema;

use medialib_config::{MedialibPaths, TomlConfigBackend};
use tracing::info;

pub use config::StorageConfig;
pub use db::Database;
pub use error::StorageError;
pub use media_repository::SqliteMediaRepository;
pub use playlist_repository::SqlitePlaylistRepository;

/// Both repositories over one shared [`Database`].
#[derive(Clone)]
pub struct LibraryStore {
  pub media: SqliteMediaRepository,
  pub playlists: SqlitePlaylistRepository,
}

impl LibraryStore {
  pub fn new(db: Database) -> Self {
    Self { media: SqliteMediaRepository::new(db.clone()), playlists: SqlitePlaylistRepository::new(db) }
  }

  pub fn open(config: &StorageConfig, paths: &MedialibPaths) -> Result<Self, StorageError> {
    Ok(Self::new(Database::open(config, paths)?))
  }

  /// Detects the platform directories, loads `[storage]` from `medialib.toml`
  /// and opens the database it points to.
  pub fn open_default() -> Result<Self, StorageError> {
    let paths = MedialibPaths::detect().map_err(|e| StorageError::Config(e.to_string()))?;
    let backend = TomlConfigBackend::new(paths.clone());
    let config = StorageConfig::load(&backend).map_err(|e| StorageError::Config(e.to_string()))?;

    info!(base_dir = %paths.base_dir.display(), "opening library store");
    Self::open(&config, &paths)
  }
}
