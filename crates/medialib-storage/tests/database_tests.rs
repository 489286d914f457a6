use medialib_config::MedialibPaths;
use medialib_storage::{Database, LibraryStore, StorageConfig, StorageError};

#[test]
fn unsupported_journal_mode_is_a_config_error() {
  let dir = tempfile::tempdir().unwrap();
  let config = StorageConfig { journal_mode: Some("fast".into()), ..StorageConfig::default() };

  let result = Database::open_path(&dir.path().join("library.db"), &config);
  assert!(matches!(result, Err(StorageError::Config(_))));
}

#[test]
fn relative_db_path_lands_in_the_data_dir() {
  let dir = tempfile::tempdir().unwrap();
  let paths = MedialibPaths::from_base(dir.path()).unwrap();
  let config = StorageConfig { journal_mode: Some("delete".into()), pool_size: 1, ..StorageConfig::default() };

  LibraryStore::open(&config, &paths).unwrap();
  assert!(paths.data_dir.join("medialib.db").exists());
}
