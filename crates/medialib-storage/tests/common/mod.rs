#![allow(dead_code)]

use medialib_core::domain::{Media, PodcastDetails, SongDetails};
use medialib_storage::{Database, LibraryStore, StorageConfig};
use tempfile::TempDir;

/// A migrated database in its own temp directory, removed on drop.
pub struct TestDb {
  pub db: Database,
  pub store: LibraryStore,
  _dir: TempDir,
}

impl TestDb {
  pub fn new() -> Self {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let dir = tempfile::tempdir().unwrap();
    let config = StorageConfig { pool_size: 2, ..StorageConfig::default() };
    let db = Database::open_path(&dir.path().join("library.db"), &config).unwrap();
    let store = LibraryStore::new(db.clone());
    TestDb { db, store, _dir: dir }
  }
}

pub fn bohemian_rhapsody() -> Media {
  Media::song(
    "Bohemian Rhapsody",
    "Queen",
    354,
    1975,
    SongDetails { album: Some("A Night at the Opera".into()), genre: Some("Rock".into()), track_number: 11 },
  )
  .unwrap()
}

pub fn song(title: &str, artist: &str, duration_secs: u32, year: i32) -> Media {
  Media::song(title, artist, duration_secs, year, SongDetails { album: None, genre: None, track_number: 1 }).unwrap()
}

pub fn episode(title: &str, episode_number: u32) -> Media {
  Media::podcast(
    title,
    "Tech Talk",
    1_800,
    2021,
    PodcastDetails { host: "Jane".into(), category: "Technology".into(), episode_number, description: None },
  )
  .unwrap()
}
