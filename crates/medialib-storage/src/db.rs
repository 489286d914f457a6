use std::path::Path;

use diesel::connection::SimpleConnection;
use diesel::define_sql_function;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::sql_types::Text;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use medialib_config::{ConfigSection, MedialibPaths};
use tracing::{debug, info};

use crate::config::StorageConfig;
use crate::error::StorageError;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

define_sql_function! {
  /// Unicode lowercase of a text value. SQLite's own `lower()` and `LIKE`
  /// only fold ASCII.
  fn casefold(value: Text) -> Text;
}

pub type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;
pub type SqlitePooledConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Per-connection PRAGMAs, applied every time the pool opens a connection.
#[derive(Debug)]
struct ConnectionOptions {
  journal_mode: Option<String>,
  busy_timeout_ms: u32,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
  fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
    let mut pragmas = format!("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = {};", self.busy_timeout_ms);
    if let Some(mode) = &self.journal_mode {
      pragmas.push_str(&format!(" PRAGMA journal_mode = {mode};"));
    }
    conn.batch_execute(&pragmas).map_err(diesel::r2d2::Error::QueryError)?;
    casefold_utils::register_impl(conn, |value: String| value.to_lowercase()).map_err(diesel::r2d2::Error::QueryError)
  }
}

/// Handle to the library database.
///
/// Built once at startup and handed to the repositories. Cloning is cheap and
/// shares the same pool. Connections are checked out per call and go back to
/// the pool when dropped.
#[derive(Clone)]
pub struct Database {
  pool: SqlitePool,
}

impl Database {
  /// Opens the database file configured for `paths` and applies pending migrations.
  pub fn open(config: &StorageConfig, paths: &MedialibPaths) -> Result<Self, StorageError> {
    let db_path = config.resolve_db_path(paths);
    Self::open_path(&db_path, config)
  }

  pub fn open_path(db_path: &Path, config: &StorageConfig) -> Result<Self, StorageError> {
    let url = db_path
      .to_str()
      .ok_or_else(|| StorageError::Config(format!("database path is not valid UTF-8: {db_path:?}")))?;
    Self::open_url(url, config)
  }

  pub fn open_url(database_url: &str, config: &StorageConfig) -> Result<Self, StorageError> {
    config.validate().map_err(|e| StorageError::Config(e.to_string()))?;

    let options = ConnectionOptions { journal_mode: config.journal_mode_pragma(), busy_timeout_ms: config.busy_timeout_ms };
    let pool = Pool::builder()
      .max_size(config.pool_size)
      .connection_customizer(Box::new(options))
      .build(ConnectionManager::<SqliteConnection>::new(database_url))?;

    let db = Self { pool };
    db.run_migrations()?;
    info!(database_url, "database ready");
    Ok(db)
  }

  fn run_migrations(&self) -> Result<(), StorageError> {
    let mut pooled = self.conn()?;
    let conn: &mut SqliteConnection = &mut pooled;
    let applied = conn.run_pending_migrations(MIGRATIONS).map_err(|e| StorageError::Migration(e.to_string()))?;
    for version in applied {
      info!(%version, "applied migration");
    }
    Ok(())
  }

  /// Checks a connection out of the pool.
  pub fn conn(&self) -> Result<SqlitePooledConnection, StorageError> {
    debug!("checking out connection");
    Ok(self.pool.get()?)
  }
}
