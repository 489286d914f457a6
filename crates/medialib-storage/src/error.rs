use diesel::result::{DatabaseErrorKind, Error as DieselError};
use medialib_core::errors::CoreError;
use thiserror::Error;

/// Failures of the storage adapter before they are folded into [`CoreError`].
#[derive(Debug, Error)]
pub enum StorageError {
  #[error("query error: {0}")]
  Query(#[from] DieselError),

  #[error("connection error: {0}")]
  Connection(#[from] diesel::ConnectionError),

  #[error("connection pool error: {0}")]
  Pool(#[from] diesel::r2d2::PoolError),

  #[error("migration error: {0}")]
  Migration(String),

  #[error("config error: {0}")]
  Config(String),

  /// Already classified (duplicate, not found, ...).
  #[error(transparent)]
  Core(#[from] CoreError),
}

impl From<StorageError> for CoreError {
  fn from(err: StorageError) -> Self {
    match err {
      StorageError::Core(core) => core,
      other => CoreError::DatabaseOperation(other.to_string()),
    }
  }
}

/// Sorts a write failure into the taxonomy: uniqueness and foreign-key
/// violations get their own error, anything else is a database failure.
pub(crate) fn classify(
  err: DieselError,
  on_unique: impl FnOnce() -> CoreError,
  on_foreign_key: impl FnOnce() -> CoreError,
) -> CoreError {
  match err {
    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => on_unique(),
    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => on_foreign_key(),
    other => db_error(other),
  }
}

pub(crate) fn db_error(err: DieselError) -> CoreError {
  CoreError::DatabaseOperation(err.to_string())
}
