// crates/medialib-core/src/errors.rs
use thiserror::Error;

/// Core error of the media library.
///
/// Upper layers (CLI, bindings, etc.) map this error to user messages or logs.
/// "Not found" on a plain lookup is never an error: lookups return `Option`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
  /// Malformed input caught before touching the store.
  #[error("invalid argument: {0}")]
  InvalidArgument(String),

  /// The object is in a state that forbids the operation.
  #[error("invalid state: {0}")]
  InvalidState(String),

  #[error("resource not found: {0}")]
  ResourceNotFound(String),

  /// A uniqueness constraint was violated.
  #[error("duplicate resource: {0}")]
  DuplicateResource(String),

  /// Any other store-level failure, with the store message for diagnostics.
  #[error("database operation failed: {0}")]
  DatabaseOperation(String),

  /// A stored row carries a discriminant that matches no known variant.
  #[error("unknown media type: {0:?}")]
  UnknownMediaType(String),
}

impl CoreError {
  /// `true` for input errors, duplicates included.
  pub fn is_invalid_input(&self) -> bool {
    matches!(self, CoreError::InvalidArgument(_) | CoreError::DuplicateResource(_))
  }

  pub(crate) fn invalid(msg: impl Into<String>) -> Self {
    CoreError::InvalidArgument(msg.into())
  }
}
