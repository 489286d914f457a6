use crate::errors::CoreError;

/// Basic persistence contract shared by every aggregate of the library.
///
/// Lookups report absence as `Ok(None)`; `Err` always means the store failed.
/// Implementations are blocking: each call returns once the store answered.
pub trait CrudRepository<T, Id> {
  /// Persists a new entity and returns it with its store-assigned id.
  fn save(&self, entity: &T) -> Result<T, CoreError>;

  fn find_by_id(&self, id: Id) -> Result<Option<T>, CoreError>;

  fn find_all(&self) -> Result<Vec<T>, CoreError>;

  /// Overwrites the stored entity with the same id.
  ///
  /// Fails with [`CoreError::ResourceNotFound`] when nothing has that id.
  fn update(&self, entity: &T) -> Result<T, CoreError>;

  /// Fails with [`CoreError::ResourceNotFound`] when nothing has that id.
  fn delete(&self, id: Id) -> Result<(), CoreError>;

  fn exists_by_id(&self, id: Id) -> Result<bool, CoreError>;

  fn count(&self) -> Result<u64, CoreError>;
}
