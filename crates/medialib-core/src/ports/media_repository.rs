use crate::domain::{Media, MediaId};
use crate::errors::CoreError;
use crate::ports::CrudRepository;

/// Media persistence plus attribute search.
///
/// Text filters are case-insensitive substring matches; every listing is
/// ordered by title.
pub trait MediaRepository: CrudRepository<Media, MediaId> {
  fn find_by_title(&self, title: &str) -> Result<Vec<Media>, CoreError>;

  fn find_by_artist(&self, artist: &str) -> Result<Vec<Media>, CoreError>;

  fn find_by_year(&self, year: i32) -> Result<Vec<Media>, CoreError>;

  /// Matches `keyword` against title OR artist.
  fn search(&self, keyword: &str) -> Result<Vec<Media>, CoreError>;
}
