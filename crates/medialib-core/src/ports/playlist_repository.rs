use crate::domain::{MediaId, Playlist, PlaylistId};
use crate::errors::CoreError;
use crate::ports::CrudRepository;

/// Playlist persistence.
///
/// `save` and `update` write the playlist row and all its item links
/// atomically. Deleting a playlist never deletes the media it references.
pub trait PlaylistRepository: CrudRepository<Playlist, PlaylistId> {
  /// Links one media at `position`.
  ///
  /// - [`CoreError::DuplicateResource`] if the media is already in the playlist.
  /// - [`CoreError::ResourceNotFound`] if the playlist or the media does not exist.
  fn add_media_to_playlist(
    &self,
    playlist_id: PlaylistId,
    media_id: MediaId,
    position: u32,
  ) -> Result<(), CoreError>;

  /// Returns whether a link was removed.
  fn remove_media_from_playlist(&self, playlist_id: PlaylistId, media_id: MediaId) -> Result<bool, CoreError>;
}
