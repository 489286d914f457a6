use serde::Serialize;

use crate::domain::ids::{MediaId, PlaylistId};
use crate::domain::media::{Media, format_duration};
use crate::errors::CoreError;

/// One entry of a [`Playlist`].
///
/// Items only exist inside their playlist; they have no identity of their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaylistItem {
  media: Media,
  /// 1-based position assigned when the item was appended.
  position: u32,
}

impl PlaylistItem {
  pub fn new(media: Media, position: u32) -> Self {
    Self { media, position }
  }

  pub fn media(&self) -> &Media {
    &self.media
  }

  pub fn position(&self) -> u32 {
    self.position
  }
}

/// An ordered, named selection of media.
///
/// Positions are assigned on append as `len + 1`. Removing an item does not
/// renumber the remaining ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Playlist {
  id: PlaylistId,
  name: String,
  description: Option<String>,
  items: Vec<PlaylistItem>,
}

impl Playlist {
  pub fn new(name: impl Into<String>, description: Option<String>) -> Result<Self, CoreError> {
    let name = name.into();
    check_name(&name)?;
    Ok(Self { id: PlaylistId::TRANSIENT, name, description, items: Vec::new() })
  }

  /// Rebuilds a persisted playlist, keeping the stored item positions.
  pub fn from_parts(
    id: PlaylistId,
    name: impl Into<String>,
    description: Option<String>,
    items: Vec<PlaylistItem>,
  ) -> Result<Self, CoreError> {
    let name = name.into();
    check_name(&name)?;
    Ok(Self { id, name, description, items })
  }

  pub fn with_id(mut self, id: PlaylistId) -> Self {
    self.id = id;
    self
  }

  pub fn id(&self) -> PlaylistId {
    self.id
  }

  pub fn set_id(&mut self, id: PlaylistId) {
    self.id = id;
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn set_name(&mut self, name: impl Into<String>) -> Result<&mut Self, CoreError> {
    let name = name.into();
    check_name(&name)?;
    self.name = name;
    Ok(self)
  }

  pub fn description(&self) -> Option<&str> {
    self.description.as_deref()
  }

  pub fn set_description(&mut self, description: Option<String>) {
    self.description = description;
  }

  /// Appends `media` at position `len + 1`.
  pub fn add_media(&mut self, media: Media) {
    let position = self.items.len() as u32 + 1;
    self.items.push(PlaylistItem::new(media, position));
  }

  /// Removes the first item referencing `media_id`. Returns whether one was removed.
  pub fn remove_media(&mut self, media_id: MediaId) -> bool {
    match self.items.iter().position(|item| item.media.id() == media_id) {
      Some(index) => {
        self.items.remove(index);
        true
      }
      None => false,
    }
  }

  pub fn contains_media(&self, media_id: MediaId) -> bool {
    self.items.iter().any(|item| item.media.id() == media_id)
  }

  pub fn items(&self) -> &[PlaylistItem] {
    &self.items
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  /// Sum of the member durations, in seconds. Computed on every call.
  pub fn total_duration(&self) -> u64 {
    self.items.iter().map(|item| u64::from(item.media.duration_secs())).sum()
  }

  pub fn total_duration_formatted(&self) -> String {
    format_duration(self.total_duration())
  }
}

fn check_name(name: &str) -> Result<(), CoreError> {
  if name.trim().is_empty() {
    return Err(CoreError::invalid("playlist name cannot be empty"));
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::media::SongDetails;

  fn track(id: i32, title: &str, duration_secs: u32) -> Media {
    Media::song(title, "Queen", duration_secs, 1975, SongDetails { album: None, genre: None, track_number: 1 })
      .unwrap()
      .with_id(MediaId::new(id))
  }

  fn positions(playlist: &Playlist) -> Vec<(i32, u32)> {
    playlist.items().iter().map(|item| (item.media().id().get(), item.position())).collect()
  }

  #[test]
  fn empty_name_is_rejected() {
    assert!(matches!(Playlist::new("  ", None), Err(CoreError::InvalidArgument(_))));

    let mut playlist = Playlist::new("Road trip", None).unwrap();
    assert!(playlist.set_name("").is_err());
    assert_eq!(playlist.name(), "Road trip");
  }

  #[test]
  fn appended_items_get_contiguous_positions() {
    let mut playlist = Playlist::new("Queen", Some("Best of".into())).unwrap();
    playlist.add_media(track(1, "A", 100));
    playlist.add_media(track(2, "B", 200));
    playlist.add_media(track(3, "C", 300));

    assert_eq!(positions(&playlist), vec![(1, 1), (2, 2), (3, 3)]);
    assert_eq!(playlist.total_duration(), 600);
    assert_eq!(playlist.total_duration_formatted(), "10:00");
  }

  #[test]
  fn removal_keeps_remaining_positions() {
    let mut playlist = Playlist::new("Queen", None).unwrap();
    playlist.add_media(track(1, "A", 100));
    playlist.add_media(track(2, "B", 200));
    playlist.add_media(track(3, "C", 300));

    assert!(playlist.remove_media(MediaId::new(2)));
    assert_eq!(positions(&playlist), vec![(1, 1), (3, 3)]);
    assert_eq!(playlist.total_duration(), 400);

    assert!(!playlist.remove_media(MediaId::new(2)));
    assert!(!playlist.contains_media(MediaId::new(2)));
  }

  #[test]
  fn remove_only_drops_first_match() {
    let mut playlist = Playlist::new("Loop", None).unwrap();
    playlist.add_media(track(7, "A", 60));
    playlist.add_media(track(7, "A", 60));

    assert!(playlist.remove_media(MediaId::new(7)));
    assert_eq!(positions(&playlist), vec![(7, 2)]);
  }

  #[test]
  fn items_snapshot_does_not_alias_internal_state() {
    let mut playlist = Playlist::new("Snapshot", None).unwrap();
    playlist.add_media(track(1, "A", 100));

    let mut snapshot = playlist.items().to_vec();
    snapshot.clear();

    assert_eq!(playlist.len(), 1);
  }
}
