use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned identifier of a [`Media`](crate::domain::media::Media).
///
/// `0` marks a transient entity that has not been persisted yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MediaId(i32);

impl MediaId {
  /// Identifier of an entity the store has not seen yet.
  pub const TRANSIENT: MediaId = MediaId(0);

  pub fn new(raw: i32) -> Self {
    MediaId(raw)
  }

  pub fn get(&self) -> i32 {
    self.0
  }

  pub fn is_transient(&self) -> bool {
    self.0 <= 0
  }
}

impl From<i32> for MediaId {
  fn from(raw: i32) -> Self {
    MediaId(raw)
  }
}

impl From<MediaId> for i32 {
  fn from(id: MediaId) -> Self {
    id.0
  }
}

impl fmt::Display for MediaId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

/// Store-assigned identifier of a [`Playlist`](crate::domain::playlist::Playlist).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlaylistId(i32);

impl PlaylistId {
  pub const TRANSIENT: PlaylistId = PlaylistId(0);

  pub fn new(raw: i32) -> Self {
    PlaylistId(raw)
  }

  pub fn get(&self) -> i32 {
    self.0
  }

  pub fn is_transient(&self) -> bool {
    self.0 <= 0
  }
}

impl From<i32> for PlaylistId {
  fn from(raw: i32) -> Self {
    PlaylistId(raw)
  }
}

impl From<PlaylistId> for i32 {
  fn from(id: PlaylistId) -> Self {
    id.0
  }
}

impl fmt::Display for PlaylistId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}
