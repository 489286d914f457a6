use serde::{Deserialize, Serialize};
use std::fmt;

/// Transport state of the currently selected media.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaybackState {
  #[default]
  Stopped,
  Playing,
}

impl PlaybackState {
  pub fn is_playing(&self) -> bool {
    matches!(self, PlaybackState::Playing)
  }
}

impl fmt::Display for PlaybackState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PlaybackState::Stopped => write!(f, "Stopped"),
      PlaybackState::Playing => write!(f, "Playing"),
    }
  }
}
