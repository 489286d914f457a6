use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::domain::ids::MediaId;
use crate::errors::CoreError;

/// Earliest release year accepted by the catalog.
pub const MIN_RELEASE_YEAR: i32 = 1900;

/// Longest accepted duration, in seconds (10 hours).
pub const MAX_DURATION_SECS: u32 = 36_000;

/// Current calendar year, according to the local clock.
pub fn current_year() -> i32 {
  chrono::Local::now().year()
}

/// `1900 <= year <= current year`.
pub fn is_valid_year(year: i32) -> bool {
  (MIN_RELEASE_YEAR..=current_year()).contains(&year)
}

/// `0 < seconds <= 36000`.
pub fn is_valid_duration(seconds: u32) -> bool {
  (1..=MAX_DURATION_SECS).contains(&seconds)
}

fn is_blank(value: &str) -> bool {
  value.trim().is_empty()
}

/// Discriminant stored next to every media row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaType {
  Song,
  Podcast,
}

impl MediaType {
  pub fn as_str(&self) -> &'static str {
    match self {
      MediaType::Song => "Song",
      MediaType::Podcast => "Podcast",
    }
  }
}

impl FromStr for MediaType {
  type Err = CoreError;

  /// Exact, case-sensitive match on the stored tag.
  ///
  /// Anything else is reported as [`CoreError::UnknownMediaType`] instead of
  /// being silently read as a podcast.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "Song" => Ok(MediaType::Song),
      "Podcast" => Ok(MediaType::Podcast),
      other => Err(CoreError::UnknownMediaType(other.to_string())),
    }
  }
}

impl fmt::Display for MediaType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Fields only a song carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongDetails {
  pub album: Option<String>,
  pub genre: Option<String>,
  /// Position of the song on its album, starting at 1.
  pub track_number: u32,
}

/// Fields only a podcast episode carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodcastDetails {
  pub host: String,
  pub category: String,
  /// Episode number within the show, starting at 1.
  pub episode_number: u32,
  pub description: Option<String>,
}

/// The closed set of media variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKind {
  Song(SongDetails),
  Podcast(PodcastDetails),
}

impl MediaKind {
  pub fn media_type(&self) -> MediaType {
    match self {
      MediaKind::Song(_) => MediaType::Song,
      MediaKind::Podcast(_) => MediaType::Podcast,
    }
  }

  fn check(&self) -> Result<(), CoreError> {
    match self {
      MediaKind::Song(song) => {
        if song.track_number == 0 {
          return Err(CoreError::invalid("track number must be positive"));
        }
      }
      MediaKind::Podcast(podcast) => {
        if is_blank(&podcast.host) {
          return Err(CoreError::invalid("podcast host cannot be empty"));
        }
        if is_blank(&podcast.category) {
          return Err(CoreError::invalid("podcast category cannot be empty"));
        }
        if podcast.episode_number == 0 {
          return Err(CoreError::invalid("episode number must be positive"));
        }
      }
    }
    Ok(())
  }
}

/// A playable catalog item: a song or a podcast episode.
///
/// Every scalar field is validated on construction and on each setter. A
/// rejected mutation leaves the previous value in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Media {
  id: MediaId,
  title: String,
  artist: String,
  duration_secs: u32,
  release_year: i32,
  kind: MediaKind,
}

impl Media {
  pub fn new(
    title: impl Into<String>,
    artist: impl Into<String>,
    duration_secs: u32,
    release_year: i32,
    kind: MediaKind,
  ) -> Result<Self, CoreError> {
    let title = title.into();
    let artist = artist.into();

    check_title(&title)?;
    check_artist(&artist)?;
    check_duration(duration_secs)?;
    check_year(release_year)?;
    kind.check()?;

    Ok(Self { id: MediaId::TRANSIENT, title, artist, duration_secs, release_year, kind })
  }

  pub fn song(
    title: impl Into<String>,
    artist: impl Into<String>,
    duration_secs: u32,
    release_year: i32,
    details: SongDetails,
  ) -> Result<Self, CoreError> {
    Self::new(title, artist, duration_secs, release_year, MediaKind::Song(details))
  }

  pub fn podcast(
    title: impl Into<String>,
    artist: impl Into<String>,
    duration_secs: u32,
    release_year: i32,
    details: PodcastDetails,
  ) -> Result<Self, CoreError> {
    Self::new(title, artist, duration_secs, release_year, MediaKind::Podcast(details))
  }

  pub fn with_id(mut self, id: MediaId) -> Self {
    self.id = id;
    self
  }

  // -------- accessors --------

  pub fn id(&self) -> MediaId {
    self.id
  }

  pub fn title(&self) -> &str {
    &self.title
  }

  pub fn artist(&self) -> &str {
    &self.artist
  }

  pub fn duration_secs(&self) -> u32 {
    self.duration_secs
  }

  pub fn release_year(&self) -> i32 {
    self.release_year
  }

  pub fn kind(&self) -> &MediaKind {
    &self.kind
  }

  // -------- mutators --------

  pub fn set_id(&mut self, id: MediaId) {
    self.id = id;
  }

  pub fn set_title(&mut self, title: impl Into<String>) -> Result<&mut Self, CoreError> {
    let title = title.into();
    check_title(&title)?;
    self.title = title;
    Ok(self)
  }

  pub fn set_artist(&mut self, artist: impl Into<String>) -> Result<&mut Self, CoreError> {
    let artist = artist.into();
    check_artist(&artist)?;
    self.artist = artist;
    Ok(self)
  }

  pub fn set_duration_secs(&mut self, duration_secs: u32) -> Result<&mut Self, CoreError> {
    check_duration(duration_secs)?;
    self.duration_secs = duration_secs;
    Ok(self)
  }

  pub fn set_release_year(&mut self, release_year: i32) -> Result<&mut Self, CoreError> {
    check_year(release_year)?;
    self.release_year = release_year;
    Ok(self)
  }

  /// Replaces the variant-specific fields. The variant itself may change.
  pub fn set_kind(&mut self, kind: MediaKind) -> Result<&mut Self, CoreError> {
    kind.check()?;
    self.kind = kind;
    Ok(self)
  }

  // -------- common capabilities --------

  pub fn media_type(&self) -> MediaType {
    self.kind.media_type()
  }

  /// One-line description of the variant-specific fields. A song without
  /// album or genre shows `Unknown` in its place.
  pub fn additional_info(&self) -> String {
    match &self.kind {
      MediaKind::Song(song) => format!(
        "Album: {} | Genre: {} | Track: {}",
        song.album.as_deref().unwrap_or("Unknown"),
        song.genre.as_deref().unwrap_or("Unknown"),
        song.track_number
      ),
      MediaKind::Podcast(podcast) => format!(
        "Host: {} | Category: {} | Episode: {}",
        podcast.host, podcast.category, podcast.episode_number
      ),
    }
  }

  /// Key/value export for display and inspection.
  pub fn metadata(&self) -> BTreeMap<&'static str, String> {
    let mut metadata = BTreeMap::new();
    metadata.insert("type", self.media_type().to_string());

    match &self.kind {
      MediaKind::Song(song) => {
        metadata.insert("album", song.album.clone().unwrap_or_default());
        metadata.insert("genre", song.genre.clone().unwrap_or_default());
        metadata.insert("trackNumber", song.track_number.to_string());
      }
      MediaKind::Podcast(podcast) => {
        metadata.insert("host", podcast.host.clone());
        metadata.insert("category", podcast.category.clone());
        metadata.insert("episodeNumber", podcast.episode_number.to_string());
        metadata.insert("description", podcast.description.clone().unwrap_or_default());
      }
    }

    metadata.insert("duration", self.duration_formatted());
    metadata
  }

  /// Whether the current state satisfies every invariant.
  pub fn validate(&self) -> bool {
    check_title(&self.title).is_ok()
      && check_artist(&self.artist).is_ok()
      && check_duration(self.duration_secs).is_ok()
      && check_year(self.release_year).is_ok()
      && self.kind.check().is_ok()
  }

  /// `minutes:seconds`, seconds zero-padded (`354` → `"5:54"`).
  pub fn duration_formatted(&self) -> String {
    format_duration(u64::from(self.duration_secs))
  }

  /// `"{title} by {artist} ({year})"`.
  pub fn basic_info(&self) -> String {
    format!("{} by {} ({})", self.title, self.artist, self.release_year)
  }
}

impl fmt::Display for Media {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} | {}", self.basic_info(), self.additional_info())
  }
}

pub(crate) fn format_duration(total_secs: u64) -> String {
  format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

fn check_title(title: &str) -> Result<(), CoreError> {
  if is_blank(title) {
    return Err(CoreError::invalid("title cannot be empty"));
  }
  Ok(())
}

fn check_artist(artist: &str) -> Result<(), CoreError> {
  if is_blank(artist) {
    return Err(CoreError::invalid("artist cannot be empty"));
  }
  Ok(())
}

fn check_duration(duration_secs: u32) -> Result<(), CoreError> {
  if !is_valid_duration(duration_secs) {
    return Err(CoreError::invalid(format!(
      "duration must be between 1 and {MAX_DURATION_SECS} seconds, got {duration_secs}"
    )));
  }
  Ok(())
}

fn check_year(release_year: i32) -> Result<(), CoreError> {
  if !is_valid_year(release_year) {
    return Err(CoreError::invalid(format!(
      "release year must be between {MIN_RELEASE_YEAR} and {}, got {release_year}",
      current_year()
    )));
  }
  Ok(())
}
