//! Row types and the mapping between them and the domain model.
//!
//! Songs and podcasts share the `media` table: the columns of the variant that
//! does not apply are written as NULL, and `media_type` tells them apart on read.

use crate::schema::{media, playlist_items, playlists};

use diesel::prelude::*;

use medialib_core::domain::{
  Media, MediaId, MediaKind, MediaType, Playlist, PlaylistId, PlaylistItem, PodcastDetails, SongDetails,
};
use medialib_core::errors::CoreError;

#[derive(Debug, Clone, PartialEq, Queryable)]
#[diesel(table_name = media)]
pub struct MediaRow {
  pub id: i32,
  pub title: String,
  pub artist: String,
  pub duration: i32,
  pub release_year: i32,
  pub media_type: String,
  pub album: Option<String>,
  pub genre: Option<String>,
  pub track_number: Option<i32>,
  pub host: Option<String>,
  pub category: Option<String>,
  pub episode_number: Option<i32>,
  pub description: Option<String>,
}

/// Every column but the id. Used both for INSERT and for the full-overwrite UPDATE.
#[derive(Debug, Clone, PartialEq, Insertable, AsChangeset)]
#[diesel(table_name = media)]
#[diesel(treat_none_as_null = true)]
pub struct MediaRecord {
  pub title: String,
  pub artist: String,
  pub duration: i32,
  pub release_year: i32,
  pub media_type: String,
  pub album: Option<String>,
  pub genre: Option<String>,
  pub track_number: Option<i32>,
  pub host: Option<String>,
  pub category: Option<String>,
  pub episode_number: Option<i32>,
  pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Queryable)]
#[diesel(table_name = playlists)]
pub struct PlaylistRow {
  pub id: i32,
  pub name: String,
  pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Insertable, AsChangeset)]
#[diesel(table_name = playlists)]
#[diesel(treat_none_as_null = true)]
pub struct PlaylistRecord {
  pub name: String,
  pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = playlist_items)]
pub struct PlaylistItemRecord {
  pub playlist_id: i32,
  pub media_id: i32,
  pub position: i32,
}

/// One row of the playlists ⟕ playlist_items ⟕ media query.
pub type PlaylistJoinRow = (PlaylistRow, Option<i32>, Option<MediaRow>);

pub(crate) fn to_column(value: u32, column: &str) -> Result<i32, CoreError> {
  i32::try_from(value).map_err(|_| CoreError::InvalidArgument(format!("{column} {value} is out of range")))
}

fn from_column(row_id: i32, column: &str, value: Option<i32>) -> Result<u32, CoreError> {
  let value = value.ok_or_else(|| corrupt(row_id, column, "is NULL"))?;
  u32::try_from(value).map_err(|_| corrupt(row_id, column, "is negative"))
}

fn corrupt(row_id: i32, column: &str, problem: &str) -> CoreError {
  CoreError::DatabaseOperation(format!("media row {row_id}: column {column} {problem}"))
}

impl TryFrom<&Media> for MediaRecord {
  type Error = CoreError;

  fn try_from(m: &Media) -> Result<Self, Self::Error> {
    let mut record = MediaRecord {
      title: m.title().to_string(),
      artist: m.artist().to_string(),
      duration: to_column(m.duration_secs(), "duration")?,
      release_year: m.release_year(),
      media_type: m.media_type().as_str().to_string(),
      album: None,
      genre: None,
      track_number: None,
      host: None,
      category: None,
      episode_number: None,
      description: None,
    };

    match m.kind() {
      MediaKind::Song(song) => {
        record.album = song.album.clone();
        record.genre = song.genre.clone();
        record.track_number = Some(to_column(song.track_number, "track_number")?);
      }
      MediaKind::Podcast(podcast) => {
        record.host = Some(podcast.host.clone());
        record.category = Some(podcast.category.clone());
        record.episode_number = Some(to_column(podcast.episode_number, "episode_number")?);
        record.description = podcast.description.clone();
      }
    }

    Ok(record)
  }
}

impl TryFrom<MediaRow> for Media {
  type Error = CoreError;

  fn try_from(row: MediaRow) -> Result<Self, Self::Error> {
    let duration = u32::try_from(row.duration).map_err(|_| corrupt(row.id, "duration", "is negative"))?;

    let kind = match row.media_type.parse::<MediaType>()? {
      MediaType::Song => MediaKind::Song(SongDetails {
        album: row.album,
        genre: row.genre,
        track_number: from_column(row.id, "track_number", row.track_number)?,
      }),
      MediaType::Podcast => MediaKind::Podcast(PodcastDetails {
        host: row.host.ok_or_else(|| corrupt(row.id, "host", "is NULL"))?,
        category: row.category.ok_or_else(|| corrupt(row.id, "category", "is NULL"))?,
        episode_number: from_column(row.id, "episode_number", row.episode_number)?,
        description: row.description,
      }),
    };

    Ok(Media::new(row.title, row.artist, duration, row.release_year, kind)?.with_id(MediaId::new(row.id)))
  }
}

impl From<&Playlist> for PlaylistRecord {
  fn from(p: &Playlist) -> Self {
    PlaylistRecord { name: p.name().to_string(), description: p.description().map(str::to_string) }
  }
}

/// Folds joined rows into playlists.
///
/// Rows must arrive grouped by playlist with items in position order. A
/// playlist without items comes as one row with NULL item columns and still
/// yields a playlist.
pub fn fold_playlists(rows: Vec<PlaylistJoinRow>) -> Result<Vec<Playlist>, CoreError> {
  let mut folded: Vec<(PlaylistRow, Vec<PlaylistItem>)> = Vec::new();

  for (playlist, position, media) in rows {
    let same_group = folded.last().is_some_and(|(current, _)| current.id == playlist.id);
    if !same_group {
      folded.push((playlist, Vec::new()));
    }

    if let (Some(position), Some(media), Some((_, items))) = (position, media, folded.last_mut()) {
      let position = u32::try_from(position).map_err(|_| corrupt(media.id, "position", "is negative"))?;
      items.push(PlaylistItem::new(Media::try_from(media)?, position));
    }
  }

  folded
    .into_iter()
    .map(|(row, items)| Playlist::from_parts(PlaylistId::new(row.id), row.name, row.description, items))
    .collect()
}
