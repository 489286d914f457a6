use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use crate::domain::{Media, MediaId, PlaybackState, RatingTally, Score, media};
use crate::errors::CoreError;
use crate::ports::MediaRepository;
use crate::services::sorting;

/// Partial update of a media's shared fields. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaUpdate {
  pub title: Option<String>,
  pub artist: Option<String>,
  pub duration_secs: Option<u32>,
  pub release_year: Option<i32>,
}

/// Business rules over a [`MediaRepository`], plus the playback and rating
/// session of one "current media".
///
/// The session state is plain process-local state: one service instance
/// serves one session.
pub struct MediaService<R>
where
  R: MediaRepository,
{
  repo: Option<R>,
  current: Option<Media>,
  state: PlaybackState,
  ratings: RatingTally,
}

impl<R> MediaService<R>
where
  R: MediaRepository,
{
  pub fn new(repo: R) -> Self {
    info!("media service initialized with repository");
    Self { repo: Some(repo), current: None, state: PlaybackState::Stopped, ratings: RatingTally::new() }
  }

  /// Service without a store. Writes and id lookups fail with
  /// [`CoreError::DatabaseOperation`]; listings come back empty.
  pub fn detached() -> Self {
    warn!("media service created without repository");
    Self { repo: None, current: None, state: PlaybackState::Stopped, ratings: RatingTally::new() }
  }

  fn repo(&self) -> Result<&R, CoreError> {
    self.repo.as_ref().ok_or_else(|| CoreError::DatabaseOperation("repository not initialized".into()))
  }

  fn read_repo(&self, operation: &str) -> Option<&R> {
    if self.repo.is_none() {
      warn!(operation, "repository not initialized, returning empty result");
    }
    self.repo.as_ref()
  }

  // -------- PLAYBACK --------

  /// Makes `media` the current selection and starts a fresh session:
  /// playback stops and the accumulated ratings are cleared.
  pub fn select(&mut self, media: Media) {
    info!(title = media.title(), "selected");
    self.current = Some(media);
    self.state = PlaybackState::Stopped;
    self.ratings.clear();
  }

  pub fn current_media(&self) -> Option<&Media> {
    self.current.as_ref()
  }

  pub fn status(&self) -> PlaybackState {
    self.state
  }

  /// Starts playing the current media. Does nothing when none is selected.
  pub fn play(&mut self) {
    match &self.current {
      Some(media) => {
        self.state = PlaybackState::Playing;
        info!(title = media.title(), "playing");
      }
      None => debug!("play requested with nothing selected"),
    }
  }

  pub fn pause(&mut self) -> Result<(), CoreError> {
    let title = self.selected_title("pause")?;
    let was_playing = self.state.is_playing();
    self.state = PlaybackState::Stopped;
    info!(%title, was_playing, "paused");
    Ok(())
  }

  pub fn stop(&mut self) -> Result<(), CoreError> {
    let title = self.selected_title("stop")?;
    let was_playing = self.state.is_playing();
    self.state = PlaybackState::Stopped;
    info!(%title, was_playing, "stopped");
    Ok(())
  }

  fn selected_title(&self, operation: &str) -> Result<String, CoreError> {
    self
      .current
      .as_ref()
      .map(|media| media.title().to_string())
      .ok_or_else(|| CoreError::InvalidState(format!("cannot {operation}: no media selected")))
  }

  // -------- RATING --------

  /// Records a 1..=5 rating for the current media.
  pub fn rate(&mut self, rating: i32) -> Result<(), CoreError> {
    let score = Score::new(rating)?;
    let title = self.selected_title("rate")?;
    self.ratings.add(score);
    info!(%title, rating, "rated");
    Ok(())
  }

  pub fn average_rating(&self) -> f64 {
    self.ratings.average()
  }

  pub fn rating_count(&self) -> u32 {
    self.ratings.count()
  }

  pub fn clear_ratings(&mut self) {
    self.ratings.clear();
    debug!("ratings cleared");
  }

  // -------- COMMAND (write) --------

  /// Validates `media`, rejects a duplicate title and persists it.
  pub fn create_media(&self, media: &Media) -> Result<Media, CoreError> {
    self.insert(media).inspect_err(|err| log_rejection("create_media", err))
  }

  fn insert(&self, media: &Media) -> Result<Media, CoreError> {
    let repo = self.repo()?;

    if !media.validate() {
      return Err(CoreError::InvalidArgument("invalid media data".into()));
    }

    let duplicate = repo.find_by_title(media.title())?.iter().any(|existing| existing.title() == media.title());
    if duplicate {
      return Err(CoreError::DuplicateResource(format!("media with title '{}' already exists", media.title())));
    }

    let saved = repo.save(media)?;
    info!(id = %saved.id(), title = saved.title(), "media created");
    Ok(saved)
  }

  /// Applies the provided fields to the stored media, re-validates and persists.
  pub fn update_media(&self, id: MediaId, update: &MediaUpdate) -> Result<Media, CoreError> {
    self.apply_update(id, update).inspect_err(|err| log_rejection("update_media", err))
  }

  fn apply_update(&self, id: MediaId, update: &MediaUpdate) -> Result<Media, CoreError> {
    let repo = self.repo()?;
    let mut existing = self.get_media_by_id(id)?;

    if let Some(title) = &update.title {
      existing.set_title(title.as_str())?;
    }
    if let Some(artist) = &update.artist {
      existing.set_artist(artist.as_str())?;
    }
    if let Some(duration_secs) = update.duration_secs {
      existing.set_duration_secs(duration_secs)?;
    }
    if let Some(release_year) = update.release_year {
      existing.set_release_year(release_year)?;
    }

    if !existing.validate() {
      return Err(CoreError::InvalidArgument("invalid data after update".into()));
    }

    let updated = repo.update(&existing)?;
    info!(%id, "media updated");
    Ok(updated)
  }

  pub fn delete_media(&self, id: MediaId) -> Result<(), CoreError> {
    let repo = self.repo()?;

    if !repo.exists_by_id(id)? {
      return Err(CoreError::ResourceNotFound(format!("media with id {id} not found")));
    }

    repo.delete(id)?;
    info!(%id, "media deleted");
    Ok(())
  }

  // -------- QUERY (read) --------

  pub fn get_media_by_id(&self, id: MediaId) -> Result<Media, CoreError> {
    self
      .repo()?
      .find_by_id(id)?
      .ok_or_else(|| CoreError::ResourceNotFound(format!("media with id {id} not found")))
  }

  pub fn get_all_media(&self) -> Result<Vec<Media>, CoreError> {
    match self.read_repo("get_all_media") {
      Some(repo) => repo.find_all(),
      None => Ok(Vec::new()),
    }
  }

  /// Case-insensitive match over title or artist.
  pub fn search(&self, keyword: &str) -> Result<Vec<Media>, CoreError> {
    let Some(repo) = self.read_repo("search") else {
      return Ok(Vec::new());
    };

    let keyword = keyword.trim();
    if keyword.is_empty() {
      return Err(CoreError::InvalidArgument("search keyword cannot be empty".into()));
    }

    repo.search(keyword)
  }

  pub fn get_all_media_sorted_by_title(&self) -> Result<Vec<Media>, CoreError> {
    let mut media = self.get_all_media()?;
    sorting::sort_by_title(&mut media);
    Ok(media)
  }

  pub fn get_all_media_sorted_by_duration(&self) -> Result<Vec<Media>, CoreError> {
    let mut media = self.get_all_media()?;
    sorting::sort_by_duration(&mut media);
    Ok(media)
  }

  pub fn get_all_media_sorted_by_artist_then_title(&self) -> Result<Vec<Media>, CoreError> {
    let mut media = self.get_all_media()?;
    sorting::sort_by_artist_then_title(&mut media);
    Ok(media)
  }

  pub fn get_long_media(&self, min_duration_secs: u32) -> Result<Vec<Media>, CoreError> {
    Ok(sorting::filter_by_min_duration(self.get_all_media()?, min_duration_secs))
  }

  /// Media whose discriminant equals `media_type`, ignoring case.
  pub fn get_media_by_type(&self, media_type: &str) -> Result<Vec<Media>, CoreError> {
    let media = self.get_all_media()?;
    Ok(media.into_iter().filter(|m| m.media_type().as_str().eq_ignore_ascii_case(media_type)).collect())
  }

  /// Distinct artists, sorted case-insensitively.
  pub fn get_all_artists(&self) -> Result<Vec<String>, CoreError> {
    let distinct: BTreeSet<String> = self.get_all_media()?.iter().map(|m| m.artist().to_string()).collect();
    let mut artists: Vec<String> = distinct.into_iter().collect();
    artists.sort_by_cached_key(|artist| artist.to_lowercase());
    Ok(artists)
  }

  pub fn get_total_media_count(&self) -> Result<u64, CoreError> {
    match self.read_repo("get_total_media_count") {
      Some(repo) => repo.count(),
      None => Ok(0),
    }
  }

  pub fn media_exists(&self, id: MediaId) -> Result<bool, CoreError> {
    match self.read_repo("media_exists") {
      Some(repo) => repo.exists_by_id(id),
      None => Ok(false),
    }
  }

  pub fn is_valid_media_year(&self, year: i32) -> bool {
    media::is_valid_year(year)
  }
}

fn log_rejection(operation: &str, err: &CoreError) {
  if err.is_invalid_input() {
    warn!(operation, %err, "media rejected");
  } else {
    debug!(operation, %err, "media write failed");
  }
}
