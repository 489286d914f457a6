use diesel::prelude::*;
use tracing::{debug, info};

use medialib_core::domain::{Media, MediaId};
use medialib_core::errors::CoreError;
use medialib_core::ports::{CrudRepository, MediaRepository};

use crate::db::{Database, SqlitePooledConnection, casefold};
use crate::error::{classify, db_error};
use crate::models::{MediaRecord, MediaRow};
use crate::schema::media;

/// [`MediaRepository`] over the single-table `media` layout.
#[derive(Clone)]
pub struct SqliteMediaRepository {
  db: Database,
}

impl SqliteMediaRepository {
  pub fn new(db: Database) -> Self {
    Self { db }
  }

  fn conn(&self) -> Result<SqlitePooledConnection, CoreError> {
    Ok(self.db.conn()?)
  }
}

/// `%keyword%`, lowercased, with LIKE wildcards in the keyword escaped by `\`.
/// Matched against `casefold(column)`.
pub(crate) fn like_pattern(keyword: &str) -> String {
  let escaped = keyword.to_lowercase().replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_");
  format!("%{escaped}%")
}

fn to_media(rows: Vec<MediaRow>) -> Result<Vec<Media>, CoreError> {
  rows.into_iter().map(Media::try_from).collect()
}

fn duplicate(record: &MediaRecord) -> CoreError {
  CoreError::DuplicateResource(format!(
    "media '{}' by '{}' with the same {} already exists",
    record.title,
    record.artist,
    if record.media_type == "Song" { "album" } else { "host" }
  ))
}

impl CrudRepository<Media, MediaId> for SqliteMediaRepository {
  fn save(&self, entity: &Media) -> Result<Media, CoreError> {
    let record = MediaRecord::try_from(entity)?;
    let mut conn = self.conn()?;

    let new_id = diesel::insert_into(media::table)
      .values(&record)
      .returning(media::id)
      .get_result::<i32>(&mut *conn)
      .map_err(|e| classify(e, || duplicate(&record), || CoreError::DatabaseOperation("media insert rejected".into())))?;

    info!(id = new_id, title = %record.title, media_type = %record.media_type, "media saved");
    Ok(entity.clone().with_id(MediaId::new(new_id)))
  }

  fn find_by_id(&self, id: MediaId) -> Result<Option<Media>, CoreError> {
    let mut conn = self.conn()?;

    let row = media::table
      .find(id.get())
      .first::<MediaRow>(&mut *conn)
      .optional()
      .map_err(db_error)?;

    row.map(Media::try_from).transpose()
  }

  fn find_all(&self) -> Result<Vec<Media>, CoreError> {
    let mut conn = self.conn()?;
    let rows = media::table.order(media::title.asc()).load::<MediaRow>(&mut *conn).map_err(db_error)?;
    to_media(rows)
  }

  fn update(&self, entity: &Media) -> Result<Media, CoreError> {
    let record = MediaRecord::try_from(entity)?;
    let mut conn = self.conn()?;

    let affected = diesel::update(media::table.find(entity.id().get()))
      .set(&record)
      .execute(&mut *conn)
      .map_err(|e| classify(e, || duplicate(&record), || CoreError::DatabaseOperation("media update rejected".into())))?;

    if affected == 0 {
      return Err(CoreError::ResourceNotFound(format!("media with id {} not found for update", entity.id())));
    }

    info!(id = %entity.id(), "media updated");
    Ok(entity.clone())
  }

  fn delete(&self, id: MediaId) -> Result<(), CoreError> {
    let mut conn = self.conn()?;

    let affected = diesel::delete(media::table.find(id.get())).execute(&mut *conn).map_err(|e| {
      classify(
        e,
        || CoreError::DatabaseOperation("media delete rejected".into()),
        || CoreError::InvalidState(format!("media {id} is referenced by a playlist")),
      )
    })?;

    if affected == 0 {
      return Err(CoreError::ResourceNotFound(format!("media with id {id} not found for deletion")));
    }

    info!(%id, "media deleted");
    Ok(())
  }

  fn exists_by_id(&self, id: MediaId) -> Result<bool, CoreError> {
    let mut conn = self.conn()?;
    diesel::select(diesel::dsl::exists(media::table.find(id.get()))).get_result::<bool>(&mut *conn).map_err(db_error)
  }

  fn count(&self) -> Result<u64, CoreError> {
    let mut conn = self.conn()?;
    let total = media::table.count().get_result::<i64>(&mut *conn).map_err(db_error)?;
    Ok(total.max(0) as u64)
  }
}

impl MediaRepository for SqliteMediaRepository {
  fn find_by_title(&self, title: &str) -> Result<Vec<Media>, CoreError> {
    let mut conn = self.conn()?;
    let rows = media::table
      .filter(casefold(media::title).like(like_pattern(title)).escape('\\'))
      .order(media::title.asc())
      .load::<MediaRow>(&mut *conn)
      .map_err(db_error)?;
    to_media(rows)
  }

  fn find_by_artist(&self, artist: &str) -> Result<Vec<Media>, CoreError> {
    let mut conn = self.conn()?;
    let rows = media::table
      .filter(casefold(media::artist).like(like_pattern(artist)).escape('\\'))
      .order(media::title.asc())
      .load::<MediaRow>(&mut *conn)
      .map_err(db_error)?;
    to_media(rows)
  }

  fn find_by_year(&self, year: i32) -> Result<Vec<Media>, CoreError> {
    let mut conn = self.conn()?;
    let rows = media::table
      .filter(media::release_year.eq(year))
      .order(media::title.asc())
      .load::<MediaRow>(&mut *conn)
      .map_err(db_error)?;
    to_media(rows)
  }

  fn search(&self, keyword: &str) -> Result<Vec<Media>, CoreError> {
    let pattern = like_pattern(keyword);
    debug!(%pattern, "searching media");

    let mut conn = self.conn()?;
    let rows = media::table
      .filter(
        casefold(media::title)
          .like(pattern.as_str())
          .escape('\\')
          .or(casefold(media::artist).like(pattern.as_str()).escape('\\')),
      )
      .order(media::title.asc())
      .load::<MediaRow>(&mut *conn)
      .map_err(db_error)?;
    to_media(rows)
  }
}
