use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use tracing::{debug, info};

use medialib_core::domain::{MediaId, Playlist, PlaylistId, PlaylistItem};
use medialib_core::errors::CoreError;
use medialib_core::ports::{CrudRepository, PlaylistRepository};

use crate::db::{Database, SqlitePooledConnection};
use crate::error::{StorageError, classify, db_error};
use crate::models::{PlaylistItemRecord, PlaylistJoinRow, PlaylistRecord, fold_playlists, to_column};
use crate::schema::{media, playlist_items, playlists};

/// [`PlaylistRepository`] over `playlists` + `playlist_items`.
#[derive(Clone)]
pub struct SqlitePlaylistRepository {
  db: Database,
}

impl SqlitePlaylistRepository {
  pub fn new(db: Database) -> Self {
    Self { db }
  }

  fn conn(&self) -> Result<SqlitePooledConnection, CoreError> {
    Ok(self.db.conn()?)
  }

  /// Playlists with their items, grouped by playlist and in position order.
  fn load_joined(&self, only: Option<PlaylistId>) -> Result<Vec<Playlist>, CoreError> {
    let mut conn = self.conn()?;

    let joined = playlists::table
      .left_join(playlist_items::table.left_join(media::table))
      .select((playlists::all_columns, playlist_items::position.nullable(), media::all_columns.nullable()))
      .order((playlists::name.asc(), playlists::id.asc(), playlist_items::position.asc()));

    let rows = match only {
      Some(id) => joined.filter(playlists::id.eq(id.get())).load::<PlaylistJoinRow>(&mut *conn),
      None => joined.load::<PlaylistJoinRow>(&mut *conn),
    }
    .map_err(db_error)?;

    debug!(rows = rows.len(), "loaded playlist rows");
    fold_playlists(rows)
  }
}

fn duplicate_name(name: &str) -> CoreError {
  CoreError::DuplicateResource(format!("playlist with name '{name}' already exists"))
}

fn link_item(
  conn: &mut SqliteConnection,
  playlist_id: i32,
  media_id: MediaId,
  position: u32,
) -> Result<(), StorageError> {
  if media_id.is_transient() {
    return Err(CoreError::InvalidArgument("media must be saved before it is added to a playlist".into()).into());
  }

  let record = PlaylistItemRecord { playlist_id, media_id: media_id.get(), position: to_column(position, "position")? };

  diesel::insert_into(playlist_items::table).values(&record).execute(conn).map_err(|e| {
    StorageError::Core(classify(
      e,
      || CoreError::DuplicateResource(format!("media {media_id} is already in playlist {playlist_id}")),
      || CoreError::ResourceNotFound(format!("media {media_id} or playlist {playlist_id} not found")),
    ))
  })?;

  Ok(())
}

fn link_items(conn: &mut SqliteConnection, playlist_id: i32, items: &[PlaylistItem]) -> Result<(), StorageError> {
  for item in items {
    link_item(conn, playlist_id, item.media().id(), item.position())?;
  }
  Ok(())
}

impl CrudRepository<Playlist, PlaylistId> for SqlitePlaylistRepository {
  /// Inserts the playlist and links all of its items in one transaction.
  fn save(&self, entity: &Playlist) -> Result<Playlist, CoreError> {
    let record = PlaylistRecord::from(entity);
    let mut conn = self.conn()?;

    let new_id = conn.transaction::<_, StorageError, _>(|conn| {
      let new_id = diesel::insert_into(playlists::table)
        .values(&record)
        .returning(playlists::id)
        .get_result::<i32>(conn)
        .map_err(|e| {
          classify(e, || duplicate_name(&record.name), || CoreError::DatabaseOperation("playlist insert rejected".into()))
        })?;

      link_items(conn, new_id, entity.items())?;
      Ok(new_id)
    })?;

    info!(id = new_id, name = %record.name, items = entity.len(), "playlist saved");
    Ok(entity.clone().with_id(PlaylistId::new(new_id)))
  }

  fn find_by_id(&self, id: PlaylistId) -> Result<Option<Playlist>, CoreError> {
    Ok(self.load_joined(Some(id))?.into_iter().next())
  }

  fn find_all(&self) -> Result<Vec<Playlist>, CoreError> {
    self.load_joined(None)
  }

  /// Overwrites name and description and replaces the item links, atomically.
  fn update(&self, entity: &Playlist) -> Result<Playlist, CoreError> {
    let record = PlaylistRecord::from(entity);
    let id = entity.id().get();
    let mut conn = self.conn()?;

    conn.transaction::<_, StorageError, _>(|conn| {
      let affected = diesel::update(playlists::table.find(id))
        .set(&record)
        .execute(conn)
        .map_err(|e| {
          classify(e, || duplicate_name(&record.name), || CoreError::DatabaseOperation("playlist update rejected".into()))
        })?;

      if affected == 0 {
        return Err(CoreError::ResourceNotFound(format!("playlist with id {id} not found")).into());
      }

      diesel::delete(playlist_items::table.filter(playlist_items::playlist_id.eq(id))).execute(conn)?;
      link_items(conn, id, entity.items())
    })?;

    info!(id, name = %record.name, "playlist updated");
    Ok(entity.clone())
  }

  /// Item links go with the playlist; the media rows stay.
  fn delete(&self, id: PlaylistId) -> Result<(), CoreError> {
    let mut conn = self.conn()?;
    let affected = diesel::delete(playlists::table.find(id.get())).execute(&mut *conn).map_err(db_error)?;

    if affected == 0 {
      return Err(CoreError::ResourceNotFound(format!("playlist with id {id} not found")));
    }

    info!(%id, "playlist deleted");
    Ok(())
  }

  fn exists_by_id(&self, id: PlaylistId) -> Result<bool, CoreError> {
    let mut conn = self.conn()?;
    diesel::select(diesel::dsl::exists(playlists::table.find(id.get())))
      .get_result::<bool>(&mut *conn)
      .map_err(db_error)
  }

  fn count(&self) -> Result<u64, CoreError> {
    let mut conn = self.conn()?;
    let total = playlists::table.count().get_result::<i64>(&mut *conn).map_err(db_error)?;
    Ok(total.max(0) as u64)
  }
}

impl PlaylistRepository for SqlitePlaylistRepository {
  fn add_media_to_playlist(&self, playlist_id: PlaylistId, media_id: MediaId, position: u32) -> Result<(), CoreError> {
    let mut conn = self.conn()?;
    link_item(&mut conn, playlist_id.get(), media_id, position)?;
    info!(%playlist_id, %media_id, position, "media added to playlist");
    Ok(())
  }

  fn remove_media_from_playlist(&self, playlist_id: PlaylistId, media_id: MediaId) -> Result<bool, CoreError> {
    let mut conn = self.conn()?;
    let affected = diesel::delete(
      playlist_items::table
        .filter(playlist_items::playlist_id.eq(playlist_id.get()))
        .filter(playlist_items::media_id.eq(media_id.get())),
    )
    .execute(&mut *conn)
    .map_err(db_error)?;

    debug!(%playlist_id, %media_id, removed = affected > 0, "remove media from playlist");
    Ok(affected > 0)
  }
}
