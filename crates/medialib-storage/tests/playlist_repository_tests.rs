mod common;

use common::{TestDb, bohemian_rhapsody, episode, song};
use medialib_core::domain::{Media, MediaId, Playlist, PlaylistId, PlaylistItem};
use medialib_core::errors::CoreError;
use medialib_core::ports::{CrudRepository, PlaylistRepository};

fn saved_media(t: &TestDb) -> (Media, Media, Media) {
  (
    t.store.media.save(&bohemian_rhapsody()).unwrap(),
    t.store.media.save(&song("Imagine", "John Lennon", 183, 1971)).unwrap(),
    t.store.media.save(&episode("Pilot", 1)).unwrap(),
  )
}

fn positions(playlist: &Playlist) -> Vec<(String, u32)> {
  playlist.items().iter().map(|item| (item.media().title().to_string(), item.position())).collect()
}

#[test]
fn saved_playlist_comes_back_with_items_in_order() {
  let t = TestDb::new();
  let (a, b, c) = saved_media(&t);

  let mut playlist = Playlist::new("Road Trip", Some("long drives".into())).unwrap();
  playlist.add_media(a);
  playlist.add_media(b);
  playlist.add_media(c);
  let saved = t.store.playlists.save(&playlist).unwrap();
  assert!(!saved.id().is_transient());

  let found = t.store.playlists.find_by_id(saved.id()).unwrap().unwrap();
  assert_eq!(found, saved);
  assert_eq!(
    positions(&found),
    vec![("Bohemian Rhapsody".into(), 1), ("Imagine".into(), 2), ("Pilot".into(), 3)]
  );
  assert_eq!(found.description(), Some("long drives"));
  assert_eq!(found.total_duration(), 354 + 183 + 1_800);
}

#[test]
fn empty_playlist_is_still_found() {
  let t = TestDb::new();
  let saved = t.store.playlists.save(&Playlist::new("Empty", None).unwrap()).unwrap();

  let found = t.store.playlists.find_by_id(saved.id()).unwrap().unwrap();
  assert!(found.is_empty());
  assert_eq!(t.store.playlists.find_all().unwrap().len(), 1);
}

#[test]
fn missing_playlist_is_none() {
  let t = TestDb::new();
  assert_eq!(t.store.playlists.find_by_id(PlaylistId::new(5)).unwrap(), None);
  assert!(!t.store.playlists.exists_by_id(PlaylistId::new(5)).unwrap());
}

#[test]
fn removing_a_link_keeps_other_positions() {
  let t = TestDb::new();
  let (a, b, c) = saved_media(&t);

  let mut playlist = Playlist::new("Mix", None).unwrap();
  playlist.add_media(a);
  playlist.add_media(b.clone());
  playlist.add_media(c);
  let saved = t.store.playlists.save(&playlist).unwrap();

  assert!(t.store.playlists.remove_media_from_playlist(saved.id(), b.id()).unwrap());
  assert!(!t.store.playlists.remove_media_from_playlist(saved.id(), b.id()).unwrap());

  let found = t.store.playlists.find_by_id(saved.id()).unwrap().unwrap();
  assert_eq!(positions(&found), vec![("Bohemian Rhapsody".into(), 1), ("Pilot".into(), 3)]);
}

#[test]
fn adding_media_links_at_the_given_position() {
  let t = TestDb::new();
  let (a, b, _) = saved_media(&t);
  let saved = t.store.playlists.save(&Playlist::new("Mix", None).unwrap()).unwrap();

  t.store.playlists.add_media_to_playlist(saved.id(), b.id(), 2).unwrap();
  t.store.playlists.add_media_to_playlist(saved.id(), a.id(), 1).unwrap();

  let found = t.store.playlists.find_by_id(saved.id()).unwrap().unwrap();
  assert_eq!(positions(&found), vec![("Bohemian Rhapsody".into(), 1), ("Imagine".into(), 2)]);

  let again = t.store.playlists.add_media_to_playlist(saved.id(), a.id(), 3);
  assert!(matches!(again, Err(CoreError::DuplicateResource(_))));
}

#[test]
fn linking_unknown_ids_is_not_found() {
  let t = TestDb::new();
  let (a, _, _) = saved_media(&t);
  let saved = t.store.playlists.save(&Playlist::new("Mix", None).unwrap()).unwrap();

  let missing_media = t.store.playlists.add_media_to_playlist(saved.id(), MediaId::new(404), 1);
  assert!(matches!(missing_media, Err(CoreError::ResourceNotFound(_))));

  let missing_playlist = t.store.playlists.add_media_to_playlist(PlaylistId::new(404), a.id(), 1);
  assert!(matches!(missing_playlist, Err(CoreError::ResourceNotFound(_))));
}

#[test]
fn unsaved_media_cannot_be_linked() {
  let t = TestDb::new();
  let mut playlist = Playlist::new("Draft", None).unwrap();
  playlist.add_media(bohemian_rhapsody());

  assert!(matches!(t.store.playlists.save(&playlist), Err(CoreError::InvalidArgument(_))));
  assert_eq!(t.store.playlists.count().unwrap(), 0);
}

#[test]
fn duplicate_name_is_rejected() {
  let t = TestDb::new();
  t.store.playlists.save(&Playlist::new("Favorites", None).unwrap()).unwrap();

  let again = t.store.playlists.save(&Playlist::new("Favorites", Some("other".into())).unwrap());
  assert!(matches!(again, Err(CoreError::DuplicateResource(_))));
}

#[test]
fn failed_item_link_rolls_back_the_whole_save() {
  let t = TestDb::new();
  let (a, _, _) = saved_media(&t);

  let ghost = song("Ghost", "Nobody", 100, 2000).with_id(MediaId::new(404));
  let items = vec![PlaylistItem::new(a, 1), PlaylistItem::new(ghost, 2)];
  let playlist = Playlist::from_parts(PlaylistId::TRANSIENT, "Broken", None, items).unwrap();

  assert!(matches!(t.store.playlists.save(&playlist), Err(CoreError::ResourceNotFound(_))));
  assert_eq!(t.store.playlists.count().unwrap(), 0);
}

#[test]
fn update_replaces_name_and_items() {
  let t = TestDb::new();
  let (a, b, c) = saved_media(&t);

  let mut playlist = Playlist::new("Mix", None).unwrap();
  playlist.add_media(a.clone());
  playlist.add_media(b);
  let mut saved = t.store.playlists.save(&playlist).unwrap();

  saved.set_name("Mix v2").unwrap();
  saved.set_description(Some("reworked".into()));
  saved.add_media(c);
  assert!(saved.remove_media(a.id()));
  t.store.playlists.update(&saved).unwrap();

  let found = t.store.playlists.find_by_id(saved.id()).unwrap().unwrap();
  assert_eq!(found.name(), "Mix v2");
  assert_eq!(found.description(), Some("reworked"));
  assert_eq!(positions(&found), vec![("Imagine".into(), 2), ("Pilot".into(), 3)]);
}

#[test]
fn update_of_unknown_playlist_is_not_found() {
  let t = TestDb::new();
  let ghost = Playlist::new("Ghost", None).unwrap().with_id(PlaylistId::new(77));
  assert!(matches!(t.store.playlists.update(&ghost), Err(CoreError::ResourceNotFound(_))));
}

#[test]
fn deleting_a_playlist_keeps_its_media() {
  let t = TestDb::new();
  let (a, b, _) = saved_media(&t);

  let mut playlist = Playlist::new("Short", None).unwrap();
  playlist.add_media(a.clone());
  playlist.add_media(b);
  let saved = t.store.playlists.save(&playlist).unwrap();

  t.store.playlists.delete(saved.id()).unwrap();
  assert!(!t.store.playlists.exists_by_id(saved.id()).unwrap());
  assert_eq!(t.store.media.count().unwrap(), 3);

  // the link is gone, so the media can now be deleted
  t.store.media.delete(a.id()).unwrap();
  assert!(matches!(t.store.playlists.delete(saved.id()), Err(CoreError::ResourceNotFound(_))));
}

#[test]
fn find_all_orders_by_name() {
  let t = TestDb::new();
  for name in ["Zen", "Acoustic", "Metal"] {
    t.store.playlists.save(&Playlist::new(name, None).unwrap()).unwrap();
  }

  let names: Vec<String> = t.store.playlists.find_all().unwrap().iter().map(|p| p.name().to_string()).collect();
  assert_eq!(names, vec!["Acoustic", "Metal", "Zen"]);
  assert_eq!(t.store.playlists.count().unwrap(), 3);
}
