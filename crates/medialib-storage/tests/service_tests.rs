mod common;

use common::{TestDb, bohemian_rhapsody, episode, song};
use medialib_core::domain::MediaId;
use medialib_core::errors::CoreError;
use medialib_core::services::{MediaService, MediaUpdate};

#[test]
fn service_over_sqlite_applies_business_rules() {
  let t = TestDb::new();
  let service = MediaService::new(t.store.media.clone());

  let created = service.create_media(&bohemian_rhapsody()).unwrap();
  service.create_media(&song("Imagine", "John Lennon", 183, 1971)).unwrap();
  service.create_media(&episode("Pilot", 1)).unwrap();

  assert!(matches!(service.create_media(&bohemian_rhapsody()), Err(CoreError::DuplicateResource(_))));
  assert_eq!(service.get_total_media_count().unwrap(), 3);

  let update = MediaUpdate { release_year: Some(1976), ..MediaUpdate::default() };
  let updated = service.update_media(created.id(), &update).unwrap();
  assert_eq!(updated.release_year(), 1976);
  assert_eq!(service.get_media_by_id(created.id()).unwrap().release_year(), 1976);

  let by_duration: Vec<u32> =
    service.get_all_media_sorted_by_duration().unwrap().iter().map(|m| m.duration_secs()).collect();
  assert_eq!(by_duration, vec![183, 354, 1_800]);
  assert_eq!(service.get_media_by_type("podcast").unwrap().len(), 1);
  assert_eq!(service.get_long_media(1_000).unwrap()[0].title(), "Pilot");
  assert_eq!(service.search("lennon").unwrap().len(), 1);

  service.delete_media(created.id()).unwrap();
  assert!(!service.media_exists(created.id()).unwrap());
  assert!(matches!(service.delete_media(MediaId::new(999)), Err(CoreError::ResourceNotFound(_))));
  assert!(matches!(service.get_media_by_id(created.id()), Err(CoreError::ResourceNotFound(_))));
}

#[test]
fn invalid_update_leaves_the_row_untouched() {
  let t = TestDb::new();
  let service = MediaService::new(t.store.media.clone());
  let created = service.create_media(&bohemian_rhapsody()).unwrap();

  let update = MediaUpdate { title: Some("   ".into()), ..MediaUpdate::default() };
  assert!(matches!(service.update_media(created.id(), &update), Err(CoreError::InvalidArgument(_))));
  assert_eq!(service.get_media_by_id(created.id()).unwrap().title(), "Bohemian Rhapsody");
}
