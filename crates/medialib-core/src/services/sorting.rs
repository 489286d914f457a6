//! Ordering and filtering helpers over media listings.

use crate::domain::Media;

pub fn sort_by_title(media: &mut [Media]) {
  media.sort_by(|a, b| a.title().cmp(b.title()));
}

pub fn sort_by_duration(media: &mut [Media]) {
  media.sort_by_key(|m| m.duration_secs());
}

/// Artist first, then title; both compared case-insensitively.
pub fn sort_by_artist_then_title(media: &mut [Media]) {
  media.sort_by_cached_key(|m| (m.artist().to_lowercase(), m.title().to_lowercase()));
}

/// Keeps media lasting at least `min_secs`.
pub fn filter_by_min_duration(media: Vec<Media>, min_secs: u32) -> Vec<Media> {
  media.into_iter().filter(|m| m.duration_secs() >= min_secs).collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::SongDetails;

  fn song(title: &str, artist: &str, duration_secs: u32) -> Media {
    Media::song(title, artist, duration_secs, 2000, SongDetails { album: None, genre: None, track_number: 1 })
      .unwrap()
  }

  fn titles(media: &[Media]) -> Vec<&str> {
    media.iter().map(Media::title).collect()
  }

  #[test]
  fn sorts_by_each_key() {
    let mut media = vec![song("b", "Zed", 30), song("C", "abba", 10), song("a", "ABBA", 20)];

    sort_by_title(&mut media);
    assert_eq!(titles(&media), vec!["C", "a", "b"]);

    sort_by_duration(&mut media);
    assert_eq!(titles(&media), vec!["C", "a", "b"]);

    sort_by_artist_then_title(&mut media);
    assert_eq!(titles(&media), vec!["a", "C", "b"]);
  }

  #[test]
  fn min_duration_filter_is_inclusive() {
    let media = vec![song("short", "x", 59), song("exact", "x", 60), song("long", "x", 600)];
    let long = filter_by_min_duration(media, 60);
    assert_eq!(titles(&long), vec!["exact", "long"]);
  }
}
