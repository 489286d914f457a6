use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::CoreError;

/// A single user rating on a 1..=5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Score(u8);

impl Score {
  pub const MIN: u8 = 1;
  pub const MAX: u8 = 5;

  /// Fails with [`CoreError::InvalidArgument`] outside `1..=5`.
  pub fn new(value: i32) -> Result<Self, CoreError> {
    if !(i32::from(Self::MIN)..=i32::from(Self::MAX)).contains(&value) {
      return Err(CoreError::invalid(format!("rating must be between 1 and 5, got {value}")));
    }
    Ok(Self(value as u8))
  }

  pub fn get(&self) -> u8 {
    self.0
  }
}

/// Running accumulator of scores.
///
/// Only the sum and the count are kept, so memory stays constant no matter
/// how many ratings arrive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingTally {
  sum: u64,
  count: u32,
}

impl RatingTally {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn add(&mut self, score: Score) {
    self.sum += u64::from(score.get());
    self.count += 1;
  }

  pub fn count(&self) -> u32 {
    self.count
  }

  pub fn is_empty(&self) -> bool {
    self.count == 0
  }

  /// Mean of the recorded scores rounded to one decimal, `0.0` when empty.
  pub fn average(&self) -> f64 {
    if self.count == 0 {
      return 0.0;
    }
    let mean = self.sum as f64 / f64::from(self.count);
    (mean * 10.0).round() / 10.0
  }

  pub fn clear(&mut self) {
    *self = Self::default();
  }
}

impl fmt::Display for RatingTally {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    // floor: only a perfect 5.0 shows five full stars
    let full_stars = self.average().floor() as usize;
    for _ in 0..full_stars {
      write!(f, "★")?;
    }
    for _ in full_stars..usize::from(Score::MAX) {
      write!(f, "☆")?;
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn scores_outside_range_are_rejected() {
    assert!(matches!(Score::new(0), Err(CoreError::InvalidArgument(_))));
    assert!(matches!(Score::new(6), Err(CoreError::InvalidArgument(_))));
    assert_eq!(Score::new(1).unwrap().get(), 1);
    assert_eq!(Score::new(5).unwrap().get(), 5);
  }

  #[test]
  fn average_is_rounded_to_one_decimal() {
    let mut tally = RatingTally::new();
    assert_eq!(tally.average(), 0.0);

    for value in [5, 4, 5] {
      tally.add(Score::new(value).unwrap());
    }

    assert_eq!(tally.count(), 3);
    assert_eq!(tally.average(), 4.7);
    assert_eq!(tally.to_string(), "★★★★☆");

    tally.clear();
    assert!(tally.is_empty());
    assert_eq!(tally.to_string(), "☆☆☆☆☆");
  }
}
