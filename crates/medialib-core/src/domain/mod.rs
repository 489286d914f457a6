pub mod ids;
pub mod media;
pub mod playback;
pub mod playlist;
pub mod rating;

pub use ids::{MediaId, PlaylistId};
pub use media::{Media, MediaKind, MediaType, PodcastDetails, SongDetails};
pub use playback::PlaybackState;
pub use playlist::{Playlist, PlaylistItem};
pub use rating::{RatingTally, Score};
