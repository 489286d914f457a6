pub mod media_service;
pub mod sorting;

pub use media_service::{MediaService, MediaUpdate};
