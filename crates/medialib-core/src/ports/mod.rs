pub mod crud_repository;
pub mod media_repository;
pub mod playlist_repository;

pub use crud_repository::CrudRepository;
pub use media_repository::MediaRepository;
pub use playlist_repository::PlaylistRepository;
