mod identity;
mod ids;
mod playlist;
mod track;
mod user;

pub use identity::Identity;
pub use ids::{PlaylistId, TrackId, UserId};
pub use playlist::{NewPlaylist, Playlist, PlaylistEntry};
pub use track::Track;
pub use user::{LikeRecord, User};
