//! Domain types for Aria Player

mod ids;
mod playlist;
mod track;

pub use ids::{PlaylistId, TrackId};
pub use playlist::Playlist;
pub use track::{FileRef, MediaKind, Track, TrackMeta, TrackPatch};
