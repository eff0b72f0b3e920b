/// Playlist domain types
use crate::types::{PlaylistId, Track};
use serde::{Deserialize, Serialize};

/// A named, ordered collection of track snapshots
///
/// Playlists embed resolved track records rather than bare ids; embedded
/// copies carry no file reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Playlist name
    pub name: String,

    /// Resolved member tracks, in play order
    #[serde(default)]
    pub tracks: Vec<Track>,
}

impl Playlist {
    /// Create a new empty playlist
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: PlaylistId::generate(),
            name: name.into(),
            tracks: Vec::new(),
        }
    }

    /// Create a playlist with a specific ID and members
    pub fn with_tracks(id: PlaylistId, name: impl Into<String>, tracks: Vec<Track>) -> Self {
        Self {
            id,
            name: name.into(),
            tracks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FileRef, MediaKind};

    #[test]
    fn playlist_roundtrip() {
        let track = Track::new("Song", MediaKind::Audio, FileRef::Remote("http://x".into()));
        let playlist = Playlist::with_tracks(PlaylistId::new("p1"), "Mix", vec![track]);

        let json = serde_json::to_string(&playlist).unwrap();
        let back: Playlist = serde_json::from_str(&json).unwrap();
        assert_eq!(back, playlist);
    }
}
