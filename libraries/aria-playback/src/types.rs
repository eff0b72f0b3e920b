//! Core types for the playback engine

use aria_core::types::{Track, TrackId};
use serde::{Deserialize, Serialize};

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No track playing
    Stopped,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,
}

/// Reference to a track, either by id or as an in-memory snapshot
///
/// Operations that accept a `TrackRef` resolve bare ids through the recent
/// history and the track store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackRef {
    /// Bare track id, resolved on demand
    Id(TrackId),
    /// Full in-memory snapshot
    Full(Box<Track>),
}

impl TrackRef {
    /// The referenced track id
    pub fn id(&self) -> &TrackId {
        match self {
            TrackRef::Id(id) => id,
            TrackRef::Full(track) => &track.id,
        }
    }
}

impl From<TrackId> for TrackRef {
    fn from(id: TrackId) -> Self {
        TrackRef::Id(id)
    }
}

impl From<&TrackId> for TrackRef {
    fn from(id: &TrackId) -> Self {
        TrackRef::Id(id.clone())
    }
}

impl From<Track> for TrackRef {
    fn from(track: Track) -> Self {
        TrackRef::Full(Box::new(track))
    }
}

/// Toggleable engine modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleMode {
    /// Random pick on `next()`
    Shuffle,
    /// Reseed from recent history when the queue runs dry
    Repeat,
    /// Queue instead of interrupt on `play_file`
    Queue,
    /// Pause/resume based on current state
    Play,
    /// Flip the sink mute flag (not persisted)
    Mute,
}
