/// Track domain types
use crate::types::TrackId;
use serde::{Deserialize, Serialize};

/// Media category of a track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Audio-only track
    Audio,
    /// Video track
    Video,
}

/// Reference to the underlying playable resource
///
/// A `Remote` URL is handed to the media sink as-is and never revoked.
/// An `Object` is a stored media object that must be materialized into an
/// ephemeral handle at play time; the engine releases that handle exactly
/// once when it moves on to a different resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileRef {
    /// Remote stream URL, played directly
    Remote(String),
    /// Stored media object, keyed in the media store
    Object(String),
}

/// Descriptive metadata attached to a track
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackMeta {
    /// Album name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,

    /// Artist name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,

    /// Release year
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,

    /// Genre
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
}

/// A playable media record
///
/// Created by an external import collaborator and persisted in the track
/// store. The playback engine mutates only `rating`, `duration_secs` and
/// `played_at`; deletion is delegated to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Audio or video
    pub kind: MediaKind,

    /// Play counter, incremented each time the track starts playing
    #[serde(default)]
    pub rating: u32,

    /// Duration in seconds, populated lazily on first successful playback
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<u64>,

    /// Optional descriptive metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<TrackMeta>,

    /// Playable resource reference
    ///
    /// `None` for playlist-embedded copies, which are persisted with the
    /// file reference stripped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<FileRef>,

    /// Unix timestamp of the last play, maintained by the engine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub played_at: Option<i64>,
}

impl Track {
    /// Create a new track with minimal metadata
    pub fn new(title: impl Into<String>, kind: MediaKind, file: FileRef) -> Self {
        Self {
            id: TrackId::generate(),
            title: title.into(),
            kind,
            rating: 0,
            duration_secs: None,
            meta: None,
            file: Some(file),
            played_at: None,
        }
    }
}

/// Partial update of the fields the engine owns
///
/// Only the set fields are written; unset fields are left untouched by the
/// store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackPatch {
    /// New play counter value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u32>,

    /// Backfilled duration in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<u64>,

    /// Unix timestamp of the play that produced this patch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub played_at: Option<i64>,
}

impl TrackPatch {
    /// Whether the patch carries no fields
    pub fn is_empty(&self) -> bool {
        self.rating.is_none() && self.duration_secs.is_none() && self.played_at.is_none()
    }
}
