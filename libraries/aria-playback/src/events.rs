//! Playback events
//!
//! Fire-and-forget broadcasts consumed by UI collaborators. The engine only
//! emits; it never subscribes, and it never references UI types.

use aria_core::types::{MediaKind, TrackId, TrackMeta};
use serde::{Deserialize, Serialize};

/// Broadcast interface for state-change notifications
pub trait EventBus: Send + Sync {
    /// Emit an event; delivery failures are the bus's concern
    fn emit(&self, event: PlayerEvent);
}

/// Events emitted by the playback engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum PlayerEvent {
    /// A new track started playing
    #[serde(rename = "trackchange")]
    TrackChange(NowPlaying),

    /// Tracks were appended to the play queue
    #[serde(rename = "trackqueued")]
    TrackQueued {
        /// Queued track ids, in queue order
        ids: Vec<TrackId>,
    },

    /// Periodic position update while playing
    #[serde(rename = "trackprogress")]
    TrackProgress {
        /// Elapsed seconds
        elapsed_secs: u64,
        /// Total seconds
        total_secs: u64,
    },

    /// Playback paused
    #[serde(rename = "trackpause")]
    TrackPause,

    /// Playback ran out of tracks and stopped
    #[serde(rename = "trackstop")]
    TrackStop,
}

/// Snapshot of the track that just started playing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NowPlaying {
    /// Track id
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Audio or video
    pub kind: MediaKind,

    /// Play counter after the increment for this play
    pub rating: u32,

    /// Duration in whole seconds as reported by the sink
    pub duration_secs: u64,

    /// Descriptive metadata, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<TrackMeta>,
}
