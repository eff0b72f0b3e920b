//! Error types for the playback engine

use aria_core::types::TrackId;
use thiserror::Error;

/// Playback errors
///
/// Unmet queue or history preconditions never surface here; those
/// operations are silent no-ops. What does surface is a track without a
/// playable resource, or a store failure from the playlist operations.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Track has no playable resource attached
    #[error("Track has no playable file: {0}")]
    MissingFile(TrackId),

    /// Core/store error
    #[error(transparent)]
    Core(#[from] aria_core::AriaError),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
