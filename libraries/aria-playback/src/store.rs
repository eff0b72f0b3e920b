//! Store and notification collaborator contracts
//!
//! These traits abstract the persistent media database, the playlist store
//! and the settings store so the engine works against both local and remote
//! implementations. All I/O is async and awaited; the engine never retries
//! a failed call.

use aria_core::error::Result;
use aria_core::types::{MediaKind, Playlist, PlaylistId, Track, TrackId, TrackPatch};
use async_trait::async_trait;

/// Settings key for the engine's persisted settings
pub const SETTING_PLAYER: &str = "player";

/// Persistent track metadata store
#[async_trait]
pub trait TrackStore: Send + Sync {
    /// Get track by ID
    async fn get(&self, id: &TrackId) -> Result<Track>;

    /// Apply a field-level patch to a track
    async fn update(&self, id: &TrackId, patch: TrackPatch) -> Result<()>;

    /// Delete a track
    async fn remove(&self, id: &TrackId) -> Result<()>;

    /// Most recently played tracks, most recent first
    async fn latest(&self, limit: usize) -> Result<Vec<Track>>;

    /// Number of tracks of a media kind
    async fn count_by_kind(&self, kind: MediaKind) -> Result<u64>;

    /// Tracks of a media kind ordered by rating, paged from `offset`
    async fn list_by_rating(&self, kind: MediaKind, offset: usize) -> Result<Vec<Track>>;
}

/// Persistent playlist store
#[async_trait]
pub trait PlaylistStore: Send + Sync {
    /// Get playlist by ID
    async fn get(&self, id: &PlaylistId) -> Result<Playlist>;

    /// Create or replace a playlist
    async fn put(&self, playlist: Playlist) -> Result<()>;

    /// Delete a playlist
    async fn remove(&self, id: &PlaylistId) -> Result<()>;

    /// Append a track snapshot to a playlist's `tracks` field
    async fn push_track(&self, id: &PlaylistId, track: Track) -> Result<()>;

    /// Remove a track from a playlist's `tracks` field
    async fn remove_track(&self, id: &PlaylistId, track_id: &TrackId) -> Result<()>;
}

/// Persisted key-value settings
///
/// Values are stored as JSON for flexibility; the engine only uses the
/// [`SETTING_PLAYER`] key.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Get a setting value
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>>;

    /// Set a setting value
    async fn set(&self, key: &str, value: serde_json::Value) -> Result<()>;
}

/// Severity of a user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Informational (operation succeeded)
    Info,
    /// Operation failed
    Error,
}

/// User-facing notification collaborator
///
/// Used for playlist create/remove outcomes only; playback state changes go
/// through the event bus.
pub trait Notifier: Send + Sync {
    /// Show a notification in the given UI scope
    fn notify(&self, scope: &str, message: &str, level: NoticeLevel);
}
