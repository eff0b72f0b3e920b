//! Media sink abstraction
//!
//! Abstracts the native audio/video playback element. The engine drives the
//! sink through this trait; the sink's platform glue forwards its lifecycle
//! notifications back into the engine (`PlaybackEngine::on_playing`,
//! `on_paused`, `on_ended`).

use aria_core::types::FileRef;
use std::time::Duration;

/// Handle to an ephemeral playable object materialized for one track
///
/// `revoke` consumes the handle, so a bound resource is released at most
/// once. The engine calls it exactly once, at the point it moves on to a
/// different resource.
pub trait SourceHandle: Send {
    /// Release the underlying object
    fn revoke(self: Box<Self>);
}

/// A playable resource bound (or about to be bound) to the sink
#[derive(Debug)]
pub struct MediaSource {
    url: String,
    handle: Option<Box<dyn SourceHandle>>,
}

impl MediaSource {
    /// Remote resource; nothing to release
    pub fn remote(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            handle: None,
        }
    }

    /// Locally materialized resource backed by an ephemeral handle
    pub fn local(url: impl Into<String>, handle: Box<dyn SourceHandle>) -> Self {
        Self {
            url: url.into(),
            handle: Some(handle),
        }
    }

    /// Resource URL handed to the sink
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Whether this resource owns an ephemeral handle
    pub fn is_local(&self) -> bool {
        self.handle.is_some()
    }

    /// Release the ephemeral handle, if any
    ///
    /// Consumes the source; remote resources are a no-op.
    pub(crate) fn release(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.revoke();
        }
    }
}

impl std::fmt::Debug for dyn SourceHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SourceHandle")
    }
}

/// Platform-agnostic media playback element
///
/// Implementations wrap the actual playback primitive (an HTML media
/// element, a native pipeline, a test double) behind interior mutability;
/// the engine shares the sink with its progress monitor task.
pub trait MediaSink: Send + Sync {
    /// Materialize a playable resource for a file reference
    fn open(&self, file: &FileRef) -> MediaSource;

    /// Bind a resource as the current playback source
    fn bind(&self, source: &MediaSource);

    /// Request playback of the bound source
    fn play(&self);

    /// Request pause
    fn pause(&self);

    /// Seek to an absolute position
    fn seek(&self, position: Duration);

    /// Current playback position
    fn position(&self) -> Duration;

    /// Duration of the bound source
    fn duration(&self) -> Duration;

    /// Volume level, 0-100
    fn volume(&self) -> u8;

    /// Set volume level, 0-100
    fn set_volume(&self, level: u8);

    /// Whether output is muted
    fn muted(&self) -> bool;

    /// Set the mute flag
    fn set_muted(&self, muted: bool);

    /// Whether a source is currently bound
    fn has_source(&self) -> bool;
}
