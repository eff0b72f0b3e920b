//! Aria Player - Playback Engine
//!
//! Platform-agnostic playback queue and track lifecycle management for
//! Aria Player.
//!
//! This crate provides:
//! - Play-or-queue dispatch with a persisted queue mode
//! - Deduplicated play queue with uniform-random shuffle draw
//! - Bounded recent history (powers "previous" and repeat reseeding)
//! - LRU read-through track cache over the track store
//! - Play accounting (rating bump + last-played timestamp, persisted first)
//! - Lazy duration backfill from the sink
//! - 1 Hz progress monitoring with pluggable observers
//! - Debounced settings persistence
//! - Playlist create/queue/edit operations
//!
//! # Architecture
//!
//! The engine is completely platform-agnostic. The actual playback element,
//! the persistent stores, the event fan-out and user notifications are all
//! provided via traits ([`MediaSink`], [`TrackStore`], [`PlaylistStore`],
//! [`SettingsStore`], [`EventBus`], [`Notifier`]).
//!
//! Control flows one way and confirmations flow back: the engine *requests*
//! `play`/`pause`/`seek` on the sink, and only transitions its own state
//! when the platform glue forwards the sink's lifecycle notifications into
//! [`PlaybackEngine::on_playing`], [`PlaybackEngine::on_paused`] and
//! [`PlaybackEngine::on_ended`].

mod cache;
mod engine;
mod error;
mod events;
mod history;
mod monitor;
mod queue;
mod settings;
mod sink;
mod store;
pub mod types;

// Public exports
pub use cache::{TrackCache, TRACK_CACHE_CAPACITY};
pub use engine::{PlaybackEngine, PlaylistDraft};
pub use error::{PlaybackError, Result};
pub use events::{EventBus, NowPlaying, PlayerEvent};
pub use history::{RecentHistory, RECENT_CAPACITY};
pub use monitor::{ProgressObserver, MONITOR_TICK};
pub use queue::PlayQueue;
pub use settings::{PlayerSettings, SAVE_DEBOUNCE};
pub use sink::{MediaSink, MediaSource, SourceHandle};
pub use store::{
    NoticeLevel, Notifier, PlaylistStore, SettingsStore, TrackStore, SETTING_PLAYER,
};
pub use types::{PlaybackState, ToggleMode, TrackRef};
