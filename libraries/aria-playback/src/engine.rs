//! Playback engine - core orchestration
//!
//! Coordinates the play queue, recent history, track cache, settings and the
//! media sink. The engine issues requests to the sink (`play`, `pause`,
//! `seek`) and reacts to the sink's lifecycle callbacks (`on_playing`,
//! `on_paused`, `on_ended`); state only transitions when the sink confirms.

use crate::cache::TrackCache;
use crate::error::{PlaybackError, Result};
use crate::events::{EventBus, NowPlaying, PlayerEvent};
use crate::history::{RecentHistory, RECENT_CAPACITY};
use crate::monitor::{ProgressMonitor, ProgressObserver, SharedObservers};
use crate::queue::PlayQueue;
use crate::settings::{PlayerSettings, SettingsWriter};
use crate::sink::{MediaSink, MediaSource};
use crate::store::{
    Notifier, NoticeLevel, PlaylistStore, SettingsStore, TrackStore, SETTING_PLAYER,
};
use crate::types::{PlaybackState, ToggleMode, TrackRef};
use aria_core::types::{Playlist, PlaylistId, Track, TrackId, TrackPatch};
use chrono::Utc;
use rand::Rng;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, warn};

/// Queue length seeded from history when resuming with nothing queued
const RESUME_SEED_LEN: usize = 5;

/// Queue length seeded from history when repeat kicks in at end of queue
const REPEAT_SEED_LEN: usize = 20;

/// Notification scope for playlist editor outcomes
const EDITOR_SCOPE: &str = "editor";

/// Input for creating a playlist
#[derive(Debug, Clone)]
pub struct PlaylistDraft {
    /// Explicit playlist id; generated when absent
    pub id: Option<PlaylistId>,

    /// Playlist name
    pub name: String,

    /// Member tracks, by id or as full records
    pub tracks: Vec<TrackRef>,
}

/// Central playback management
///
/// Single-owner: the embedding application holds the engine and serializes
/// calls into it. Long-lived background work (the progress monitor, the
/// settings writer) runs on spawned tasks that share only the sink, the
/// observer list and the settings flags.
pub struct PlaybackEngine {
    // State
    state: PlaybackState,
    current: Option<Track>,
    bound: Option<MediaSource>,
    held: bool,

    // Queue and history
    queue: PlayQueue,
    recent: RecentHistory,
    tracks: TrackCache,

    // Collaborators
    sink: Arc<dyn MediaSink>,
    store: Arc<dyn TrackStore>,
    playlists: Arc<dyn PlaylistStore>,
    bus: Arc<dyn EventBus>,
    notifier: Arc<dyn Notifier>,

    // Progress reporting
    observers: SharedObservers,
    monitor: ProgressMonitor,

    // Settings
    flags: Arc<Mutex<PlayerSettings>>,
    writer: SettingsWriter,
}

impl PlaybackEngine {
    /// Create an engine, restoring persisted settings
    ///
    /// The persisted volume is applied to the sink immediately; mode flags
    /// take effect on the next operation that reads them.
    pub async fn new(
        sink: Arc<dyn MediaSink>,
        store: Arc<dyn TrackStore>,
        playlists: Arc<dyn PlaylistStore>,
        settings: Arc<dyn SettingsStore>,
        bus: Arc<dyn EventBus>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let loaded = match settings.get(SETTING_PLAYER).await {
            Ok(Some(value)) => match serde_json::from_value(value) {
                Ok(loaded) => loaded,
                Err(e) => {
                    warn!("malformed player settings, using defaults: {e}");
                    PlayerSettings::default()
                }
            },
            Ok(None) => PlayerSettings::default(),
            Err(e) => {
                warn!("failed to load player settings: {e}");
                PlayerSettings::default()
            }
        };
        sink.set_volume(loaded.volume);

        let flags = Arc::new(Mutex::new(loaded));
        let writer = SettingsWriter::new(settings, Arc::clone(&sink), Arc::clone(&flags));

        Self {
            state: PlaybackState::Stopped,
            current: None,
            bound: None,
            held: false,
            queue: PlayQueue::new(),
            recent: RecentHistory::default(),
            tracks: TrackCache::new(Arc::clone(&store)),
            sink,
            store,
            playlists,
            bus,
            notifier,
            observers: Arc::new(Mutex::new(Vec::new())),
            monitor: ProgressMonitor::default(),
            flags,
            writer,
        }
    }

    /// Seed recent history from the store
    ///
    /// A store failure leaves history empty rather than surfacing an error;
    /// the engine is usable without it.
    pub async fn load(&mut self) {
        match self.store.latest(RECENT_CAPACITY).await {
            Ok(latest) => self.recent.replace_from_latest(latest),
            Err(e) => {
                warn!("failed to load recent tracks: {e}");
                self.recent.replace_from_latest(Vec::new());
            }
        }
    }

    // ===== Playback Control =====

    /// Play a track now, or queue it when queue mode applies
    ///
    /// `queue_override` forces the decision for this call; `None` falls back
    /// to the persisted queue flag. Queue mode only defers playback when
    /// something is already queued or playing, so the first track of a
    /// session always starts immediately.
    pub async fn play_file(&mut self, track: TrackRef, queue_override: Option<bool>) -> Result<()> {
        let queue_mode = queue_override.unwrap_or_else(|| self.flags.lock().unwrap().queue);

        if queue_mode && (!self.queue.is_empty() || self.state != PlaybackState::Stopped) {
            let id = track.id().clone();
            if self.queue.enqueue(id.clone()) {
                self.bus.emit(PlayerEvent::TrackQueued { ids: vec![id] });
            }
            return Ok(());
        }

        self.play_track(track).await
    }

    /// Skip to the next queued track
    ///
    /// No-op when nothing is queued.
    #[allow(clippy::should_implement_trait)]
    pub async fn next(&mut self) -> Result<()> {
        let shuffle = self.flags.lock().unwrap().shuffle;
        let Some(id) = self.queue.pop_next(shuffle) else {
            return Ok(());
        };
        self.play_track(TrackRef::Id(id)).await
    }

    /// Replay the track played before the current one
    ///
    /// The current track sits at the top of recent history, so "previous"
    /// is the second-to-last entry. No-op when history is too short.
    pub async fn prev(&mut self) -> Result<()> {
        let Some(track) = self.recent.second_last().cloned() else {
            return Ok(());
        };
        self.play_track(TrackRef::Full(Box::new(track))).await
    }

    /// Resume the bound source, or start from the queue
    ///
    /// With nothing bound and nothing queued, reseeds a short queue from
    /// recent history so resume after restart picks up where it left off.
    pub async fn resume(&mut self) -> Result<()> {
        if self.sink.has_source() {
            self.sink.play();
            return Ok(());
        }

        if self.queue.is_empty() {
            self.seed_from_recent(RESUME_SEED_LEN);
        }
        self.next().await
    }

    /// Request pause
    ///
    /// Always forwarded to the sink; state moves to `Paused` when the sink
    /// confirms via [`PlaybackEngine::on_paused`].
    pub fn pause(&self) {
        self.sink.pause();
    }

    /// Seek within the current track, as a percentage of its duration
    ///
    /// Ignored unless playback is confirmed; seeking a paused or stopped
    /// sink would desynchronize progress reporting.
    pub fn seek(&self, percent: f64) {
        if self.state != PlaybackState::Playing {
            return;
        }

        let percent = percent.clamp(0.0, 100.0);
        let secs = (self.sink.duration().as_secs_f64() * percent / 100.0).floor();
        self.sink.seek(Duration::from_secs(secs as u64));
    }

    /// Toggle a binary mode
    ///
    /// Mode flags are persisted (debounced); mute is a transient sink flag
    /// and is not.
    pub async fn toggle(&mut self, mode: ToggleMode) -> Result<()> {
        match mode {
            ToggleMode::Play => {
                if self.state == PlaybackState::Playing {
                    self.pause();
                    Ok(())
                } else {
                    self.resume().await
                }
            }
            ToggleMode::Mute => {
                self.sink.set_muted(!self.sink.muted());
                Ok(())
            }
            ToggleMode::Shuffle => {
                self.flags.lock().unwrap().shuffle ^= true;
                self.writer.schedule();
                Ok(())
            }
            ToggleMode::Repeat => {
                self.flags.lock().unwrap().repeat ^= true;
                self.writer.schedule();
                Ok(())
            }
            ToggleMode::Queue => {
                self.flags.lock().unwrap().queue ^= true;
                self.writer.schedule();
                Ok(())
            }
        }
    }

    /// Set volume (0-100) and schedule a settings write
    pub fn set_volume(&self, level: u8) {
        self.sink.set_volume(level.min(100));
        self.writer.schedule();
    }

    /// Pause for an external interruption (incoming call, focus steal)
    ///
    /// Only a confirmed-playing engine is held, so a later
    /// [`PlaybackEngine::focus_gained`] never starts playback the user had
    /// already stopped.
    pub fn focus_lost(&mut self) {
        if self.state == PlaybackState::Playing {
            self.held = true;
            self.sink.pause();
        }
    }

    /// Resume after an external interruption, if it paused us
    pub fn focus_gained(&mut self) {
        if self.held {
            self.held = false;
            self.sink.play();
        }
    }

    // ===== Sink lifecycle callbacks =====

    /// Sink confirmed playback started
    ///
    /// Backfills the track's duration from the sink the first time it is
    /// observed, then announces the track.
    pub async fn on_playing(&mut self) {
        self.state = PlaybackState::Playing;
        self.monitor.start(
            Arc::clone(&self.sink),
            Arc::clone(&self.observers),
            Arc::clone(&self.bus),
        );

        let Some(current) = self.current.as_mut() else {
            return;
        };

        if current.duration_secs.is_none() {
            let secs = self.sink.duration().as_secs_f64().round() as u64;
            if secs > 0 {
                current.duration_secs = Some(secs);
                self.recent.set_duration(&current.id, secs);
                let patch = TrackPatch {
                    duration_secs: Some(secs),
                    ..TrackPatch::default()
                };
                if let Err(e) = self.store.update(&current.id, patch).await {
                    warn!(track = %current.id, "failed to backfill duration: {e}");
                }
            }
        }

        self.bus.emit(PlayerEvent::TrackChange(NowPlaying {
            id: current.id.clone(),
            title: current.title.clone(),
            kind: current.kind,
            rating: current.rating,
            duration_secs: current.duration_secs.unwrap_or(0),
            meta: current.meta.clone(),
        }));
    }

    /// Sink confirmed playback paused
    pub fn on_paused(&mut self) {
        self.state = PlaybackState::Paused;
        self.monitor.stop(&self.observers);
        self.bus.emit(PlayerEvent::TrackPause);
    }

    /// Sink reported the bound source played to completion
    ///
    /// Advances through the queue; when the queue is dry, repeat mode
    /// reseeds from recent history (a single random pick under shuffle),
    /// otherwise playback stops.
    pub async fn on_ended(&mut self) -> Result<()> {
        if !self.queue.is_empty() {
            return self.next().await;
        }

        let (repeat, shuffle) = {
            let flags = self.flags.lock().unwrap();
            (flags.repeat, flags.shuffle)
        };

        if repeat && !self.recent.is_empty() {
            if shuffle {
                let index = rand::thread_rng().gen_range(0..self.recent.len());
                if let Some(track) = self.recent.get(index).cloned() {
                    return self.play_track(TrackRef::Full(Box::new(track))).await;
                }
            } else {
                self.seed_from_recent(REPEAT_SEED_LEN);
                return self.next().await;
            }
        }

        debug!("queue exhausted, stopping");
        self.monitor.stop(&self.observers);
        for observer in self.observers.lock().unwrap().iter() {
            observer.end();
        }
        self.state = PlaybackState::Stopped;
        self.bus.emit(PlayerEvent::TrackStop);
        Ok(())
    }

    // ===== Queue Management =====

    /// Remove a track from the queue
    pub fn remove(&mut self, id: &TrackId) -> bool {
        self.queue.remove(id)
    }

    /// Move a queued track one position toward the front
    pub fn up(&mut self, id: &TrackId) -> bool {
        self.queue.promote(id)
    }

    /// Clear the queue
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    /// Clear recent history
    pub fn clear_recent(&mut self) {
        self.recent.clear();
    }

    /// Forget a track everywhere and delete it from the store
    ///
    /// Queue, history and cache are purged first so the track cannot come
    /// back even if the store delete fails.
    pub async fn delete(&mut self, id: &TrackId) {
        self.queue.remove(id);
        self.recent.remove(id);
        self.tracks.invalidate(id);
        if let Err(e) = self.store.remove(id).await {
            warn!(track = %id, "failed to delete track: {e}");
        }
    }

    // ===== Playlists =====

    /// Queue a playlist's tracks, starting playback if idle
    pub async fn play_playlist(&mut self, id: &PlaylistId) -> Result<()> {
        let playlist = self.playlists.get(id).await?;

        let mut queued = Vec::new();
        for track in playlist.tracks {
            if self.queue.enqueue(track.id.clone()) {
                queued.push(track.id);
            }
        }
        if !queued.is_empty() {
            self.bus.emit(PlayerEvent::TrackQueued { ids: queued });
        }

        if self.state == PlaybackState::Stopped && !self.queue.is_empty() {
            self.next().await?;
        }
        Ok(())
    }

    /// Create a playlist from a draft, resolving member tracks
    ///
    /// Embedded copies are stored with their file reference stripped. The
    /// outcome is reported through the notifier either way.
    pub async fn create_playlist(&mut self, draft: PlaylistDraft) -> Result<PlaylistId> {
        let name = draft.name.clone();
        let result = self.build_playlist(draft).await;

        let playlist = match result {
            Ok(playlist) => playlist,
            Err(e) => {
                self.notify_editor_failure(&name);
                return Err(e);
            }
        };

        let id = playlist.id.clone();
        match self.playlists.put(playlist).await {
            Ok(()) => {
                self.notifier
                    .notify(EDITOR_SCOPE, &format!("Created {name}!"), NoticeLevel::Info);
                Ok(id)
            }
            Err(e) => {
                self.notify_editor_failure(&name);
                Err(e.into())
            }
        }
    }

    /// Delete a playlist, reporting failure through the notifier
    pub async fn remove_playlist(&mut self, id: &PlaylistId) -> Result<()> {
        if let Err(e) = self.playlists.remove(id).await {
            warn!(playlist = %id, "failed to remove playlist: {e}");
            self.notifier.notify(
                EDITOR_SCOPE,
                "Failed to remove playlist",
                NoticeLevel::Error,
            );
            return Err(e.into());
        }
        Ok(())
    }

    /// Append a track to a playlist
    pub async fn add_to_playlist(&mut self, id: &PlaylistId, track: TrackRef) -> Result<()> {
        let mut track = self.resolve(track).await?;
        track.file = None;
        self.playlists.push_track(id, track).await?;
        Ok(())
    }

    /// Remove a track from a playlist
    pub async fn remove_from_playlist(
        &mut self,
        id: &PlaylistId,
        track_id: &TrackId,
    ) -> Result<()> {
        self.playlists.remove_track(id, track_id).await?;
        Ok(())
    }

    /// Resolve track references into full records through the cache
    pub async fn get_tracks(&mut self, refs: Vec<TrackRef>) -> Result<Vec<Track>> {
        let mut tracks = Vec::with_capacity(refs.len());
        for track_ref in refs {
            tracks.push(self.resolve(track_ref).await?);
        }
        Ok(tracks)
    }

    // ===== Progress & State =====

    /// Register a progress observer
    ///
    /// Observers receive position updates from the monitor task and
    /// pause/resume/end transitions from the engine.
    pub fn wrap_progress(&self, observer: Arc<dyn ProgressObserver>) {
        self.observers.lock().unwrap().push(observer);
    }

    /// Current settings snapshot, with the live sink volume
    pub fn settings(&self) -> PlayerSettings {
        let mut snapshot = *self.flags.lock().unwrap();
        snapshot.volume = self.sink.volume();
        snapshot
    }

    /// Current playback state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Currently playing (or most recently started) track
    pub fn current(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    /// Queued track ids, in queue order
    pub fn queued(&self) -> Vec<TrackId> {
        self.queue.ids().cloned().collect()
    }

    // ===== Internals =====

    /// Resolve, record and start a track
    ///
    /// The play is persisted (rating bump + timestamp) before the track
    /// enters recent history, so a crash cannot leave a played track
    /// unrecorded while it sits in history. A failed lookup skips the track
    /// rather than erroring: a queued id may refer to a deleted record.
    async fn play_track(&mut self, track: TrackRef) -> Result<()> {
        let mut track = match track {
            TrackRef::Full(track) => {
                self.recent.take(&track.id);
                *track
            }
            TrackRef::Id(id) => match self.recent.take(&id) {
                Some(track) => track,
                None => match self.tracks.get(&id).await {
                    Ok(track) => track,
                    Err(e) => {
                        warn!(track = %id, "track lookup failed, skipping: {e}");
                        return Ok(());
                    }
                },
            },
        };

        let Some(file) = track.file.clone() else {
            return Err(PlaybackError::MissingFile(track.id));
        };

        track.rating += 1;
        track.played_at = Some(Utc::now().timestamp());
        let patch = TrackPatch {
            rating: Some(track.rating),
            played_at: track.played_at,
            duration_secs: None,
        };
        if let Err(e) = self.store.update(&track.id, patch).await {
            warn!(track = %track.id, "failed to persist play: {e}");
        }
        self.tracks.invalidate(&track.id);

        self.current = Some(track.clone());
        self.recent.push(track);

        // Release the previous resource before binding the next one
        if let Some(previous) = self.bound.take() {
            previous.release();
        }
        let source = self.sink.open(&file);
        self.sink.bind(&source);
        self.bound = Some(source);
        self.sink.play();
        Ok(())
    }

    /// Replace the queue with the most recent history entries
    fn seed_from_recent(&mut self, max: usize) {
        let ids = self.recent.recent_ids(max);
        if ids.is_empty() {
            return;
        }
        self.queue.replace(ids.clone());
        self.bus.emit(PlayerEvent::TrackQueued { ids });
    }

    /// Resolve a track reference through the cache
    async fn resolve(&mut self, track: TrackRef) -> Result<Track> {
        match track {
            TrackRef::Full(track) => Ok(*track),
            TrackRef::Id(id) => Ok(self.tracks.get(&id).await?),
        }
    }

    fn notify_editor_failure(&self, name: &str) {
        self.notifier.notify(
            EDITOR_SCOPE,
            &format!("Failed to create {name}"),
            NoticeLevel::Error,
        );
    }

    /// Resolve a draft into a storable playlist
    async fn build_playlist(&mut self, draft: PlaylistDraft) -> Result<Playlist> {
        let id = draft.id.unwrap_or_else(PlaylistId::generate);
        let mut tracks = Vec::with_capacity(draft.tracks.len());
        for track_ref in draft.tracks {
            let mut track = self.resolve(track_ref).await?;
            track.file = None;
            tracks.push(track);
        }
        Ok(Playlist::with_tracks(id, draft.name, tracks))
    }
}
