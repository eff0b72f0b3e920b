//! Progress monitor
//!
//! A single repeating one-second timer, started when playback enters
//! `Playing` and stopped on pause/stop. Each tick pushes the current
//! position to every registered observer and broadcasts a `trackprogress`
//! event. Starting twice never creates a second timer; stopping when not
//! running is safe.

use crate::events::{EventBus, PlayerEvent};
use crate::sink::MediaSink;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Tick interval of the monitor
pub const MONITOR_TICK: Duration = Duration::from_secs(1);

/// Registered sink for periodic playback-position updates
///
/// Observers are shared-read, engine-write only: they receive pushes and
/// never call back into engine state.
pub trait ProgressObserver: Send + Sync {
    /// Periodic position tick while playing
    fn update(&self, elapsed: Duration, total: Duration);

    /// Playback paused
    fn pause(&self);

    /// Playback resumed
    fn resume(&self);

    /// Playback ran out of tracks
    fn end(&self);
}

/// Shared observer registry
pub(crate) type SharedObservers = Arc<Mutex<Vec<Arc<dyn ProgressObserver>>>>;

/// Owns the repeating progress timer
#[derive(Default)]
pub(crate) struct ProgressMonitor {
    task: Option<JoinHandle<()>>,
}

impl ProgressMonitor {
    /// Start the timer if it is not already running
    ///
    /// Notifies observers of the resume before the first tick.
    pub(crate) fn start(
        &mut self,
        sink: Arc<dyn MediaSink>,
        observers: SharedObservers,
        bus: Arc<dyn EventBus>,
    ) {
        if self.task.is_some() {
            return;
        }

        for observer in observers.lock().unwrap().iter() {
            observer.resume();
        }

        self.task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(MONITOR_TICK);
            // The immediate first tick would report a position of zero
            ticker.tick().await;

            loop {
                ticker.tick().await;

                let elapsed = sink.position();
                let total = sink.duration();

                for observer in observers.lock().unwrap().iter() {
                    observer.update(elapsed, total);
                }

                bus.emit(PlayerEvent::TrackProgress {
                    elapsed_secs: elapsed.as_secs(),
                    total_secs: total.as_secs(),
                });
            }
        }));
    }

    /// Stop the timer and notify observers of the pause
    ///
    /// No-op when the timer is not running.
    pub(crate) fn stop(&mut self, observers: &SharedObservers) {
        let Some(task) = self.task.take() else {
            return;
        };
        task.abort();

        for observer in observers.lock().unwrap().iter() {
            observer.pause();
        }
    }

    /// Whether the timer is currently running
    pub(crate) fn is_running(&self) -> bool {
        self.task.is_some()
    }
}

impl Drop for ProgressMonitor {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
