//! Engine settings and debounced persistence
//!
//! Settings are loaded once at engine construction from the settings store
//! and written back whenever a mode flag or the volume changes. Writes are
//! debounced: rapid mutations within the window collapse into a single
//! store call that snapshots the state at fire time.

use crate::sink::MediaSink;
use crate::store::{SettingsStore, SETTING_PLAYER};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

/// Debounce window for settings writes
pub const SAVE_DEBOUNCE: Duration = Duration::from_secs(2);

/// Persisted engine settings
///
/// Mute is deliberately absent: it is a transient sink flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSettings {
    /// Reseed from recent history when the queue runs dry
    #[serde(default)]
    pub repeat: bool,

    /// Random pick on `next()`
    #[serde(default)]
    pub shuffle: bool,

    /// Queue instead of interrupt on `play_file`
    #[serde(default)]
    pub queue: bool,

    /// Volume level, 0-100
    #[serde(default = "default_volume")]
    pub volume: u8,
}

fn default_volume() -> u8 {
    100
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            repeat: false,
            shuffle: false,
            queue: false,
            volume: default_volume(),
        }
    }
}

/// Debounced writer for [`PlayerSettings`]
///
/// The snapshot written is taken when the debounce fires, not when it is
/// scheduled; the volume field is read live from the sink, matching the
/// sink-owned volume state.
pub(crate) struct SettingsWriter {
    store: Arc<dyn SettingsStore>,
    sink: Arc<dyn MediaSink>,
    flags: Arc<Mutex<PlayerSettings>>,
    pending: Arc<AtomicBool>,
}

impl SettingsWriter {
    pub(crate) fn new(
        store: Arc<dyn SettingsStore>,
        sink: Arc<dyn MediaSink>,
        flags: Arc<Mutex<PlayerSettings>>,
    ) -> Self {
        Self {
            store,
            sink,
            flags,
            pending: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Schedule a write unless one is already pending
    pub(crate) fn schedule(&self) {
        if self.pending.swap(true, Ordering::SeqCst) {
            return;
        }

        let store = Arc::clone(&self.store);
        let sink = Arc::clone(&self.sink);
        let flags = Arc::clone(&self.flags);
        let pending = Arc::clone(&self.pending);

        tokio::spawn(async move {
            tokio::time::sleep(SAVE_DEBOUNCE).await;
            pending.store(false, Ordering::SeqCst);

            let mut snapshot = *flags.lock().unwrap();
            snapshot.volume = sink.volume();

            let value = match serde_json::to_value(snapshot) {
                Ok(value) => value,
                Err(e) => {
                    warn!("failed to serialize player settings: {e}");
                    return;
                }
            };

            if let Err(e) = store.set(SETTING_PLAYER, value).await {
                warn!("failed to persist player settings: {e}");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_default() {
        let settings: PlayerSettings = serde_json::from_str(r#"{"shuffle":true}"#).unwrap();
        assert!(settings.shuffle);
        assert!(!settings.repeat);
        assert!(!settings.queue);
        assert_eq!(settings.volume, 100);
    }

    #[test]
    fn settings_roundtrip() {
        let settings = PlayerSettings {
            repeat: true,
            shuffle: false,
            queue: true,
            volume: 40,
        };
        let json = serde_json::to_value(settings).unwrap();
        let back: PlayerSettings = serde_json::from_value(json).unwrap();
        assert_eq!(back, settings);
    }
}
