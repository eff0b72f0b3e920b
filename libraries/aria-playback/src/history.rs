//! Recent-history ring
//!
//! Bounded record of the most recently played track snapshots, most recent
//! last internally, exposed most-recent first. Serves as "recently played"
//! display data and as the shuffle/repeat reseed pool.

use aria_core::types::{Track, TrackId};
use std::collections::VecDeque;

/// Default history capacity
pub const RECENT_CAPACITY: usize = 50;

/// Bounded most-recently-played ring
///
/// Invariant: length never exceeds capacity; the oldest entry is evicted
/// when a push would overflow. Ids are unique because a replayed track's
/// snapshot is taken out before being pushed back at the most-recent slot.
#[derive(Debug)]
pub struct RecentHistory {
    tracks: VecDeque<Track>,
    capacity: usize,
}

impl RecentHistory {
    /// Create a new history with the given capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            tracks: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a snapshot as most recent, evicting the oldest on overflow
    pub fn push(&mut self, track: Track) {
        while self.tracks.len() >= self.capacity {
            self.tracks.pop_front();
        }
        self.tracks.push_back(track);
    }

    /// Remove and return the snapshot for an id, if present
    pub fn take(&mut self, id: &TrackId) -> Option<Track> {
        let i = self.tracks.iter().position(|t| &t.id == id)?;
        self.tracks.remove(i)
    }

    /// Remove the snapshot for an id
    ///
    /// Returns true if an entry was removed.
    pub fn remove(&mut self, id: &TrackId) -> bool {
        self.take(id).is_some()
    }

    /// Second-to-last play, the target of `prev()`
    pub fn second_last(&self) -> Option<&Track> {
        let len = self.tracks.len();
        if len < 2 {
            return None;
        }
        self.tracks.get(len - 2)
    }

    /// Snapshot at a position, oldest first
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Update the stored duration for an id's snapshot
    pub fn set_duration(&mut self, id: &TrackId, duration_secs: u64) {
        if let Some(track) = self.tracks.iter_mut().find(|t| &t.id == id) {
            track.duration_secs = Some(duration_secs);
        }
    }

    /// Ids of up to `max` most recent plays, most recent first
    pub fn recent_ids(&self, max: usize) -> Vec<TrackId> {
        self.tracks
            .iter()
            .rev()
            .take(max)
            .map(|t| t.id.clone())
            .collect()
    }

    /// Snapshots most recent first
    pub fn iter_recent_first(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter().rev()
    }

    /// Replace contents from a most-recent-first listing
    pub fn replace_from_latest(&mut self, latest: Vec<Track>) {
        self.tracks = latest.into_iter().take(self.capacity).rev().collect();
    }

    /// Number of recorded plays
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if the history is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Drop all entries
    pub fn clear(&mut self) {
        self.tracks.clear();
    }
}

impl Default for RecentHistory {
    fn default() -> Self {
        Self::new(RECENT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aria_core::types::{FileRef, MediaKind};

    fn track(id: &str) -> Track {
        let mut t = Track::new(
            format!("Track {}", id),
            MediaKind::Audio,
            FileRef::Object(format!("obj-{}", id)),
        );
        t.id = TrackId::new(id);
        t
    }

    #[test]
    fn bounded_with_fifo_eviction() {
        let mut history = RecentHistory::new(3);
        for i in 1..=4 {
            history.push(track(&i.to_string()));
        }

        assert_eq!(history.len(), 3);
        let ids = history.recent_ids(3);
        assert_eq!(ids, vec![TrackId::new("4"), TrackId::new("3"), TrackId::new("2")]);
    }

    #[test]
    fn take_moves_snapshot_out() {
        let mut history = RecentHistory::new(10);
        history.push(track("a"));
        history.push(track("b"));

        let taken = history.take(&TrackId::new("a")).unwrap();
        assert_eq!(taken.id, TrackId::new("a"));
        assert_eq!(history.len(), 1);
        assert!(history.take(&TrackId::new("a")).is_none());
    }

    #[test]
    fn second_last_needs_two_entries() {
        let mut history = RecentHistory::new(10);
        assert!(history.second_last().is_none());

        history.push(track("a"));
        assert!(history.second_last().is_none());

        history.push(track("b"));
        history.push(track("c"));
        assert_eq!(history.second_last().unwrap().id, TrackId::new("b"));
    }

    #[test]
    fn replace_from_latest_keeps_recent_first_contract() {
        let mut history = RecentHistory::new(10);
        // Store returns most recent first
        history.replace_from_latest(vec![track("newest"), track("older"), track("oldest")]);

        assert_eq!(history.len(), 3);
        let ids = history.recent_ids(2);
        assert_eq!(ids, vec![TrackId::new("newest"), TrackId::new("older")]);
        assert_eq!(history.get(0).unwrap().id, TrackId::new("oldest"));
    }

    #[test]
    fn replace_from_latest_truncates_to_capacity() {
        let mut history = RecentHistory::new(2);
        history.replace_from_latest(vec![track("1"), track("2"), track("3")]);
        assert_eq!(history.len(), 2);
        assert_eq!(history.recent_ids(2), vec![TrackId::new("1"), TrackId::new("2")]);
    }

    #[test]
    fn set_duration_updates_snapshot() {
        let mut history = RecentHistory::new(10);
        history.push(track("a"));
        history.set_duration(&TrackId::new("a"), 180);
        assert_eq!(history.get(0).unwrap().duration_secs, Some(180));
    }
}
