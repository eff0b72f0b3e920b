//! Play queue
//!
//! Ordered sequence of track ids awaiting playback. FIFO unless shuffle is
//! active, in which case a uniformly random element is selected and removed
//! on each pop. Not persisted across restarts.

use aria_core::types::TrackId;
use rand::Rng;
use std::collections::VecDeque;

/// Pending play order
///
/// Invariant: a given id appears at most once; enqueueing an id that is
/// already queued is a no-op.
#[derive(Debug, Default)]
pub struct PlayQueue {
    ids: VecDeque<TrackId>,
}

impl PlayQueue {
    /// Create a new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an id unless it is already queued
    ///
    /// Returns true if the id was added.
    pub fn enqueue(&mut self, id: TrackId) -> bool {
        if self.ids.contains(&id) {
            return false;
        }
        self.ids.push_back(id);
        true
    }

    /// Pop the next id to play
    ///
    /// FIFO, or a uniformly random pick when `shuffle` is set.
    pub fn pop_next(&mut self, shuffle: bool) -> Option<TrackId> {
        if shuffle && self.ids.len() > 1 {
            let i = rand::thread_rng().gen_range(0..self.ids.len());
            self.ids.remove(i)
        } else {
            self.ids.pop_front()
        }
    }

    /// Remove an id from the queue if present
    ///
    /// Returns true if the id was queued.
    pub fn remove(&mut self, id: &TrackId) -> bool {
        if let Some(i) = self.ids.iter().position(|q| q == id) {
            self.ids.remove(i);
            true
        } else {
            false
        }
    }

    /// Swap an id one position earlier
    ///
    /// No-op if the id is absent or already first.
    pub fn promote(&mut self, id: &TrackId) -> bool {
        match self.ids.iter().position(|q| q == id) {
            Some(i) if i > 0 => {
                self.ids.swap(i - 1, i);
                true
            }
            _ => false,
        }
    }

    /// Replace the queue contents
    pub fn replace(&mut self, ids: Vec<TrackId>) {
        self.ids = ids.into();
    }

    /// Clear the queue
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Number of queued ids
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Queued ids in play order
    pub fn ids(&self) -> impl Iterator<Item = &TrackId> {
        self.ids.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> TrackId {
        TrackId::new(s)
    }

    #[test]
    fn enqueue_is_idempotent() {
        let mut queue = PlayQueue::new();
        assert!(queue.enqueue(id("a")));
        assert!(!queue.enqueue(id("a")));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn fifo_pop_order() {
        let mut queue = PlayQueue::new();
        queue.enqueue(id("a"));
        queue.enqueue(id("b"));
        queue.enqueue(id("c"));

        assert_eq!(queue.pop_next(false), Some(id("a")));
        assert_eq!(queue.pop_next(false), Some(id("b")));
        assert_eq!(queue.pop_next(false), Some(id("c")));
        assert_eq!(queue.pop_next(false), None);
    }

    #[test]
    fn shuffle_pop_drains_without_repeats() {
        let mut queue = PlayQueue::new();
        for s in ["a", "b", "c", "d", "e"] {
            queue.enqueue(id(s));
        }

        let mut popped = Vec::new();
        while let Some(next) = queue.pop_next(true) {
            assert!(!popped.contains(&next));
            popped.push(next);
        }
        assert_eq!(popped.len(), 5);
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut queue = PlayQueue::new();
        queue.enqueue(id("a"));
        assert!(!queue.remove(&id("x")));
        assert!(queue.remove(&id("a")));
        assert!(queue.is_empty());
    }

    #[test]
    fn promote_swaps_one_earlier() {
        let mut queue = PlayQueue::new();
        queue.enqueue(id("a"));
        queue.enqueue(id("b"));
        queue.enqueue(id("c"));

        assert!(queue.promote(&id("c")));
        let order: Vec<_> = queue.ids().cloned().collect();
        assert_eq!(order, vec![id("a"), id("c"), id("b")]);

        // Already first
        assert!(!queue.promote(&id("a")));
        // Absent
        assert!(!queue.promote(&id("x")));
    }
}
