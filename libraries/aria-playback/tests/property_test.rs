//! Property-based tests for the queue and recent history
//!
//! Uses proptest to verify structural invariants across many random inputs.

use aria_core::types::{FileRef, MediaKind, Track, TrackId};
use aria_playback::{PlayQueue, RecentHistory, RECENT_CAPACITY};
use proptest::prelude::*;
use std::collections::HashSet;

// ===== Helpers =====

fn track(id: &str) -> Track {
    Track {
        id: TrackId::new(id),
        title: format!("Track {id}"),
        kind: MediaKind::Audio,
        rating: 0,
        duration_secs: None,
        meta: None,
        file: Some(FileRef::Object(format!("obj-{id}"))),
        played_at: None,
    }
}

fn arbitrary_ids() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z0-9]{1,8}", 1..200)
}

// ===== Property Tests =====

proptest! {
    /// History never exceeds its capacity, whatever gets pushed
    #[test]
    fn history_is_bounded(ids in arbitrary_ids()) {
        let mut recent = RecentHistory::default();
        for id in &ids {
            recent.push(track(id));
        }
        prop_assert!(recent.len() <= RECENT_CAPACITY);
        prop_assert_eq!(recent.len(), ids.len().min(RECENT_CAPACITY));
    }

    /// On overflow, the survivors are exactly the most recent pushes
    #[test]
    fn history_keeps_the_newest_entries(ids in prop::collection::vec("[a-z0-9]{1,8}", 51..200)) {
        let mut recent = RecentHistory::default();
        for id in &ids {
            recent.push(track(id));
        }

        let expected: Vec<&String> = ids.iter().rev().take(RECENT_CAPACITY).collect();
        let actual: Vec<TrackId> = recent.iter_recent_first().map(|t| t.id.clone()).collect();
        for (want, got) in expected.iter().zip(actual.iter()) {
            prop_assert_eq!(got, &TrackId::new(want.as_str()));
        }
    }

    /// recent_ids never returns more than asked and starts with the latest push
    #[test]
    fn recent_ids_is_truncated_and_ordered(
        ids in arbitrary_ids(),
        max in 0usize..60,
    ) {
        let mut recent = RecentHistory::default();
        for id in &ids {
            recent.push(track(id));
        }

        let listed = recent.recent_ids(max);
        prop_assert!(listed.len() <= max);
        prop_assert!(listed.len() <= recent.len());
        if max > 0 {
            if let Some(last) = ids.last() {
                prop_assert_eq!(&listed[0], &TrackId::new(last.as_str()));
            }
        }
    }

    /// Shuffle draw drains the queue without repeats or losses
    #[test]
    fn shuffle_draw_is_a_permutation(ids in arbitrary_ids()) {
        let unique: Vec<TrackId> = ids
            .iter()
            .collect::<HashSet<_>>()
            .into_iter()
            .map(|id| TrackId::new(id.as_str()))
            .collect();

        let mut queue = PlayQueue::new();
        for id in &unique {
            prop_assert!(queue.enqueue(id.clone()));
        }

        let mut drawn = Vec::new();
        while let Some(id) = queue.pop_next(true) {
            drawn.push(id);
        }

        prop_assert_eq!(drawn.len(), unique.len());
        let drawn: HashSet<TrackId> = drawn.into_iter().collect();
        let expected: HashSet<TrackId> = unique.into_iter().collect();
        prop_assert_eq!(drawn, expected);
    }

    /// Enqueue deduplicates: the queue never holds an id twice
    #[test]
    fn queue_never_holds_duplicates(ids in arbitrary_ids()) {
        let mut queue = PlayQueue::new();
        for id in &ids {
            queue.enqueue(TrackId::new(id.as_str()));
        }

        let queued: Vec<&TrackId> = queue.ids().collect();
        let unique: HashSet<&TrackId> = queued.iter().copied().collect();
        prop_assert_eq!(queued.len(), unique.len());
        prop_assert_eq!(queued.len(), ids.iter().collect::<HashSet<_>>().len());
    }
}
