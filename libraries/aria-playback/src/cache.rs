//! Bounded track cache
//!
//! Sits in front of the track store for id-to-track resolution during
//! playlist assembly. Bounded size is the contract; eviction is plain LRU.

use crate::store::TrackStore;
use aria_core::error::Result;
use aria_core::types::{Track, TrackId};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Default cache capacity
pub const TRACK_CACHE_CAPACITY: usize = 100;

/// LRU cache of resolved tracks keyed by id
pub struct TrackCache {
    store: Arc<dyn TrackStore>,
    cache: LruCache<TrackId, Track>,
}

impl TrackCache {
    /// Create a cache with the default capacity
    pub fn new(store: Arc<dyn TrackStore>) -> Self {
        Self::with_capacity(store, TRACK_CACHE_CAPACITY)
    }

    /// Create a cache with an explicit capacity
    pub fn with_capacity(store: Arc<dyn TrackStore>, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            store,
            cache: LruCache::new(capacity),
        }
    }

    /// Resolve a track by id, hitting the store only on a miss
    pub async fn get(&mut self, id: &TrackId) -> Result<Track> {
        if let Some(track) = self.cache.get(id) {
            return Ok(track.clone());
        }

        let track = self.store.get(id).await?;
        self.cache.put(id.clone(), track.clone());
        Ok(track)
    }

    /// Drop the cached entry for an id, if any
    pub fn invalidate(&mut self, id: &TrackId) {
        self.cache.pop(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aria_core::types::{FileRef, MediaKind, TrackPatch};
    use aria_core::AriaError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct CountingStore {
        tracks: Mutex<Vec<Track>>,
        gets: AtomicUsize,
    }

    impl CountingStore {
        fn new(tracks: Vec<Track>) -> Self {
            Self {
                tracks: Mutex::new(tracks),
                gets: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl TrackStore for CountingStore {
        async fn get(&self, id: &TrackId) -> Result<Track> {
            self.gets.fetch_add(1, Ordering::SeqCst);
            self.tracks
                .lock()
                .unwrap()
                .iter()
                .find(|t| &t.id == id)
                .cloned()
                .ok_or_else(|| AriaError::TrackNotFound(id.clone()))
        }

        async fn update(&self, _id: &TrackId, _patch: TrackPatch) -> Result<()> {
            Ok(())
        }

        async fn remove(&self, _id: &TrackId) -> Result<()> {
            Ok(())
        }

        async fn latest(&self, _limit: usize) -> Result<Vec<Track>> {
            Ok(Vec::new())
        }

        async fn count_by_kind(&self, _kind: MediaKind) -> Result<u64> {
            Ok(0)
        }

        async fn list_by_rating(&self, _kind: MediaKind, _offset: usize) -> Result<Vec<Track>> {
            Ok(Vec::new())
        }
    }

    fn track(id: &str) -> Track {
        let mut t = Track::new(id.to_string(), MediaKind::Audio, FileRef::Object(id.to_string()));
        t.id = TrackId::new(id);
        t
    }

    #[tokio::test]
    async fn second_get_hits_cache() {
        let store = Arc::new(CountingStore::new(vec![track("a")]));
        let mut cache = TrackCache::new(store.clone());

        let id = TrackId::new("a");
        cache.get(&id).await.unwrap();
        cache.get(&id).await.unwrap();

        assert_eq!(store.gets.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn capacity_evicts_least_recent() {
        let store = Arc::new(CountingStore::new(vec![track("a"), track("b"), track("c")]));
        let mut cache = TrackCache::with_capacity(store.clone(), 2);

        cache.get(&TrackId::new("a")).await.unwrap();
        cache.get(&TrackId::new("b")).await.unwrap();
        // Evicts "a"
        cache.get(&TrackId::new("c")).await.unwrap();
        // Miss again
        cache.get(&TrackId::new("a")).await.unwrap();

        assert_eq!(store.gets.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn miss_propagates_not_found() {
        let store = Arc::new(CountingStore::new(Vec::new()));
        let mut cache = TrackCache::new(store);

        let err = cache.get(&TrackId::new("ghost")).await.unwrap_err();
        assert!(matches!(err, AriaError::TrackNotFound(_)));
    }

    #[tokio::test]
    async fn invalidate_forces_store_lookup() {
        let store = Arc::new(CountingStore::new(vec![track("a")]));
        let mut cache = TrackCache::new(store.clone());

        let id = TrackId::new("a");
        cache.get(&id).await.unwrap();
        cache.invalidate(&id);
        cache.get(&id).await.unwrap();

        assert_eq!(store.gets.load(Ordering::SeqCst), 2);
    }
}
