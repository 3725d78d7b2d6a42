use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::infrastructure::storage::db::models::entry::EntryWithCategories;

/// Short-lived read cache for the entries-with-categories view.
///
/// One slot, fixed expiry, manual invalidation on mutation. Staleness is
/// bounded by the TTL even if an invalidation is missed.
pub struct QueryCache {
    ttl: Duration,
    slot: Mutex<Option<CachedEntries>>,
}

struct CachedEntries {
    cached_at: Instant,
    entries: Vec<EntryWithCategories>,
}

impl QueryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Mutex::new(None),
        }
    }

    /// Cached value, or `None` when empty or expired.
    pub fn get(&self) -> Option<Vec<EntryWithCategories>> {
        let slot = self.slot.lock().unwrap();
        match slot.as_ref() {
            Some(cached) if cached.cached_at.elapsed() < self.ttl => Some(cached.entries.clone()),
            _ => None,
        }
    }

    pub fn put(&self, entries: Vec<EntryWithCategories>) {
        let mut slot = self.slot.lock().unwrap();
        *slot = Some(CachedEntries {
            cached_at: Instant::now(),
            entries,
        });
    }

    /// Drop the cached value; the next read goes to the store.
    pub fn invalidate(&self) {
        let mut slot = self.slot.lock().unwrap();
        *slot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cache_misses() {
        let cache = QueryCache::new(Duration::from_secs(5));
        assert!(cache.get().is_none());
    }

    #[test]
    fn test_put_then_get() {
        let cache = QueryCache::new(Duration::from_secs(5));
        cache.put(Vec::new());
        assert!(cache.get().is_some());
    }

    #[test]
    fn test_invalidate_clears() {
        let cache = QueryCache::new(Duration::from_secs(5));
        cache.put(Vec::new());
        cache.invalidate();
        assert!(cache.get().is_none());
    }

    #[test]
    fn test_expiry() {
        let cache = QueryCache::new(Duration::from_millis(10));
        cache.put(Vec::new());
        std::thread::sleep(Duration::from_millis(20));
        assert!(cache.get().is_none());
    }
}
