//! Thread-safe cache of planned transforms.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use rustfft::Fft;
use serde::{Deserialize, Serialize};

use crate::plan::Direction;

/// Shape of a planned complex transform.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct PlanKey {
    /// Transform length.
    pub len: usize,
    /// Sign of the exponent.
    pub direction: Direction,
}

impl PlanKey {
    /// Key for a transform of `len` points in `direction`.
    #[must_use]
    pub fn new(len: usize, direction: Direction) -> Self {
        Self { len, direction }
    }
}

/// Thread-safe cache mapping shapes to shared transform objects.
pub struct PlanCache {
    cache: Mutex<HashMap<PlanKey, Arc<dyn Fft<f64>>>>,
    max_entries: usize,
}

impl PlanCache {
    /// Create a cache holding at most `max_entries` plans.
    #[must_use]
    pub fn new(max_entries: usize) -> Self {
        Self {
            cache: Mutex::new(HashMap::new()),
            max_entries: max_entries.max(1),
        }
    }

    /// Get a cached plan, if available.
    pub fn get(&self, key: &PlanKey) -> Option<Arc<dyn Fft<f64>>> {
        self.cache.lock().get(key).cloned()
    }

    /// Store a plan. A full cache is flushed before inserting.
    pub fn put(&self, key: PlanKey, plan: Arc<dyn Fft<f64>>) {
        let mut cache = self.cache.lock();
        if cache.len() >= self.max_entries && !cache.contains_key(&key) {
            tracing::debug!(entries = cache.len(), "plan cache full, flushing");
            cache.clear();
        }
        cache.insert(key, plan);
    }

    /// Get the number of cached plans.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    /// Check if the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.lock().is_empty()
    }

    /// Keys currently cached, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<PlanKey> {
        let mut keys: Vec<PlanKey> = self.cache.lock().keys().copied().collect();
        keys.sort_unstable();
        keys
    }

    /// Drop every cached plan.
    pub fn clear(&self) {
        self.cache.lock().clear();
    }
}

impl Default for PlanCache {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_CACHE_ENTRIES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustfft::FftPlanner;

    fn plan(len: usize) -> Arc<dyn Fft<f64>> {
        FftPlanner::new().plan_fft_forward(len)
    }

    #[test]
    fn put_then_get() {
        let cache = PlanCache::new(4);
        let key = PlanKey::new(8, Direction::Forward);
        let stored = plan(8);
        cache.put(key, Arc::clone(&stored));
        let hit = cache.get(&key).unwrap();
        assert!(Arc::ptr_eq(&hit, &stored));
    }

    #[test]
    fn miss_on_other_direction() {
        let cache = PlanCache::new(4);
        cache.put(PlanKey::new(8, Direction::Forward), plan(8));
        assert!(cache.get(&PlanKey::new(8, Direction::Backward)).is_none());
    }

    #[test]
    fn flushes_when_full() {
        let cache = PlanCache::new(2);
        for len in 1..=3 {
            cache.put(PlanKey::new(len, Direction::Forward), plan(len));
        }
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&PlanKey::new(3, Direction::Forward)).is_some());
    }

    #[test]
    fn overwrite_does_not_flush() {
        let cache = PlanCache::new(2);
        let a = PlanKey::new(4, Direction::Forward);
        let b = PlanKey::new(6, Direction::Forward);
        cache.put(a, plan(4));
        cache.put(b, plan(6));
        cache.put(b, plan(6));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn keys_sorted_and_clear() {
        let cache = PlanCache::default();
        cache.put(PlanKey::new(16, Direction::Backward), plan(16));
        cache.put(PlanKey::new(4, Direction::Forward), plan(4));
        let keys = cache.keys();
        assert_eq!(keys[0].len, 4);
        assert_eq!(keys[1].len, 16);
        cache.clear();
        assert!(cache.is_empty());
    }
}
