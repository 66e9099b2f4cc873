//! Usage counters shared by every thread touching a pool.

use std::sync::atomic::{AtomicU64, Ordering};

/// What happened to a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Event {
    /// Served from pooled storage.
    Hit,
    /// Freshly allocated.
    Miss,
    /// Returned but discarded.
    Eviction,
    /// Returned to the pool (pooled or not).
    Return,
}

/// Snapshot of buffer pool usage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Buffers served from pooled storage.
    pub hits: u64,
    /// Buffers that needed a fresh allocation.
    pub misses: u64,
    /// Returned buffers dropped instead of pooled (too large or class full).
    pub evictions: u64,
    /// Buffers handed back to the pool.
    pub returns: u64,
}

impl PoolStats {
    /// Buffers acquired and not yet returned.
    #[must_use]
    pub fn outstanding(&self) -> u64 {
        (self.hits + self.misses).saturating_sub(self.returns)
    }

    /// Fraction of acquisitions served without allocating, 0 when idle.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        match self.hits + self.misses {
            0 => 0.0,
            total => self.hits as f64 / total as f64,
        }
    }
}

/// Relaxed counters indexed by [`Event`].
#[derive(Debug, Default)]
pub struct AtomicPoolStats {
    counts: [AtomicU64; 4],
}

impl AtomicPoolStats {
    /// Zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&self, event: Event) {
        self.counts[event as usize].fetch_add(1, Ordering::Relaxed);
    }

    fn load(&self, event: Event) -> u64 {
        self.counts[event as usize].load(Ordering::Relaxed)
    }

    /// Current values. Counters are read one at a time, so a snapshot taken
    /// while other threads are active may be slightly inconsistent.
    pub fn snapshot(&self) -> PoolStats {
        PoolStats {
            hits: self.load(Event::Hit),
            misses: self.load(Event::Miss),
            evictions: self.load(Event::Eviction),
            returns: self.load(Event::Return),
        }
    }

    /// Zero every counter.
    pub fn reset(&self) {
        self.counts.iter().for_each(|c| c.store(0, Ordering::Relaxed));
    }
}
