//! Buffer pool with size classes for scratch reuse.
//!
//! Engines acquire their scratch arrays at construction and hold them in
//! [`PooledBuffer`] guards. Dropping a guard, on any path, returns the storage
//! to its pool so the next engine of a similar size reuses it.

use std::collections::HashMap;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::stats::{AtomicPoolStats, Event, PoolStats};

/// Default largest buffer (in elements) kept by a pool.
pub const DEFAULT_MAX_LEN: usize = 1 << 24;

/// Default number of buffers kept per size class.
pub const DEFAULT_MAX_PER_CLASS: usize = 16;

/// Pool of `Vec<T>` storage organised by power-of-two capacity classes.
pub struct BufferPool<T> {
    classes: Mutex<HashMap<usize, Vec<Vec<T>>>>,
    max_len: usize,
    max_per_class: usize,
    stats: AtomicPoolStats,
}

impl<T: Clone + Default + Send> BufferPool<T> {
    /// Create a pool keeping buffers of up to `max_len` elements, at most
    /// `max_per_class` per class.
    #[must_use]
    pub fn new(max_len: usize, max_per_class: usize) -> Self {
        Self {
            classes: Mutex::new(HashMap::new()),
            max_len,
            max_per_class,
            stats: AtomicPoolStats::new(),
        }
    }

    /// Shared pool with default limits.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Acquire a buffer of exactly `len` default-valued elements.
    pub fn acquire(self: &Arc<Self>, len: usize) -> PooledBuffer<T> {
        let class = Self::size_class(len);
        let reused = self
            .classes
            .lock()
            .get_mut(&class)
            .and_then(Vec::pop);
        let mut buf = if let Some(mut buf) = reused {
            self.stats.record(Event::Hit);
            buf.clear();
            buf
        } else {
            self.stats.record(Event::Miss);
            Vec::with_capacity(class)
        };
        buf.resize(len, T::default());
        PooledBuffer {
            buf,
            pool: Arc::clone(self),
        }
    }

    fn release(&self, buf: Vec<T>) {
        self.stats.record(Event::Return);
        let capacity = buf.capacity();
        if capacity == 0 {
            return;
        }
        if capacity > self.max_len {
            self.stats.record(Event::Eviction);
            return;
        }
        // Largest class the storage can fully serve.
        let class = if capacity.is_power_of_two() {
            capacity
        } else {
            capacity.next_power_of_two() / 2
        };
        let mut classes = self.classes.lock();
        let pooled = classes.entry(class).or_default();
        if pooled.len() < self.max_per_class {
            pooled.push(buf);
        } else {
            self.stats.record(Event::Eviction);
        }
    }

    /// Compute size class (round up to the next power of two).
    fn size_class(len: usize) -> usize {
        len.max(1).next_power_of_two()
    }

    /// Get total number of pooled buffers.
    #[must_use]
    pub fn total_pooled(&self) -> usize {
        self.classes.lock().values().map(Vec::len).sum()
    }

    /// Get a snapshot of pool statistics.
    #[must_use]
    pub fn stats(&self) -> PoolStats {
        self.stats.snapshot()
    }

    /// Release all pooled storage.
    pub fn clear(&self) {
        self.classes.lock().clear();
    }
}

impl<T: Clone + Default + Send> Default for BufferPool<T> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LEN, DEFAULT_MAX_PER_CLASS)
    }
}

impl<T> fmt::Debug for BufferPool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferPool")
            .field("max_len", &self.max_len)
            .field("max_per_class", &self.max_per_class)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

/// Scratch buffer borrowed from a [`BufferPool`]; returned on drop.
pub struct PooledBuffer<T: Clone + Default + Send> {
    buf: Vec<T>,
    pool: Arc<BufferPool<T>>,
}

impl<T: Clone + Default + Send> Deref for PooledBuffer<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.buf
    }
}

impl<T: Clone + Default + Send> DerefMut for PooledBuffer<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.buf
    }
}

impl<T: Clone + Default + Send> Drop for PooledBuffer<T> {
    fn drop(&mut self) {
        self.pool.release(std::mem::take(&mut self.buf));
    }
}

impl<T: Clone + Default + Send + fmt::Debug> fmt::Debug for PooledBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.buf.iter()).finish()
    }
}
