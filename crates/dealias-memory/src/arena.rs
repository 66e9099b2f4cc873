//! Bump arena for per-call temporaries.
//!
//! Convolution calls build short lists of slice views (one per input array)
//! for their multipliers. The arena hands those lists out in O(1) and frees
//! them all at once when the next call resets it.

use bumpalo::Bump;

/// Vector allocated inside a [`BumpArena`].
pub type BumpVec<'bump, T> = bumpalo::collections::Vec<'bump, T>;

/// Bump arena owned by one engine.
#[derive(Debug, Default)]
pub struct BumpArena {
    bump: Bump,
}

impl BumpArena {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an arena with `bytes` of initial capacity.
    #[must_use]
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bump: Bump::with_capacity(bytes),
        }
    }

    /// Empty vector with room for `capacity` elements.
    pub fn vec<T>(&self, capacity: usize) -> BumpVec<'_, T> {
        BumpVec::with_capacity_in(capacity, &self.bump)
    }

    /// Free every allocation at once.
    pub fn reset(&mut self) {
        self.bump.reset();
    }

    /// Bytes currently allocated from the system.
    #[must_use]
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }
}
