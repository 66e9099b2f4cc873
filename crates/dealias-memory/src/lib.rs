//! # dealias-memory
//!
//! Scratch memory for the dealias convolution engines.
//!
//! Provides size-classed buffer pools whose guards return their storage on
//! drop, and bump arenas for the short-lived pointer lists each convolution
//! call hands to its multiplier.
#![warn(missing_docs)]

pub mod arena;
pub mod pool;
pub mod stats;

// Re-exports
pub use arena::{BumpArena, BumpVec};
pub use pool::{BufferPool, PooledBuffer};
pub use stats::{AtomicPoolStats, PoolStats};
