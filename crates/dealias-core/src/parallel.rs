//! Block-parallel loop driver.
//!
//! Index ranges are cut into contiguous blocks of the zeta table's block size
//! `s`, so each block loads a single coarse twiddle and walks the fine table.
//! Blocks are independent; every region ends when all of them have finished.

use dealias_memory::BumpArena;
use rayon::prelude::*;
use rayon::ThreadPool;

use crate::error::ConvError;

/// Runs parallel regions on a dedicated worker pool, or inline for one thread.
#[derive(Debug)]
pub struct Parallel {
    threads: usize,
    pool: Option<ThreadPool>,
}

impl Parallel {
    /// Driver using `threads` workers. Zero or one runs sequentially.
    pub fn new(threads: usize) -> Result<Self, ConvError> {
        let threads = threads.max(1);
        let pool = if threads > 1 {
            Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("dealias-{i}"))
                    .build()?,
            )
        } else {
            None
        };
        Ok(Self { threads, pool })
    }

    /// Sequential driver.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            threads: 1,
            pool: None,
        }
    }

    /// Number of workers.
    #[must_use]
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Run `op` inside the worker pool, so nested rayon calls use it.
    pub fn install<R, F>(&self, op: F) -> R
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }

    /// Evaluate `f(0..len)` into a vector.
    pub fn collect<T, F>(&self, len: usize, f: F) -> Vec<T>
    where
        T: Send,
        F: Fn(usize) -> T + Sync + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(|| (0..len).into_par_iter().map(f).collect()),
            None => (0..len).map(f).collect(),
        }
    }

    /// Call `op(a, chunk)` for every block `a` of `block` elements of `data`.
    pub fn for_each_block<T, F>(&self, data: &mut [T], block: usize, op: F)
    where
        T: Send,
        F: Fn(usize, &mut [T]) + Sync + Send,
    {
        let block = block.max(1);
        match &self.pool {
            Some(pool) => pool.install(|| {
                data.par_chunks_mut(block)
                    .enumerate()
                    .for_each(|(a, chunk)| op(a, chunk));
            }),
            None => {
                for (a, chunk) in data.chunks_mut(block).enumerate() {
                    op(a, chunk);
                }
            }
        }
    }

    /// Like [`Parallel::for_each_block`] over several equally long arrays at
    /// once: `op(a, chunks)` receives block `a` of every array, in order.
    ///
    /// The per-block chunk lists are laid out block-major in `arena`, which
    /// the caller resets between calls.
    pub fn for_each_block_zip<T, F>(
        &self,
        arena: &BumpArena,
        arrays: &mut [&mut [T]],
        block: usize,
        op: F,
    ) where
        T: Send,
        F: Fn(usize, &mut [&mut [T]]) + Sync + Send,
    {
        let block = block.max(1);
        let width = arrays.len();
        if width == 0 {
            return;
        }
        let blocks = arrays
            .iter()
            .map(|a| a.len().div_ceil(block))
            .min()
            .unwrap_or(0);
        let mut chunks = arena.vec(width);
        chunks.extend(arrays.iter_mut().map(|a| a.chunks_mut(block)));
        let mut groups = arena.vec(blocks * width);
        for _ in 0..blocks {
            groups.extend(chunks.iter_mut().filter_map(Iterator::next));
        }
        let groups = groups.as_mut_slice();
        match &self.pool {
            Some(pool) => pool.install(|| {
                groups
                    .par_chunks_mut(width)
                    .enumerate()
                    .for_each(|(a, group)| op(a, group));
            }),
            None => {
                for (a, group) in groups.chunks_mut(width).enumerate() {
                    op(a, group);
                }
            }
        }
    }
}

impl Default for Parallel {
    fn default() -> Self {
        Self::sequential()
    }
}
