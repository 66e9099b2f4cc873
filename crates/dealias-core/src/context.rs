//! Shared planning and scratch resources.

use std::sync::Arc;

use dealias_fft::{Complex64, FftConfig, Planner};
use dealias_memory::{BufferPool, PooledBuffer};

/// Planner and scratch pools shared by the engines built from it.
///
/// Engines acquire every scratch array from the context's pools when they are
/// built and hand them back when they are dropped. Cloning a context shares
/// the underlying planner and pools.
#[derive(Debug, Clone)]
pub struct Context {
    planner: Arc<Planner>,
    complex: Arc<BufferPool<Complex64>>,
    real: Arc<BufferPool<f64>>,
}

impl Context {
    /// Context with a planner built from `config` and fresh pools.
    #[must_use]
    pub fn new(config: FftConfig) -> Self {
        Self::with_planner(Arc::new(Planner::new(config)))
    }

    /// Context around an existing planner.
    #[must_use]
    pub fn with_planner(planner: Arc<Planner>) -> Self {
        Self {
            planner,
            complex: BufferPool::shared(),
            real: BufferPool::shared(),
        }
    }

    /// Transform planner.
    #[must_use]
    pub fn planner(&self) -> &Planner {
        &self.planner
    }

    /// Pool serving complex scratch.
    #[must_use]
    pub fn complex_pool(&self) -> &Arc<BufferPool<Complex64>> {
        &self.complex
    }

    /// Pool serving real scratch.
    #[must_use]
    pub fn real_pool(&self) -> &Arc<BufferPool<f64>> {
        &self.real
    }

    /// Zeroed complex scratch of `len` values.
    pub fn complex_buffer(&self, len: usize) -> PooledBuffer<Complex64> {
        self.complex.acquire(len)
    }

    /// `count` zeroed complex scratch arrays of `len` values each.
    pub fn complex_buffers(&self, count: usize, len: usize) -> Vec<PooledBuffer<Complex64>> {
        (0..count).map(|_| self.complex.acquire(len)).collect()
    }

    /// Zeroed real scratch of `len` values.
    pub fn real_buffer(&self, len: usize) -> PooledBuffer<f64> {
        self.real.acquire(len)
    }

    /// `count` zeroed real scratch arrays of `len` values each.
    pub fn real_buffers(&self, count: usize, len: usize) -> Vec<PooledBuffer<f64>> {
        (0..count).map(|_| self.real.acquire(len)).collect()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new(FftConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealias_fft::Direction;

    #[test]
    fn buffers_return_to_shared_pools() {
        let context = Context::default();
        {
            let _a = context.complex_buffers(3, 16);
            let _b = context.real_buffer(32);
        }
        assert_eq!(context.complex_pool().total_pooled(), 3);
        assert_eq!(context.real_pool().total_pooled(), 1);
        let _again = context.complex_buffer(16);
        assert_eq!(context.complex_pool().stats().hits, 1);
    }

    #[test]
    fn clones_share_planner() {
        let context = Context::default();
        let other = context.clone();
        let _plan = context.planner().complex(8, Direction::Forward);
        assert_eq!(other.planner().cache().len(), 1);
    }
}
