//! Two-level tables of roots of unity.
//!
//! `ζ^k = e^{2πik/n}` for `k < m` is stored as the product of a coarse and a
//! fine table of about `√m` entries each: `ζ^k = high[k / s] · low[k % s]`.
//! Each entry is evaluated directly with `sin`/`cos`, so the table is as
//! accurate as a full one and costs `O(√m)` memory.

use std::f64::consts::TAU;

use dealias_fft::Complex64;

use crate::cvec::zmult;
use crate::parallel::Parallel;

/// Factorised table of `e^{2πik/n}` for `0 ≤ k < m`.
#[derive(Debug, Clone)]
pub struct ZetaTable {
    high: Vec<Complex64>,
    low: Vec<Complex64>,
    s: usize,
    n: usize,
    m: usize,
}

/// Largest `s` with `s² ≤ m`, at least 1.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn block_size(m: usize) -> usize {
    let mut s = (m as f64).sqrt() as usize;
    while s * s > m {
        s -= 1;
    }
    while (s + 1) * (s + 1) <= m {
        s += 1;
    }
    s.max(1)
}

#[inline]
fn root(k: usize, n: usize) -> Complex64 {
    let arg = TAU * k as f64 / n as f64;
    let (sin, cos) = arg.sin_cos();
    Complex64::new(cos, sin)
}

impl ZetaTable {
    /// Table of the `n`-th roots of unity `ζ^0..ζ^{m-1}`.
    pub fn new(n: usize, m: usize, parallel: &Parallel) -> Self {
        let m = m.max(1);
        let s = block_size(m);
        let t = m.div_ceil(s);
        let high = parallel.collect(t, |a| root(s * a, n));
        let low = parallel.collect(s, |b| root(b, n));
        Self { high, low, s, n, m }
    }

    /// Block size `s`: entries per coarse step.
    #[inline]
    pub fn block_size(&self) -> usize {
        self.s
    }

    /// Root order `n`.
    #[inline]
    pub fn order(&self) -> usize {
        self.n
    }

    /// Number of tabulated powers `m`.
    #[inline]
    pub fn len(&self) -> usize {
        self.m
    }

    /// Always false: a table holds at least `ζ^0`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Coarse entry `ζ^{s·a}`.
    #[inline]
    pub fn high(&self, a: usize) -> Complex64 {
        self.high[a]
    }

    /// Fine entry `ζ^b`, `b < s`.
    #[inline]
    pub fn low(&self, b: usize) -> Complex64 {
        self.low[b]
    }

    /// `ζ^k` for `k < m`.
    #[inline]
    pub fn get(&self, k: usize) -> Complex64 {
        zmult(self.high[k / self.s], self.low[k % self.s])
    }
}
