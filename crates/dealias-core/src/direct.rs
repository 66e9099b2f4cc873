//! Direct `O(m²)` convolutions.
//!
//! Reference implementations that evaluate the defining sums. They are slow
//! but exact up to rounding, and serve as the yardstick for the implicit
//! engines.

use dealias_fft::Complex64;

use crate::options::Nyquist;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);

/// Full linear convolution `c_k = Σ_p a_p b_{k-p}` of length
/// `a.len() + b.len() - 1`.
///
/// Centred inputs give a centred output: if `a` starts at index `-α` and `b`
/// at `-β`, the result starts at `-(α + β)`.
pub fn linear(a: &[Complex64], b: &[Complex64]) -> Vec<Complex64> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut c = vec![ZERO; a.len() + b.len() - 1];
    for (p, &x) in a.iter().enumerate() {
        for (q, &y) in b.iter().enumerate() {
            c[p + q] += x * y;
        }
    }
    c
}

/// Expand the Hermitian half spectrum `f_0..f_{m-1}` into the centred
/// sequence `f_{-(m-1)}..f_{m-1}`, with `f_{-k} = conj(f_k)`.
pub fn centered(f: &[Complex64], m: usize) -> Vec<Complex64> {
    let mut full = vec![ZERO; 2 * m - 1];
    for k in 0..m {
        full[m - 1 + k] = f[k];
        full[m - 1 - k] = f[k].conj();
    }
    full
}

/// Non-circular complex convolution truncated to `m` modes.
#[derive(Debug, Clone, Copy)]
pub struct DirectConvolution {
    m: usize,
}

impl DirectConvolution {
    /// Convolution of length-`m` sequences.
    #[must_use]
    pub fn new(m: usize) -> Self {
        Self { m }
    }

    /// `h_k = Σ_{p ≤ k} f_p g_{k-p}` for `k < m`.
    pub fn convolve(&self, h: &mut [Complex64], f: &[Complex64], g: &[Complex64]) {
        for k in 0..self.m {
            h[k] = (0..=k).map(|p| f[p] * g[k - p]).sum();
        }
    }

    /// `h_k = Σ_{p ≤ k} f_p f_{k-p}` for `k < m`.
    pub fn autoconvolve(&self, h: &mut [Complex64], f: &[Complex64]) {
        self.convolve(h, f, f);
    }
}

/// Convolution of Hermitian-symmetric sequences, first `m` modes.
#[derive(Debug, Clone, Copy)]
pub struct DirectHConvolution {
    m: usize,
    nyquist: Nyquist,
}

impl DirectHConvolution {
    /// Convolution of Hermitian sequences with `m` retained modes.
    #[must_use]
    pub fn new(m: usize, nyquist: Nyquist) -> Self {
        Self { m, nyquist }
    }

    #[allow(clippy::cast_possible_wrap)]
    fn coefficient(&self, f: &[Complex64], k: isize) -> Complex64 {
        let m = self.m as isize;
        if k.abs() < m {
            let value = f[k.unsigned_abs()];
            if k < 0 {
                value.conj()
            } else {
                value
            }
        } else if k.abs() == m && self.nyquist == Nyquist::Explicit {
            Complex64::new(f[self.m].re, 0.0)
        } else {
            ZERO
        }
    }

    /// `h_k = Σ_p f_p g_{k-p}` over the full symmetric range, for `k < m`.
    #[allow(clippy::cast_possible_wrap)]
    pub fn convolve(&self, h: &mut [Complex64], f: &[Complex64], g: &[Complex64]) {
        let reach = match self.nyquist {
            Nyquist::Compact => self.m as isize - 1,
            Nyquist::Explicit => self.m as isize,
        };
        for (k, out) in h[..self.m].iter_mut().enumerate() {
            let k = k as isize;
            *out = (-reach..=reach)
                .map(|p| self.coefficient(f, p) * self.coefficient(g, k - p))
                .sum();
        }
    }
}

/// Ternary convolution of Hermitian sequences, first `m` modes.
#[derive(Debug, Clone, Copy)]
pub struct DirectHTConvolution {
    m: usize,
}

impl DirectHTConvolution {
    /// Ternary convolution with `m` retained modes.
    #[must_use]
    pub fn new(m: usize) -> Self {
        Self { m }
    }

    /// `h_k = Σ_{p+q+r=k} f_p g_q e_r` for `k < m`, all indices `|·| < m`.
    pub fn convolve(&self, h: &mut [Complex64], f: &[Complex64], g: &[Complex64], e: &[Complex64]) {
        let m = self.m;
        let fg = linear(&centered(f, m), &centered(g, m));
        let fge = linear(&fg, &centered(e, m));
        let origin = 3 * (m - 1);
        h[..m].copy_from_slice(&fge[origin..origin + m]);
    }
}
