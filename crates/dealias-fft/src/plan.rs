//! Engine-owned transform plans.
//!
//! A plan pairs a shared `rustfft` transform with the scratch space it needs,
//! so every engine can run its transforms without allocating.

use std::f64::consts::TAU;
use std::fmt;
use std::sync::Arc;

use rustfft::num_complex::Complex64;
use rustfft::{Fft, FftDirection};
use serde::{Deserialize, Serialize};

const ZERO: Complex64 = Complex64::new(0.0, 0.0);

/// Sign convention of a transform.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Direction {
    /// `X_k = Σ x_j e^{-2πi jk/n}`.
    Forward,
    /// `x_j = Σ X_k e^{+2πi jk/n}`.
    Backward,
}

impl Direction {
    pub(crate) fn to_rustfft(self) -> FftDirection {
        match self {
            Self::Forward => FftDirection::Forward,
            Self::Backward => FftDirection::Inverse,
        }
    }
}

/// In-place or out-of-place complex transform of a fixed length.
#[derive(Clone)]
pub struct ComplexPlan {
    fft: Arc<dyn Fft<f64>>,
    len: usize,
    direction: Direction,
    scratch: Vec<Complex64>,
}

impl ComplexPlan {
    pub(crate) fn new(fft: Arc<dyn Fft<f64>>, len: usize, direction: Direction) -> Self {
        let scratch_len = fft
            .get_inplace_scratch_len()
            .max(fft.get_outofplace_scratch_len());
        Self {
            fft,
            len,
            direction,
            scratch: vec![ZERO; scratch_len],
        }
    }

    /// Transform length.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True for a zero-length plan.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Sign convention.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Transform the first `len` values of `buffer` in place.
    pub fn fft(&mut self, buffer: &mut [Complex64]) {
        self.fft
            .process_with_scratch(&mut buffer[..self.len], &mut self.scratch);
    }

    /// Transform `input` into `output`. The contents of `input` are destroyed.
    pub fn fft_into(&mut self, input: &mut [Complex64], output: &mut [Complex64]) {
        self.fft.process_outofplace_with_scratch(
            &mut input[..self.len],
            &mut output[..self.len],
            &mut self.scratch,
        );
    }
}

impl fmt::Debug for ComplexPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComplexPlan")
            .field("len", &self.len)
            .field("direction", &self.direction)
            .finish_non_exhaustive()
    }
}

/// Complex transform applied to every column of a row-major block.
///
/// Row `k`, column `i` of the block lives at `k * stride + i`.
#[derive(Debug, Clone)]
pub struct StridedPlan {
    plan: ComplexPlan,
    columns: usize,
    stride: usize,
    work: Vec<Complex64>,
}

impl StridedPlan {
    pub(crate) fn new(plan: ComplexPlan, columns: usize, stride: usize) -> Self {
        let contiguous = columns == 1 && stride == 1;
        let work = if contiguous {
            Vec::new()
        } else {
            vec![ZERO; plan.len()]
        };
        Self {
            plan,
            columns,
            stride,
            work,
        }
    }

    /// Rows per column.
    #[must_use]
    pub fn len(&self) -> usize {
        self.plan.len()
    }

    /// True for a zero-length plan.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plan.is_empty()
    }

    /// Number of columns transformed per call.
    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Distance between consecutive rows.
    #[must_use]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Sign convention.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.plan.direction()
    }

    /// Transform every column of `data` in place.
    pub fn fft(&mut self, data: &mut [Complex64]) {
        if self.work.is_empty() {
            self.plan.fft(data);
            return;
        }
        for i in 0..self.columns {
            for (k, w) in self.work.iter_mut().enumerate() {
                *w = data[k * self.stride + i];
            }
            self.plan.fft(&mut self.work);
            for (k, w) in self.work.iter().enumerate() {
                data[k * self.stride + i] = *w;
            }
        }
    }
}

/// Real-to-complex and complex-to-real transforms of a fixed real length `n`.
///
/// The half spectrum holds `n/2 + 1` coefficients; the remaining ones follow
/// from Hermitian symmetry. An even `n` is computed as a complex transform of
/// length `n/2` over the packed pairs `x_{2j} + i·x_{2j+1}` followed by a
/// twiddle pass; an odd `n` runs a full complex transform.
#[derive(Clone)]
pub struct RealPlan {
    n: usize,
    forward: Arc<dyn Fft<f64>>,
    backward: Arc<dyn Fft<f64>>,
    /// `e^{-2πik/n}` for `k ≤ n/2`; empty for odd `n`.
    twiddles: Vec<Complex64>,
    work: Vec<Complex64>,
    scratch: Vec<Complex64>,
}

impl RealPlan {
    /// Length of the complex transforms backing a real transform of length `n`.
    #[must_use]
    pub fn complex_len(n: usize) -> usize {
        if n % 2 == 0 {
            n / 2
        } else {
            n
        }
    }

    pub(crate) fn new(n: usize, forward: Arc<dyn Fft<f64>>, backward: Arc<dyn Fft<f64>>) -> Self {
        let len = Self::complex_len(n);
        let scratch_len = forward
            .get_inplace_scratch_len()
            .max(backward.get_inplace_scratch_len());
        let twiddles = if n % 2 == 0 {
            (0..=n / 2)
                .map(|k| Complex64::from_polar(1.0, -TAU * k as f64 / n as f64))
                .collect()
        } else {
            Vec::new()
        };
        Self {
            n,
            forward,
            backward,
            twiddles,
            work: vec![ZERO; len],
            scratch: vec![ZERO; scratch_len],
        }
    }

    /// Real length.
    #[must_use]
    pub fn len(&self) -> usize {
        self.n
    }

    /// True for a zero-length plan.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Number of complex coefficients in the half spectrum.
    #[must_use]
    pub fn spectrum_len(&self) -> usize {
        self.n / 2 + 1
    }

    /// Backward transform of the half spectrum `input` into `n` reals.
    ///
    /// The imaginary parts of the zero and (for even `n`) Nyquist modes are
    /// ignored.
    pub fn c2r(&mut self, input: &[Complex64], output: &mut [f64]) {
        let n = self.n;
        if n % 2 != 0 {
            self.c2r_full(input, output);
            return;
        }
        let h = n / 2;
        let at = |k: usize| {
            if k == 0 || k == h {
                Complex64::new(input[k].re, 0.0)
            } else {
                input[k]
            }
        };
        // Z_k = E_k + i·O_k with E the spectrum of the even samples and O
        // that of the odd ones.
        for k in 0..h {
            let (a, b) = (at(k), at(h - k).conj());
            let odd = (a - b) * self.twiddles[k].conj();
            self.work[k] = a + b + Complex64::new(-odd.im, odd.re);
        }
        self.backward
            .process_with_scratch(&mut self.work, &mut self.scratch);
        for (pair, z) in output[..n].chunks_exact_mut(2).zip(&self.work) {
            pair[0] = z.re;
            pair[1] = z.im;
        }
    }

    /// Forward transform of `n` reals into the half spectrum `output`.
    pub fn r2c(&mut self, input: &[f64], output: &mut [Complex64]) {
        let n = self.n;
        if n % 2 != 0 {
            self.r2c_full(input, output);
            return;
        }
        let h = n / 2;
        for (w, pair) in self.work.iter_mut().zip(input[..n].chunks_exact(2)) {
            *w = Complex64::new(pair[0], pair[1]);
        }
        self.forward
            .process_with_scratch(&mut self.work, &mut self.scratch);
        let z = &self.work;
        for (k, x) in output[..=h].iter_mut().enumerate() {
            let a = z[k % h];
            let b = z[(h - k) % h].conj();
            let even = (a + b) * 0.5;
            // (a - b) / 2i
            let d = (a - b) * 0.5;
            let odd = Complex64::new(d.im, -d.re);
            *x = even + self.twiddles[k] * odd;
        }
    }

    fn c2r_full(&mut self, input: &[Complex64], output: &mut [f64]) {
        let n = self.n;
        self.work[0] = Complex64::new(input[0].re, 0.0);
        for k in 1..=n / 2 {
            self.work[k] = input[k];
            self.work[n - k] = input[k].conj();
        }
        self.backward
            .process_with_scratch(&mut self.work, &mut self.scratch);
        for (x, w) in output[..n].iter_mut().zip(&self.work) {
            *x = w.re;
        }
    }

    fn r2c_full(&mut self, input: &[f64], output: &mut [Complex64]) {
        for (w, &x) in self.work.iter_mut().zip(&input[..self.n]) {
            *w = Complex64::new(x, 0.0);
        }
        self.forward
            .process_with_scratch(&mut self.work, &mut self.scratch);
        let len = self.spectrum_len();
        output[..len].copy_from_slice(&self.work[..len]);
    }
}

impl fmt::Debug for RealPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RealPlan")
            .field("n", &self.n)
            .finish_non_exhaustive()
    }
}
