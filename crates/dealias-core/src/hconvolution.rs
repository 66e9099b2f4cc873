//! Implicitly dealiased convolution of Hermitian-symmetric sequences.
//!
//! Inputs are half spectra `f_0..f_{m-1}` of real signals, `f_{-k} = conj f_k`.
//! The 3/2 padding rule puts the product on a grid of `3m` real samples,
//! evaluated as three real transforms of length `m` on the cosets
//! `r ∈ {0, +1, -1}`. Every coset is Hermitian in its own right, so only its
//! modes `0..=c`, `c = m/2`, are stored.

use dealias_fft::{Complex64, RealPlan};
use dealias_memory::{BumpArena, PooledBuffer};

use crate::context::Context;
use crate::coset::{fold3, fold3_nyquist, unfold3, unfold3_zero};
use crate::cvec::zmult;
use crate::error::{check_length, ConvError};
use crate::mult::RealMultiplier;
use crate::options::{Nyquist, Options};
use crate::parallel::Parallel;
use crate::zeta::ZetaTable;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Coset {
    Zero,
    Plus,
    Minus,
}

/// Implicitly dealiased convolution of `A` Hermitian inputs into `B` outputs.
///
/// `convolve` takes `max(A, B)` arrays holding, from `offset` on, `m`
/// coefficients (plus a real Nyquist mode at index `m` under
/// [`Nyquist::Explicit`]). The first `B` arrays receive `h_0..h_{m-1}`.
#[derive(Debug)]
pub struct ImplicitHConvolution {
    m: usize,
    c: usize,
    inputs: usize,
    outputs: usize,
    out_of_place: bool,
    nyquist: Nyquist,
    zeta: ZetaTable,
    plan: RealPlan,
    u: Vec<PooledBuffer<Complex64>>,
    reals: Vec<PooledBuffer<f64>>,
    parallel: Parallel,
    arena: BumpArena,
}

impl ImplicitHConvolution {
    /// Engine for `m` retained modes with its own planner and pools.
    pub fn new(m: usize, options: &Options) -> Result<Self, ConvError> {
        Self::with_context(m, options, &Context::default())
    }

    /// Engine for `m` retained modes sharing `context`'s planner and pools.
    pub fn with_context(m: usize, options: &Options, context: &Context) -> Result<Self, ConvError> {
        check_length(m)?;
        let options = options.clone().normalize();
        options.validate()?;
        let c = m / 2;
        let parallel = Parallel::new(options.threads)?;
        let zeta = ZetaTable::new(3 * m, c + 1, &parallel);
        let plan = context.planner().real(m);
        let slots = options.inputs.max(options.outputs);
        let u = context.complex_buffers(slots, 2 * (c + 1));
        let reals = context.real_buffers(slots, m);
        let out_of_place = options.out_of_place();

        tracing::debug!(
            m,
            c,
            s = zeta.block_size(),
            inputs = options.inputs,
            outputs = options.outputs,
            out_of_place,
            nyquist = ?options.nyquist,
            "built implicit Hermitian convolution"
        );

        Ok(Self {
            m,
            c,
            inputs: options.inputs,
            outputs: options.outputs,
            out_of_place,
            nyquist: options.nyquist,
            zeta,
            plan,
            u,
            reals,
            parallel,
            arena: BumpArena::new(),
        })
    }

    /// Binary engine: two inputs, one output.
    pub fn binary(m: usize, nyquist: Nyquist) -> Result<Self, ConvError> {
        Self::new(m, &Options::with_arity(2, 1).nyquist(nyquist))
    }

    /// Retained modes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.m
    }

    /// Always false; engines have at least one mode.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Stored modes per coset minus one (`m/2`).
    #[must_use]
    pub fn half(&self) -> usize {
        self.c
    }

    /// Nyquist convention of the inputs.
    #[must_use]
    pub fn nyquist(&self) -> Nyquist {
        self.nyquist
    }

    /// Whether coset results are staged in idle input storage.
    #[must_use]
    pub fn out_of_place(&self) -> bool {
        self.out_of_place
    }

    /// Convolve `f[0..A)` into `f[0..B)` with the real pointwise operation
    /// `mult`.
    ///
    /// # Panics
    ///
    /// If `f` holds fewer than `max(A, B)` arrays or one of them is too short
    /// for `offset` plus the stored modes.
    pub fn convolve(&mut self, f: &mut [&mut [Complex64]], mult: &dyn RealMultiplier, offset: usize) {
        let (m, c, inputs, outputs) = (self.m, self.c, self.inputs, self.outputs);
        let slots = inputs.max(outputs);
        let threads = self.parallel.threads();
        tracing::trace!(m, inputs, outputs, offset, "implicit Hermitian convolution");

        self.arena.reset();
        let arena = &self.arena;
        let parallel = &self.parallel;

        for (fi, u) in f[..inputs].iter_mut().zip(self.u.iter_mut()) {
            let nyquist = match self.nyquist {
                Nyquist::Compact => None,
                Nyquist::Explicit => Some(Complex64::new(fi[offset + m].re, 0.0)),
            };
            let (up, down) = u.split_at_mut(c + 1);
            fold(
                &self.zeta,
                parallel,
                arena,
                &mut fi[offset..offset + m],
                up,
                down,
                nyquist,
            );
        }

        let half = c + 1;
        for coset in [Coset::Zero, Coset::Plus, Coset::Minus] {
            for i in 0..inputs {
                let spectrum: &[Complex64] = match coset {
                    Coset::Zero => &f[i][offset..offset + half],
                    Coset::Plus => &self.u[i][..half],
                    Coset::Minus => &self.u[i][half..],
                };
                self.plan.c2r(spectrum, &mut self.reals[i]);
            }
            {
                let mut views = arena.vec(slots);
                views.extend(self.reals.iter_mut().map(|r| &mut r[..m]));
                let views = views.as_mut_slice();
                parallel.install(|| mult.multiply(views, m, threads));
            }
            for i in 0..outputs {
                let slot = if self.out_of_place { outputs + i } else { i };
                let target: &mut [Complex64] = match coset {
                    Coset::Zero => &mut f[slot][offset..offset + half],
                    Coset::Plus => &mut self.u[slot][..half],
                    Coset::Minus => &mut self.u[slot][half..],
                };
                self.plan.r2c(&self.reals[i], target);
            }
        }

        let ninv = 1.0 / (3 * m) as f64;
        for i in 0..outputs {
            let (outs, staging) = f.split_at_mut(outputs);
            let (staged, u): (Option<&[Complex64]>, &[Complex64]) = if self.out_of_place {
                (Some(&staging[i][offset..offset + half]), &self.u[outputs + i][..])
            } else {
                (None, &self.u[i][..])
            };
            let (lo, hi) = outs[i][offset..offset + m].split_at_mut(half);
            unfold(&self.zeta, parallel, lo, hi, staged, u, ninv);
            if self.nyquist == Nyquist::Explicit {
                outs[i][offset + m] = ZERO;
            }
        }
    }
}

/// Fold `f_0..f_{m-1}` into the stored modes of the three cosets: coset 0
/// over `f[0..=c]`, coset +1 into `up`, coset -1 into `down`.
fn fold(
    zeta: &ZetaTable,
    parallel: &Parallel,
    arena: &BumpArena,
    f: &mut [Complex64],
    up: &mut [Complex64],
    down: &mut [Complex64],
    nyquist: Option<Complex64>,
) {
    let m = f.len();
    let half = up.len();
    let f0 = f[0];
    let (lo, hi) = f.split_at_mut(half);
    let hi = &*hi;
    let s = zeta.block_size();
    let mut arrays: [&mut [Complex64]; 3] = [lo, up, down];
    parallel.for_each_block_zip(arena, &mut arrays, s, |a, chunks| {
        let high = zeta.high(a);
        for b in 0..chunks[0].len() {
            let t = a * s + b;
            if t == 0 {
                continue;
            }
            let current = chunks[0][b];
            // f_{m-t} sits in the upper half unless m is even and t = m/2.
            let partner = if t + half > m { current } else { hi[m - t - half] };
            let (y0, y1, ym) = fold3(partner.conj(), current, zmult(high, zeta.low(b)));
            chunks[0][b] = y0;
            chunks[1][b] = y1;
            chunks[2][b] = ym;
        }
    });
    let (y0, y1, ym) = match nyquist {
        Some(n) => fold3_nyquist(f0, n),
        None => (f0, f0, f0),
    };
    arrays[0][0] = y0;
    arrays[1][0] = y1;
    arrays[2][0] = ym;
}

/// Recombine the transformed cosets into `h_0..h_{m-1}` over `lo ++ hi`.
///
/// Coset 0 is read from `staged`, or from `lo` itself when `None`; `u` holds
/// cosets +1 and -1. The upper half is written first since it reads the
/// same coset-0 modes that the lower half then overwrites.
fn unfold(
    zeta: &ZetaTable,
    parallel: &Parallel,
    lo: &mut [Complex64],
    hi: &mut [Complex64],
    staged: Option<&[Complex64]>,
    u: &[Complex64],
    ninv: f64,
) {
    let half = lo.len();
    let m = half + hi.len();
    let (g1, gm) = u.split_at(half);
    let s = zeta.block_size();
    {
        let g0: &[Complex64] = staged.unwrap_or(&*lo);
        parallel.for_each_block(hi, s, |a, chunk| {
            for (b, x) in chunk.iter_mut().enumerate() {
                let t = m - half - (a * s + b);
                let (_, mirrored) = unfold3(g0[t], g1[t], gm[t], zeta.get(t), ninv);
                *x = mirrored.conj();
            }
        });
    }
    parallel.for_each_block(lo, s, |a, chunk| {
        let high = zeta.high(a);
        for (b, x) in chunk.iter_mut().enumerate() {
            let t = a * s + b;
            let g0 = staged.map_or(*x, |g| g[t]);
            *x = if t == 0 {
                unfold3_zero(g0, g1[0], gm[0], ninv)
            } else {
                unfold3(g0, g1[t], gm[t], zmult(high, zeta.low(b)), ninv).0
            };
        }
    });
}
