//! Implicitly dealiased convolution of complex sequences.
//!
//! The zero-padded transform of length `2m` splits into its even and odd
//! samples. The even half is the length-`m` backward transform of the data,
//! the odd half the same transform after premultiplying by `ζ^k`,
//! `ζ = e^{2πi/2m}`. Each half is multiplied pointwise on its own, and the two
//! forward transforms are recombined with `conj(ζ^k)` into the first `m`
//! coefficients of the linear convolution.

use dealias_fft::{ComplexPlan, Complex64, Direction};
use dealias_memory::{BumpArena, PooledBuffer};

use crate::context::Context;
use crate::cvec::{zmult, zmultc};
use crate::error::{check_length, ConvError};
use crate::mult::Multiplier;
use crate::options::Options;
use crate::parallel::Parallel;
use crate::zeta::ZetaTable;

/// Premultiplication of the inputs by `ζ^k`.
///
/// The common input counts get loops of fixed trip count; everything else
/// walks the input list at run time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Premult {
    One,
    Two,
    Three,
    Four,
    General,
}

impl Premult {
    pub(crate) fn for_inputs(inputs: usize) -> Self {
        match inputs {
            1 => Self::One,
            2 => Self::Two,
            3 => Self::Three,
            4 => Self::Four,
            _ => Self::General,
        }
    }

    /// Multiply row `k` of every array in `f` by `ζ^k`.
    pub(crate) fn apply(
        self,
        zeta: &ZetaTable,
        parallel: &Parallel,
        arena: &BumpArena,
        f: &mut [&mut [Complex64]],
    ) {
        parallel.for_each_block_zip(arena, f, zeta.block_size(), |a, chunks| match self {
            Self::One => premult_fixed::<1>(zeta, a, chunks),
            Self::Two => premult_fixed::<2>(zeta, a, chunks),
            Self::Three => premult_fixed::<3>(zeta, a, chunks),
            Self::Four => premult_fixed::<4>(zeta, a, chunks),
            Self::General => premult_general(zeta, a, chunks),
        });
    }
}

fn premult_fixed<const N: usize>(zeta: &ZetaTable, a: usize, chunks: &mut [&mut [Complex64]]) {
    let high = zeta.high(a);
    let chunks = &mut chunks[..N];
    for b in 0..chunks[0].len() {
        let z = zmult(high, zeta.low(b));
        for chunk in chunks.iter_mut() {
            chunk[b] = zmult(z, chunk[b]);
        }
    }
}

fn premult_general(zeta: &ZetaTable, a: usize, chunks: &mut [&mut [Complex64]]) {
    let high = zeta.high(a);
    for chunk in chunks.iter_mut() {
        for (b, x) in chunk.iter_mut().enumerate() {
            *x = zmult(zmult(high, zeta.low(b)), *x);
        }
    }
}

/// `f_k ← (conj(ζ^k)·f_k + u_k)·ninv`.
fn postmultadd(zeta: &ZetaTable, parallel: &Parallel, f: &mut [Complex64], u: &[Complex64], ninv: f64) {
    let s = zeta.block_size();
    parallel.for_each_block(f, s, |a, chunk| {
        let high = zeta.high(a);
        for (b, x) in chunk.iter_mut().enumerate() {
            let z = zmult(high, zeta.low(b));
            *x = (zmultc(z, *x) + u[a * s + b]) * ninv;
        }
    });
}

/// Implicitly dealiased convolution of `A` complex inputs into `B` outputs.
///
/// `convolve` takes `max(A, B)` arrays holding `m` values each from
/// `offset` on. The first `A` are inputs; on return the first `B` hold the
/// results and the rest have been used as scratch.
#[derive(Debug)]
pub struct ImplicitConvolution {
    m: usize,
    inputs: usize,
    outputs: usize,
    out_of_place: bool,
    zeta: ZetaTable,
    premult: Premult,
    backward: ComplexPlan,
    forward: ComplexPlan,
    u: Vec<PooledBuffer<Complex64>>,
    parallel: Parallel,
    arena: BumpArena,
}

impl ImplicitConvolution {
    /// Engine for `m` retained modes with its own planner and pools.
    pub fn new(m: usize, options: &Options) -> Result<Self, ConvError> {
        Self::with_context(m, options, &Context::default())
    }

    /// Engine for `m` retained modes sharing `context`'s planner and pools.
    pub fn with_context(m: usize, options: &Options, context: &Context) -> Result<Self, ConvError> {
        check_length(m)?;
        let options = options.clone().normalize();
        options.validate()?;
        let parallel = Parallel::new(options.threads)?;
        let zeta = ZetaTable::new(2 * m, m, &parallel);
        let planner = context.planner();
        let backward = planner.complex(m, Direction::Backward);
        let forward = planner.complex(m, Direction::Forward);
        let slots = options.inputs.max(options.outputs);
        let u = context.complex_buffers(slots, m);
        let out_of_place = options.out_of_place();

        tracing::debug!(
            m,
            s = zeta.block_size(),
            inputs = options.inputs,
            outputs = options.outputs,
            out_of_place,
            threads = parallel.threads(),
            "built implicit convolution"
        );

        Ok(Self {
            m,
            inputs: options.inputs,
            outputs: options.outputs,
            out_of_place,
            zeta,
            premult: Premult::for_inputs(options.inputs),
            backward,
            forward,
            u,
            parallel,
            arena: BumpArena::new(),
        })
    }

    /// Autoconvolution engine: one input, one output.
    pub fn autoconvolution(m: usize) -> Result<Self, ConvError> {
        Self::new(m, &Options::with_arity(1, 1))
    }

    /// Binary convolution engine: two inputs, one output.
    pub fn binary(m: usize) -> Result<Self, ConvError> {
        Self::new(m, &Options::with_arity(2, 1))
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

    /// Number of input arrays (A).
    #[must_use]
    pub fn inputs(&self) -> usize {
        self.inputs
    }

    /// Number of output arrays (B).
    #[must_use]
    pub fn outputs(&self) -> usize {
        self.outputs
    }

    /// Whether the odd half is staged in idle input storage.
    #[must_use]
    pub fn out_of_place(&self) -> bool {
        self.out_of_place
    }

    /// Worker threads.
    #[must_use]
    pub fn threads(&self) -> usize {
        self.parallel.threads()
    }

    /// Zeta block size.
    #[must_use]
    pub fn block_size(&self) -> usize {
        self.zeta.block_size()
    }

    /// Convolve `f[0..A)` into `f[0..B)` with the pointwise operation `mult`.
    ///
    /// # Panics
    ///
    /// If `f` holds fewer than `max(A, B)` arrays or one of them is shorter
    /// than `offset + m`.
    pub fn convolve(&mut self, f: &mut [&mut [Complex64]], mult: &dyn Multiplier, offset: usize) {
        let (m, inputs, outputs) = (self.m, self.inputs, self.outputs);
        let slots = inputs.max(outputs);
        let threads = self.parallel.threads();
        let range = offset..offset + m;
        tracing::trace!(m, inputs, outputs, offset, "implicit convolution");

        self.arena.reset();
        let arena = &self.arena;
        let parallel = &self.parallel;

        // Even samples.
        for (u, fi) in self.u.iter_mut().zip(&f[..inputs]) {
            u[..m].copy_from_slice(&fi[range.clone()]);
            self.backward.fft(u);
        }
        {
            let mut views = arena.vec(slots);
            views.extend(self.u.iter_mut().map(|u| &mut u[..m]));
            let views = views.as_mut_slice();
            parallel.install(|| mult.multiply(views, m, threads));
        }

        {
            let mut views = arena.vec(inputs);
            views.extend(f[..inputs].iter_mut().map(|fi| &mut fi[range.clone()]));
            self.premult.apply(&self.zeta, parallel, arena, views.as_mut_slice());
        }

        let ninv = 0.5 / m as f64;
        if self.out_of_place {
            // Odd samples of input i land in W[i], W = [F[1..A), U[A-1]].
            let (even, spare) = self.u.split_at_mut(inputs - 1);
            let spare = &mut spare[0][..m];
            self.backward.fft_into(&mut f[inputs - 1][range.clone()], spare);
            for i in (0..inputs - 1).rev() {
                let (lo, hi) = f.split_at_mut(i + 1);
                self.backward
                    .fft_into(&mut lo[i][range.clone()], &mut hi[0][range.clone()]);
            }
            {
                let mut views = arena.vec(inputs);
                views.extend(f[1..inputs].iter_mut().map(|fi| &mut fi[range.clone()]));
                views.push(&mut *spare);
                let views = views.as_mut_slice();
                parallel.install(|| mult.multiply(views, m, threads));
            }
            for i in 0..outputs {
                let (lo, hi) = f.split_at_mut(i + 1);
                let target = &mut lo[i][range.clone()];
                self.forward.fft_into(&mut hi[0][range.clone()], target);
                self.forward.fft_into(&mut even[i][..m], spare);
                postmultadd(&self.zeta, parallel, target, spare, ninv);
            }
        } else {
            for fi in f[..inputs].iter_mut() {
                self.backward.fft(&mut fi[range.clone()]);
            }
            {
                let mut views = arena.vec(slots);
                views.extend(f[..slots].iter_mut().map(|fi| &mut fi[range.clone()]));
                let views = views.as_mut_slice();
                parallel.install(|| mult.multiply(views, m, threads));
            }
            for (fi, u) in f[..outputs].iter_mut().zip(self.u.iter_mut()) {
                let target = &mut fi[range.clone()];
                self.forward.fft(target);
                self.forward.fft(u);
                postmultadd(&self.zeta, parallel, target, &u[..m], ninv);
            }
        }
    }
}
