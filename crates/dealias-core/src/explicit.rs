//! Conventional zero-padded convolutions.
//!
//! Baselines for the implicit engines: the inputs are copied into buffers
//! padded with zeros to the dealiasing length and transformed at full size.

use dealias_fft::{ComplexPlan, Complex64, Direction, RealPlan};
use dealias_memory::{BumpArena, PooledBuffer};

use crate::context::Context;
use crate::error::{check_length, ConvError};
use crate::mult::{Multiplier, RealMultiplier};
use crate::options::{Nyquist, Options};
use crate::parallel::Parallel;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);

/// Complex convolution through transforms of length `2m`.
#[derive(Debug)]
pub struct ExplicitConvolution {
    m: usize,
    inputs: usize,
    outputs: usize,
    backward: ComplexPlan,
    forward: ComplexPlan,
    padded: Vec<PooledBuffer<Complex64>>,
    arena: BumpArena,
    parallel: Parallel,
}

impl ExplicitConvolution {
    /// Engine for `m` retained modes.
    pub fn new(m: usize, options: &Options) -> Result<Self, ConvError> {
        Self::with_context(m, options, &Context::default())
    }

    /// Engine for `m` retained modes sharing `context`'s planner and pools.
    pub fn with_context(m: usize, options: &Options, context: &Context) -> Result<Self, ConvError> {
        check_length(m)?;
        let options = options.clone().normalize();
        options.validate()?;
        let n = 2 * m;
        let planner = context.planner();
        let slots = options.inputs.max(options.outputs);
        tracing::debug!(m, n, inputs = options.inputs, outputs = options.outputs, "built explicit convolution");
        Ok(Self {
            m,
            inputs: options.inputs,
            outputs: options.outputs,
            backward: planner.complex(n, Direction::Backward),
            forward: planner.complex(n, Direction::Forward),
            padded: context.complex_buffers(slots, n),
            arena: BumpArena::new(),
            parallel: Parallel::new(options.threads)?,
        })
    }

    /// Same contract as [`crate::ImplicitConvolution::convolve`].
    pub fn convolve(&mut self, f: &mut [&mut [Complex64]], mult: &dyn Multiplier, offset: usize) {
        let (m, n) = (self.m, 2 * self.m);
        let threads = self.parallel.threads();
        for (buffer, fi) in self.padded.iter_mut().zip(&f[..self.inputs]) {
            buffer[..m].copy_from_slice(&fi[offset..offset + m]);
            buffer[m..].fill(ZERO);
            self.backward.fft(buffer);
        }
        self.arena.reset();
        {
            let mut views = self.arena.vec(self.padded.len());
            views.extend(self.padded.iter_mut().map(|b| &mut b[..]));
            let views = views.as_mut_slice();
            self.parallel.install(|| mult.multiply(views, n, threads));
        }
        let ninv = 1.0 / n as f64;
        for (buffer, fi) in self.padded.iter_mut().zip(f[..self.outputs].iter_mut()) {
            self.forward.fft(buffer);
            for (x, y) in fi[offset..offset + m].iter_mut().zip(buffer.iter()) {
                *x = y * ninv;
            }
        }
    }
}

/// Hermitian convolution through real transforms of length `3m`.
#[derive(Debug)]
pub struct ExplicitHConvolution {
    m: usize,
    inputs: usize,
    outputs: usize,
    nyquist: Nyquist,
    plan: RealPlan,
    spectrum: PooledBuffer<Complex64>,
    reals: Vec<PooledBuffer<f64>>,
    arena: BumpArena,
    parallel: Parallel,
}

impl ExplicitHConvolution {
    /// Engine for `m` retained modes.
    pub fn new(m: usize, options: &Options) -> Result<Self, ConvError> {
        Self::with_context(m, options, &Context::default())
    }

    /// Engine for `m` retained modes sharing `context`'s planner and pools.
    pub fn with_context(m: usize, options: &Options, context: &Context) -> Result<Self, ConvError> {
        check_length(m)?;
        let options = options.clone().normalize();
        options.validate()?;
        let n = 3 * m;
        let plan = context.planner().real(n);
        let slots = options.inputs.max(options.outputs);
        tracing::debug!(m, n, nyquist = ?options.nyquist, "built explicit Hermitian convolution");
        Ok(Self {
            m,
            inputs: options.inputs,
            outputs: options.outputs,
            nyquist: options.nyquist,
            spectrum: context.complex_buffer(plan.spectrum_len()),
            reals: context.real_buffers(slots, n),
            arena: BumpArena::new(),
            plan,
            parallel: Parallel::new(options.threads)?,
        })
    }

    /// Same contract as [`crate::ImplicitHConvolution::convolve`].
    pub fn convolve(&mut self, f: &mut [&mut [Complex64]], mult: &dyn RealMultiplier, offset: usize) {
        let (m, n) = (self.m, 3 * self.m);
        let threads = self.parallel.threads();
        for (real, fi) in self.reals.iter_mut().zip(&f[..self.inputs]) {
            self.spectrum.fill(ZERO);
            self.spectrum[..m].copy_from_slice(&fi[offset..offset + m]);
            if self.nyquist == Nyquist::Explicit {
                self.spectrum[m] = Complex64::new(fi[offset + m].re, 0.0);
            }
            self.plan.c2r(&self.spectrum, real);
        }
        self.arena.reset();
        {
            let mut views = self.arena.vec(self.reals.len());
            views.extend(self.reals.iter_mut().map(|r| &mut r[..]));
            let views = views.as_mut_slice();
            self.parallel.install(|| mult.multiply(views, n, threads));
        }
        let ninv = 1.0 / n as f64;
        for (real, fi) in self.reals.iter().zip(f[..self.outputs].iter_mut()) {
            self.plan.r2c(real, &mut self.spectrum);
            for (x, y) in fi[offset..offset + m].iter_mut().zip(self.spectrum.iter()) {
                *x = y * ninv;
            }
            if self.nyquist == Nyquist::Explicit {
                fi[offset + m] = ZERO;
            }
        }
    }
}
