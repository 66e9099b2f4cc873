//! Hermitian engines specialised for cubic products.
//!
//! The inputs hold `m` Hermitian modes `f_0..f_{m-1}` of a real signal of
//! length `2m`. A product of three such signals spans `|k| ≤ 3m - 3`, so a
//! grid of `4m` samples is alias-free on the retained modes. It is evaluated
//! as two real transforms of length `2m`: the even samples directly, the odd
//! ones after multiplying mode `k` by `ζ^k`, `ζ = e^{2πi/4m}`.

use dealias_fft::{Complex64, RealPlan};
use dealias_memory::{BumpArena, PooledBuffer};

use crate::context::Context;
use crate::cvec::{zmult, zmultc};
use crate::error::{check_length, ConvError};
use crate::mult::{pointwise, RealMultiplier};
use crate::options::Options;
use crate::parallel::Parallel;
use crate::zeta::ZetaTable;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);

/// State shared by the cubic engines.
#[derive(Debug)]
struct CubicCore {
    m: usize,
    zeta: ZetaTable,
    plan: RealPlan,
    even: PooledBuffer<Complex64>,
    odd: PooledBuffer<Complex64>,
    reals: Vec<PooledBuffer<f64>>,
    parallel: Parallel,
    arena: BumpArena,
}

impl CubicCore {
    fn new(
        name: &'static str,
        m: usize,
        count: usize,
        options: &Options,
        context: &Context,
    ) -> Result<Self, ConvError> {
        check_length(m)?;
        let options = options.clone().normalize();
        let parallel = Parallel::new(options.threads)?;
        let zeta = ZetaTable::new(4 * m, m, &parallel);
        let plan = context.planner().real(2 * m);
        tracing::debug!(
            kernel = name,
            m,
            arrays = count,
            s = zeta.block_size(),
            threads = parallel.threads(),
            "built cubic Hermitian convolution"
        );
        Ok(Self {
            m,
            zeta,
            plan,
            even: context.complex_buffer(m + 1),
            odd: context.complex_buffer(m + 1),
            reals: context.real_buffers(count, 2 * m),
            parallel,
            arena: BumpArena::new(),
        })
    }

    /// Transform every input on both cosets, apply `kernel` to the real
    /// samples and keep the spectra of its first output.
    fn transform(&mut self, inputs: &[&[Complex64]], kernel: &dyn RealMultiplier) {
        let n = 2 * self.m;
        let threads = self.parallel.threads();
        self.arena.reset();
        let arena = &self.arena;
        for shifted in [true, false] {
            for (input, real) in inputs.iter().zip(self.reals.iter_mut()) {
                stage(&self.zeta, &self.parallel, &mut self.even, input, shifted);
                self.plan.c2r(&self.even, real);
            }
            {
                let mut views = arena.vec(inputs.len());
                views.extend(self.reals.iter_mut().map(|r| &mut r[..n]));
                let views = views.as_mut_slice();
                self.parallel.install(|| kernel.multiply(views, n, threads));
            }
            let target = if shifted { &mut self.odd } else { &mut self.even };
            self.plan.r2c(&self.reals[0], target);
        }
    }

    /// `out_k = (E_k + conj(ζ^k)·O_k) / 4m` for `k < m`.
    fn finish(&self, out: &mut [Complex64]) {
        let m = self.m;
        let ninv = 0.25 / m as f64;
        let (even, odd) = (&self.even[..], &self.odd[..]);
        let zeta = &self.zeta;
        let s = zeta.block_size();
        self.parallel.for_each_block(&mut out[..m], s, |a, chunk| {
            let high = zeta.high(a);
            for (b, x) in chunk.iter_mut().enumerate() {
                let k = a * s + b;
                *x = (even[k] + zmultc(zmult(high, zeta.low(b)), odd[k])) * ninv;
            }
        });
    }
}

/// Copy `f` into the half spectrum `buffer`, times `ζ^k` when `shifted`.
/// The top mode `m` is zero.
fn stage(zeta: &ZetaTable, parallel: &Parallel, buffer: &mut [Complex64], f: &[Complex64], shifted: bool) {
    let m = zeta.len();
    buffer[m] = ZERO;
    if !shifted {
        buffer[..m].copy_from_slice(&f[..m]);
        return;
    }
    let s = zeta.block_size();
    parallel.for_each_block(&mut buffer[..m], s, |a, chunk| {
        let high = zeta.high(a);
        for (b, x) in chunk.iter_mut().enumerate() {
            *x = zmult(zmult(high, zeta.low(b)), f[a * s + b]);
        }
    });
}

fn cube(f: &mut [&mut [f64]], m: usize, threads: usize) {
    pointwise(threads, &mut f[0][..m], |_, x| *x = *x * *x * *x);
}

fn times_square(f: &mut [&mut [f64]], m: usize, threads: usize) {
    let (out, rest) = f.split_at_mut(1);
    let g = &rest[0][..m];
    pointwise(threads, &mut out[0][..m], |j, x| *x *= g[j] * g[j]);
}

/// `F_0 ← Σ_{i<terms} F_i·G_i·H_i` over arrays laid out `[F.., G.., H..]`.
#[inline]
fn ternary_sum(f: &mut [&mut [f64]], m: usize, threads: usize, terms: usize) {
    let (out, rest) = f.split_at_mut(1);
    let rest = &*rest;
    pointwise(threads, &mut out[0][..m], |j, x| {
        let mut sum = *x * rest[terms - 1][j] * rest[2 * terms - 1][j];
        for i in 1..terms {
            sum += rest[i - 1][j] * rest[terms + i - 1][j] * rest[2 * terms + i - 1][j];
        }
        *x = sum;
    });
}

fn ternary1(f: &mut [&mut [f64]], m: usize, threads: usize) {
    let (out, rest) = f.split_at_mut(1);
    let (g, h) = (&*rest[0], &*rest[1]);
    pointwise(threads, &mut out[0][..m], |j, x| *x *= g[j] * h[j]);
}

fn ternary2(f: &mut [&mut [f64]], m: usize, threads: usize) {
    let (out, rest) = f.split_at_mut(1);
    let [f1, g0, g1, h0, h1] = [&*rest[0], &*rest[1], &*rest[2], &*rest[3], &*rest[4]];
    pointwise(threads, &mut out[0][..m], |j, x| {
        *x = *x * g0[j] * h0[j] + f1[j] * g1[j] * h1[j];
    });
}

fn ternary3(f: &mut [&mut [f64]], m: usize, threads: usize) {
    let (out, rest) = f.split_at_mut(1);
    let [f1, f2] = [&*rest[0], &*rest[1]];
    let [g0, g1, g2] = [&*rest[2], &*rest[3], &*rest[4]];
    let [h0, h1, h2] = [&*rest[5], &*rest[6], &*rest[7]];
    pointwise(threads, &mut out[0][..m], |j, x| {
        *x = *x * g0[j] * h0[j] + f1[j] * g1[j] * h1[j] + f2[j] * g2[j] * h2[j];
    });
}

/// `f ← f³` for Hermitian `f`.
#[derive(Debug)]
pub struct ImplicitHFFFConvolution {
    core: CubicCore,
}

impl ImplicitHFFFConvolution {
    /// Engine for `m` retained modes.
    pub fn new(m: usize, options: &Options) -> Result<Self, ConvError> {
        Self::with_context(m, options, &Context::default())
    }

    /// Engine for `m` retained modes sharing `context`'s planner and pools.
    pub fn with_context(m: usize, options: &Options, context: &Context) -> Result<Self, ConvError> {
        Ok(Self {
            core: CubicCore::new("hfff", m, 1, options, context)?,
        })
    }

    /// Replace the first `m` modes of `f` by those of `f³`.
    pub fn convolve(&mut self, f: &mut [Complex64]) {
        tracing::trace!(m = self.core.m, "hfff convolution");
        self.core.transform(&[&*f], &cube);
        self.core.finish(f);
    }
}

/// `f ← f·g²` for Hermitian `f` and `g`.
#[derive(Debug)]
pub struct ImplicitHFGGConvolution {
    core: CubicCore,
}

impl ImplicitHFGGConvolution {
    /// Engine for `m` retained modes.
    pub fn new(m: usize, options: &Options) -> Result<Self, ConvError> {
        Self::with_context(m, options, &Context::default())
    }

    /// Engine for `m` retained modes sharing `context`'s planner and pools.
    pub fn with_context(m: usize, options: &Options, context: &Context) -> Result<Self, ConvError> {
        Ok(Self {
            core: CubicCore::new("hfgg", m, 2, options, context)?,
        })
    }

    /// Replace the first `m` modes of `f` by those of `f·g²`. `g` is only read.
    pub fn convolve(&mut self, f: &mut [Complex64], g: &[Complex64]) {
        tracing::trace!(m = self.core.m, "hfgg convolution");
        self.core.transform(&[&*f, g], &times_square);
        self.core.finish(f);
    }
}

/// `F_0 ← Σ_i F_i·G_i·H_i` over `M` triples of Hermitian arrays.
#[derive(Debug)]
pub struct ImplicitHTConvolution {
    core: CubicCore,
    terms: usize,
    arena: BumpArena,
}

impl ImplicitHTConvolution {
    /// Engine for `m` retained modes summing `options.terms` triples.
    pub fn new(m: usize, options: &Options) -> Result<Self, ConvError> {
        Self::with_context(m, options, &Context::default())
    }

    /// Engine for `m` retained modes sharing `context`'s planner and pools.
    pub fn with_context(m: usize, options: &Options, context: &Context) -> Result<Self, ConvError> {
        let terms = options.clone().normalize().terms;
        Ok(Self {
            core: CubicCore::new("ht", m, 3 * terms, options, context)?,
            terms,
            arena: BumpArena::new(),
        })
    }

    /// Number of triples `M`.
    #[must_use]
    pub fn terms(&self) -> usize {
        self.terms
    }

    /// Sum the `M` cubic products into `f[0]`, reading `m` modes of every
    /// array from `offset` on. `f[1..M)`, `g` and `h` are only read.
    ///
    /// # Panics
    ///
    /// If any of `f`, `g`, `h` holds fewer than `M` arrays or an array is
    /// shorter than `offset + m`.
    pub fn convolve(
        &mut self,
        f: &mut [&mut [Complex64]],
        g: &[&[Complex64]],
        h: &[&[Complex64]],
        offset: usize,
    ) {
        let (m, terms) = (self.core.m, self.terms);
        let range = offset..offset + m;
        tracing::trace!(m, terms, offset, "ternary Hermitian convolution");

        let general = |f: &mut [&mut [f64]], n: usize, threads: usize| ternary_sum(f, n, threads, terms);
        let kernel: &dyn RealMultiplier = match terms {
            1 => &ternary1,
            2 => &ternary2,
            3 => &ternary3,
            _ => &general,
        };

        self.arena.reset();
        {
            let mut arrays = self.arena.vec(3 * terms);
            arrays.extend(f[..terms].iter().map(|x| &x[range.clone()]));
            arrays.extend(g[..terms].iter().map(|x| &x[range.clone()]));
            arrays.extend(h[..terms].iter().map(|x| &x[range.clone()]));
            self.core.transform(&arrays, kernel);
        }
        self.core.finish(&mut f[0][range]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direct::DirectHTConvolution;

    fn hermitian(m: usize, seed: f64) -> Vec<Complex64> {
        let mut f: Vec<Complex64> = (0..m)
            .map(|k| {
                let x = seed + k as f64;
                Complex64::new((1.1 * x).cos(), (0.6 * x).sin() - 0.1)
            })
            .collect();
        f[0].im = 0.0;
        f
    }

    fn direct(f: &[Complex64], g: &[Complex64], e: &[Complex64]) -> Vec<Complex64> {
        let mut h = vec![ZERO; f.len()];
        DirectHTConvolution::new(f.len()).convolve(&mut h, f, g, e);
        h
    }

    fn assert_close(actual: &[Complex64], expected: &[Complex64]) {
        let scale = expected.iter().map(|z| z.norm()).fold(1.0, f64::max);
        for (k, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert!((a - e).norm() <= 1e-12 * scale, "k={k}: {a} vs {e}");
        }
    }

    #[test]
    fn hfff_is_cube() {
        for m in [1, 2, 3, 4, 8, 16] {
            let f = hermitian(m, 0.4);
            let mut out = f.clone();
            ImplicitHFFFConvolution::new(m, &Options::default())
                .unwrap()
                .convolve(&mut out);
            assert_close(&out, &direct(&f, &f, &f));
        }
    }

    #[test]
    fn hfgg_reads_g_only() {
        for m in [1, 4, 5, 8, 16] {
            let f = hermitian(m, 1.0);
            let g = hermitian(m, -2.0);
            let before = g.clone();
            let mut out = f.clone();
            ImplicitHFGGConvolution::new(m, &Options::default())
                .unwrap()
                .convolve(&mut out, &g);
            assert_close(&out, &direct(&f, &g, &g));
            assert_eq!(g, before);
        }
    }

    #[test]
    fn ht_sums_triples() {
        let m = 8;
        for terms in 1..=4u8 {
            let make = |base: f64| -> Vec<Vec<Complex64>> {
                (0..terms).map(|i| hermitian(m, base + f64::from(i))).collect()
            };
            let (fs, gs, hs) = (make(0.0), make(10.0), make(20.0));
            let options = Options {
                terms: usize::from(terms),
                ..Options::default()
            };
            let mut engine = ImplicitHTConvolution::new(m, &options).unwrap();
            assert_eq!(engine.terms(), usize::from(terms));
            let mut f = fs.clone();
            let mut f_views: Vec<&mut [Complex64]> = f.iter_mut().map(Vec::as_mut_slice).collect();
            let g_views: Vec<&[Complex64]> = gs.iter().map(Vec::as_slice).collect();
            let h_views: Vec<&[Complex64]> = hs.iter().map(Vec::as_slice).collect();
            engine.convolve(&mut f_views, &g_views, &h_views, 0);
            let expected: Vec<Complex64> = (0..m)
                .map(|k| {
                    (0..usize::from(terms))
                        .map(|i| direct(&fs[i], &gs[i], &hs[i])[k])
                        .sum()
                })
                .collect();
            assert_close(&f[0], &expected);
            assert_eq!(f[1..], fs[1..]);
        }
    }

    #[test]
    fn ht_with_offset_and_threads() {
        let m = 16;
        let pad = |x: Vec<Complex64>| {
            let mut v = vec![ZERO; 3];
            v.extend(x);
            v
        };
        let (f, g, h) = (hermitian(m, 0.0), hermitian(m, 1.0), hermitian(m, 2.0));
        let mut fp = pad(f.clone());
        let (gp, hp) = (pad(g.clone()), pad(h.clone()));
        let mut engine = ImplicitHTConvolution::new(m, &Options::default().threads(3)).unwrap();
        engine.convolve(&mut [fp.as_mut_slice()], &[gp.as_slice()], &[hp.as_slice()], 3);
        assert_eq!(fp[..3], [ZERO; 3]);
        assert_close(&fp[3..], &direct(&f, &g, &h));
    }

    #[test]
    fn unrolled_ternary_matches_general() {
        let m = 9;
        for terms in 1..=3usize {
            let original: Vec<Vec<f64>> = (0..3 * terms)
                .map(|i| (0..m).map(|j| ((i * m + j) as f64).sin()).collect())
                .collect();
            let mut fixed = original.clone();
            let mut general = original.clone();
            {
                let mut views: Vec<&mut [f64]> = fixed.iter_mut().map(Vec::as_mut_slice).collect();
                match terms {
                    1 => ternary1(&mut views, m, 1),
                    2 => ternary2(&mut views, m, 1),
                    _ => ternary3(&mut views, m, 1),
                }
            }
            {
                let mut views: Vec<&mut [f64]> = general.iter_mut().map(Vec::as_mut_slice).collect();
                ternary_sum(&mut views, m, 1, terms);
            }
            for j in 0..m {
                let expected: f64 = (0..terms)
                    .map(|i| original[i][j] * original[terms + i][j] * original[2 * terms + i][j])
                    .sum();
                assert!((fixed[0][j] - expected).abs() < 1e-14, "terms {terms}, mode {j}");
                assert!((general[0][j] - expected).abs() < 1e-14, "terms {terms}, mode {j}");
            }
            // Other arrays are inputs only.
            assert_eq!(&fixed[1..], &original[1..]);
        }
    }

    #[test]
    fn scratch_sized_by_terms() {
        let context = Context::default();
        {
            let options = Options {
                terms: 2,
                ..Options::default()
            };
            let _engine = ImplicitHTConvolution::with_context(4, &options, &context).unwrap();
        }
        assert_eq!(context.real_pool().total_pooled(), 6);
        assert_eq!(context.complex_pool().total_pooled(), 2);
    }

    #[test]
    fn zero_modes_rejected() {
        assert!(matches!(
            ImplicitHFFFConvolution::new(0, &Options::default()),
            Err(ConvError::InvalidLength(0))
        ));
    }
}
