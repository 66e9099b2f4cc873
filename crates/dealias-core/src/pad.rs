//! Padding-avoidance transform pairs.
//!
//! Each pair replaces one zero-padded transform by transforms of the
//! unpadded length on offset grids (cosets). `backwards` takes the data `f`
//! and a scratch array `u` to the coset spectra, split between the two;
//! a pointwise product of two (or, for [`Fft0BiPad`], three) such results
//! followed by `forwards` yields the dealiased convolution in `f`.
//!
//! All pairs work on `columns` interleaved columns: row `k`, column `i` lives
//! at `k * stride + i`, and every column is transformed independently.

use dealias_fft::{Complex64, Direction, StridedPlan};
use dealias_memory::BumpArena;

use crate::context::Context;
use crate::coset::{fold3, fold3_nyquist, unfold3, unfold3_zero};
use crate::cvec::{zmult, zmultc, zmultic};
use crate::error::{check_layout, check_length, ConvError};
use crate::options::Options;
use crate::parallel::Parallel;
use crate::zeta::ZetaTable;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);

/// Backward/forward pair of a padding-avoidance scheme.
pub trait PadTransform {
    /// Take `f` to its coset spectra, using `u` for the extra cosets.
    fn backwards(&mut self, f: &mut [Complex64], u: &mut [Complex64]);

    /// Recombine transformed cosets from `f` and `u` into the dealiased
    /// result in `f`.
    fn forwards(&mut self, f: &mut [Complex64], u: &mut [Complex64]);

    /// Elements of `f` touched by the pair.
    fn input_len(&self) -> usize;

    /// Elements of `u` touched by the pair.
    fn scratch_len(&self) -> usize;
}

/// State shared by every pair: geometry, twiddles, plans and workers.
#[derive(Debug)]
struct PadCore {
    m: usize,
    columns: usize,
    stride: usize,
    zeta: ZetaTable,
    backward: StridedPlan,
    forward: StridedPlan,
    parallel: Parallel,
    arena: BumpArena,
}

impl PadCore {
    /// Core for sub-transforms of `len` rows with twiddles `e^{2πik/n}`,
    /// `k < zeta_len`.
    #[allow(clippy::too_many_arguments)]
    fn new(
        name: &'static str,
        m: usize,
        len: usize,
        n: usize,
        zeta_len: usize,
        columns: usize,
        stride: usize,
        options: &Options,
        context: &Context,
    ) -> Result<Self, ConvError> {
        check_length(m)?;
        check_layout(columns, stride)?;
        let options = options.clone().normalize();
        let parallel = Parallel::new(options.threads)?;
        let zeta = ZetaTable::new(n, zeta_len, &parallel);
        let planner = context.planner();
        let backward = planner.strided(len, columns, stride, Direction::Backward);
        let forward = planner.strided(len, columns, stride, Direction::Forward);
        tracing::debug!(
            pad = name,
            m,
            columns,
            stride,
            s = zeta.block_size(),
            threads = parallel.threads(),
            "built padding pair"
        );
        Ok(Self {
            m,
            columns,
            stride,
            zeta,
            backward,
            forward,
            parallel,
            arena: BumpArena::new(),
        })
    }

    /// Number of elements spanned by `rows` rows.
    fn span(&self, rows: usize) -> usize {
        rows * self.stride
    }
}

/// Complex data of `m` rows padded to `2m`: two cosets of length `m`.
#[derive(Debug)]
pub struct FftPad {
    core: PadCore,
}

impl FftPad {
    /// Pair for `m` rows of `columns` columns with row `stride`.
    pub fn new(m: usize, columns: usize, stride: usize, options: &Options) -> Result<Self, ConvError> {
        Self::with_context(m, columns, stride, options, &Context::default())
    }

    /// Like [`FftPad::new`], planning through `context`.
    pub fn with_context(
        m: usize,
        columns: usize,
        stride: usize,
        options: &Options,
        context: &Context,
    ) -> Result<Self, ConvError> {
        let core = PadCore::new("fftpad", m, m, 2 * m, m, columns, stride, options, context)?;
        Ok(Self { core })
    }
}

impl PadTransform for FftPad {
    fn backwards(&mut self, f: &mut [Complex64], u: &mut [Complex64]) {
        let core = &mut self.core;
        let len = core.span(core.m);
        let (f, u) = (&mut f[..len], &mut u[..len]);
        {
            let f = &*f;
            let (zeta, stride, columns) = (&core.zeta, core.stride, core.columns);
            let s = zeta.block_size();
            core.parallel.for_each_block(u, s * stride, |a, chunk| {
                let high = zeta.high(a);
                for (b, row) in chunk.chunks_mut(stride).enumerate() {
                    let z = zmult(high, zeta.low(b));
                    let base = (a * s + b) * stride;
                    for (i, x) in row[..columns].iter_mut().enumerate() {
                        *x = zmult(z, f[base + i]);
                    }
                }
            });
        }
        core.backward.fft(f);
        core.backward.fft(u);
    }

    fn forwards(&mut self, f: &mut [Complex64], u: &mut [Complex64]) {
        let core = &mut self.core;
        let len = core.span(core.m);
        let (f, u) = (&mut f[..len], &mut u[..len]);
        core.forward.fft(f);
        core.forward.fft(u);
        let u = &*u;
        let ninv = 0.5 / core.m as f64;
        let (zeta, stride, columns) = (&core.zeta, core.stride, core.columns);
        let s = zeta.block_size();
        core.parallel.for_each_block(f, s * stride, |a, chunk| {
            let high = zeta.high(a);
            for (b, row) in chunk.chunks_mut(stride).enumerate() {
                let z = zmult(high, zeta.low(b));
                let base = (a * s + b) * stride;
                for (i, x) in row[..columns].iter_mut().enumerate() {
                    *x = (*x + zmultc(z, u[base + i])) * ninv;
                }
            }
        });
    }

    fn input_len(&self) -> usize {
        self.core.span(self.core.m)
    }

    fn scratch_len(&self) -> usize {
        self.core.span(self.core.m)
    }
}

/// Centred data `f_k`, `|k| < m`, padded to `3m`: three cosets of length `m`.
///
/// `f` holds `2m - 1` rows with `f_k` in row `k + m - 1`; `u` holds `m + 1`
/// rows. Between `backwards` and `forwards` coset 0 occupies rows
/// `0..m-1` of `f` and row `m` of `u`, coset +1 rows `m-1..2m-1` of `f` and
/// coset -1 rows `0..m` of `u`.
#[derive(Debug)]
pub struct Fft0Pad {
    core: PadCore,
}

impl Fft0Pad {
    /// Pair for `2m - 1` centred rows of `columns` columns with row `stride`.
    pub fn new(m: usize, columns: usize, stride: usize, options: &Options) -> Result<Self, ConvError> {
        Self::with_context(m, columns, stride, options, &Context::default())
    }

    /// Like [`Fft0Pad::new`], planning through `context`.
    pub fn with_context(
        m: usize,
        columns: usize,
        stride: usize,
        options: &Options,
        context: &Context,
    ) -> Result<Self, ConvError> {
        let core = PadCore::new("fft0pad", m, m, 3 * m, m, columns, stride, options, context)?;
        Ok(Self { core })
    }

    fn swap_pivot(core: &PadCore, f: &mut [Complex64], u: &mut [Complex64]) {
        let pivot_f = core.span(core.m - 1);
        let pivot_u = core.span(core.m);
        for i in 0..core.columns {
            std::mem::swap(&mut f[pivot_f + i], &mut u[pivot_u + i]);
        }
    }
}

impl PadTransform for Fft0Pad {
    fn backwards(&mut self, f: &mut [Complex64], u: &mut [Complex64]) {
        let core = &mut self.core;
        let (m, stride, columns) = (core.m, core.stride, core.columns);
        let pivot = core.span(m - 1);

        // Coset -1 at t = 0 keeps f_0; stash it before row m-1 is reused.
        u[..columns].copy_from_slice(&f[pivot..pivot + columns]);

        // Descending t shifts coset 0 up by one row into rows 0..m.
        for t in (1..m).rev() {
            let zeta = core.zeta.get(t);
            let low = t * stride;
            let high = pivot + t * stride;
            for i in 0..columns {
                let (y0, y1, ym) = fold3(f[low - stride + i], f[high + i], zeta);
                f[low + i] = y0;
                f[high + i] = y1;
                u[low + i] = ym;
            }
        }
        let stash = core.span(m);
        for i in 0..columns {
            let f0 = u[i];
            f[i] = f0;
            u[stash + i] = f0;
        }

        let len = core.span(m);
        core.backward.fft(&mut f[..len]);
        Self::swap_pivot(core, f, u);
        core.backward.fft(&mut f[pivot..pivot + len]);
        core.backward.fft(&mut u[..len]);
    }

    fn forwards(&mut self, f: &mut [Complex64], u: &mut [Complex64]) {
        let core = &mut self.core;
        let (m, stride, columns) = (core.m, core.stride, core.columns);
        let pivot = core.span(m - 1);
        let len = core.span(m);

        core.forward.fft(&mut f[pivot..pivot + len]);
        Self::swap_pivot(core, f, u);
        core.forward.fft(&mut f[..len]);
        core.forward.fft(&mut u[..len]);

        let ninv = 1.0 / (3 * m) as f64;
        let stash = core.span(m);
        // The swap left coset +1 at t = 0 in the stash row.
        for i in 0..columns {
            u[stash + i] = unfold3_zero(f[i], u[stash + i], u[i], ninv);
        }
        // Ascending t writes h_{t-m} one row below coset 0's slot.
        for t in 1..m {
            let zeta = core.zeta.get(t);
            let low = t * stride;
            let high = pivot + t * stride;
            for i in 0..columns {
                let (ht, hlow) = unfold3(f[low + i], f[high + i], u[low + i], zeta, ninv);
                f[high + i] = ht;
                f[low - stride + i] = hlow;
            }
        }
        for i in 0..columns {
            f[pivot + i] = u[stash + i];
        }
    }

    fn input_len(&self) -> usize {
        self.core.span(2 * self.core.m - 1)
    }

    fn scratch_len(&self) -> usize {
        self.core.span(self.core.m + 1)
    }
}

/// Centred data `f_k`, `-m ≤ k < m`, padded to `3m`, with row 0 holding a
/// Nyquist mode shared by `±m`.
///
/// `f` holds `2m` rows with `f_k` in row `k + m`; `u` holds `m` rows. The
/// cosets land in `f[0..m)`, `f[m..2m)` and `u`. `forwards` zeroes the
/// Nyquist row.
#[derive(Debug)]
pub struct Fft0PadWide {
    core: PadCore,
}

impl Fft0PadWide {
    /// Pair for `2m` centred rows of `columns` columns with row `stride`.
    pub fn new(m: usize, columns: usize, stride: usize, options: &Options) -> Result<Self, ConvError> {
        Self::with_context(m, columns, stride, options, &Context::default())
    }

    /// Like [`Fft0PadWide::new`], planning through `context`.
    pub fn with_context(
        m: usize,
        columns: usize,
        stride: usize,
        options: &Options,
        context: &Context,
    ) -> Result<Self, ConvError> {
        let core = PadCore::new("fft0padwide", m, m, 3 * m, m, columns, stride, options, context)?;
        Ok(Self { core })
    }
}

impl PadTransform for Fft0PadWide {
    fn backwards(&mut self, f: &mut [Complex64], u: &mut [Complex64]) {
        let core = &mut self.core;
        let len = core.span(core.m);
        let (lo, hi) = f[..2 * len].split_at_mut(len);
        let u = &mut u[..len];
        core.arena.reset();
        {
            let (zeta, stride, columns) = (&core.zeta, core.stride, core.columns);
            let s = zeta.block_size();
            let mut arrays: [&mut [Complex64]; 3] = [&mut *lo, &mut *hi, &mut *u];
            core.parallel
                .for_each_block_zip(&core.arena, &mut arrays, s * stride, |a, chunks| {
                    let high = zeta.high(a);
                    let rows = chunks[0].len() / stride;
                    for b in 0..rows {
                        let row = b * stride;
                        let t = a * s + b;
                        for i in row..row + columns {
                            let (y0, y1, ym) = if t == 0 {
                                fold3_nyquist(chunks[1][i], chunks[0][i])
                            } else {
                                fold3(chunks[0][i], chunks[1][i], zmult(high, zeta.low(b)))
                            };
                            chunks[0][i] = y0;
                            chunks[1][i] = y1;
                            chunks[2][i] = ym;
                        }
                    }
                });
        }
        core.backward.fft(lo);
        core.backward.fft(hi);
        core.backward.fft(u);
    }

    fn forwards(&mut self, f: &mut [Complex64], u: &mut [Complex64]) {
        let core = &mut self.core;
        let len = core.span(core.m);
        let (lo, hi) = f[..2 * len].split_at_mut(len);
        let u = &mut u[..len];
        core.forward.fft(lo);
        core.forward.fft(hi);
        core.forward.fft(u);

        let ninv = 1.0 / (3 * core.m) as f64;
        core.arena.reset();
        let (zeta, stride, columns) = (&core.zeta, core.stride, core.columns);
        let s = zeta.block_size();
        let mut arrays: [&mut [Complex64]; 3] = [lo, hi, u];
        core.parallel
            .for_each_block_zip(&core.arena, &mut arrays, s * stride, |a, chunks| {
                let high = zeta.high(a);
                let rows = chunks[0].len() / stride;
                for b in 0..rows {
                    let row = b * stride;
                    let t = a * s + b;
                    for i in row..row + columns {
                        let (g0, g1, gm) = (chunks[0][i], chunks[1][i], chunks[2][i]);
                        if t == 0 {
                            chunks[0][i] = ZERO;
                            chunks[1][i] = unfold3_zero(g0, g1, gm, ninv);
                        } else {
                            let (ht, hlow) = unfold3(g0, g1, gm, zmult(high, zeta.low(b)), ninv);
                            chunks[0][i] = hlow;
                            chunks[1][i] = ht;
                        }
                    }
                }
            });
    }

    fn input_len(&self) -> usize {
        self.core.span(2 * self.core.m)
    }

    fn scratch_len(&self) -> usize {
        self.core.span(self.core.m)
    }
}

/// Centred data `f_k`, `|k| < m`, of `2m` rows padded to `4m` for
/// odd-degree (ternary) products: two cosets of length `2m`.
///
/// Row `k + m` holds `f_k`; row 0 (the Nyquist mode `k = -m`) is discarded
/// on entry and zeroed on exit. `u` holds `2m` rows.
#[derive(Debug)]
pub struct Fft0BiPad {
    core: PadCore,
}

impl Fft0BiPad {
    /// Pair for `2m` centred rows of `columns` columns with row `stride`.
    pub fn new(m: usize, columns: usize, stride: usize, options: &Options) -> Result<Self, ConvError> {
        Self::with_context(m, columns, stride, options, &Context::default())
    }

    /// Like [`Fft0BiPad::new`], planning through `context`.
    pub fn with_context(
        m: usize,
        columns: usize,
        stride: usize,
        options: &Options,
        context: &Context,
    ) -> Result<Self, ConvError> {
        let core = PadCore::new(
            "fft0bipad",
            m,
            2 * m,
            4 * m,
            2 * m,
            columns,
            stride,
            options,
            context,
        )?;
        Ok(Self { core })
    }
}

impl PadTransform for Fft0BiPad {
    fn backwards(&mut self, f: &mut [Complex64], u: &mut [Complex64]) {
        let core = &mut self.core;
        let len = core.span(2 * core.m);
        let (f, u) = (&mut f[..len], &mut u[..len]);
        f[..core.columns].fill(ZERO);
        {
            let f = &*f;
            let (zeta, stride, columns) = (&core.zeta, core.stride, core.columns);
            let s = zeta.block_size();
            core.parallel.for_each_block(u, s * stride, |a, chunk| {
                let high = zeta.high(a);
                for (b, row) in chunk.chunks_mut(stride).enumerate() {
                    // -i·ζ^j = ζ_{4m}^{j-m}: the coset twiddle in row order.
                    let z = zmult(high, zeta.low(b));
                    let minus_i_z = Complex64::new(z.im, -z.re);
                    let base = (a * s + b) * stride;
                    for (i, x) in row[..columns].iter_mut().enumerate() {
                        *x = zmult(minus_i_z, f[base + i]);
                    }
                }
            });
        }
        core.backward.fft(f);
        core.backward.fft(u);
    }

    fn forwards(&mut self, f: &mut [Complex64], u: &mut [Complex64]) {
        let core = &mut self.core;
        let len = core.span(2 * core.m);
        let (f, u) = (&mut f[..len], &mut u[..len]);
        core.forward.fft(f);
        core.forward.fft(u);
        let u = &*u;
        let ninv = 0.25 / core.m as f64;
        let (zeta, stride, columns) = (&core.zeta, core.stride, core.columns);
        let s = zeta.block_size();
        core.parallel.for_each_block(f, s * stride, |a, chunk| {
            let high = zeta.high(a);
            for (b, row) in chunk.chunks_mut(stride).enumerate() {
                let j = a * s + b;
                let base = j * stride;
                if j == 0 {
                    row[..columns].fill(ZERO);
                    continue;
                }
                let z = zmult(high, zeta.low(b));
                for (i, x) in row[..columns].iter_mut().enumerate() {
                    *x = (*x + zmultic(z, u[base + i])) * ninv;
                }
            }
        });
    }

    fn input_len(&self) -> usize {
        self.core.span(2 * self.core.m)
    }

    fn scratch_len(&self) -> usize {
        self.core.span(2 * self.core.m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direct::{linear, DirectConvolution};

    fn sample(len: usize, seed: f64) -> Vec<Complex64> {
        (0..len)
            .map(|j| {
                let x = seed + j as f64;
                Complex64::new((1.3 * x).sin(), (0.7 * x).cos())
            })
            .collect()
    }

    fn assert_close(actual: &[Complex64], expected: &[Complex64]) {
        let scale = expected.iter().map(|z| z.norm()).fold(1.0, f64::max);
        for (k, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert!((a - e).norm() <= 1e-12 * scale, "k={k}: {a} vs {e}");
        }
    }

    /// Pad each input, multiply the padded spectra pointwise, unpad.
    fn product<P: PadTransform>(pad: &mut P, inputs: &[Vec<Complex64>]) -> Vec<Complex64> {
        let mut fs: Vec<Vec<Complex64>> = inputs.to_vec();
        let mut us: Vec<Vec<Complex64>> = vec![vec![ZERO; pad.scratch_len()]; inputs.len()];
        for (f, u) in fs.iter_mut().zip(us.iter_mut()) {
            pad.backwards(f, u);
        }
        for j in 0..pad.input_len() {
            let p = fs[1..].iter().fold(fs[0][j], |acc, g| acc * g[j]);
            fs[0][j] = p;
        }
        for j in 0..pad.scratch_len() {
            let p = us[1..].iter().fold(us[0][j], |acc, g| acc * g[j]);
            us[0][j] = p;
        }
        let (f, u) = (&mut fs[0], &mut us[0]);
        pad.forwards(f, u);
        fs.swap_remove(0)
    }

    #[test]
    fn fftpad_matches_direct() {
        for m in [1, 4, 8, 16, 7] {
            let f = sample(m, 0.0);
            let g = sample(m, 3.5);
            let mut expected = vec![ZERO; m];
            DirectConvolution::new(m).convolve(&mut expected, &f, &g);
            let mut pad = FftPad::new(m, 1, 1, &Options::default()).unwrap();
            assert_close(&product(&mut pad, &[f, g]), &expected);
        }
    }

    #[test]
    fn fftpad_multicolumn_matches_per_column() {
        let (m, columns, stride) = (8, 2, 3);
        let cols_f = [sample(m, 0.0), sample(m, 1.0)];
        let cols_g = [sample(m, 2.0), sample(m, 5.0)];
        let interleave = |cols: &[Vec<Complex64>; 2]| {
            let mut data = vec![ZERO; m * stride];
            for k in 0..m {
                for i in 0..columns {
                    data[k * stride + i] = cols[i][k];
                }
            }
            data
        };
        let mut pad = FftPad::new(m, columns, stride, &Options::default().threads(2)).unwrap();
        let out = product(&mut pad, &[interleave(&cols_f), interleave(&cols_g)]);
        for i in 0..columns {
            let mut expected = vec![ZERO; m];
            DirectConvolution::new(m).convolve(&mut expected, &cols_f[i], &cols_g[i]);
            let column: Vec<Complex64> = (0..m).map(|k| out[k * stride + i]).collect();
            assert_close(&column, &expected);
        }
    }

    #[test]
    fn fft0pad_matches_centered_direct() {
        for m in [1, 2, 4, 8, 16, 5] {
            let f = sample(2 * m - 1, 0.25);
            let g = sample(2 * m - 1, -4.0);
            let full = linear(&f, &g);
            // full starts at k = -2(m-1); keep |k| < m.
            let expected = &full[m - 1..m - 1 + 2 * m - 1];
            let mut pad = Fft0Pad::new(m, 1, 1, &Options::default()).unwrap();
            assert_close(&product(&mut pad, &[f.clone(), g.clone()]), expected);
        }
    }

    #[test]
    fn fft0pad_multicolumn() {
        let (m, stride) = (6, 2);
        let f = sample((2 * m - 1) * stride, 0.0);
        let g = sample((2 * m - 1) * stride, 9.0);
        let mut pad = Fft0Pad::new(m, 2, stride, &Options::default()).unwrap();
        let out = product(&mut pad, &[f.clone(), g.clone()]);
        for i in 0..2 {
            let column = |data: &[Complex64]| -> Vec<Complex64> {
                (0..2 * m - 1).map(|k| data[k * stride + i]).collect()
            };
            let full = linear(&column(&f), &column(&g));
            assert_close(&column(&out), &full[m - 1..3 * m - 2]);
        }
    }

    #[test]
    fn fft0padwide_matches_symmetric_nyquist() {
        for m in [1, 3, 4, 8, 16] {
            for threads in [1, 3] {
                let f = sample(2 * m, 1.0);
                let g = sample(2 * m, 7.0);
                // Extend with the Nyquist row mirrored at +m.
                let extend = |x: &[Complex64]| {
                    let mut full = x.to_vec();
                    full.push(x[0]);
                    full
                };
                let full = linear(&extend(&f), &extend(&g));
                // full starts at k = -2m; keep |k| < m in rows 1..2m.
                let mut expected = vec![ZERO; 2 * m];
                expected[1..].copy_from_slice(&full[m + 1..3 * m]);
                let mut pad = Fft0PadWide::new(m, 1, 1, &Options::default().threads(threads)).unwrap();
                assert_close(&product(&mut pad, &[f, g]), &expected);
            }
        }
    }

    #[test]
    fn fft0bipad_ternary_matches_direct() {
        for m in [1, 2, 4, 8, 16] {
            let mut inputs: Vec<Vec<Complex64>> =
                (0..3u8).map(|i| sample(2 * m, f64::from(i) * 2.5)).collect();
            for x in &mut inputs {
                x[0] = ZERO;
            }
            let full = linear(&linear(&inputs[0], &inputs[1]), &inputs[2]);
            // full starts at k = -3m; row j of the result is k = j - m.
            let mut expected = vec![ZERO; 2 * m];
            expected[1..].copy_from_slice(&full[2 * m + 1..4 * m]);
            let mut pad = Fft0BiPad::new(m, 1, 1, &Options::default().threads(2)).unwrap();
            assert_close(&product(&mut pad, &inputs), &expected);
        }
    }

    #[test]
    fn fft0bipad_ignores_nyquist_row() {
        let m = 4;
        let mut a: Vec<Vec<Complex64>> = (0..3u8).map(|i| sample(2 * m, f64::from(i))).collect();
        let mut b = a.clone();
        for x in &mut a {
            x[0] = ZERO;
        }
        for x in &mut b {
            x[0] = Complex64::new(100.0, -100.0);
        }
        let mut pad = Fft0BiPad::new(m, 1, 1, &Options::default()).unwrap();
        let pa = product(&mut pad, &a);
        let pb = product(&mut pad, &b);
        assert_close(&pa, &pb);
    }

    #[test]
    fn lengths_reported() {
        let opts = Options::default();
        let pad = Fft0Pad::new(5, 2, 3, &opts).unwrap();
        assert_eq!(pad.input_len(), 27);
        assert_eq!(pad.scratch_len(), 18);
        let wide = Fft0PadWide::new(5, 1, 1, &opts).unwrap();
        assert_eq!((wide.input_len(), wide.scratch_len()), (10, 5));
        let bi = Fft0BiPad::new(5, 1, 1, &opts).unwrap();
        assert_eq!((bi.input_len(), bi.scratch_len()), (10, 10));
    }

    #[test]
    fn invalid_geometry_rejected() {
        let opts = Options::default();
        assert!(matches!(FftPad::new(0, 1, 1, &opts), Err(ConvError::InvalidLength(0))));
        assert!(matches!(
            Fft0Pad::new(4, 3, 2, &opts),
            Err(ConvError::InvalidStride { .. })
        ));
    }
}
