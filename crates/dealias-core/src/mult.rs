//! Pointwise multipliers applied between the backward and forward transforms.
//!
//! A multiplier receives the transformed input arrays `F[0..A)`, the number
//! of points `m` to combine and the worker count, and leaves its results in
//! `F[0..B)`. Any `Fn(&mut [&mut [T]], usize, usize) + Sync` is a multiplier,
//! so closures work as well as the kernels below.

use dealias_fft::Complex64;
use rayon::prelude::*;

use crate::cvec::{zmult, zmultc};

/// Pointwise operation on complex arrays.
pub trait Multiplier: Sync {
    /// Combine `f[0..A)` over the first `m` points, leaving results in
    /// `f[0..B)`.
    fn multiply(&self, f: &mut [&mut [Complex64]], m: usize, threads: usize);
}

impl<T> Multiplier for T
where
    T: Fn(&mut [&mut [Complex64]], usize, usize) + Sync,
{
    fn multiply(&self, f: &mut [&mut [Complex64]], m: usize, threads: usize) {
        self(f, m, threads);
    }
}

/// Pointwise operation on real arrays.
pub trait RealMultiplier: Sync {
    /// Combine `f[0..A)` over the first `m` points, leaving results in
    /// `f[0..B)`.
    fn multiply(&self, f: &mut [&mut [f64]], m: usize, threads: usize);
}

impl<T> RealMultiplier for T
where
    T: Fn(&mut [&mut [f64]], usize, usize) + Sync,
{
    fn multiply(&self, f: &mut [&mut [f64]], m: usize, threads: usize) {
        self(f, m, threads);
    }
}

/// Apply `op(j, &mut target[j])` to every element, in parallel when
/// `threads > 1`.
pub fn pointwise<T, F>(threads: usize, target: &mut [T], op: F)
where
    T: Send,
    F: Fn(usize, &mut T) + Sync + Send,
{
    if threads > 1 {
        target
            .par_iter_mut()
            .enumerate()
            .for_each(|(j, x)| op(j, x));
    } else {
        for (j, x) in target.iter_mut().enumerate() {
            op(j, x);
        }
    }
}

/// Split off the first array (the output) from the read-only rest.
fn split_output<'a, T>(f: &'a mut [&mut [T]], m: usize) -> (&'a mut [T], &'a [&'a mut [T]]) {
    let (head, tail) = f.split_at_mut(1);
    (&mut head[0][..m], tail)
}

/// `F0 ← F0·F1`.
pub fn multbinary(f: &mut [&mut [Complex64]], m: usize, threads: usize) {
    let (f0, rest) = split_output(f, m);
    let f1 = &rest[0][..m];
    pointwise(threads, f0, |j, x| *x = zmult(*x, f1[j]));
}

/// `F0 ← F0·F2 + F1·F3`.
pub fn multbinary2(f: &mut [&mut [Complex64]], m: usize, threads: usize) {
    let (f0, rest) = split_output(f, m);
    let (f1, f2, f3) = (&rest[0][..m], &rest[1][..m], &rest[2][..m]);
    pointwise(threads, f0, |j, x| {
        *x = zmult(*x, f2[j]) + zmult(f1[j], f3[j]);
    });
}

/// `F0 ← Σ_{p<N} F_{2p}·F_{2p+1}` with the sum unrolled at compile time.
fn multbinary_pairs<const N: usize>(f: &mut [&mut [Complex64]], m: usize, threads: usize) {
    let (f0, rest) = split_output(f, m);
    let f1 = &rest[0][..m];
    pointwise(threads, f0, |j, x| {
        let mut sum = zmult(*x, f1[j]);
        for p in 1..N {
            sum += zmult(rest[2 * p - 1][j], rest[2 * p][j]);
        }
        *x = sum;
    });
}

/// `F0 ← F0·F1 + F2·F3 + F4·F5`.
pub fn multbinary3(f: &mut [&mut [Complex64]], m: usize, threads: usize) {
    multbinary_pairs::<3>(f, m, threads);
}

/// `F0 ← Σ_{p<4} F_{2p}·F_{2p+1}`.
pub fn multbinary4(f: &mut [&mut [Complex64]], m: usize, threads: usize) {
    multbinary_pairs::<4>(f, m, threads);
}

/// `F0 ← Σ_{p<8} F_{2p}·F_{2p+1}`.
pub fn multbinary8(f: &mut [&mut [Complex64]], m: usize, threads: usize) {
    multbinary_pairs::<8>(f, m, threads);
}

/// `F0 ← F0²`.
pub fn mult_autoconvolution(f: &mut [&mut [Complex64]], m: usize, threads: usize) {
    pointwise(threads, &mut f[0][..m], |_, x| *x = zmult(*x, *x));
}

/// `F0 ← F0·conj(F0) = |F0|²`.
pub fn mult_autocorrelation(f: &mut [&mut [Complex64]], m: usize, threads: usize) {
    pointwise(threads, &mut f[0][..m], |_, x| *x = zmultc(*x, *x));
}

/// `F0 ← F0·conj(F1)`.
pub fn mult_correlation(f: &mut [&mut [Complex64]], m: usize, threads: usize) {
    let (f0, rest) = split_output(f, m);
    let f1 = &rest[0][..m];
    pointwise(threads, f0, |j, x| *x = zmultc(f1[j], *x));
}

/// `F0 ← F0·F1` on real arrays.
pub fn realmultbinary(f: &mut [&mut [f64]], m: usize, threads: usize) {
    let (f0, rest) = split_output(f, m);
    let f1 = &rest[0][..m];
    pointwise(threads, f0, |j, x| *x *= f1[j]);
}

/// `F0 ← F0·F2 + F1·F3` on real arrays.
pub fn realmultbinary2(f: &mut [&mut [f64]], m: usize, threads: usize) {
    let (f0, rest) = split_output(f, m);
    let (f1, f2, f3) = (&rest[0][..m], &rest[1][..m], &rest[2][..m]);
    pointwise(threads, f0, |j, x| *x = *x * f2[j] + f1[j] * f3[j]);
}
