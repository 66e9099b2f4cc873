//! Complex-vector kernels.
//!
//! Scalar renditions of the packed complex operations used by the transform
//! pairs. Written out component-wise so the optimiser can vectorise loops
//! over them.

use dealias_fft::Complex64;

use crate::constants::HSQRT3;

/// `z·w`.
#[inline]
pub fn zmult(z: Complex64, w: Complex64) -> Complex64 {
    Complex64::new(z.re * w.re - z.im * w.im, z.re * w.im + z.im * w.re)
}

/// `conj(z)·w`.
#[inline]
pub fn zmultc(z: Complex64, w: Complex64) -> Complex64 {
    Complex64::new(z.re * w.re + z.im * w.im, z.re * w.im - z.im * w.re)
}

/// `i·z·w`.
#[inline]
pub fn zmulti(z: Complex64, w: Complex64) -> Complex64 {
    let p = zmult(z, w);
    Complex64::new(-p.im, p.re)
}

/// `i·conj(z)·w`.
#[inline]
pub fn zmultic(z: Complex64, w: Complex64) -> Complex64 {
    let p = zmultc(z, w);
    Complex64::new(-p.im, p.re)
}

/// Swap real and imaginary parts.
#[inline]
pub fn flip(z: Complex64) -> Complex64 {
    Complex64::new(z.im, z.re)
}

/// Complex conjugate.
#[inline]
pub fn conj(z: Complex64) -> Complex64 {
    Complex64::new(z.re, -z.im)
}

/// `(ζ₃·a, conj(ζ₃)·a)` with `ζ₃ = e^{2πi/3}`.
#[inline]
pub fn rot3(a: Complex64) -> (Complex64, Complex64) {
    let half = Complex64::new(-0.5 * a.re, -0.5 * a.im);
    let quarter_turn = Complex64::new(-HSQRT3 * a.im, HSQRT3 * a.re);
    (half + quarter_turn, half - quarter_turn)
}
