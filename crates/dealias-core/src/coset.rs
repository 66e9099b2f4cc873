//! Fold and unfold for three-coset (3/2-rule) padding.
//!
//! A centred sequence `f_k`, `|k| < m`, padded to `3m` is evaluated on the
//! cosets `r ∈ {0, +1, -1}` of the `3m` grid. At `t ∈ [1, m)` each coset sees
//! the pair `(f_{t-m}, f_t)`:
//!
//! ```text
//! Y⁰_t  = f_t + f_{t-m}
//! Y¹_t  = ζ^t (f_t + ζ₃⁻¹ f_{t-m})
//! Y⁻¹_t = ζ^{-t} (f_t + ζ₃ f_{t-m})
//! ```
//!
//! with `ζ = e^{2πi/3m}`. Unfolding recovers both output halves from the
//! three transformed cosets at the same `t`.

use dealias_fft::Complex64;

use crate::constants::HSQRT3;
use crate::cvec::{rot3, zmult, zmultc};

/// Coset values `(Y⁰, Y¹, Y⁻¹)` at `t ≥ 1` from `a = f_{t-m}`, `b = f_t`
/// and `zeta = ζ^t`.
#[inline]
pub(crate) fn fold3(a: Complex64, b: Complex64, zeta: Complex64) -> (Complex64, Complex64, Complex64) {
    let (up, down) = rot3(a);
    (a + b, zmult(zeta, b + down), zmultc(zeta, b + up))
}

/// Coset values at `t = 0` when a real Nyquist mode `N` sits at both `±m`:
/// the zero coset sees it twice, the others with phase `ζ₃^{±1}` summing to
/// `-N`.
#[inline]
pub(crate) fn fold3_nyquist(f0: Complex64, nyquist: Complex64) -> (Complex64, Complex64, Complex64) {
    let shifted = f0 - nyquist;
    (f0 + nyquist * 2.0, shifted, shifted)
}

/// Outputs `(h_t, h_{t-m})` from the transformed cosets at `t ≥ 1`, scaled
/// by `ninv`.
#[inline]
pub(crate) fn unfold3(
    g0: Complex64,
    g1: Complex64,
    gm: Complex64,
    zeta: Complex64,
    ninv: f64,
) -> (Complex64, Complex64) {
    let f0 = g0 * ninv;
    let f1 = zmultc(zeta, g1) * ninv;
    let f2 = zmult(zeta, gm) * ninv;
    let sum = f1 + f2;
    let diff = f1 - f2;
    // ζ₃·f1 + ζ₃⁻¹·f2 = -(f1 + f2)/2 + i√3/2 (f1 - f2)
    let rotated = Complex64::new(-0.5 * sum.re - HSQRT3 * diff.im, -0.5 * sum.im + HSQRT3 * diff.re);
    (f0 + sum, f0 + rotated)
}

/// Output `h_0` from the transformed cosets at `t = 0`, scaled by `ninv`.
#[inline]
pub(crate) fn unfold3_zero(g0: Complex64, g1: Complex64, gm: Complex64, ninv: f64) -> Complex64 {
    (g0 + g1 + gm) * ninv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ZETA3;
    use std::f64::consts::TAU;

    fn close(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-13
    }

    #[test]
    fn fold3_matches_definition() {
        let (m, t) = (5usize, 2usize);
        let zeta = Complex64::from_polar(1.0, TAU * t as f64 / (3 * m) as f64);
        let a = Complex64::new(0.3, -1.2);
        let b = Complex64::new(2.0, 0.7);
        let (y0, y1, ym) = fold3(a, b, zeta);
        assert!(close(y0, a + b));
        assert!(close(y1, zeta * (b + ZETA3.conj() * a)));
        assert!(close(ym, zeta.conj() * (b + ZETA3 * a)));
    }

    #[test]
    fn unfold3_inverts_fold3_on_a_single_mode() {
        // With transforms of length 1 the cosets are the folded values
        // themselves; unfolding with 1/3 scaling returns the pair.
        let zeta = Complex64::from_polar(1.0, 0.4);
        let a = Complex64::new(-0.5, 0.25);
        let b = Complex64::new(1.5, -2.0);
        let (y0, y1, ym) = fold3(a, b, zeta);
        let (hb, ha) = unfold3(y0, y1, ym, zeta, 1.0 / 3.0);
        assert!(close(hb, b));
        assert!(close(ha, a));
    }

    #[test]
    fn nyquist_fold_sums() {
        let f0 = Complex64::new(1.0, 0.0);
        let n = Complex64::new(0.25, 0.0);
        let (y0, y1, ym) = fold3_nyquist(f0, n);
        assert_eq!(y0, Complex64::new(1.5, 0.0));
        assert_eq!(y1, Complex64::new(0.75, 0.0));
        assert_eq!(ym, y1);
        // ζ₃ + ζ₃⁻¹ = -1
        assert!(close(f0 + ZETA3 * n + ZETA3.conj() * n, y1));
    }

    #[test]
    fn unfold_zero_averages() {
        let g = Complex64::new(3.0, 6.0);
        assert_eq!(unfold3_zero(g, g, g, 1.0 / 3.0), g);
    }
}
