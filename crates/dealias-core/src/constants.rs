//! Numerical constants and configuration defaults.

use dealias_fft::Complex64;

/// `√3`.
pub const SQRT3: f64 = 1.732_050_807_568_877_2;

/// `√3 / 2`.
pub const HSQRT3: f64 = 0.866_025_403_784_438_6;

/// Primitive cube root of unity `e^{2πi/3}`.
pub const ZETA3: Complex64 = Complex64::new(-0.5, HSQRT3);

/// Default worker thread count.
pub const DEFAULT_THREADS: usize = 1;

/// Default number of input arrays for a binary convolution.
pub const DEFAULT_INPUTS: usize = 2;

/// Default number of output arrays.
pub const DEFAULT_OUTPUTS: usize = 1;

/// Default number of triples in a Hermitian ternary convolution.
pub const DEFAULT_TERMS: usize = 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqrt3_constants() {
        assert!((SQRT3 * SQRT3 - 3.0).abs() < 1e-15);
        assert!((2.0 * HSQRT3 - SQRT3).abs() < 1e-15);
    }

    #[test]
    fn zeta3_is_cube_root_of_unity() {
        let cube = ZETA3 * ZETA3 * ZETA3;
        assert!((cube - Complex64::new(1.0, 0.0)).norm() < 1e-15);
        assert!((ZETA3.norm() - 1.0).abs() < 1e-15);
    }
}
