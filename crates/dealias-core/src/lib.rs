//! # dealias-core
//!
//! Implicitly dealiased convolutions.
//!
//! The engines compute the first `m` modes of a linear convolution without
//! zero padding: the padded transform is split into offset sub-transforms of
//! the unpadded length, two for complex data and three for Hermitian data,
//! which are multiplied pointwise and recombined with root-of-unity phase
//! corrections.
#![warn(missing_docs)]

pub mod constants;
pub mod context;
pub mod convolution;
pub(crate) mod coset;
pub mod cvec;
pub mod direct;
pub mod error;
pub mod explicit;
pub mod hconvolution;
pub mod kernels;
pub mod mult;
pub mod options;
pub mod pad;
pub mod parallel;
pub mod split;
pub mod zeta;

// Re-exports
pub use context::Context;
pub use convolution::ImplicitConvolution;
pub use dealias_fft::Complex64;
pub use error::ConvError;
pub use explicit::{ExplicitConvolution, ExplicitHConvolution};
pub use hconvolution::ImplicitHConvolution;
pub use kernels::{ImplicitHFFFConvolution, ImplicitHFGGConvolution, ImplicitHTConvolution};
pub use mult::{
    mult_autocorrelation, mult_autoconvolution, mult_correlation, multbinary, multbinary2,
    multbinary3, multbinary4, multbinary8, realmultbinary, realmultbinary2, Multiplier,
    RealMultiplier,
};
pub use options::{Nyquist, Options};
pub use pad::{Fft0BiPad, Fft0Pad, Fft0PadWide, FftPad, PadTransform};
pub use parallel::Parallel;
pub use split::Split;
pub use zeta::ZetaTable;

/// First `f.len()` modes of the autoconvolution `f * f`.
///
/// Builds a one-off engine; keep an [`ImplicitConvolution`] around when
/// convolving repeatedly at the same size.
///
/// # Example
/// ```
/// use dealias_core::Complex64;
///
/// let f: Vec<Complex64> = [1.0, 2.0, 3.0, 4.0].iter().map(|&x| Complex64::new(x, 0.0)).collect();
/// let h = dealias_core::autoconvolve(&f).unwrap();
/// let expected = [1.0, 4.0, 10.0, 20.0];
/// for (z, e) in h.iter().zip(expected) {
///     assert!((z.re - e).abs() < 1e-12 && z.im.abs() < 1e-12);
/// }
/// ```
pub fn autoconvolve(f: &[Complex64]) -> Result<Vec<Complex64>, ConvError> {
    let mut engine = ImplicitConvolution::autoconvolution(f.len())?;
    let mut h = f.to_vec();
    engine.convolve(&mut [h.as_mut_slice()], &mult_autoconvolution, 0);
    Ok(h)
}
