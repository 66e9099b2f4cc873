//! Shared fixtures for the workspace integration tests.
//!
//! Golden cases live in `tests/testdata/convolution_golden.json`: small
//! integer sequences whose convolutions are exact, stored as `[re, im]`
//! pairs.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use dealias_core::{Complex64, Nyquist};

/// Every golden case, grouped by engine family.
#[derive(Debug, Deserialize)]
pub struct GoldenData {
    /// Free-form note about the data set.
    pub description: String,
    /// Non-centered complex convolutions.
    pub complex: Vec<ComplexCase>,
    /// Centered Hermitian convolutions.
    pub hermitian: Vec<HermitianCase>,
    /// Centered Hermitian ternary convolutions.
    pub ternary: Vec<TernaryCase>,
}

/// `h = f * g` truncated to `f.len()` modes.
#[derive(Debug, Deserialize)]
pub struct ComplexCase {
    #[serde(deserialize_with = "pairs")]
    pub f: Vec<Complex64>,
    #[serde(deserialize_with = "pairs")]
    pub g: Vec<Complex64>,
    #[serde(deserialize_with = "pairs")]
    pub h: Vec<Complex64>,
}

/// Hermitian `h = f * g` over `m` modes; `f` and `g` carry `m + 1` entries.
#[derive(Debug, Deserialize)]
pub struct HermitianCase {
    pub nyquist: Nyquist,
    pub m: usize,
    #[serde(deserialize_with = "pairs")]
    pub f: Vec<Complex64>,
    #[serde(deserialize_with = "pairs")]
    pub g: Vec<Complex64>,
    #[serde(deserialize_with = "pairs")]
    pub h: Vec<Complex64>,
}

/// Hermitian `h = f * g * e` truncated to `f.len()` modes.
#[derive(Debug, Deserialize)]
pub struct TernaryCase {
    #[serde(deserialize_with = "pairs")]
    pub f: Vec<Complex64>,
    #[serde(deserialize_with = "pairs")]
    pub g: Vec<Complex64>,
    #[serde(deserialize_with = "pairs")]
    pub e: Vec<Complex64>,
    #[serde(deserialize_with = "pairs")]
    pub h: Vec<Complex64>,
}

fn pairs<'de, D>(deserializer: D) -> Result<Vec<Complex64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Vec<[f64; 2]> = Vec::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|[re, im]| Complex64::new(re, im)).collect())
}

/// Path of a file under `tests/testdata`.
#[must_use]
pub fn testdata(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("testdata")
        .join(name)
}

/// Parse the golden data set.
///
/// # Panics
///
/// If the file is missing or malformed.
#[must_use]
pub fn load_golden() -> GoldenData {
    let path = testdata("convolution_golden.json");
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("cannot read {}: {err}", path.display()));
    serde_json::from_str(&text).unwrap_or_else(|err| panic!("malformed golden data: {err}"))
}

/// Deterministic pseudo-random sequence of `len` values with a real first
/// entry, usable as Hermitian data.
#[must_use]
pub fn sample(len: usize, seed: f64) -> Vec<Complex64> {
    let mut f: Vec<Complex64> = (0..len)
        .map(|k| {
            let x = seed + k as f64;
            Complex64::new((1.3 * x).sin(), (0.7 * x).cos())
        })
        .collect();
    if let Some(first) = f.first_mut() {
        first.im = 0.0;
    }
    f
}

/// Mutable views of every array in `data`.
pub fn views(data: &mut [Vec<Complex64>]) -> Vec<&mut [Complex64]> {
    data.iter_mut().map(Vec::as_mut_slice).collect()
}

/// Assert `actual ≈ expected` relative to the largest expected magnitude.
///
/// # Panics
///
/// On the first mode further than `tol` from its expected value.
pub fn assert_close(actual: &[Complex64], expected: &[Complex64], tol: f64) {
    assert_eq!(actual.len(), expected.len(), "length mismatch");
    let scale = expected.iter().map(|z| z.norm()).fold(1.0, f64::max);
    for (k, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(
            (a - e).norm() <= tol * scale,
            "mode {k}: got {a}, expected {e}"
        );
    }
}
