//! Engine options.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_INPUTS, DEFAULT_OUTPUTS, DEFAULT_TERMS, DEFAULT_THREADS};
use crate::error::ConvError;

/// Storage convention for the Nyquist mode of Hermitian inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Nyquist {
    /// Inputs hold `m` coefficients `f_0..f_{m-1}`.
    #[default]
    Compact,
    /// Inputs hold `m + 1` coefficients; the real `f_m` is a Nyquist mode
    /// shared by `±m`. It is zeroed on output.
    Explicit,
}

impl Nyquist {
    /// Number of stored coefficients for `m` retained modes.
    #[must_use]
    pub fn stored(self, m: usize) -> usize {
        match self {
            Self::Compact => m,
            Self::Explicit => m + 1,
        }
    }
}

/// Options shared by the convolution engines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    /// Worker threads (1 runs every region sequentially).
    pub threads: usize,
    /// Number of input arrays handed to the multiplier (A).
    pub inputs: usize,
    /// Number of output arrays produced by the multiplier (B).
    pub outputs: usize,
    /// Nyquist convention of Hermitian inputs.
    pub nyquist: Nyquist,
    /// Number of triples summed by the Hermitian ternary convolution.
    pub terms: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            threads: DEFAULT_THREADS,
            inputs: DEFAULT_INPUTS,
            outputs: DEFAULT_OUTPUTS,
            nyquist: Nyquist::default(),
            terms: DEFAULT_TERMS,
        }
    }
}

impl Options {
    /// Options for `inputs` arrays reduced to `outputs` arrays.
    #[must_use]
    pub fn with_arity(inputs: usize, outputs: usize) -> Self {
        Self {
            inputs,
            outputs,
            ..Self::default()
        }
    }

    /// Set the thread count.
    #[must_use]
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Set the Nyquist convention.
    #[must_use]
    pub fn nyquist(mut self, nyquist: Nyquist) -> Self {
        self.nyquist = nyquist;
        self
    }

    /// Normalize options, applying defaults where values are zero.
    #[must_use]
    pub fn normalize(mut self) -> Self {
        if self.threads == 0 {
            self.threads = DEFAULT_THREADS;
        }
        if self.terms == 0 {
            self.terms = DEFAULT_TERMS;
        }
        self
    }

    /// Reject unusable input/output counts.
    pub fn validate(&self) -> Result<(), ConvError> {
        if self.inputs == 0 || self.outputs == 0 {
            return Err(ConvError::InvalidArity {
                inputs: self.inputs,
                outputs: self.outputs,
            });
        }
        Ok(())
    }

    /// Whether the odd branch may write into idle input storage (`A ≥ 2B`).
    #[must_use]
    pub fn out_of_place(&self) -> bool {
        self.inputs >= 2 * self.outputs
    }
}
