//! Error type for engine construction.

use dealias_fft::FftError;

/// Errors raised while configuring a convolution engine.
///
/// Kernel calls themselves are infallible; they panic on buffers that are too
/// short for the configured sizes.
#[derive(Debug, thiserror::Error)]
pub enum ConvError {
    /// A transform length of zero was requested.
    #[error("invalid length {0}: the number of retained modes must be positive")]
    InvalidLength(usize),

    /// The requested numbers of inputs and outputs are unusable.
    #[error("invalid arity: {inputs} inputs, {outputs} outputs")]
    InvalidArity {
        /// Number of input arrays.
        inputs: usize,
        /// Number of output arrays.
        outputs: usize,
    },

    /// A multi-column layout whose rows overlap.
    #[error("invalid layout: {columns} columns do not fit in row stride {stride}")]
    InvalidStride {
        /// Columns per row.
        columns: usize,
        /// Distance between consecutive rows.
        stride: usize,
    },

    /// A process rank outside a distribution of `size` processes.
    #[error("invalid rank {rank} for {size} processes")]
    InvalidRank {
        /// Requested rank.
        rank: usize,
        /// Number of processes.
        size: usize,
    },

    /// The worker pool could not be started.
    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Planning or wisdom persistence failed.
    #[error(transparent)]
    Fft(#[from] FftError),
}

pub(crate) fn check_length(m: usize) -> Result<(), ConvError> {
    if m == 0 {
        return Err(ConvError::InvalidLength(m));
    }
    Ok(())
}

pub(crate) fn check_layout(columns: usize, stride: usize) -> Result<(), ConvError> {
    if columns == 0 || stride < columns {
        return Err(ConvError::InvalidStride { columns, stride });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            ConvError::InvalidArity {
                inputs: 0,
                outputs: 1
            }
            .to_string(),
            "invalid arity: 0 inputs, 1 outputs"
        );
        assert!(ConvError::InvalidLength(0).to_string().contains("positive"));
    }

    #[test]
    fn check_length_rejects_zero() {
        assert!(matches!(check_length(0), Err(ConvError::InvalidLength(0))));
        assert!(check_length(1).is_ok());
    }

    #[test]
    fn check_layout_rejects_overlap() {
        assert!(check_layout(2, 2).is_ok());
        assert!(check_layout(2, 5).is_ok());
        assert!(matches!(
            check_layout(3, 2),
            Err(ConvError::InvalidStride { columns: 3, stride: 2 })
        ));
        assert!(check_layout(0, 1).is_err());
    }

    #[test]
    fn fft_error_is_transparent() {
        let inner = FftError::VersionMismatch {
            found: 2,
            expected: 1,
        };
        let msg = inner.to_string();
        let err: ConvError = inner.into();
        assert_eq!(err.to_string(), msg);
    }
}
