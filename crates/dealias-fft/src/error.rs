//! Error type for planning and wisdom persistence.

/// Errors raised by the transform collaborator.
#[derive(Debug, thiserror::Error)]
pub enum FftError {
    /// Reading or writing a wisdom file failed.
    #[error("wisdom I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A wisdom file could not be encoded or decoded.
    #[error("wisdom format error: {0}")]
    Format(#[from] serde_json::Error),

    /// A wisdom file was written by an incompatible version.
    #[error("wisdom version mismatch: found {found}, expected {expected}")]
    VersionMismatch {
        /// Version stored in the file.
        found: u32,
        /// Version this build understands.
        expected: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_mismatch_display() {
        let err = FftError::VersionMismatch {
            found: 7,
            expected: 1,
        };
        assert_eq!(
            err.to_string(),
            "wisdom version mismatch: found 7, expected 1"
        );
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: FftError = io.into();
        assert!(matches!(err, FftError::Io(_)));
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn json_error_converts() {
        let bad = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: FftError = bad.into();
        assert!(matches!(err, FftError::Format(_)));
    }
}
