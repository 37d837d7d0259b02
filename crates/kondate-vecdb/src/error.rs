use thiserror::Error;

/// Errors that can occur during vector index operations.
#[derive(Debug, Error)]
pub enum VecdbError {
    /// A vector's dimensionality does not match the index.
    #[error("vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimensionality the index was built with.
        expected: usize,
        /// Dimensionality of the offending vector.
        actual: usize,
    },

    /// The index was asked to hold zero-dimensional vectors.
    #[error("vector dimension must be non-zero")]
    ZeroDimension,

    /// The same identifier was supplied more than once at build time.
    #[error("duplicate vector id: {0}")]
    DuplicateId(i64),

    /// An I/O failure while reading or writing the vector file.
    #[error("vector file I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The vector file is missing a tensor or has an unexpected layout.
    #[error("malformed vector file: {0}")]
    Format(String),
}

/// Result type alias for vector index operations.
pub type Result<T> = std::result::Result<T, VecdbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = VecdbError::DimensionMismatch {
            expected: 384,
            actual: 3,
        };
        assert_eq!(err.to_string(), "vector dimension mismatch: expected 384, got 3");

        let err = VecdbError::DuplicateId(42);
        assert!(err.to_string().contains("42"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<VecdbError>();
    }
}
