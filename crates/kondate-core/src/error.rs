use thiserror::Error;

/// Status classification of a [`KondateError`].
///
/// The HTTP collaborator maps each kind onto its own status vocabulary
/// ("bad request", "not found", "unavailable", "server error") without
/// the core knowing that vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Client-caused; the request was rejected before execution.
    InvalidRequest,
    /// The requested identifier does not exist in the catalog.
    NotFound,
    /// The service has not finished startup; retryable after backoff.
    Unavailable,
    /// Unexpected server-side fault; opaque to the caller.
    Internal,
}

/// Errors that can occur during Kondate core operations.
#[derive(Debug, Error)]
pub enum KondateError {
    /// The query string is empty or contains only whitespace.
    #[error("query is empty or whitespace-only")]
    BlankQuery,

    /// The requested page size is outside the configured bounds.
    #[error("limit must be between 1 and {max}, got {actual}")]
    InvalidLimit {
        /// Largest page size the engine accepts.
        max: usize,
        /// Page size the caller asked for.
        actual: usize,
    },

    /// The recipe identifier is not present in the catalog.
    #[error("recipe {0} not found")]
    RecipeNotFound(i64),

    /// The service has not completed startup sequencing.
    #[error("search service is not ready")]
    NotReady,

    /// A regex pattern failed to compile (should not happen with static patterns).
    #[error("regex compilation error: {0}")]
    RegexError(#[from] regex::Error),

    /// The embedding model could not be loaded.
    #[error("failed to load model: {0}")]
    ModelLoadError(String),

    /// The embedding inference failed.
    #[error("inference error: {0}")]
    InferenceError(String),

    /// The embedder and the vector index disagree on dimensionality.
    #[error("embedder dimension {embedder} does not match index dimension {index}")]
    DimensionMismatch {
        /// Dimensionality of the embedder output.
        embedder: usize,
        /// Dimensionality the index was built with.
        index: usize,
    },

    /// The catalog source could not be converted into recipes.
    #[error("catalog load error: {0}")]
    CatalogLoadError(String),

    /// Catalog storage error.
    #[error("catalog storage error: {0}")]
    SqliteError(#[from] rusqlite::Error),

    /// Vector index error.
    #[error("vector index error: {0}")]
    VecdbError(#[from] kondate_vecdb::VecdbError),

    /// A worker task running the pipeline failed to complete.
    #[error("search task failed: {0}")]
    TaskFailed(String),
}

impl KondateError {
    /// Classification used at the service boundary.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BlankQuery | Self::InvalidLimit { .. } => ErrorKind::InvalidRequest,
            Self::RecipeNotFound(_) => ErrorKind::NotFound,
            Self::NotReady => ErrorKind::Unavailable,
            Self::RegexError(_)
            | Self::ModelLoadError(_)
            | Self::InferenceError(_)
            | Self::DimensionMismatch { .. }
            | Self::CatalogLoadError(_)
            | Self::SqliteError(_)
            | Self::VecdbError(_)
            | Self::TaskFailed(_) => ErrorKind::Internal,
        }
    }

    /// Returns `true` if the caller may retry after backoff.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Unavailable
    }
}

/// Result type alias for Kondate operations.
pub type Result<T> = std::result::Result<T, KondateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = KondateError::BlankQuery;
        assert_eq!(err.to_string(), "query is empty or whitespace-only");

        let err = KondateError::InvalidLimit {
            max: 100,
            actual: 250,
        };
        assert!(err.to_string().contains("250"));

        let err = KondateError::RecipeNotFound(999);
        assert!(err.to_string().contains("999"));
    }

    #[test]
    fn error_kinds_match_taxonomy() {
        assert_eq!(KondateError::BlankQuery.kind(), ErrorKind::InvalidRequest);
        assert_eq!(
            KondateError::InvalidLimit { max: 100, actual: 0 }.kind(),
            ErrorKind::InvalidRequest
        );
        assert_eq!(KondateError::RecipeNotFound(1).kind(), ErrorKind::NotFound);
        assert_eq!(KondateError::NotReady.kind(), ErrorKind::Unavailable);
        assert_eq!(
            KondateError::InferenceError("boom".into()).kind(),
            ErrorKind::Internal
        );
    }

    #[test]
    fn only_not_ready_is_retryable() {
        assert!(KondateError::NotReady.is_retryable());
        assert!(!KondateError::BlankQuery.is_retryable());
        assert!(!KondateError::ModelLoadError("x".into()).is_retryable());
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<KondateError>();
    }
}
