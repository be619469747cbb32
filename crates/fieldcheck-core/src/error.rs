use thiserror::Error;

/// Errors that can occur during fieldcheck core operations.
#[derive(Debug, Error)]
pub enum FieldcheckError {
    /// A field name is not one of the tracked bug report fields.
    #[error("unknown field name: {0:?}")]
    UnknownField(String),

    /// A label string is not a known coarse label or quality tag.
    #[error("unknown label: {0:?}")]
    UnknownLabel(String),

    /// A vectorizer was fitted on a corpus that produced no terms.
    #[error("empty vocabulary: no terms survived analysis")]
    EmptyVocabulary,

    /// Feature or parameter dimensions disagree.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimension the receiver was built for.
        expected: usize,
        /// Dimension that was supplied.
        actual: usize,
    },

    /// A classifier's parameters are inconsistent with each other.
    #[error("invalid model: {0}")]
    InvalidModel(String),

    /// A scoring graph is structurally malformed.
    #[error("malformed scoring graph: {0}")]
    MalformedGraph(String),

    /// A regex pattern failed to compile (should not happen with static patterns).
    #[error("regex compilation error: {0}")]
    RegexError(#[from] regex::Error),

    /// Reading or writing an artifact failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An artifact could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for fieldcheck operations.
pub type Result<T> = std::result::Result<T, FieldcheckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = FieldcheckError::UnknownField("phone".into());
        assert_eq!(err.to_string(), "unknown field name: \"phone\"");

        let err = FieldcheckError::DimensionMismatch {
            expected: 10,
            actual: 3,
        };
        assert!(err.to_string().contains("expected 10"));
        assert!(err.to_string().contains("got 3"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FieldcheckError>();
    }
}
