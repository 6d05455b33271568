//! Error types for the collect crate.

use thiserror::Error;

/// Errors that can occur when operating on a [`Collection`](crate::Collection).
///
/// Lookups never produce errors: a missing field, an empty collection for
/// `first`/`last`, or an unknown operator all degrade to an absent value or
/// an empty result. Errors are reserved for structurally invalid calls.
#[derive(Debug, Error)]
pub enum CollectError {
    /// A parameter was structurally invalid.
    #[error("invalid argument '{name}': {reason}")]
    InvalidArgument {
        name: &'static str,
        reason: &'static str,
    },

    /// A write addressed an index past the end of the sequence.
    #[error("index {index} is out of bounds for a collection of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Encoding to or decoding from JSON failed.
    #[error("JSON serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A decoded JSON document was not an array.
    #[error("expected a JSON array, found {found}")]
    NotAnArray { found: &'static str },

    /// An aggregate was requested over nothing.
    #[error("cannot compute {op} of an empty collection")]
    EmptyCollection { op: &'static str },
}

impl CollectError {
    pub(crate) fn invalid_argument(name: &'static str, reason: &'static str) -> Self {
        CollectError::InvalidArgument { name, reason }
    }

    pub(crate) fn empty(op: &'static str) -> Self {
        CollectError::EmptyCollection { op }
    }
}

/// Result type for collect operations.
pub type Result<T> = std::result::Result<T, CollectError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let err = CollectError::invalid_argument("size", "must be greater than zero");
        assert_eq!(
            err.to_string(),
            "invalid argument 'size': must be greater than zero"
        );

        let err = CollectError::empty("avg");
        assert_eq!(err.to_string(), "cannot compute avg of an empty collection");

        let err = CollectError::IndexOutOfBounds { index: 5, len: 2 };
        assert_eq!(
            err.to_string(),
            "index 5 is out of bounds for a collection of length 2"
        );
    }

    #[test]
    fn json_errors_convert() {
        let json_err = serde_json::from_str::<serde_json::Value>("[1,").unwrap_err();
        let err: CollectError = json_err.into();
        assert!(matches!(err, CollectError::Serialization(_)));
        assert!(err.to_string().starts_with("JSON serialization failed"));
    }
}
