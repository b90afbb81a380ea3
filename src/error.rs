//! Error types for dataset loading and querying.

use thiserror::Error;

/// Errors raised while loading or querying a [`Dataset`](crate::Dataset).
#[derive(Debug, Error)]
pub enum DatasetError {
    /// An accessor was given an index outside `[0, len)`.
    #[error("{what} index {index} out of range (len {len})")]
    IndexOutOfRange {
        /// Which kind of index was out of range (`"datapoint"`, `"feature"`).
        what: &'static str,
        /// The offending index.
        index: usize,
        /// The valid exclusive upper bound.
        len: usize,
    },

    /// The source does not follow the rating table layout.
    #[error("schema error at line {line}: {reason}")]
    Schema {
        /// 1-based source line; the header is line 1, 0 when not line bound.
        line: usize,
        /// What was wrong.
        reason: String,
    },

    /// Underlying read/open failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV decoding failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON decoding failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DatasetError {
    /// Creates an index out of range error.
    #[must_use]
    pub const fn index_out_of_range(what: &'static str, index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { what, index, len }
    }

    /// Creates a schema error bound to a source line.
    #[must_use]
    pub fn schema(line: usize, reason: impl Into<String>) -> Self {
        Self::Schema {
            line,
            reason: reason.into(),
        }
    }

    /// Whether this is an [`DatasetError::IndexOutOfRange`].
    pub fn is_index_out_of_range(&self) -> bool {
        matches!(self, Self::IndexOutOfRange { .. })
    }

    /// Whether this is a [`DatasetError::Schema`].
    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema { .. })
    }
}

/// Result type for dataset operations.
pub type Result<T> = std::result::Result<T, DatasetError>;
