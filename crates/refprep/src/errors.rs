//! # Error Types

use crate::types::AnnId;

/// Errors from refprep operations.
#[derive(Debug, thiserror::Error)]
pub enum PreproError {
    /// No max length override was given, and the dataset has no default.
    #[error("no default max length for dataset '{dataset}'; set one explicitly")]
    UnknownMaxLength {
        /// The dataset name that was looked up.
        dataset: String,
    },

    /// Max length must be at least 1.
    #[error("max length must be > 0")]
    InvalidMaxLength,

    /// Vocab size exceeds the capacity of the word index type.
    #[error("vocab size ({size}) exceeds word index type capacity")]
    VocabSizeOverflow {
        /// The vocab size that exceeded the capacity.
        size: usize,
    },

    /// Vocabulary data is inconsistent.
    #[error("{0}")]
    VocabConflict(String),

    /// A reference or image points at an annotation the source does not have.
    #[error("annotation {ann_id} not found in data source")]
    MissingAnnotation {
        /// The missing annotation id.
        ann_id: AnnId,
    },

    /// A sentence token has no vocabulary entry.
    #[error("word {word:?} not found in vocabulary")]
    UnknownWord {
        /// The missing word.
        word: String,
    },

    /// A sentence positional index does not fit the label matrices.
    #[error("h5_id {h5_id} out of range for {rows} label rows")]
    RowOutOfRange {
        /// The offending positional index.
        h5_id: usize,

        /// The number of rows available.
        rows: usize,
    },

    /// A configured path could not be expanded.
    #[error("path expansion failed: {0}")]
    PathExpansion(String),

    /// Label matrices have inconsistent shapes.
    #[error("shape error: {0}")]
    Shape(String),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Error writing the label archive.
    #[error(transparent)]
    WriteNpz(#[from] ndarray_npy::WriteNpzError),

    /// Error reading the label archive.
    #[error(transparent)]
    ReadNpz(#[from] ndarray_npy::ReadNpzError),
}

impl From<ndarray::ShapeError> for PreproError {
    fn from(err: ndarray::ShapeError) -> Self {
        PreproError::Shape(err.to_string())
    }
}

/// Result type for refprep operations.
pub type PreproResult<T> = core::result::Result<T, PreproError>;
