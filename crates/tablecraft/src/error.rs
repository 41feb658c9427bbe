//! Error types for the tablecraft library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for tablecraft operations.
#[derive(Debug, Error)]
pub enum TablecraftError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A referenced column name is not present in the dataset.
    #[error("Unknown column: '{0}'")]
    UnknownColumn(String),

    /// A row's cell count does not match the column count.
    #[error("Malformed row {row}: expected {expected} cells, found {found}")]
    MalformedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Custom bin boundaries are not in ascending order.
    #[error("Bin boundaries for '{column}' are not in ascending order")]
    UnsortedBoundaries { column: String },

    /// Empty file or no data to work with.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Invalid command configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for tablecraft operations.
pub type Result<T> = std::result::Result<T, TablecraftError>;
