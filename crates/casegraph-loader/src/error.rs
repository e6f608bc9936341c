//! Loader error types

use crate::config::DatasetKind;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for loader operations.
pub type Result<T> = std::result::Result<T, DataLoadError>;

/// Errors that abort loading
///
/// Any one of these is fatal: the explorer never runs on a partial dataset.
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be read
    #[error("Failed to read {dataset} from {}: {source}", path.display())]
    Io {
        /// Dataset being loaded
        dataset: DatasetKind,
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// File is not valid JSON of the expected shape
    #[error("Failed to parse {dataset} from {}: {source}", path.display())]
    Parse {
        /// Dataset being loaded
        dataset: DatasetKind,
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// One record has the wrong shape
    #[error("Failed to parse {dataset} record {index} from {}: {source}", path.display())]
    Record {
        /// Dataset being loaded
        dataset: DatasetKind,
        /// File path
        path: PathBuf,
        /// Position of the record in its array
        index: usize,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// Content parsed but violates a strict-mode rule
    #[error("Invalid {dataset}: {message}")]
    Invalid {
        /// Dataset being loaded
        dataset: DatasetKind,
        /// What was wrong
        message: String,
    },

    /// Loader configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DataLoadError {
    /// Dataset the error relates to, if any
    pub fn dataset(&self) -> Option<DatasetKind> {
        match self {
            DataLoadError::Io { dataset, .. }
            | DataLoadError::Parse { dataset, .. }
            | DataLoadError::Record { dataset, .. }
            | DataLoadError::Invalid { dataset, .. } => Some(*dataset),
            DataLoadError::Config(_) => None,
        }
    }
}
