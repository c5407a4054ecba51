/// Error types for loading node data
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while reading the viewer's inputs
#[derive(Error, Debug)]
pub enum ViewerError {
    /// The file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The payload is not a JSON object of node records
    #[error("malformed node data: {0}")]
    Parse(#[from] serde_json::Error),

    /// A single record has the wrong shape
    #[error("node '{id}' is malformed: {source}")]
    Record {
        id: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias for loading operations
pub type Result<T> = std::result::Result<T, ViewerError>;
