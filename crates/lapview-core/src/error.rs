//! Dataset loading error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a race dataset
#[derive(Error, Debug)]
pub enum DatasetError {
    /// File could not be read
    #[error("Failed to read dataset {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Payload is not valid dataset JSON
    #[error("Failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),

    /// Metadata timeframe is reversed or not finite
    #[error("Invalid timeframe: min={min}s, max={max}s")]
    InvalidTimeframe { min: f64, max: f64 },
}

/// Result type for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;
