//! I/O error types.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for I/O operations.
pub type Result<T> = std::result::Result<T, Error>;

/// I/O error types.
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Source image could not be read or decoded.
    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Cell crop could not be encoded or written.
    #[error("failed to write crop {}: {source}", .path.display())]
    CropWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Classifier call failed.
    #[error("classifier error: {0}")]
    Classifier(String),

    /// Worker pool could not be created.
    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Core library error.
    #[error("core error: {0}")]
    CoreError(#[from] cellsplit_core::Error),
}
