//! Error types for cellsplit-core.

use thiserror::Error;

/// Result type alias for cellsplit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for cellsplit operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Rectangle with a zero-sized side.
    #[error("invalid rectangle size: {width}x{height}")]
    InvalidRect { width: u32, height: u32 },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}
