//! Error types for the cave generator.
//!
//! Generation itself never fails once a generator exists. Everything here is
//! raised while validating configuration at the boundary.

use thiserror::Error;

/// Main error type for the cave generator
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// One of the grid dimensions is zero, negative, or too large to index.
    #[error("invalid cave dimensions {width}x{height}x{depth}: every dimension must be positive")]
    InvalidDimensions {
        /// Requested extent along x
        width: i64,
        /// Requested extent along y
        height: i64,
        /// Requested extent along z
        depth: i64,
    },

    /// A configuration value outside its accepted range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Reading a configuration file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file was not valid JSON for [`crate::CaveConfig`].
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used by every fallible operation in the crate.
pub type Result<T> = std::result::Result<T, GeneratorError>;
