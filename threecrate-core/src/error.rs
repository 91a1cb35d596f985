//! Error types for 3DCrate

use thiserror::Error;

/// Main error type for 3DCrate operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The spatial index was built over a different snapshot than the cloud it is queried for
    #[error("Spatial index covers {index_len} points but the cloud has {cloud_len}")]
    IndexMismatch { index_len: usize, cloud_len: usize },

    #[error("Algorithm error: {0}")]
    Algorithm(String),
}

/// Result type alias for 3DCrate operations
pub type Result<T> = std::result::Result<T, Error>;
