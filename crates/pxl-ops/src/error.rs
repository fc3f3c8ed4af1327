//! Error types for pixel operations.

use thiserror::Error;

/// Error type for pixel operations.
///
/// Transforms themselves are total; these errors come from constructing
/// their parameters (kernels, operation names) and from combining buffers.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Buffers have incompatible sizes.
    #[error("size mismatch: {0}")]
    SizeMismatch(String),

    /// Error from a buffer operation.
    #[error(transparent)]
    Core(#[from] pxl_core::Error),
}

/// Result type for pixel operations.
pub type OpsResult<T> = Result<T, OpsError>;
