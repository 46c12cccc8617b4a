//! Error types for kernel sweeps.
//!
//! The kernel never fails; these cover the buffer boundary and parameter
//! parsing.

use thiserror::Error;

/// Error type for sweep operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Buffer validation failed in gray-core.
    #[error(transparent)]
    Core(#[from] gray_core::Error),
}

/// Result type for sweep operations.
pub type OpsResult<T> = Result<T, OpsError>;
