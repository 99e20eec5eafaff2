//! Error types for metric stores and value operations.

use std::collections::TryReserveError;

use thiserror::Error;

/// Result type alias for metric store operations.
pub type MapResult<T> = Result<T, MapError>;

/// Errors that can occur while creating or resolving metric slots.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("allocation failure: {0}")]
    AllocationFailure(String),

    #[error("not found: {0}")]
    NotFound(String),
}

impl From<TryReserveError> for MapError {
    fn from(e: TryReserveError) -> Self {
        MapError::AllocationFailure(e.to_string())
    }
}
