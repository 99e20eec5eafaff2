//! Error types for bounded decoding.

use thiserror::Error;

/// Result type alias for decode operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Error codes at or above this value belong to the underlying codec.
pub const ERROR_CUTOFF: i32 = 20;

/// Errors returned by the cursor primitives and container walkers.
///
/// Each variant maps to a stable integer [`code`](DecodeError::code)
/// below [`ERROR_CUTOFF`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("allocation failure: {0}")]
    AllocationFailure(String),

    #[error("corrupt input data: {0}")]
    CorruptInputData(String),

    #[error("consume error: {0}")]
    ConsumeError(String),

    #[error("reader is in an error state")]
    EngineError,

    #[error("map declares {declared} entries, limit is {limit}")]
    PendingMapEntries { declared: u32, limit: u32 },

    #[error("array declares {declared} entries, limit is {limit}")]
    PendingArrayEntries { declared: u32, limit: u32 },

    #[error("unexpected map key: {0}")]
    UnexpectedKey(String),

    #[error("unexpected data type: {0}")]
    UnexpectedDataType(String),
}

impl DecodeError {
    pub const INVALID_ARGUMENT: i32 = 1;
    pub const ALLOCATION: i32 = 2;
    pub const CORRUPT_INPUT_DATA: i32 = 3;
    pub const CONSUME: i32 = 4;
    pub const ENGINE: i32 = 5;
    pub const PENDING_MAP_ENTRIES: i32 = 6;
    pub const PENDING_ARRAY_ENTRIES: i32 = 7;
    pub const UNEXPECTED_KEY: i32 = 8;
    pub const UNEXPECTED_DATA_TYPE: i32 = 9;

    /// Stable numeric code for this error.
    pub fn code(&self) -> i32 {
        match self {
            DecodeError::InvalidArgument(_) => Self::INVALID_ARGUMENT,
            DecodeError::AllocationFailure(_) => Self::ALLOCATION,
            DecodeError::CorruptInputData(_) => Self::CORRUPT_INPUT_DATA,
            DecodeError::ConsumeError(_) => Self::CONSUME,
            DecodeError::EngineError => Self::ENGINE,
            DecodeError::PendingMapEntries { .. } => Self::PENDING_MAP_ENTRIES,
            DecodeError::PendingArrayEntries { .. } => Self::PENDING_ARRAY_ENTRIES,
            DecodeError::UnexpectedKey(_) => Self::UNEXPECTED_KEY,
            DecodeError::UnexpectedDataType(_) => Self::UNEXPECTED_DATA_TYPE,
        }
    }

    /// True for either container-bound violation.
    pub fn is_pending_entries(&self) -> bool {
        matches!(
            self,
            DecodeError::PendingMapEntries { .. } | DecodeError::PendingArrayEntries { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct_and_below_cutoff() {
        let errors = [
            DecodeError::InvalidArgument(String::new()),
            DecodeError::AllocationFailure(String::new()),
            DecodeError::CorruptInputData(String::new()),
            DecodeError::ConsumeError(String::new()),
            DecodeError::EngineError,
            DecodeError::PendingMapEntries { declared: 11, limit: 10 },
            DecodeError::PendingArrayEntries { declared: 70_000, limit: 65_535 },
            DecodeError::UnexpectedKey(String::new()),
            DecodeError::UnexpectedDataType(String::new()),
        ];

        let codes: Vec<i32> = errors.iter().map(DecodeError::code).collect();
        assert_eq!(codes, (1..=9).collect::<Vec<_>>());
        assert!(codes.iter().all(|&c| c > 0 && c < ERROR_CUTOFF));
    }

    #[test]
    fn pending_entries_class() {
        assert!(DecodeError::PendingMapEntries { declared: 11, limit: 10 }.is_pending_entries());
        assert!(DecodeError::PendingArrayEntries { declared: 1, limit: 0 }.is_pending_entries());
        assert!(!DecodeError::EngineError.is_pending_entries());
    }
}
