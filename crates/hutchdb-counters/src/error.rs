use hutchdb_types::TypeError;
use thiserror::Error;

/// Errors from key allocation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CounterError {
    /// The hutch has no counter row; `ensure_hutch` was never called.
    #[error("failed to allocate key: no counter for hutch {hutch:?}")]
    AllocationFailed { hutch: String },

    /// The hutch name failed validation.
    #[error(transparent)]
    InvalidName(#[from] TypeError),

    /// The backing store failed (lock poisoned, I/O error, ...).
    #[error("counter backend error: {0}")]
    Backend(String),
}

/// Result alias for counter operations.
pub type Result<T> = std::result::Result<T, CounterError>;
