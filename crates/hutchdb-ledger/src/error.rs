use hutchdb_blobs::BlobError;
use hutchdb_counters::CounterError;
use hutchdb_types::TypeError;
use thiserror::Error;

/// Errors produced by snapshot log and alias store operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    /// The hutch has no snapshot log.
    #[error("hutch {hutch:?} not found")]
    HutchNotFound { hutch: String },

    /// No snapshot carries the requested alias.
    #[error("no alias {alias:?} in hutch {hutch:?}")]
    AliasNotFound { hutch: String, alias: String },

    /// The alias's current snapshot has no entry for the device.
    #[error("no device {device:?} under alias {alias:?}")]
    DeviceNotFound { alias: String, device: String },

    /// The attempted modification is identical to the current state.
    /// A deliberate no-op rejection: no key is consumed, nothing is written.
    #[error("no config values changed for device {device:?}")]
    NoChange { device: String },

    /// The payload or a name failed validation.
    #[error("validation failed: {0}")]
    Validation(#[from] TypeError),

    /// A blob store operation failed.
    #[error(transparent)]
    Blob(#[from] BlobError),

    /// Key allocation failed.
    #[error(transparent)]
    Counter(#[from] CounterError),

    /// The backing store failed (lock poisoned, I/O error, ...).
    #[error("snapshot backend error: {0}")]
    Backend(String),
}

/// Result alias for snapshot operations.
pub type Result<T> = std::result::Result<T, SnapshotError>;
