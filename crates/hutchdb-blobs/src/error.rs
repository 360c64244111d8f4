use hutchdb_types::{BlobId, TypeError};
use thiserror::Error;

/// Errors from blob store operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BlobError {
    /// `save` was called against a collection that was never initialized.
    #[error("collection {collection:?} has never been initialized")]
    CollectionNotInitialized { collection: String },

    /// Strict creation of a collection that already has content.
    #[error("device type {collection:?} already exists")]
    AlreadyExists { collection: String },

    /// A blob handle did not resolve within its collection.
    #[error("blob {id} not found in collection {collection:?}")]
    BlobNotFound { collection: String, id: BlobId },

    /// Name validation or payload hashing failed.
    #[error(transparent)]
    Type(#[from] TypeError),

    /// The backing store failed (lock poisoned, I/O error, ...).
    #[error("blob backend error: {0}")]
    Backend(String),
}

/// Result alias for blob store operations.
pub type Result<T> = std::result::Result<T, BlobError>;
