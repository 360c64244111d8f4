use hutchdb_blobs::BlobError;
use hutchdb_counters::CounterError;
use hutchdb_ledger::SnapshotError;
use thiserror::Error;

/// Errors surfaced through the SDK facade.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DbError {
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Blob(#[from] BlobError),

    #[error(transparent)]
    Counter(#[from] CounterError),
}

/// Result alias for SDK operations.
pub type DbResult<T> = Result<T, DbError>;
