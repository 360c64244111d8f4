//! The [`SnapshotLog`] trait defining the snapshot log interface.

use hutchdb_types::Snapshot;

use crate::error::Result;

/// Storage backend for per-hutch append-only snapshot logs.
///
/// Implementations must be thread-safe (`Send + Sync`) and satisfy these
/// invariants:
/// - Appends are whole-document inserts: a reader never observes a
///   half-written snapshot, only fully present or absent ones.
/// - Snapshots are never updated or deleted once appended.
/// - Append order is not otherwise synchronized with key order; consumers
///   compare by key, which each snapshot carries.
pub trait SnapshotLog: Send + Sync {
    /// Idempotently create an empty snapshot log for a hutch.
    fn ensure_hutch(&self, hutch: &str) -> Result<()>;

    /// Append one immutable snapshot to a hutch's log.
    ///
    /// Fails with [`SnapshotError::HutchNotFound`] if the hutch's log was
    /// never created.
    ///
    /// [`SnapshotError::HutchNotFound`]: crate::SnapshotError::HutchNotFound
    fn append(&self, hutch: &str, snapshot: Snapshot) -> Result<()>;

    /// All snapshots in a hutch's log, in append order.
    ///
    /// Fails with [`SnapshotError::HutchNotFound`] if the hutch's log was
    /// never created.
    ///
    /// [`SnapshotError::HutchNotFound`]: crate::SnapshotError::HutchNotFound
    fn scan(&self, hutch: &str) -> Result<Vec<Snapshot>>;

    /// The snapshot with the highest key carrying `alias`, if any.
    ///
    /// The key space is hutch-global, so the maximum is taken over keys,
    /// filtered by alias.
    fn current(&self, hutch: &str, alias: &str) -> Result<Option<Snapshot>> {
        Ok(self
            .scan(hutch)?
            .into_iter()
            .filter(|s| s.alias == alias)
            .max_by_key(|s| s.key))
    }
}
