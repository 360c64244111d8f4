//! In-memory snapshot log for testing and ephemeral use.

use std::collections::HashMap;
use std::sync::RwLock;

use hutchdb_types::Snapshot;
use tracing::debug;

use crate::error::{Result, SnapshotError};
use crate::traits::SnapshotLog;

/// An in-memory implementation of [`SnapshotLog`].
///
/// Each hutch's log is a `Vec<Snapshot>` in append order, behind a single
/// `RwLock`. Snapshots are cloned out on scan, so a caller holding an older
/// snapshot is never affected by later appends.
#[derive(Debug, Default)]
pub struct InMemorySnapshotLog {
    logs: RwLock<HashMap<String, Vec<Snapshot>>>,
}

impl InMemorySnapshotLog {
    /// Create a log store with no hutches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of snapshots in a hutch's log.
    pub fn len(&self, hutch: &str) -> Result<usize> {
        Ok(self.scan(hutch)?.len())
    }
}

impl SnapshotLog for InMemorySnapshotLog {
    fn ensure_hutch(&self, hutch: &str) -> Result<()> {
        let mut logs = self
            .logs
            .write()
            .map_err(|e| SnapshotError::Backend(format!("lock poisoned: {e}")))?;
        logs.entry(hutch.to_string()).or_default();
        Ok(())
    }

    fn append(&self, hutch: &str, snapshot: Snapshot) -> Result<()> {
        let mut logs = self
            .logs
            .write()
            .map_err(|e| SnapshotError::Backend(format!("lock poisoned: {e}")))?;
        let log = logs
            .get_mut(hutch)
            .ok_or_else(|| SnapshotError::HutchNotFound {
                hutch: hutch.to_string(),
            })?;
        debug!(hutch, key = %snapshot.key, alias = %snapshot.alias, "appended snapshot");
        log.push(snapshot);
        Ok(())
    }

    fn scan(&self, hutch: &str) -> Result<Vec<Snapshot>> {
        let logs = self
            .logs
            .read()
            .map_err(|e| SnapshotError::Backend(format!("lock poisoned: {e}")))?;
        logs.get(hutch)
            .cloned()
            .ok_or_else(|| SnapshotError::HutchNotFound {
                hutch: hutch.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hutchdb_types::Key;

    #[test]
    fn append_requires_hutch() {
        let log = InMemorySnapshotLog::new();
        let snap = Snapshot::empty(Key::new(0), "A");
        assert!(matches!(
            log.append("ghost", snap).unwrap_err(),
            SnapshotError::HutchNotFound { .. }
        ));
    }

    #[test]
    fn scan_requires_hutch() {
        let log = InMemorySnapshotLog::new();
        assert!(matches!(
            log.scan("ghost").unwrap_err(),
            SnapshotError::HutchNotFound { .. }
        ));
    }

    #[test]
    fn ensure_hutch_is_idempotent() {
        let log = InMemorySnapshotLog::new();
        log.ensure_hutch("tst").unwrap();
        log.append("tst", Snapshot::empty(Key::new(0), "A")).unwrap();
        log.ensure_hutch("tst").unwrap();
        assert_eq!(log.len("tst").unwrap(), 1);
    }

    #[test]
    fn scan_preserves_append_order() {
        let log = InMemorySnapshotLog::new();
        log.ensure_hutch("tst").unwrap();
        for k in [3, 1, 2] {
            log.append("tst", Snapshot::empty(Key::new(k), "A")).unwrap();
        }
        let keys: Vec<i64> = log
            .scan("tst")
            .unwrap()
            .iter()
            .map(|s| s.key.value())
            .collect();
        assert_eq!(keys, vec![3, 1, 2]);
    }

    #[test]
    fn current_is_max_key_filtered_by_alias() {
        let log = InMemorySnapshotLog::new();
        log.ensure_hutch("tst").unwrap();
        log.append("tst", Snapshot::empty(Key::new(0), "A")).unwrap();
        log.append("tst", Snapshot::empty(Key::new(1), "B")).unwrap();
        log.append("tst", Snapshot::empty(Key::new(2), "A")).unwrap();

        let current = log.current("tst", "A").unwrap().unwrap();
        assert_eq!(current.key, Key::new(2));
        assert!(log.current("tst", "C").unwrap().is_none());
    }

    #[test]
    fn scanned_snapshots_are_isolated_copies() {
        let log = InMemorySnapshotLog::new();
        log.ensure_hutch("tst").unwrap();
        log.append("tst", Snapshot::empty(Key::new(0), "A")).unwrap();

        let before = log.scan("tst").unwrap();
        log.append("tst", Snapshot::empty(Key::new(1), "A")).unwrap();
        // The earlier scan is unaffected by the later append.
        assert_eq!(before.len(), 1);
        assert_eq!(before[0].key, Key::new(0));
    }
}
