use hutchdb_blobs::{ConfigBlobStore, InMemoryBlobStore};
use hutchdb_counters::{InMemoryKeySequencer, KeySequencer};
use hutchdb_ledger::{AliasStore, HistoryProjector, HistoryRecord, InMemorySnapshotLog};
use hutchdb_types::{Key, Snapshot};
use serde::Serialize;
use serde_json::Value;

use crate::error::DbResult;

/// Engine version triple, reported to front ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub micro: u32,
}

/// The current engine version.
pub const VERSION: Version = Version {
    major: 1,
    minor: 0,
    micro: 0,
};

/// High-level hutchdb handle over in-memory backends.
///
/// One `HutchDb` owns a snapshot log, a blob store, and a key sequencer,
/// bound together by an [`AliasStore`]. The handle is `Send + Sync`; clones
/// of an `Arc<HutchDb>` can serve concurrent front-end requests directly.
pub struct HutchDb {
    store: AliasStore<InMemorySnapshotLog, InMemoryBlobStore, InMemoryKeySequencer>,
}

impl HutchDb {
    /// Create an empty database.
    pub fn new() -> Self {
        Self {
            store: AliasStore::new(
                InMemorySnapshotLog::new(),
                InMemoryBlobStore::new(),
                InMemoryKeySequencer::new(),
            ),
        }
    }

    /// The engine version.
    pub fn version(&self) -> Version {
        VERSION
    }

    // ---- Hutch and collection setup ----

    /// Idempotently bootstrap a hutch: counter row and empty snapshot log.
    pub fn ensure_hutch(&self, hutch: &str) -> DbResult<()> {
        Ok(self.store.ensure_hutch(hutch)?)
    }

    /// Sorted list of hutches with a counter row.
    pub fn hutches(&self) -> DbResult<Vec<String>> {
        Ok(self.store.keys().hutches()?)
    }

    /// Create a device-type collection with strict "must be new" semantics.
    pub fn create_device_type(&self, name: &str) -> DbResult<()> {
        Ok(self.store.blobs().create_collection(name)?)
    }

    /// Sorted directory of registered device-type collections.
    pub fn device_types(&self) -> DbResult<Vec<String>> {
        Ok(self.store.blobs().list_collections()?)
    }

    // ---- Alias operations ----

    /// Create an alias if it does not already exist (idempotent).
    pub fn create_alias(&self, hutch: &str, alias: &str) -> DbResult<()> {
        Ok(self.store.create_alias(hutch, alias)?)
    }

    /// Distinct aliases in a hutch, sorted.
    pub fn aliases(&self, hutch: &str) -> DbResult<Vec<String>> {
        Ok(self.store.list_aliases(hutch)?)
    }

    /// The current snapshot for an alias.
    pub fn current_snapshot(&self, hutch: &str, alias: &str) -> DbResult<Snapshot> {
        Ok(self.store.current_snapshot(hutch, alias)?)
    }

    /// The current key for an alias, without allocating.
    pub fn highest_key(&self, hutch: &str, alias: &str) -> DbResult<Key> {
        Ok(self.store.highest_key(hutch, alias)?)
    }

    // ---- Device operations ----

    /// Device names in the current snapshot for an alias.
    pub fn devices(&self, hutch: &str, alias: &str) -> DbResult<Vec<String>> {
        Ok(self.store.list_devices(hutch, alias)?)
    }

    /// The current configuration payload for a device.
    pub fn get_configuration(&self, hutch: &str, alias: &str, device: &str) -> DbResult<Value> {
        Ok(self.store.get_configuration(hutch, alias, device)?)
    }

    /// Modify a device's configuration, appending a new snapshot.
    ///
    /// Returns the new snapshot's key. See
    /// [`AliasStore::modify_device`] for the full contract.
    pub fn modify_device(&self, hutch: &str, alias: &str, payload: Value) -> DbResult<Key> {
        Ok(self.store.modify_device(hutch, alias, payload)?)
    }

    /// The history of a device's configuration under an alias, projected
    /// onto the requested dotted field paths, ascending by key.
    pub fn history(
        &self,
        hutch: &str,
        alias: &str,
        device: &str,
        fields: &[&str],
    ) -> DbResult<Vec<HistoryRecord>> {
        let fields: Vec<String> = fields.iter().map(|f| f.to_string()).collect();
        let records = HistoryProjector::history(
            self.store.log(),
            self.store.blobs(),
            hutch,
            alias,
            device,
            &fields,
        )?
        .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    // ---- Diagnostics ----

    /// Render every snapshot in a hutch, one JSON document per line.
    pub fn dump_configs(&self, hutch: &str) -> DbResult<String> {
        Ok(self.store.dump(hutch)?)
    }

    /// Render every blob in a device-type collection, one per line.
    pub fn dump_device_configs(&self, device_type: &str) -> DbResult<String> {
        Ok(self.store.blobs().dump(device_type)?)
    }
}

impl Default for HutchDb {
    fn default() -> Self {
        Self::new()
    }
}
