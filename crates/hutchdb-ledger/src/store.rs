//! The orchestrating alias store: copy-on-write snapshot versioning.

use hutchdb_blobs::ConfigBlobStore;
use hutchdb_counters::KeySequencer;
use hutchdb_types::{
    names::validate_name, ConfigRef, DeviceEntry, DevicePayload, Key, Snapshot,
};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{Result, SnapshotError};
use crate::traits::SnapshotLog;

/// Versioned device-configuration store for one backing store triple.
///
/// `AliasStore` binds a snapshot log, a blob store, and a key sequencer into
/// the engine's write and read paths. All backends are injected at
/// construction; the store holds no other state, so one instance can be
/// shared freely across threads.
///
/// Writes follow copy-on-write: every modification allocates a fresh key and
/// appends a brand-new immutable snapshot; nothing is ever edited in place.
pub struct AliasStore<L, B, K> {
    log: L,
    blobs: B,
    keys: K,
}

impl<L, B, K> AliasStore<L, B, K>
where
    L: SnapshotLog,
    B: ConfigBlobStore,
    K: KeySequencer,
{
    /// Bind the three backends into one store.
    pub fn new(log: L, blobs: B, keys: K) -> Self {
        Self { log, blobs, keys }
    }

    /// The snapshot log backend.
    pub fn log(&self) -> &L {
        &self.log
    }

    /// The blob store backend.
    pub fn blobs(&self) -> &B {
        &self.blobs
    }

    /// The key sequencer backend.
    pub fn keys(&self) -> &K {
        &self.keys
    }

    /// Idempotently bootstrap a hutch: counter row at the sentinel plus an
    /// empty snapshot log. Never errors on pre-existence.
    pub fn ensure_hutch(&self, hutch: &str) -> Result<()> {
        self.keys.ensure_hutch(hutch)?;
        self.log.ensure_hutch(hutch)?;
        Ok(())
    }

    /// Create an alias in a hutch if it does not already exist.
    ///
    /// Idempotent: if any snapshot already carries the alias this is a
    /// silent no-op and no key is consumed. Otherwise a key is allocated and
    /// an empty snapshot appended.
    pub fn create_alias(&self, hutch: &str, alias: &str) -> Result<()> {
        validate_name(alias).map_err(SnapshotError::Validation)?;
        if self.log.current(hutch, alias)?.is_some() {
            debug!(hutch, alias, "alias already exists");
            return Ok(());
        }
        let key = self.keys.next_key(hutch)?;
        self.log.append(hutch, Snapshot::empty(key, alias))?;
        info!(hutch, alias, %key, "created alias");
        Ok(())
    }

    /// The current snapshot for an alias: highest key, filtered by alias.
    pub fn current_snapshot(&self, hutch: &str, alias: &str) -> Result<Snapshot> {
        self.log
            .current(hutch, alias)?
            .ok_or_else(|| SnapshotError::AliasNotFound {
                hutch: hutch.to_string(),
                alias: alias.to_string(),
            })
    }

    /// The current key for an alias, without allocating.
    pub fn highest_key(&self, hutch: &str, alias: &str) -> Result<Key> {
        Ok(self.current_snapshot(hutch, alias)?.key)
    }

    /// Distinct aliases across all snapshots in a hutch, sorted.
    pub fn list_aliases(&self, hutch: &str) -> Result<Vec<String>> {
        let mut aliases: Vec<String> = self
            .log
            .scan(hutch)?
            .into_iter()
            .map(|s| s.alias)
            .collect();
        aliases.sort();
        aliases.dedup();
        Ok(aliases)
    }

    /// Device names in the current snapshot for an alias.
    pub fn list_devices(&self, hutch: &str, alias: &str) -> Result<Vec<String>> {
        Ok(self.current_snapshot(hutch, alias)?.device_names())
    }

    /// The current configuration payload for a device under an alias.
    pub fn get_configuration(&self, hutch: &str, alias: &str, device: &str) -> Result<Value> {
        let snapshot = self.current_snapshot(hutch, alias)?;
        let config = snapshot
            .device(device)
            .and_then(DeviceEntry::primary)
            .ok_or_else(|| SnapshotError::DeviceNotFound {
                alias: alias.to_string(),
                device: device.to_string(),
            })?;
        Ok(self.blobs.load(&config.collection, &config.id)?)
    }

    /// Modify one device's configuration under an alias — the central write
    /// path.
    ///
    /// The raw payload must carry `device_type` and `device_name` fields.
    /// In order: resolve the current snapshot, deduplicate the payload into
    /// its device-type collection, reject an unchanged configuration (no key
    /// is consumed), allocate a key, and append the copy-on-write successor
    /// snapshot with the device's entry replaced and the list re-sorted.
    ///
    /// Returns the new snapshot's key.
    pub fn modify_device(&self, hutch: &str, alias: &str, payload: Value) -> Result<Key> {
        let payload = DevicePayload::from_value(payload)?;
        let device = payload.device_name.clone();
        debug!(hutch, alias, device = %device, "modify_device");

        let current = self.current_snapshot(hutch, alias)?;

        // Persist the payload first; dedup makes this free when unchanged.
        self.blobs.ensure_collection(&payload.device_type)?;
        let id = self.blobs.save(&payload.device_type, &payload.to_value())?;
        let config = ConfigRef::new(payload.device_type.clone(), id);

        if let Some(entry) = current.device(&device) {
            if entry.configs == [config.clone()] {
                return Err(SnapshotError::NoChange { device });
            }
        }

        let key = self.keys.next_key(hutch)?;
        let next = current.with_entry(key, DeviceEntry::single(device.clone(), config));
        self.log.append(hutch, next)?;
        info!(hutch, alias, device = %device, %key, "modified device");
        Ok(key)
    }

    /// Render every snapshot in a hutch, one JSON document per line.
    ///
    /// Diagnostic helper for operators; the output format is not stable.
    pub fn dump(&self, hutch: &str) -> Result<String> {
        let mut out = String::new();
        for snapshot in self.log.scan(hutch)? {
            let line = serde_json::to_string(&snapshot)
                .map_err(|e| SnapshotError::Backend(e.to_string()))?;
            out.push_str(&line);
            out.push('\n');
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hutchdb_blobs::InMemoryBlobStore;
    use hutchdb_counters::InMemoryKeySequencer;
    use serde_json::json;

    use crate::memory::InMemorySnapshotLog;

    type TestStore = AliasStore<InMemorySnapshotLog, InMemoryBlobStore, InMemoryKeySequencer>;

    fn store() -> TestStore {
        let store = AliasStore::new(
            InMemorySnapshotLog::new(),
            InMemoryBlobStore::new(),
            InMemoryKeySequencer::new(),
        );
        store.ensure_hutch("tst").unwrap();
        store
    }

    fn cam_payload(gain: i64) -> Value {
        json!({
            "device_type": "cam",
            "device_name": "cam1",
            "gain": gain,
        })
    }

    #[test]
    fn create_alias_allocates_key_zero() {
        let store = store();
        store.create_alias("tst", "DEFAULT").unwrap();
        let snap = store.current_snapshot("tst", "DEFAULT").unwrap();
        assert_eq!(snap.key, Key::new(0));
        assert!(snap.devices.is_empty());
    }

    #[test]
    fn create_alias_is_idempotent() {
        let store = store();
        store.create_alias("tst", "DEFAULT").unwrap();
        store.create_alias("tst", "DEFAULT").unwrap();
        // Exactly one snapshot, and the second call consumed no key.
        assert_eq!(store.log().len("tst").unwrap(), 1);
        assert_eq!(store.keys().peek("tst").unwrap(), Key::new(0));
    }

    #[test]
    fn create_alias_rejects_invalid_names() {
        let store = store();
        assert!(matches!(
            store.create_alias("tst", "bad name").unwrap_err(),
            SnapshotError::Validation(_)
        ));
    }

    #[test]
    fn current_snapshot_unknown_alias_fails() {
        let store = store();
        assert!(matches!(
            store.current_snapshot("tst", "NOPE").unwrap_err(),
            SnapshotError::AliasNotFound { .. }
        ));
    }

    #[test]
    fn unknown_hutch_fails() {
        let store = store();
        assert!(matches!(
            store.create_alias("ghost", "A").unwrap_err(),
            SnapshotError::HutchNotFound { .. }
        ));
    }

    #[test]
    fn modify_device_appends_new_snapshot() {
        let store = store();
        store.create_alias("tst", "DEFAULT").unwrap();
        let key = store.modify_device("tst", "DEFAULT", cam_payload(5)).unwrap();
        assert_eq!(key, Key::new(1));

        let snap = store.current_snapshot("tst", "DEFAULT").unwrap();
        assert_eq!(snap.key, key);
        assert_eq!(snap.device_names(), vec!["cam1"]);
        assert_eq!(
            store.get_configuration("tst", "DEFAULT", "cam1").unwrap(),
            cam_payload(5)
        );
    }

    #[test]
    fn modify_device_requires_alias() {
        let store = store();
        assert!(matches!(
            store.modify_device("tst", "NOPE", cam_payload(5)).unwrap_err(),
            SnapshotError::AliasNotFound { .. }
        ));
    }

    #[test]
    fn modify_device_validates_payload() {
        let store = store();
        store.create_alias("tst", "DEFAULT").unwrap();
        let err = store
            .modify_device("tst", "DEFAULT", json!({"gain": 5}))
            .unwrap_err();
        assert!(matches!(err, SnapshotError::Validation(_)));
        // Validation happens before any key allocation.
        assert_eq!(store.keys().peek("tst").unwrap(), Key::new(0));
    }

    #[test]
    fn unchanged_payload_is_rejected_without_consuming_a_key() {
        let store = store();
        store.create_alias("tst", "DEFAULT").unwrap();
        store.modify_device("tst", "DEFAULT", cam_payload(5)).unwrap();

        let err = store
            .modify_device("tst", "DEFAULT", cam_payload(5))
            .unwrap_err();
        assert_eq!(err, SnapshotError::NoChange { device: "cam1".into() });
        assert_eq!(store.keys().peek("tst").unwrap(), Key::new(1));
        assert_eq!(store.log().len("tst").unwrap(), 2);
    }

    #[test]
    fn copy_on_write_preserves_prior_snapshots() {
        let store = store();
        store.create_alias("tst", "DEFAULT").unwrap();
        let k1 = store.modify_device("tst", "DEFAULT", cam_payload(5)).unwrap();
        let k2 = store.modify_device("tst", "DEFAULT", cam_payload(6)).unwrap();
        assert!(k2 > k1);

        // The snapshot at k1 is unchanged and still resolvable.
        let snapshots = store.log().scan("tst").unwrap();
        let old = snapshots.iter().find(|s| s.key == k1).unwrap();
        let old_ref = old.device("cam1").unwrap().primary().unwrap();
        assert_eq!(
            store.blobs().load(&old_ref.collection, &old_ref.id).unwrap(),
            cam_payload(5)
        );

        // The new snapshot differs only in the target device's entry.
        let new = snapshots.iter().find(|s| s.key == k2).unwrap();
        assert_eq!(new.device_names(), old.device_names());
        assert_ne!(
            new.device("cam1").unwrap().primary().unwrap().id,
            old_ref.id
        );
    }

    #[test]
    fn modify_device_keeps_devices_sorted() {
        let store = store();
        store.create_alias("tst", "DEFAULT").unwrap();
        for (ty, name) in [("cam", "zeta"), ("cam", "alpha"), ("mcp", "mid")] {
            let payload = json!({"device_type": ty, "device_name": name, "v": 1});
            store.modify_device("tst", "DEFAULT", payload).unwrap();
        }
        assert_eq!(
            store.list_devices("tst", "DEFAULT").unwrap(),
            vec!["alpha", "mid", "zeta"]
        );
    }

    #[test]
    fn get_configuration_unknown_device_fails() {
        let store = store();
        store.create_alias("tst", "DEFAULT").unwrap();
        assert!(matches!(
            store.get_configuration("tst", "DEFAULT", "cam9").unwrap_err(),
            SnapshotError::DeviceNotFound { .. }
        ));
    }

    #[test]
    fn aliases_share_the_hutch_key_space() {
        let store = store();
        store.create_alias("tst", "A").unwrap();
        store.create_alias("tst", "B").unwrap();
        let ka = store.modify_device("tst", "A", cam_payload(1)).unwrap();
        let kb = store.modify_device("tst", "B", cam_payload(2)).unwrap();
        assert_eq!(ka, Key::new(2));
        assert_eq!(kb, Key::new(3));
        // Each alias's current is its own highest-keyed snapshot.
        assert_eq!(store.highest_key("tst", "A").unwrap(), ka);
        assert_eq!(store.highest_key("tst", "B").unwrap(), kb);
    }

    #[test]
    fn equal_payloads_share_one_blob_across_aliases() {
        let store = store();
        store.create_alias("tst", "A").unwrap();
        store.create_alias("tst", "B").unwrap();
        store.modify_device("tst", "A", cam_payload(5)).unwrap();
        store.modify_device("tst", "B", cam_payload(5)).unwrap();

        let ref_a = store.current_snapshot("tst", "A").unwrap();
        let ref_b = store.current_snapshot("tst", "B").unwrap();
        assert_eq!(
            ref_a.device("cam1").unwrap().primary().unwrap().id,
            ref_b.device("cam1").unwrap().primary().unwrap().id
        );
        // Placeholder + the one deduplicated payload.
        assert_eq!(store.blobs().blob_count("cam").unwrap(), 2);
    }

    #[test]
    fn list_aliases_distinct_and_sorted() {
        let store = store();
        store.create_alias("tst", "BEAM").unwrap();
        store.create_alias("tst", "DEFAULT").unwrap();
        store.modify_device("tst", "BEAM", cam_payload(1)).unwrap();
        assert_eq!(
            store.list_aliases("tst").unwrap(),
            vec!["BEAM", "DEFAULT"]
        );
    }

    #[test]
    fn dump_renders_one_snapshot_per_line() {
        let store = store();
        store.create_alias("tst", "DEFAULT").unwrap();
        store.modify_device("tst", "DEFAULT", cam_payload(5)).unwrap();
        let dump = store.dump("tst").unwrap();
        assert_eq!(dump.lines().count(), 2);
        assert!(dump.contains("DEFAULT"));
    }

    #[test]
    fn concurrent_modifications_get_distinct_keys() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(store());
        store.create_alias("tst", "DEFAULT").unwrap();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    let payload = json!({
                        "device_type": "cam",
                        "device_name": format!("cam{i}"),
                        "gain": i,
                    });
                    store.modify_device("tst", "DEFAULT", payload).unwrap().value()
                })
            })
            .collect();

        let mut keys: Vec<i64> = handles
            .into_iter()
            .map(|h| h.join().expect("thread should not panic"))
            .collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), 8);
    }
}
