use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::blob::BlobId;
use crate::key::Key;

/// A pointer into the configuration blob store: which device-type collection
/// holds the payload, and the payload's identity within it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigRef {
    pub collection: String,
    pub id: BlobId,
}

impl ConfigRef {
    pub fn new(collection: impl Into<String>, id: BlobId) -> Self {
        Self {
            collection: collection.into(),
            id,
        }
    }
}

/// One device's row inside a snapshot: the device name and its active
/// configuration references.
///
/// `configs` always has exactly one element in practice (a single active
/// configuration per device per snapshot), but the shape allows multiple.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceEntry {
    pub device: String,
    pub configs: Vec<ConfigRef>,
}

impl DeviceEntry {
    /// Create an entry holding a single configuration reference.
    pub fn single(device: impl Into<String>, config: ConfigRef) -> Self {
        Self {
            device: device.into(),
            configs: vec![config],
        }
    }

    /// The entry's active (first) configuration reference.
    pub fn primary(&self) -> Option<&ConfigRef> {
        self.configs.first()
    }
}

/// An immutable snapshot of a hutch's device configurations under one alias.
///
/// Snapshots are append-only: a modification never edits an existing
/// snapshot, it appends a new one via [`Snapshot::with_entry`]. The current
/// snapshot for an alias is the one with the highest key among snapshots
/// carrying that alias. The `devices` list is always kept sorted by device
/// name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub key: Key,
    pub alias: String,
    pub date: DateTime<Utc>,
    pub devices: Vec<DeviceEntry>,
}

impl Snapshot {
    /// A brand-new alias snapshot: empty device list, freshly allocated key.
    pub fn empty(key: Key, alias: impl Into<String>) -> Self {
        Self {
            key,
            alias: alias.into(),
            date: Utc::now(),
            devices: Vec::new(),
        }
    }

    /// Look up a device's entry by name.
    pub fn device(&self, name: &str) -> Option<&DeviceEntry> {
        self.devices.iter().find(|e| e.device == name)
    }

    /// Device names in this snapshot, in stored (sorted) order.
    pub fn device_names(&self) -> Vec<String> {
        self.devices.iter().map(|e| e.device.clone()).collect()
    }

    /// Build the copy-on-write successor of this snapshot.
    ///
    /// The result carries the new key, a fresh date, and this snapshot's
    /// device list with `entry` replacing any existing entry for the same
    /// device, re-sorted by device name. `self` is untouched.
    pub fn with_entry(&self, key: Key, entry: DeviceEntry) -> Self {
        let mut devices: Vec<DeviceEntry> = self
            .devices
            .iter()
            .filter(|e| e.device != entry.device)
            .cloned()
            .collect();
        devices.push(entry);
        devices.sort_by(|a, b| a.device.cmp(&b.device));
        Self {
            key,
            alias: self.alias.clone(),
            date: Utc::now(),
            devices,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_ref(tag: &[u8]) -> ConfigRef {
        ConfigRef::new("cam", BlobId::from_bytes(tag))
    }

    #[test]
    fn empty_snapshot_has_no_devices() {
        let snap = Snapshot::empty(Key::new(0), "DEFAULT");
        assert_eq!(snap.key, Key::new(0));
        assert_eq!(snap.alias, "DEFAULT");
        assert!(snap.devices.is_empty());
    }

    #[test]
    fn with_entry_adds_and_sorts() {
        let base = Snapshot::empty(Key::new(0), "A");
        let s1 = base.with_entry(Key::new(1), DeviceEntry::single("zed", config_ref(b"z")));
        let s2 = s1.with_entry(Key::new(2), DeviceEntry::single("alpha", config_ref(b"a")));
        assert_eq!(s2.device_names(), vec!["alpha", "zed"]);
        assert_eq!(s2.key, Key::new(2));
        assert_eq!(s2.alias, "A");
    }

    #[test]
    fn with_entry_replaces_existing_device() {
        let base = Snapshot::empty(Key::new(0), "A")
            .with_entry(Key::new(1), DeviceEntry::single("cam1", config_ref(b"v1")));
        let updated =
            base.with_entry(Key::new(2), DeviceEntry::single("cam1", config_ref(b"v2")));
        assert_eq!(updated.devices.len(), 1);
        assert_eq!(
            updated.device("cam1").unwrap().primary().unwrap().id,
            BlobId::from_bytes(b"v2")
        );
        // Copy-on-write: the predecessor still holds the old reference.
        assert_eq!(
            base.device("cam1").unwrap().primary().unwrap().id,
            BlobId::from_bytes(b"v1")
        );
    }

    #[test]
    fn device_lookup() {
        let snap = Snapshot::empty(Key::new(0), "A")
            .with_entry(Key::new(1), DeviceEntry::single("cam1", config_ref(b"c")));
        assert!(snap.device("cam1").is_some());
        assert!(snap.device("cam2").is_none());
    }

    #[test]
    fn serde_roundtrip() {
        let snap = Snapshot::empty(Key::new(3), "BEAM")
            .with_entry(Key::new(4), DeviceEntry::single("cam1", config_ref(b"c")));
        let json = serde_json::to_string(&snap).unwrap();
        let parsed: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snap);
    }
}
