//! In-memory blob store for testing and ephemeral use.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use hutchdb_types::{names::validate_name, BlobId};
use serde_json::Value;
use tracing::debug;

use crate::error::{BlobError, Result};
use crate::traits::ConfigBlobStore;

/// One device-type collection: content-addressed payloads keyed by hash.
type Collection = BTreeMap<BlobId, Value>;

/// An in-memory implementation of [`ConfigBlobStore`].
///
/// Collections live in a `HashMap` behind a `RwLock`. The directory of
/// registered device types is the collection map's key set, so a directory
/// row exists exactly when its collection does.
#[derive(Debug, Default)]
pub struct InMemoryBlobStore {
    collections: RwLock<HashMap<String, Collection>>,
}

impl InMemoryBlobStore {
    /// Create a store with no collections.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of blobs in a collection, placeholder included.
    pub fn blob_count(&self, collection: &str) -> Result<usize> {
        let collections = self.read_lock()?;
        Ok(collections.get(collection).map_or(0, Collection::len))
    }

    fn read_lock(&self) -> Result<std::sync::RwLockReadGuard<'_, HashMap<String, Collection>>> {
        self.collections
            .read()
            .map_err(|e| BlobError::Backend(format!("lock poisoned: {e}")))
    }

    fn write_lock(&self) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<String, Collection>>> {
        self.collections
            .write()
            .map_err(|e| BlobError::Backend(format!("lock poisoned: {e}")))
    }
}

/// A fresh collection holding only the placeholder blob (empty config).
fn new_collection() -> Result<Collection> {
    let placeholder = Value::Object(serde_json::Map::new());
    let id = BlobId::of_value(&placeholder)?;
    let mut blobs = Collection::new();
    blobs.insert(id, placeholder);
    Ok(blobs)
}

impl ConfigBlobStore for InMemoryBlobStore {
    fn ensure_collection(&self, name: &str) -> Result<()> {
        validate_name(name)?;
        let mut collections = self.write_lock()?;
        if !collections.contains_key(name) {
            collections.insert(name.to_string(), new_collection()?);
            debug!(collection = name, "created device-type collection");
        }
        Ok(())
    }

    fn create_collection(&self, name: &str) -> Result<()> {
        validate_name(name)?;
        let mut collections = self.write_lock()?;
        if collections.get(name).is_some_and(|c| !c.is_empty()) {
            return Err(BlobError::AlreadyExists {
                collection: name.to_string(),
            });
        }
        collections.insert(name.to_string(), new_collection()?);
        debug!(collection = name, "created device-type collection");
        Ok(())
    }

    fn save(&self, collection: &str, payload: &Value) -> Result<BlobId> {
        let id = BlobId::of_value(payload)?;
        let mut collections = self.write_lock()?;
        let blobs = collections
            .get_mut(collection)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| BlobError::CollectionNotInitialized {
                collection: collection.to_string(),
            })?;
        // Content addressing makes this idempotent: equal payloads map to
        // the same handle, so a second save is a dedup hit.
        if blobs.contains_key(&id) {
            debug!(collection, %id, "dedup hit");
        } else {
            blobs.insert(id, payload.clone());
            debug!(collection, %id, "stored new blob");
        }
        Ok(id)
    }

    fn load(&self, collection: &str, id: &BlobId) -> Result<Value> {
        let collections = self.read_lock()?;
        collections
            .get(collection)
            .and_then(|blobs| blobs.get(id))
            .cloned()
            .ok_or_else(|| BlobError::BlobNotFound {
                collection: collection.to_string(),
                id: *id,
            })
    }

    fn exists(&self, collection: &str, id: &BlobId) -> Result<bool> {
        let collections = self.read_lock()?;
        Ok(collections
            .get(collection)
            .is_some_and(|blobs| blobs.contains_key(id)))
    }

    fn list_collections(&self) -> Result<Vec<String>> {
        let collections = self.read_lock()?;
        let mut names: Vec<String> = collections.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    fn dump(&self, collection: &str) -> Result<String> {
        let collections = self.read_lock()?;
        let blobs = collections
            .get(collection)
            .ok_or_else(|| BlobError::CollectionNotInitialized {
                collection: collection.to_string(),
            })?;
        let mut out = String::new();
        for (id, payload) in blobs {
            out.push_str(&format!("{id} {payload}\n"));
        }
        Ok(out)
    }
}
