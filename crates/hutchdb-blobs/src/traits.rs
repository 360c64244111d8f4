//! The [`ConfigBlobStore`] trait defining the blob storage interface.

use hutchdb_types::BlobId;
use serde_json::Value;

use crate::error::Result;

/// Storage backend for deduplicated configuration payloads.
///
/// Implementations must be thread-safe (`Send + Sync`) and satisfy these
/// invariants:
/// - Blobs are immutable once written; a handle forever resolves to the
///   same content.
/// - For any collection C and payload P, `save(C, P)` called twice returns
///   the same handle both times.
/// - `ensure_collection` is silent idempotent setup; `create_collection`
///   carries explicit "create new device type" semantics and rejects a
///   collection that already has content.
pub trait ConfigBlobStore: Send + Sync {
    /// Idempotently create a collection, its placeholder blob, and its
    /// directory row. Safe to call repeatedly.
    fn ensure_collection(&self, name: &str) -> Result<()>;

    /// Create a new device-type collection.
    ///
    /// Fails with [`BlobError::AlreadyExists`] if the collection already has
    /// any content, placeholder included.
    ///
    /// [`BlobError::AlreadyExists`]: crate::BlobError::AlreadyExists
    fn create_collection(&self, name: &str) -> Result<()>;

    /// Store a payload, deduplicating by content.
    ///
    /// Fails with [`BlobError::CollectionNotInitialized`] if the collection
    /// was never initialized. Otherwise returns the payload's
    /// content-addressed handle, inserting only if the content is new.
    ///
    /// [`BlobError::CollectionNotInitialized`]: crate::BlobError::CollectionNotInitialized
    fn save(&self, collection: &str, payload: &Value) -> Result<BlobId>;

    /// Fetch a payload by handle.
    ///
    /// Fails with [`BlobError::BlobNotFound`] if the handle does not exist
    /// in that collection.
    ///
    /// [`BlobError::BlobNotFound`]: crate::BlobError::BlobNotFound
    fn load(&self, collection: &str, id: &BlobId) -> Result<Value>;

    /// Check whether a handle exists in a collection.
    fn exists(&self, collection: &str, id: &BlobId) -> Result<bool>;

    /// Sorted directory of registered device-type collections.
    fn list_collections(&self) -> Result<Vec<String>>;

    /// Render every document in a collection, one JSON value per line.
    ///
    /// Diagnostic helper for operators; the output format is not stable.
    fn dump(&self, collection: &str) -> Result<String>;
}
