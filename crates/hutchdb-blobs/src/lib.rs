//! Content-addressed configuration blob storage for hutchdb.
//!
//! Device configuration payloads are stored once per distinct content within
//! a named device-type collection, identified by the BLAKE3 hash of their
//! canonical JSON. A global directory records which collections exist.
//!
//! # Design Rules
//!
//! 1. Blobs are immutable once written; a [`BlobId`] forever resolves to the
//!    same content.
//! 2. Saving deep-equal content twice into the same collection returns the
//!    same handle both times (the dedup invariant).
//! 3. The store never interprets payload contents beyond hashing them.
//! 4. Collection setup is split into silent idempotent
//!    [`ConfigBlobStore::ensure_collection`] and strict
//!    [`ConfigBlobStore::create_collection`].
//!
//! [`BlobId`]: hutchdb_types::BlobId

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{BlobError, Result};
pub use memory::InMemoryBlobStore;
pub use traits::ConfigBlobStore;
