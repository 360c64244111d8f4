//! Append-only alias snapshot log for hutchdb.
//!
//! This crate is the heart of hutchdb. It provides:
//! - The [`SnapshotLog`] trait boundary with an in-memory backend
//! - [`AliasStore`], the orchestrating copy-on-write write path: key
//!   allocation, blob deduplication, and immutable snapshot construction
//! - [`HistoryProjector`], projecting a device's configuration history into
//!   a flat time series of requested dotted fields
//!
//! Snapshots are never updated or deleted. A modification appends a brand
//! new snapshot that is a copy of the current one with one device entry
//! changed; "current" is a derived view (highest key per alias), not a
//! stored state.

pub mod error;
pub mod memory;
pub mod projection;
pub mod store;
pub mod traits;

pub use error::{Result, SnapshotError};
pub use memory::InMemorySnapshotLog;
pub use projection::{History, HistoryProjector, HistoryRecord};
pub use store::AliasStore;
pub use traits::SnapshotLog;
