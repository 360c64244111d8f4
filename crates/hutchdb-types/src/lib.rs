//! Foundation types for hutchdb.
//!
//! This crate provides the core key, identifier, and document types used
//! throughout the hutchdb system. Every other hutchdb crate depends on
//! `hutchdb-types`.
//!
//! # Key Types
//!
//! - [`Key`] — Per-hutch monotonically increasing snapshot key
//! - [`BlobId`] — Content-addressed configuration identifier (BLAKE3 hash)
//! - [`Snapshot`] — Immutable binding of an alias to a full device list
//! - [`DeviceEntry`] / [`ConfigRef`] — One device's active configuration
//! - [`DevicePayload`] — Validated device configuration payload

pub mod blob;
pub mod error;
pub mod key;
pub mod names;
pub mod path;
pub mod payload;
pub mod snapshot;

pub use blob::BlobId;
pub use error::TypeError;
pub use key::Key;
pub use names::validate_name;
pub use payload::{DevicePayload, FIELD_DEVICE_NAME, FIELD_DEVICE_TYPE};
pub use snapshot::{ConfigRef, DeviceEntry, Snapshot};
