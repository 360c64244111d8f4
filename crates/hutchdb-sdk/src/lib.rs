//! High-level SDK for hutchdb.
//!
//! [`HutchDb`] wires the in-memory backends — snapshot log, blob store, and
//! key sequencer — into a single handle exposing the full engine operation
//! set: hutch bootstrap, alias creation, device modification, configuration
//! reads, and history projection. Front ends (HTTP routing, authorization,
//! wire encoding) sit on top of this handle; the engine itself knows nothing
//! about identities, privileges, or transports.

pub mod db;
pub mod error;

pub use db::{HutchDb, Version, VERSION};
pub use error::{DbError, DbResult};
