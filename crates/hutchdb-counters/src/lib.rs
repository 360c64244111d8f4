//! Per-hutch monotonic key allocation.
//!
//! Every hutch owns one integer counter, the sole source of snapshot
//! ordering. This crate provides:
//! - The [`KeySequencer`] trait boundary any backend implements
//! - [`InMemoryKeySequencer`] for tests and embedding
//!
//! Allocation is atomic increment-and-fetch: two concurrent callers can
//! never observe the same key for the same hutch.

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{CounterError, Result};
pub use memory::InMemoryKeySequencer;
pub use traits::KeySequencer;
