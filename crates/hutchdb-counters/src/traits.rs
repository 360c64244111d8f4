//! The [`KeySequencer`] trait defining the key allocation interface.

use hutchdb_types::Key;

use crate::error::Result;

/// Storage backend for per-hutch monotonic counters.
///
/// Implementations must be thread-safe (`Send + Sync`) and satisfy these
/// invariants:
/// - `next_key` is an atomic increment-and-fetch: concurrent callers for the
///   same hutch never observe the same returned value, and N concurrent
///   calls return exactly the next N integers in some order.
/// - Counter values only ever increase. A key consumed by a caller whose
///   subsequent write fails stays consumed; gaps carry no meaning.
/// - `ensure_hutch` is structural setup, not an allocation: it never
///   advances an existing counter.
pub trait KeySequencer: Send + Sync {
    /// Atomically increment and return the hutch's counter.
    ///
    /// Fails with [`CounterError::AllocationFailed`] if the hutch has no
    /// counter row.
    ///
    /// [`CounterError::AllocationFailed`]: crate::CounterError::AllocationFailed
    fn next_key(&self, hutch: &str) -> Result<Key>;

    /// Idempotently create the hutch's counter at the sentinel value (−1).
    ///
    /// Never errors on pre-existence; the first `next_key` after creation
    /// returns key 0.
    fn ensure_hutch(&self, hutch: &str) -> Result<()>;

    /// The last issued key for a hutch, without allocating.
    ///
    /// Returns [`Key::SENTINEL`] for a hutch that has a counter but has not
    /// issued any key yet.
    fn peek(&self, hutch: &str) -> Result<Key>;

    /// Sorted list of hutches that have a counter row.
    fn hutches(&self) -> Result<Vec<String>>;
}
