//! In-memory key sequencer for testing and ephemeral use.

use std::collections::HashMap;
use std::sync::RwLock;

use hutchdb_types::{names::validate_name, Key};
use tracing::debug;

use crate::error::{CounterError, Result};
use crate::traits::KeySequencer;

/// An in-memory implementation of [`KeySequencer`].
///
/// Counters live in a `HashMap` behind a `RwLock`; `next_key` performs its
/// increment while holding the write lock, which is what makes allocation
/// atomic increment-and-fetch rather than read-modify-write.
#[derive(Debug, Default)]
pub struct InMemoryKeySequencer {
    counters: RwLock<HashMap<String, i64>>,
}

impl InMemoryKeySequencer {
    /// Create a sequencer with no hutches.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeySequencer for InMemoryKeySequencer {
    fn next_key(&self, hutch: &str) -> Result<Key> {
        let mut counters = self
            .counters
            .write()
            .map_err(|e| CounterError::Backend(format!("lock poisoned: {e}")))?;
        let seq = counters
            .get_mut(hutch)
            .ok_or_else(|| CounterError::AllocationFailed {
                hutch: hutch.to_string(),
            })?;
        *seq += 1;
        let key = Key::new(*seq);
        debug!(hutch, %key, "allocated key");
        Ok(key)
    }

    fn ensure_hutch(&self, hutch: &str) -> Result<()> {
        validate_name(hutch)?;
        let mut counters = self
            .counters
            .write()
            .map_err(|e| CounterError::Backend(format!("lock poisoned: {e}")))?;
        counters
            .entry(hutch.to_string())
            .or_insert_with(|| Key::SENTINEL.value());
        Ok(())
    }

    fn peek(&self, hutch: &str) -> Result<Key> {
        let counters = self
            .counters
            .read()
            .map_err(|e| CounterError::Backend(format!("lock poisoned: {e}")))?;
        counters
            .get(hutch)
            .map(|seq| Key::new(*seq))
            .ok_or_else(|| CounterError::AllocationFailed {
                hutch: hutch.to_string(),
            })
    }

    fn hutches(&self) -> Result<Vec<String>> {
        let counters = self
            .counters
            .read()
            .map_err(|e| CounterError::Backend(format!("lock poisoned: {e}")))?;
        let mut names: Vec<String> = counters.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}
