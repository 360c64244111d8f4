//! History projection: a device's configuration over time as a flat series.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use hutchdb_blobs::ConfigBlobStore;
use hutchdb_types::{path, ConfigRef, DeviceEntry, Key};
use serde_json::Value;

use crate::error::Result;
use crate::traits::SnapshotLog;

/// One historical point: the snapshot's date and key plus the requested
/// fields resolved from that snapshot's configuration blob.
///
/// Absent fields resolve to `Value::Null` — the projection is best-effort
/// per field, never an error.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryRecord {
    pub date: DateTime<Utc>,
    pub key: Key,
    pub values: BTreeMap<String, Value>,
}

/// Read-only builder of configuration history projections.
///
/// Walks a hutch's snapshot log for one alias/device pair, dereferences each
/// historical configuration through the blob store, and projects a
/// caller-selected set of dotted field paths into a time series ordered by
/// ascending key (keys are monotonic proxies for time).
pub struct HistoryProjector;

impl HistoryProjector {
    /// Build the history iterator for `device` under `alias`.
    ///
    /// The log is scanned once up front; blob dereferences happen lazily,
    /// one per yielded record. Each call re-scans, so the sequence is
    /// restartable and never holds cursor state between calls.
    pub fn history<'a, L, B>(
        log: &L,
        blobs: &'a B,
        hutch: &str,
        alias: &str,
        device: &str,
        fields: &[String],
    ) -> Result<History<'a, B>>
    where
        L: SnapshotLog,
        B: ConfigBlobStore,
    {
        let mut matches: Vec<(DateTime<Utc>, Key, ConfigRef)> = log
            .scan(hutch)?
            .into_iter()
            .filter(|s| s.alias == alias)
            .filter_map(|s| {
                let config = s.device(device).and_then(DeviceEntry::primary)?.clone();
                Some((s.date, s.key, config))
            })
            .collect();
        matches.sort_by_key(|(_, key, _)| *key);

        Ok(History {
            blobs,
            fields: fields.to_vec(),
            matches: matches.into_iter(),
        })
    }
}

/// Lazy, finite, restartable sequence of [`HistoryRecord`]s.
///
/// Cost is proportional to the number of historical snapshots for the
/// alias/device pair, each requiring one blob dereference.
pub struct History<'a, B> {
    blobs: &'a B,
    fields: Vec<String>,
    matches: std::vec::IntoIter<(DateTime<Utc>, Key, ConfigRef)>,
}

impl<B: ConfigBlobStore> Iterator for History<'_, B> {
    type Item = Result<HistoryRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let (date, key, config) = self.matches.next()?;
        let payload = match self.blobs.load(&config.collection, &config.id) {
            Ok(payload) => payload,
            Err(e) => return Some(Err(e.into())),
        };
        let values = self
            .fields
            .iter()
            .map(|f| {
                let value = path::get(&payload, f).cloned().unwrap_or(Value::Null);
                (f.clone(), value)
            })
            .collect();
        Some(Ok(HistoryRecord { date, key, values }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.matches.size_hint()
    }
}
