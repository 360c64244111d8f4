use std::fmt;

use serde::{Deserialize, Serialize};

/// Per-hutch monotonically increasing snapshot key.
///
/// Keys act as logical timestamps: within a hutch they only ever increase,
/// and the snapshot with the numerically highest key for an alias is that
/// alias's current configuration. Keys are not required to be contiguous —
/// an allocation whose snapshot append fails leaves a harmless gap.
///
/// A freshly created hutch counter sits at [`Key::SENTINEL`] (−1), so the
/// first allocated key is 0.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(i64);

impl Key {
    /// The counter value of a hutch before any key has been issued.
    pub const SENTINEL: Key = Key(-1);

    /// Construct a key from a raw counter value.
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// The raw counter value.
    pub const fn value(&self) -> i64 {
        self.0
    }

    /// The key following this one.
    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// Returns `true` if this is the pre-allocation sentinel.
    pub const fn is_sentinel(&self) -> bool {
        self.0 < 0
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({})", self.0)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Key> for i64 {
    fn from(key: Key) -> Self {
        key.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_precedes_first_key() {
        assert!(Key::SENTINEL < Key::new(0));
        assert!(Key::SENTINEL.is_sentinel());
        assert!(!Key::new(0).is_sentinel());
    }

    #[test]
    fn next_increments() {
        assert_eq!(Key::SENTINEL.next(), Key::new(0));
        assert_eq!(Key::new(41).next(), Key::new(42));
    }

    #[test]
    fn ordering_follows_value() {
        assert!(Key::new(3) < Key::new(7));
        assert!(Key::new(9) > Key::new(7));
    }

    #[test]
    fn serde_is_transparent() {
        let json = serde_json::to_string(&Key::new(5)).unwrap();
        assert_eq!(json, "5");
        let parsed: Key = serde_json::from_str("5").unwrap();
        assert_eq!(parsed, Key::new(5));
    }
}
