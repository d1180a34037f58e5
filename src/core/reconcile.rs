use std::hash::Hash;

use indexmap::IndexSet;

/// Result of matching a desired key set against the keys currently alive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedDiff<K> {
    /// Desired keys with no live counterpart, in desired order.
    pub entered: Vec<K>,
    /// Desired keys that are already live, in desired order.
    pub retained: Vec<K>,
    /// Live keys that are no longer desired, in live order.
    pub exited: Vec<K>,
}

impl<K> KeyedDiff<K> {
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.entered.is_empty() && self.exited.is_empty()
    }
}

/// Splits keys into entering, retained and exiting sets.
///
/// Duplicate desired keys are collapsed to their first occurrence.
pub fn diff_keys<K, I>(live: I, desired: &[K]) -> KeyedDiff<K>
where
    K: Copy + Eq + Hash,
    I: IntoIterator<Item = K>,
{
    let live: IndexSet<K> = live.into_iter().collect();
    let wanted: IndexSet<K> = desired.iter().copied().collect();

    let (retained, entered): (Vec<K>, Vec<K>) =
        wanted.iter().copied().partition(|key| live.contains(key));
    let exited = live
        .iter()
        .copied()
        .filter(|key| !wanted.contains(key))
        .collect();

    KeyedDiff {
        entered,
        retained,
        exited,
    }
}
