//! Key-level diff of two mappings.

use std::collections::{BTreeMap, BTreeSet};

#[cfg(test)]
#[path = "diff_tests.rs"]
mod tests;

/// Keys to create, delete and update to turn `current` into `desired`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetDiff<K: Ord> {
    /// Keys only present in the desired mapping.
    pub added: BTreeSet<K>,

    /// Keys only present in the current mapping.
    pub missing: BTreeSet<K>,

    /// Keys present in both whose values differ.
    pub updated: BTreeSet<K>,
}

impl<K: Ord> SetDiff<K> {
    /// Returns true when the two mappings are equal.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.missing.is_empty() && self.updated.is_empty()
    }
}

impl<K: Ord> Default for SetDiff<K> {
    fn default() -> Self {
        Self {
            added: BTreeSet::new(),
            missing: BTreeSet::new(),
            updated: BTreeSet::new(),
        }
    }
}

/// Compares two mappings by key identity and deep value equality.
///
/// # Examples
///
/// ```rust
/// use hubconf_core::diff::diff;
/// use std::collections::BTreeMap;
///
/// let current = BTreeMap::from([("b", 2), ("c", 3)]);
/// let desired = BTreeMap::from([("a", 1), ("c", 4)]);
///
/// let result = diff(&current, &desired);
/// assert!(result.added.contains("a"));
/// assert!(result.missing.contains("b"));
/// assert!(result.updated.contains("c"));
/// ```
pub fn diff<K, V>(current: &BTreeMap<K, V>, desired: &BTreeMap<K, V>) -> SetDiff<K>
where
    K: Ord + Clone,
    V: PartialEq,
{
    let mut result = SetDiff::default();

    for (key, desired_value) in desired {
        match current.get(key) {
            None => {
                result.added.insert(key.clone());
            }
            Some(current_value) if current_value != desired_value => {
                result.updated.insert(key.clone());
            }
            Some(_) => {}
        }
    }

    result.missing = current
        .keys()
        .filter(|key| !desired.contains_key(*key))
        .cloned()
        .collect();

    result
}
