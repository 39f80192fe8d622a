//! Repeatable groups of sub-records with stable entry identity

use std::fmt;
use uuid::Uuid;

/// Fewest entries a group may hold
pub const MIN_ENTRIES: usize = 1;
/// Most entries a group may hold
pub const MAX_ENTRIES: usize = 5;

/// Stable identity of one entry, independent of its position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryKey(Uuid);

impl EntryKey {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntryKey {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An entry together with its identity
#[derive(Debug, Clone, PartialEq)]
pub struct Keyed<T> {
    pub key: EntryKey,
    pub value: T,
}

/// Ordered collection holding between `MIN_ENTRIES` and `MAX_ENTRIES` entries
#[derive(Debug, Clone, PartialEq)]
pub struct RepeatableGroup<T> {
    entries: Vec<Keyed<T>>,
}

impl<T: Default> RepeatableGroup<T> {
    /// A group with a single default entry
    pub fn new() -> Self {
        Self::with_entry(T::default())
    }

    /// Append an all-empty entry
    pub fn append_default(&mut self) -> Option<EntryKey> {
        self.append(T::default())
    }
}

impl<T: Default> Default for RepeatableGroup<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RepeatableGroup<T> {
    pub fn with_entry(entry: T) -> Self {
        Self {
            entries: vec![Keyed {
                key: EntryKey::new(),
                value: entry,
            }],
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn can_append(&self) -> bool {
        self.entries.len() < MAX_ENTRIES
    }

    pub fn can_remove(&self) -> bool {
        self.entries.len() > MIN_ENTRIES
    }

    /// Append to the end. Returns the new key, or `None` at capacity.
    pub fn append(&mut self, entry: T) -> Option<EntryKey> {
        if !self.can_append() {
            tracing::debug!("Append rejected: group already holds {MAX_ENTRIES} entries");
            return None;
        }
        let key = EntryKey::new();
        self.entries.push(Keyed { key, value: entry });
        Some(key)
    }

    /// Remove by position. No-op if out of range or it would empty the group.
    pub fn remove(&mut self, index: usize) -> bool {
        if index >= self.entries.len() || !self.can_remove() {
            tracing::debug!(index, len = self.entries.len(), "Remove rejected");
            return false;
        }
        self.entries.remove(index);
        true
    }

    /// Remove by identity. Same guards as [`RepeatableGroup::remove`].
    pub fn remove_key(&mut self, key: EntryKey) -> bool {
        match self.position(key) {
            Some(index) => self.remove(index),
            None => false,
        }
    }

    pub fn position(&self, key: EntryKey) -> Option<usize> {
        self.entries.iter().position(|e| e.key == key)
    }

    pub fn get(&self, key: EntryKey) -> Option<&T> {
        self.entries.iter().find(|e| e.key == key).map(|e| &e.value)
    }

    pub fn get_mut(&mut self, key: EntryKey) -> Option<&mut T> {
        self.entries
            .iter_mut()
            .find(|e| e.key == key)
            .map(|e| &mut e.value)
    }

    pub fn keys(&self) -> impl Iterator<Item = EntryKey> + '_ {
        self.entries.iter().map(|e| e.key)
    }

    /// Entry values in order, without identity
    pub fn values(&self) -> impl ExactSizeIterator<Item = &T> {
        self.entries.iter().map(|e| &e.value)
    }
}

impl<T: Clone> RepeatableGroup<T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_group() -> RepeatableGroup<String> {
        let mut group = RepeatableGroup::with_entry("a".to_string());
        for v in ["b", "c", "d", "e"] {
            assert!(group.append(v.to_string()).is_some());
        }
        group
    }

    mod bounds {
        use super::*;

        #[test]
        fn test_new_group_has_one_entry() {
            let group: RepeatableGroup<String> = RepeatableGroup::new();
            assert_eq!(group.len(), 1);
            assert!(group.can_append());
            assert!(!group.can_remove());
        }

        #[test]
        fn test_sixth_append_is_noop() {
            let mut group = full_group();
            assert_eq!(group.len(), MAX_ENTRIES);
            assert!(!group.can_append());
            assert!(group.append("f".to_string()).is_none());
            assert!(group.append_default().is_none());
            assert_eq!(group.len(), MAX_ENTRIES);
        }

        #[test]
        fn test_removing_last_entry_is_noop() {
            let mut group: RepeatableGroup<String> = RepeatableGroup::new();
            let key = group.keys().nth(0).unwrap();
            assert!(!group.remove(0));
            assert!(!group.remove_key(key));
            assert_eq!(group.len(), 1);
        }

        #[test]
        fn test_remove_out_of_range_is_noop() {
            let mut group = full_group();
            assert!(!group.remove(10));
            assert_eq!(group.len(), MAX_ENTRIES);
        }

        #[test]
        fn test_remove_unknown_key_is_noop() {
            let mut group = full_group();
            assert!(!group.remove_key(EntryKey::new()));
            assert_eq!(group.len(), MAX_ENTRIES);
        }
    }

    mod identity {
        use super::*;

        #[test]
        fn test_keys_are_unique() {
            let group = full_group();
            let mut keys: Vec<_> = group.keys().collect();
            keys.sort();
            keys.dedup();
            assert_eq!(keys.len(), MAX_ENTRIES);
        }

        #[test]
        fn test_removal_keeps_later_entries_bound_to_their_keys() {
            let mut group = full_group();
            let before: Vec<_> = group.keys().zip(group.values().cloned()).collect();

            assert!(group.remove(1));

            let after: Vec<_> = group.keys().zip(group.values().cloned()).collect();
            let expected: Vec<_> = before
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != 1)
                .map(|(_, e)| e.clone())
                .collect();
            assert_eq!(after, expected);
            assert_eq!(group.position(before[2].0), Some(1));
        }

        #[test]
        fn test_get_mut_edits_the_keyed_entry() {
            let mut group = full_group();
            let key = group.keys().nth(3).unwrap();
            group.remove(0);
            *group.get_mut(key).unwrap() = "edited".to_string();
            assert_eq!(group.to_vec(), vec!["b", "c", "edited", "e"]);
        }

        #[test]
        fn test_append_after_remove_gets_fresh_key() {
            let mut group = full_group();
            let removed = group.keys().nth(4).unwrap();
            assert!(group.remove_key(removed));
            let added = group.append("z".to_string()).unwrap();
            assert_ne!(added, removed);
            assert!(group.get(removed).is_none());
        }
    }
}
