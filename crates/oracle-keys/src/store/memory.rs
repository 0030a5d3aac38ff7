use crate::{keys::KeyRange, store::KvStore};
use derive_more::{Deref, DerefMut};
use std::collections::BTreeMap;

///
/// MemoryStore
///

#[derive(Clone, Debug, Default, Deref, DerefMut)]
pub struct MemoryStore(BTreeMap<Vec<u8>, Vec<u8>>);

impl MemoryStore {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Clear all stored entries.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Sum of key and value bytes across all entries.
    #[must_use]
    pub fn memory_bytes(&self) -> u64 {
        self.0
            .iter()
            .map(|(k, v)| (k.len() + v.len()) as u64)
            .sum()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.0.get(key).cloned()
    }

    fn set(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.0.insert(key, value);
    }

    fn delete(&mut self, key: &[u8]) {
        self.0.remove(key);
    }

    fn iter_prefix(&self, prefix: &[u8]) -> Vec<(Vec<u8>, Vec<u8>)> {
        let range = KeyRange::for_prefix(prefix);

        self.0
            .range::<[u8], _>(range.as_bounds())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}
