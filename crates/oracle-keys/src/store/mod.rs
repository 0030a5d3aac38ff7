//! Ordered key-value seam consumed by the keyspace.
//!
//! The engine behind `KvStore` owns durability and concurrency control; this
//! layer only needs point reads/writes and ascending prefix scans.

mod memory;
mod oracle;

#[cfg(test)]
mod tests;

pub use memory::MemoryStore;
pub use oracle::OracleStore;

///
/// KvStore
///
/// Sorted byte-keyed map. `iter_prefix` must yield entries in ascending
/// byte order of their keys.
///

pub trait KvStore {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>>;

    fn set(&mut self, key: Vec<u8>, value: Vec<u8>);

    fn delete(&mut self, key: &[u8]);

    fn iter_prefix(&self, prefix: &[u8]) -> Vec<(Vec<u8>, Vec<u8>)>;

    fn has(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }
}
