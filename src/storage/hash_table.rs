//! Chained hash table backing the registry and the version index

use crate::core::{
    error::{Result, TimefsError},
    hash::TableKey,
};
use std::borrow::Borrow;

/// Default number of buckets when none is configured
pub const DEFAULT_BUCKETS: usize = 16;

/// Hash map with a fixed number of buckets, each a collision chain
///
/// The bucket for a key is `key.table_hash() % bucket_count`. The table never
/// resizes, so pick a bucket count that keeps chains short for the expected
/// number of entries.
#[derive(Debug, Clone)]
pub struct HashTable<K, V> {
    buckets: Vec<Vec<(K, V)>>,
    len: usize,
}

impl<K: TableKey, V> HashTable<K, V> {
    /// Create a table with `bucket_count` chains (zero falls back to the default)
    pub fn with_buckets(bucket_count: usize) -> Self {
        let bucket_count = if bucket_count == 0 {
            DEFAULT_BUCKETS
        } else {
            bucket_count
        };
        let mut buckets = Vec::with_capacity(bucket_count);
        buckets.resize_with(bucket_count, Vec::new);
        Self { buckets, len: 0 }
    }

    fn bucket_index<Q>(&self, key: &Q) -> usize
    where
        Q: TableKey + ?Sized,
    {
        (key.table_hash() % self.buckets.len() as u64) as usize
    }

    /// Insert a value, overwriting any existing value for the key in place
    ///
    /// Returns the previous value if there was one.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let index = self.bucket_index(&key);
        let chain = &mut self.buckets[index];
        if let Some(slot) = chain.iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(&mut slot.1, value));
        }
        chain.push((key, value));
        self.len += 1;
        None
    }

    /// Look up a value, failing with `KeyNotFound` when absent
    pub fn get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: TableKey + ?Sized,
    {
        let index = self.bucket_index(key);
        self.buckets[index]
            .iter()
            .find(|(k, _)| <K as Borrow<Q>>::borrow(k) == key)
            .map(|(_, v)| v)
            .ok_or(TimefsError::KeyNotFound)
    }

    /// Mutable lookup, failing with `KeyNotFound` when absent
    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: TableKey + ?Sized,
    {
        let index = self.bucket_index(key);
        self.buckets[index]
            .iter_mut()
            .find(|(k, _)| <K as Borrow<Q>>::borrow(k) == key)
            .map(|(_, v)| v)
            .ok_or(TimefsError::KeyNotFound)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: TableKey + ?Sized,
    {
        self.get(key).is_ok()
    }

    /// All stored values, in bucket order
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.buckets.iter().flatten().map(|(_, v)| v)
    }

    /// All stored (key, value) pairs, in bucket order
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.buckets.iter().flatten().map(|(k, v)| (k, v))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Average chain length
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    /// Length of the longest collision chain
    pub fn longest_chain(&self) -> usize {
        self.buckets.iter().map(Vec::len).max().unwrap_or(0)
    }
}

impl<K: TableKey, V> Default for HashTable<K, V> {
    fn default() -> Self {
        Self::with_buckets(DEFAULT_BUCKETS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_and_get() {
        let mut table: HashTable<String, u32> = HashTable::with_buckets(8);
        assert!(table.put("alpha".to_string(), 1).is_none());
        assert!(table.put("beta".to_string(), 2).is_none());

        assert_eq!(*table.get("alpha").unwrap(), 1);
        assert_eq!(*table.get("beta").unwrap(), 2);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_put_overwrites_in_place() {
        let mut table: HashTable<String, u32> = HashTable::with_buckets(8);
        table.put("alpha".to_string(), 1);
        assert_eq!(table.put("alpha".to_string(), 5), Some(1));
        assert_eq!(*table.get("alpha").unwrap(), 5);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_missing_key_is_typed_error() {
        let table: HashTable<u32, &str> = HashTable::with_buckets(4);
        assert!(matches!(table.get(&3), Err(TimefsError::KeyNotFound)));
        assert!(!table.contains_key(&3));
    }

    #[test]
    fn test_single_bucket_chains_everything() {
        let mut table: HashTable<u32, u32> = HashTable::with_buckets(1);
        for i in 0..50 {
            table.put(i, i * 10);
        }
        assert_eq!(table.longest_chain(), 50);
        for i in 0..50 {
            assert_eq!(*table.get(&i).unwrap(), i * 10);
        }
    }

    #[test]
    fn test_integer_keys_spread_by_identity() {
        let mut table: HashTable<u32, ()> = HashTable::with_buckets(16);
        for i in 0..16 {
            table.put(i, ());
        }
        assert_eq!(table.longest_chain(), 1);
        assert!((table.load_factor() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_get_mut_and_values() {
        let mut table: HashTable<String, Vec<u8>> = HashTable::with_buckets(4);
        table.put("x".to_string(), vec![1]);
        table.put("y".to_string(), vec![2]);
        table.get_mut("x").unwrap().push(9);

        let mut all: Vec<Vec<u8>> = table.values().cloned().collect();
        all.sort();
        assert_eq!(all, vec![vec![1, 9], vec![2]]);
    }

    #[test]
    fn test_zero_buckets_falls_back_to_default() {
        let table: HashTable<u32, u32> = HashTable::with_buckets(0);
        assert_eq!(table.bucket_count(), DEFAULT_BUCKETS);
        assert!(table.is_empty());
    }
}
