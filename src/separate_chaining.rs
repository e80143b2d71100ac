use std::{fmt, iter, mem};

use crate::{
    chain::Chain,
    hashing::{HashFunction, bucket_index},
};

/// Default load factor at which `put` doubles the bucket count first
pub const CHAINING_LOAD_THRESHOLD: f64 = 8.0;

/// A string-keyed hash map resolving collisions with per-bucket linked lists.
///
/// Chains absorb any density, so the map only grows once the average chain
/// length reaches the threshold (8 by default) and may be shrunk to a single
/// bucket regardless of how many entries it holds.
///
/// Note: This implementation is not thread-safe.
#[derive(Clone)]
pub struct ChainedMap<V, H> {
    /// One chain per bucket; its length is the capacity
    buckets: Vec<Chain<V>>,
    /// Number of entries across all chains
    size: usize,
    /// Maps keys to buckets
    hash_fn: H,
    /// Load factor that triggers a resize on the next `put`
    load_factor_threshold: f64,
}

impl<V, H> Extend<(String, V)> for ChainedMap<V, H>
where
    H: HashFunction,
{
    fn extend<T: IntoIterator<Item = (String, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<V, H> ChainedMap<V, H>
where
    H: HashFunction,
{
    /// Creates a map with `capacity` empty buckets (at least one)
    #[must_use]
    pub fn new(capacity: usize, hash_fn: H) -> Self {
        Self {
            buckets: empty_chains(capacity.max(1)),
            size: 0,
            hash_fn,
            load_factor_threshold: CHAINING_LOAD_THRESHOLD,
        }
    }

    /// Gets the bucket for a key
    fn bucket_mut(&mut self, key: &str) -> Option<&mut Chain<V>> {
        let index = bucket_index(&self.hash_fn, key, self.buckets.len());
        self.buckets.get_mut(index)
    }

    /// Gets the bucket for a key
    fn bucket(&self, key: &str) -> Option<&Chain<V>> {
        self.buckets.get(bucket_index(&self.hash_fn, key, self.buckets.len()))
    }

    /// Inserts or overwrites `key`, returning the value it replaced
    pub fn put(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        if self.table_load() >= self.load_factor_threshold {
            self.resize_table(self.get_capacity().saturating_mul(2));
        }

        let key = key.into();
        let bucket = self.bucket_mut(&key)?;
        if let Some(existing) = bucket.find_mut(&key) {
            return Some(mem::replace(existing, value));
        }

        bucket.insert(key, value);
        self.size = self.size.saturating_add(1);
        None
    }

    /// Retrieves the value for `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.bucket(key)?.find(key)
    }

    /// Retrieves a mutable reference to the value for `key`
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.bucket_mut(key)?.find_mut(key)
    }

    /// Returns true if `key` is in the map
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Unlinks `key` from its chain and returns its value
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let removed = self.bucket_mut(key)?.remove(key);
        if removed.is_some() {
            self.size = self.size.saturating_sub(1);
        }
        removed
    }

    /// Redistributes every entry over `new_capacity` fresh buckets.
    ///
    /// Does nothing if `new_capacity` is zero. Entries move directly into their
    /// new chains, so a rebuild never triggers another one.
    pub fn resize_table(&mut self, new_capacity: usize) {
        if new_capacity < 1 {
            return;
        }

        let old_buckets = mem::replace(&mut self.buckets, empty_chains(new_capacity));
        for mut chain in old_buckets {
            while let Some((key, value)) = chain.pop_front() {
                if let Some(bucket) = self.bucket_mut(&key) {
                    bucket.insert(key, value);
                }
            }
        }
    }

    /// Provide a way to configure the load factor threshold
    pub fn set_load_factor_threshold(&mut self, threshold: f64) {
        if !threshold.is_nan() {
            self.load_factor_threshold = threshold.clamp(0.5, 64.0);
        }
    }
}

impl<V, H> ChainedMap<V, H> {
    /// Returns the number of entries
    #[must_use]
    pub const fn get_size(&self) -> usize {
        self.size
    }

    /// Returns true if the map holds no entries
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of buckets
    #[must_use]
    pub fn get_capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the average chain length
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn table_load(&self) -> f64 {
        self.size as f64 / self.buckets.len() as f64
    }

    /// Counts buckets with an empty chain
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.buckets.iter().filter(|chain| chain.is_empty()).count()
    }

    /// Collects every key, bucket by bucket and front to back within a chain
    #[must_use]
    pub fn get_keys(&self) -> Vec<String> {
        self.iter().map(|(k, _)| k.to_owned()).collect()
    }

    /// Drops every entry, keeping the capacity
    pub fn clear(&mut self) {
        self.buckets = empty_chains(self.get_capacity());
        self.size = 0;
    }

    /// Returns an iterator over the pairs in bucket order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.buckets.iter().flat_map(Chain::iter)
    }

    /// Length of the longest chain
    #[cfg(test)]
    fn longest_chain(&self) -> usize {
        self.buckets.iter().map(Chain::len).max().unwrap_or(0)
    }
}

impl<V: fmt::Debug, H> fmt::Debug for ChainedMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainedMap")
            .field("size", &self.size)
            .field("load_factor_threshold", &self.load_factor_threshold)
            .field("buckets", &self.buckets)
            .finish_non_exhaustive()
    }
}

impl<V: fmt::Display, H> fmt::Display for ChainedMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, chain) in self.buckets.iter().enumerate() {
            writeln!(f, "{index}: {chain}")?;
        }
        Ok(())
    }
}

/// Allocates `capacity` empty chains
fn empty_chains<V>(capacity: usize) -> Vec<Chain<V>> {
    iter::repeat_with(Chain::new).take(capacity).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing::{hash_function_1, hash_function_2};

    fn identity(key: &str) -> usize {
        key.parse().unwrap_or(0)
    }

    #[test]
    fn test_put_and_get() {
        let mut map = ChainedMap::new(30, hash_function_1);
        assert_eq!(map.get("key"), None);
        assert_eq!(map.put("key1", 10), None);

        assert_eq!(map.get("key1"), Some(&10));
        assert!(map.contains_key("key1"));
        assert!(!map.contains_key("key2"));
    }

    #[test]
    fn test_update() {
        let mut map = ChainedMap::new(100, hash_function_1);
        map.put("key1", 10);
        map.put("key2", 20);
        assert_eq!(map.put("key1", 30), Some(10));
        map.put("key4", 40);

        assert_eq!(map.get("key1"), Some(&30));
        assert_eq!(map.get_size(), 3);
        assert_eq!(map.empty_buckets(), 97);
    }

    #[test]
    fn test_collisions_share_a_chain() {
        let mut map = ChainedMap::new(10, identity);
        map.put("0", 'a');
        map.put("10", 'b');
        map.put("20", 'c');

        assert_eq!(map.longest_chain(), 3);
        assert_eq!(map.empty_buckets(), 9);
        assert_eq!(map.get("10"), Some(&'b'));
        assert_eq!(map.remove("10"), Some('b'));
        assert_eq!(map.get("0"), Some(&'a'));
        assert_eq!(map.get("20"), Some(&'c'));
        assert_eq!(map.get_size(), 2);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut map = ChainedMap::new(5, hash_function_1);
        map.put("key1", 1);

        assert_eq!(map.remove("key2"), None);
        assert_eq!(map.get_size(), 1);
        assert_eq!(map.remove("key1"), Some(1));
        assert_eq!(map.remove("key1"), None);
        assert_eq!(map.get_size(), 0);
    }

    #[test]
    fn test_resize_after_forty_into_five() {
        let mut map = ChainedMap::new(5, hash_function_2);
        for i in 0..40 {
            map.put(format!("key{i}"), i);
        }
        // The 40th put saw a load of 7.8, so no resize has happened yet
        assert_eq!(map.get_capacity(), 5);
        assert!((map.table_load() - 8.0).abs() < f64::EPSILON);

        map.put("key40", 40);
        assert_eq!(map.get_capacity(), 10);
        assert_eq!(map.get_size(), 41);
        for i in 0..41 {
            assert_eq!(map.get(&format!("key{i}")), Some(&i));
        }
    }

    #[test]
    fn test_shrink_below_size() {
        let mut map = ChainedMap::new(50, hash_function_1);
        for i in 0..30 {
            map.put(format!("key{i}"), i);
        }

        map.resize_table(1);
        assert_eq!(map.get_capacity(), 1);
        assert_eq!(map.get_size(), 30);
        assert_eq!(map.longest_chain(), 30);
        assert!((map.table_load() - 30.0).abs() < f64::EPSILON);
        for i in 0..30 {
            assert_eq!(map.get(&format!("key{i}")), Some(&i));
        }
    }

    #[test]
    fn test_resize_does_not_cascade() {
        let mut map = ChainedMap::new(100, hash_function_2);
        for i in 0..100 {
            map.put(format!("key{i}"), i);
        }

        map.resize_table(2);
        assert_eq!(map.get_capacity(), 2);
        assert_eq!(map.get_size(), 100);

        // Load is 50 now, so the next put doubles once
        map.put("another", 0);
        assert_eq!(map.get_capacity(), 4);
    }

    #[test]
    fn test_invalid_resize_is_noop() {
        let mut map = ChainedMap::new(7, hash_function_1);
        map.put("key1", 1);

        map.resize_table(0);
        assert_eq!(map.get_capacity(), 7);
        assert_eq!(map.get_size(), 1);
        assert_eq!(map.get("key1"), Some(&1));
    }

    #[test]
    fn test_get_keys_in_bucket_order() {
        let mut map = ChainedMap::new(10, identity);
        map.put("3", ());
        map.put("1", ());
        map.put("11", ());

        // Bucket 1 holds "11" in front of "1"
        assert_eq!(map.get_keys(), vec!["11", "1", "3"]);
    }

    #[test]
    fn test_clear() {
        let mut map = ChainedMap::new(10, hash_function_1);
        map.put("key1", 1);
        map.put("key2", 2);

        map.clear();

        assert!(map.is_empty());
        assert_eq!(map.get_capacity(), 10);
        assert_eq!(map.empty_buckets(), 10);
        assert_eq!(map.get("key1"), None);
    }

    #[test]
    fn test_get_mut() {
        let mut map = ChainedMap::new(3, hash_function_1);
        map.put("key1", 1);

        if let Some(value) = map.get_mut("key1") {
            *value += 10;
        }

        assert_eq!(map.get("key1"), Some(&11));
    }

    #[test]
    fn test_display() {
        let mut map = ChainedMap::new(3, identity);
        map.put("1", 10);
        map.put("4", 40);

        assert_eq!(map.to_string(), "0: \n1: (4: 40) -> (1: 10)\n2: \n");
    }

    #[test]
    fn test_extend() {
        let mut map = ChainedMap::new(4, hash_function_1);
        map.extend((0..50).map(|i| (format!("str{i}"), i)));

        assert_eq!(map.get_size(), 50);
        assert_eq!(map.get_capacity(), 8);
        assert_eq!(map.get("str49"), Some(&49));
    }
}
