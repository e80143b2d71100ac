//! The interface shared by both map variants, and helpers written against it

use crate::{ChainedMap, HashFunction, OpenAddressingMap};

/// Operations both `OpenAddressingMap` and `ChainedMap` provide
pub trait HashTable<V> {
    /// Inserts or overwrites `key`, returning the value it replaced
    fn put(&mut self, key: String, value: V) -> Option<V>;

    /// Retrieves the value for `key`
    fn get(&self, key: &str) -> Option<&V>;

    /// Returns true if `key` is live in the table
    fn contains_key(&self, key: &str) -> bool;

    /// Removes `key`, returning its value
    fn remove(&mut self, key: &str) -> Option<V>;

    /// Drops every entry, keeping the capacity
    fn clear(&mut self);

    /// Rebuilds the table with `new_capacity` buckets, or does nothing if the
    /// capacity is out of policy
    fn resize_table(&mut self, new_capacity: usize);

    /// Returns the ratio of entries to buckets
    fn table_load(&self) -> f64;

    /// Returns the number of empty buckets
    fn empty_buckets(&self) -> usize;

    /// Returns the number of entries
    fn get_size(&self) -> usize;

    /// Returns the number of buckets
    fn get_capacity(&self) -> usize;

    /// Returns every key in bucket scan order
    fn get_keys(&self) -> Vec<String>;
}

/// Forwards every `HashTable` method to the inherent method of the same name
macro_rules! forward_hash_table {
    ($map:ident) => {
        impl<V, H: HashFunction> HashTable<V> for $map<V, H> {
            fn put(&mut self, key: String, value: V) -> Option<V> {
                $map::put(self, key, value)
            }

            fn get(&self, key: &str) -> Option<&V> {
                $map::get(self, key)
            }

            fn contains_key(&self, key: &str) -> bool {
                $map::contains_key(self, key)
            }

            fn remove(&mut self, key: &str) -> Option<V> {
                $map::remove(self, key)
            }

            fn clear(&mut self) {
                $map::clear(self);
            }

            fn resize_table(&mut self, new_capacity: usize) {
                $map::resize_table(self, new_capacity);
            }

            fn table_load(&self) -> f64 {
                $map::table_load(self)
            }

            fn empty_buckets(&self) -> usize {
                $map::empty_buckets(self)
            }

            fn get_size(&self) -> usize {
                $map::get_size(self)
            }

            fn get_capacity(&self) -> usize {
                $map::get_capacity(self)
            }

            fn get_keys(&self) -> Vec<String> {
                $map::get_keys(self)
            }
        }
    };
}

forward_hash_table!(OpenAddressingMap);
forward_hash_table!(ChainedMap);

/// A point-in-time reading of a table's occupancy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadSnapshot {
    /// Number of entries
    pub size: usize,
    /// Number of buckets
    pub capacity: usize,
    /// Entries per bucket
    pub table_load: f64,
    /// Buckets reported empty by the table
    pub empty_buckets: usize,
}

/// Reads the occupancy counters of `table`
#[must_use]
pub fn snapshot<V, T>(table: &T) -> LoadSnapshot
where
    T: HashTable<V> + ?Sized,
{
    LoadSnapshot {
        size: table.get_size(),
        capacity: table.get_capacity(),
        table_load: table.table_load(),
        empty_buckets: table.empty_buckets(),
    }
}

/// Puts every pair of `iter` into `table`, calling `observe` after each put
pub fn fill_observed<V, T, I, F>(table: &mut T, iter: I, mut observe: F)
where
    T: HashTable<V> + ?Sized,
    I: IntoIterator<Item = (String, V)>,
    F: FnMut(usize, LoadSnapshot),
{
    for (inserted, (key, value)) in (1_usize..).zip(iter) {
        table.put(key, value);
        observe(inserted, snapshot(&*table));
    }
}
