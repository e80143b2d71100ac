use std::{fmt, iter, marker::PhantomData, mem};

use crate::hashing::{HashFunction, bucket_index};

/// Default load factor at which `put` doubles the table first
pub const OPEN_ADDRESSING_LOAD_THRESHOLD: f64 = 0.5;

/// A live key-value pair
#[derive(Debug, Clone)]
struct Bucket<V> {
    /// The key in the key-value pair
    key: String,
    /// The value associated with the key
    value: V,
}

/// One position of the table
#[derive(Debug, Clone)]
enum Slot<V> {
    /// Never written since the last resize or clear; terminates a probe
    Empty,
    /// Holds a live pair
    Occupied(Bucket<V>),
    /// Held a pair that was removed; probes continue past it
    Tombstone(String),
}

/// Where a `put` should land
enum InsertSlot {
    /// The key is live at this index
    Live(usize),
    /// First empty or tombstone slot on the probe sequence
    Free(usize),
    /// The probe sequence has no free slot
    Exhausted,
}

/// A string-keyed hash map resolving collisions with quadratic probing.
///
/// Removed entries leave tombstones behind so that probe sequences stay intact;
/// tombstones are dropped the next time the table is resized. The table doubles
/// before any `put` made while the load factor is at or above the threshold
/// (0.5 by default), so there is always an empty slot to stop a probe.
///
/// Note: This implementation is not thread-safe.
#[derive(Clone)]
pub struct OpenAddressingMap<V, H> {
    /// The slots of the table; its length is the capacity
    buckets: Vec<Slot<V>>,
    /// Number of live entries
    size: usize,
    /// Maps keys to home slots
    hash_fn: H,
    /// Load factor that triggers a resize on the next `put`
    load_factor_threshold: f64,
}

impl<V, H> Extend<(String, V)> for OpenAddressingMap<V, H>
where
    H: HashFunction,
{
    fn extend<T: IntoIterator<Item = (String, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<V, H> OpenAddressingMap<V, H>
where
    H: HashFunction,
{
    /// Creates a map with `capacity` empty slots (at least one)
    #[must_use]
    pub fn new(capacity: usize, hash_fn: H) -> Self {
        Self {
            buckets: empty_slots(capacity.max(1)),
            size: 0,
            hash_fn,
            load_factor_threshold: OPEN_ADDRESSING_LOAD_THRESHOLD,
        }
    }

    /// Inserts or overwrites `key`, returning the value it replaced
    pub fn put(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        if self.table_load() >= self.load_factor_threshold {
            self.resize_table(self.get_capacity().saturating_mul(2));
        }

        self.insert_probed(key.into(), value)
    }

    /// Places a pair without checking the load factor
    fn insert_probed(&mut self, key: String, value: V) -> Option<V> {
        match self.probe_for_insert(&key) {
            InsertSlot::Live(index) => match self.buckets.get_mut(index) {
                Some(Slot::Occupied(bucket)) => Some(mem::replace(&mut bucket.value, value)),
                _ => None,
            },
            InsertSlot::Free(index) => {
                if let Some(slot) = self.buckets.get_mut(index) {
                    *slot = Slot::Occupied(Bucket { key, value });
                    self.size = self.size.saturating_add(1);
                }
                None
            }
            InsertSlot::Exhausted => {
                let capacity = self.get_capacity();
                self.resize_table(capacity.saturating_mul(2));
                if self.get_capacity() == capacity {
                    return None;
                }
                self.insert_probed(key, value)
            }
        }
    }

    /// Walks the probe sequence of `key` looking for it or for a place to put it
    fn probe_for_insert(&self, key: &str) -> InsertSlot {
        let capacity = self.get_capacity();
        let home = bucket_index(&self.hash_fn, key, capacity);
        let mut first_free = None;

        for step in 0..capacity {
            let index = probe_index(home, step, capacity);
            match self.buckets.get(index) {
                None => break,
                // Nothing past an empty slot belongs to this probe sequence
                Some(Slot::Empty) => return InsertSlot::Free(first_free.unwrap_or(index)),
                Some(Slot::Occupied(bucket)) if bucket.key == key => {
                    return InsertSlot::Live(index);
                }
                Some(Slot::Tombstone(_)) => {
                    if first_free.is_none() {
                        first_free = Some(index);
                    }
                }
                Some(Slot::Occupied(_)) => {}
            }
        }

        first_free.map_or(InsertSlot::Exhausted, InsertSlot::Free)
    }

    /// Returns the index holding `key` live, if any
    fn find_live(&self, key: &str) -> Option<usize> {
        let capacity = self.get_capacity();
        let home = bucket_index(&self.hash_fn, key, capacity);

        for step in 0..capacity {
            let index = probe_index(home, step, capacity);
            match self.buckets.get(index)? {
                Slot::Empty => return None,
                Slot::Occupied(bucket) if bucket.key == key => return Some(index),
                Slot::Occupied(_) | Slot::Tombstone(_) => {}
            }
        }

        None
    }

    /// Retrieves the value for `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        match self.buckets.get(self.find_live(key)?)? {
            Slot::Occupied(bucket) => Some(&bucket.value),
            Slot::Empty | Slot::Tombstone(_) => None,
        }
    }

    /// Retrieves a mutable reference to the value for `key`
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.find_live(key)?;
        match self.buckets.get_mut(index)? {
            Slot::Occupied(bucket) => Some(&mut bucket.value),
            Slot::Empty | Slot::Tombstone(_) => None,
        }
    }

    /// Returns true if `key` is live in the map
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.find_live(key).is_some()
    }

    /// Turns the slot holding `key` into a tombstone and returns its value
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let index = self.find_live(key)?;
        let slot = self.buckets.get_mut(index)?;

        match mem::replace(slot, Slot::Empty) {
            Slot::Occupied(Bucket { key, value }) => {
                *slot = Slot::Tombstone(key);
                self.size = self.size.saturating_sub(1);
                Some(value)
            }
            other => {
                *slot = other;
                None
            }
        }
    }

    /// Rebuilds the table with `new_capacity` slots.
    ///
    /// Does nothing if `new_capacity` is zero or smaller than the number of live
    /// entries. Entries are re-inserted through `put`, so a capacity that is small
    /// relative to the entry count makes the table grow again mid-rebuild.
    pub fn resize_table(&mut self, new_capacity: usize) {
        if new_capacity < 1 || new_capacity < self.size {
            return;
        }

        let old_buckets = mem::replace(&mut self.buckets, empty_slots(new_capacity));
        self.size = 0;

        for slot in old_buckets {
            if let Slot::Occupied(Bucket { key, value }) = slot {
                self.put(key, value);
            }
        }
    }

    /// Provide a way to configure the load factor threshold
    pub fn set_load_factor_threshold(&mut self, threshold: f64) {
        if !threshold.is_nan() {
            self.load_factor_threshold = threshold.clamp(0.05, 0.95);
        }
    }
}

impl<V, H> OpenAddressingMap<V, H> {
    /// Returns the number of live entries
    #[must_use]
    pub const fn get_size(&self) -> usize {
        self.size
    }

    /// Returns true if the map holds no live entries
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of slots
    #[must_use]
    pub fn get_capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the ratio of live entries to slots
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn table_load(&self) -> f64 {
        self.size as f64 / self.buckets.len() as f64
    }

    /// Returns `capacity - size`; tombstones count as empty here
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.get_capacity().saturating_sub(self.size)
    }

    /// Collects the live keys in slot order
    #[must_use]
    pub fn get_keys(&self) -> Vec<String> {
        self.iter().take(self.size).map(|(k, _)| k.to_owned()).collect()
    }

    /// Drops every entry and tombstone, keeping the capacity
    pub fn clear(&mut self) {
        self.buckets = empty_slots(self.get_capacity());
        self.size = 0;
    }

    /// Returns an iterator over the live pairs in slot order
    #[must_use]
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { buckets: &self.buckets, index: 0, _marker: PhantomData }
    }

    /// Counts slots holding a tombstone
    #[cfg(test)]
    fn tombstones(&self) -> usize {
        self.buckets.iter().filter(|slot| matches!(slot, Slot::Tombstone(_))).count()
    }
}

impl<V: fmt::Debug, H> fmt::Debug for OpenAddressingMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAddressingMap")
            .field("size", &self.size)
            .field("load_factor_threshold", &self.load_factor_threshold)
            .field("buckets", &self.buckets)
            .finish_non_exhaustive()
    }
}

impl<V: fmt::Display, H> fmt::Display for OpenAddressingMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, slot) in self.buckets.iter().enumerate() {
            match slot {
                Slot::Empty => writeln!(f, "{index}: None")?,
                Slot::Occupied(Bucket { key, value }) => writeln!(f, "{index}: {key}: {value}")?,
                Slot::Tombstone(key) => writeln!(f, "{index}: {key}: (deleted)")?,
            }
        }
        Ok(())
    }
}

/// Allocates `capacity` empty slots
fn empty_slots<V>(capacity: usize) -> Vec<Slot<V>> {
    iter::repeat_with(|| Slot::Empty).take(capacity).collect()
}

/// Index of the `step`-th quadratic probe from `home`, wrapped into the table
fn probe_index(home: usize, step: usize, capacity: usize) -> usize {
    home.wrapping_add(step.wrapping_mul(step)).checked_rem(capacity).unwrap_or(0)
}

/// Iterator over the live pairs of the table
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// Reference to the slots of the map
    buckets: &'a [Slot<V>],
    /// Current position in the iteration
    index: usize,
    /// Phantom data to hold the lifetime and type parameters
    _marker: PhantomData<&'a V>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.buckets.get(self.index) {
            self.index = self.index.saturating_add(1);
            if let Slot::Occupied(bucket) = slot {
                return Some((bucket.key.as_str(), &bucket.value));
            }
        }
        None
    }
}
