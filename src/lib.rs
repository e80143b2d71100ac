//! # Hash Bucket
//!
//! String-keyed hash maps over a fixed-size bucket array, in two flavours:
//!
//! - `OpenAddressingMap`: quadratic probing with tombstone deletion, doubling before
//!   an insert made at a load factor of 0.5 or more
//! - `ChainedMap`: separate chaining with a singly linked list per bucket, doubling
//!   before an insert made at a load factor of 8 or more
//!
//! Both take a pluggable [`HashFunction`] at construction, expose the same operations
//! (also available through the [`HashTable`] trait), and never fail: lookups of missing
//! keys return `None`, removing a missing key does nothing, and an out-of-range
//! `resize_table` leaves the map untouched.
//!
//! [`find_mode`] uses a `ChainedMap` as a frequency counter.
//!
//! ## Basic Usage
//!
//! ```rust
//! use hashbucket::{OpenAddressingMap, hash_function_1};
//!
//! let mut map = OpenAddressingMap::new(10, hash_function_1);
//!
//! // Insert values
//! map.put("apple", 1);
//! map.put("banana", 2);
//! assert_eq!(map.get("apple"), Some(&1));
//!
//! // Update values
//! map.put("apple", 10);
//! assert_eq!(map.get("apple"), Some(&10));
//! assert_eq!(map.get_size(), 2);
//!
//! // Remove values
//! map.remove("apple");
//! assert_eq!(map.get("apple"), None);
//! assert!(!map.contains_key("apple"));
//! ```
//!
//! ## Chaining With a Custom Hash
//!
//! ```rust
//! use hashbucket::ChainedMap;
//!
//! // Any `Fn(&str) -> usize` is a hash function
//! let mut map = ChainedMap::new(5, |key: &str| key.len());
//! for word in ["one", "two", "three", "four"] {
//!     map.put(word, word.len());
//! }
//!
//! assert_eq!(map.get_size(), 4);
//! assert_eq!(map.get("three"), Some(&5));
//! // "one" and "two" share a bucket, "three" and "four" take one each
//! assert_eq!(map.empty_buckets(), 2);
//!
//! // Chains absorb any density, so shrinking below the entry count is allowed
//! map.resize_table(1);
//! assert_eq!(map.get_capacity(), 1);
//! assert!((map.table_load() - 4.0).abs() < f64::EPSILON);
//! ```

/// Singly linked list used as a chaining bucket
mod chain;
/// Pluggable string hash functions
mod hashing;
/// Mode finding over a sequence of strings
mod mode;
/// Hash map with quadratic probing and tombstones
mod open_addressing;
/// Hash map with separate chaining
mod separate_chaining;
/// The shared map interface and helpers built on it
mod utils;

pub use chain::Chain;
pub use hashing::{HashFunction, hash_function_1, hash_function_2};
pub use mode::{find_mode, find_mode_with};
pub use open_addressing::{OPEN_ADDRESSING_LOAD_THRESHOLD, OpenAddressingMap};
pub use separate_chaining::{CHAINING_LOAD_THRESHOLD, ChainedMap};
pub use utils::{HashTable, LoadSnapshot, fill_observed, snapshot};
