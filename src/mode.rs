//! Mode finding on top of `ChainedMap`.

use crate::{
    hashing::{HashFunction, hash_function_1},
    separate_chaining::ChainedMap,
};

/// Finds the most frequent elements of `items` and how often they occur.
///
/// Elements are returned in the order in which they reached the final count.
/// An empty input yields `(vec![], 0)`.
///
/// ```rust
/// use hashbucket::find_mode;
///
/// let (modes, count) = find_mode(&["apple", "apple", "grape", "melon", "melon", "peach"]);
/// assert_eq!(modes, vec!["apple", "melon"]);
/// assert_eq!(count, 2);
/// ```
#[must_use]
pub fn find_mode<S: AsRef<str>>(items: &[S]) -> (Vec<String>, usize) {
    find_mode_with(items, hash_function_1)
}

/// Same as [`find_mode`], counting occurrences in a map keyed by `hash_fn`.
///
/// Every time an element's running count beats the best count so far the result
/// restarts with that element; every time it ties, the element is appended. A
/// count only ever grows by one per occurrence, so an element that tied once must
/// beat the best count on its next occurrence and is never appended twice.
#[must_use]
pub fn find_mode_with<S, H>(items: &[S], hash_fn: H) -> (Vec<String>, usize)
where
    S: AsRef<str>,
    H: HashFunction,
{
    let mut counts = ChainedMap::new(items.len() / 3, hash_fn);
    let mut modes = Vec::new();
    let mut mode_count = 0;

    for item in items {
        let item = item.as_ref();
        let count = counts.get(item).copied().unwrap_or(0_usize).saturating_add(1);
        counts.put(item, count);

        if count > mode_count {
            mode_count = count;
            modes.clear();
            modes.push(item.to_owned());
        } else if count == mode_count {
            modes.push(item.to_owned());
        }
    }

    (modes, mode_count)
}
