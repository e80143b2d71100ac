//! Pluggable string hash functions.

/// A deterministic mapping from a string key to a non-negative integer.
///
/// Both map variants take their hash function at construction time and only ever
/// reduce its output modulo the current capacity, so no distribution guarantee is
/// assumed beyond determinism. Any `Fn(&str) -> usize` is a `HashFunction`.
pub trait HashFunction {
    /// Hashes `key`.
    fn hash(&self, key: &str) -> usize;
}

impl<F> HashFunction for F
where
    F: Fn(&str) -> usize,
{
    fn hash(&self, key: &str) -> usize {
        self(key)
    }
}

/// Sums the code points of the key.
///
/// Anagrams collide, which makes this handy for exercising collision paths.
#[must_use]
pub fn hash_function_1(key: &str) -> usize {
    key.chars().fold(0_usize, |hash, c| hash.wrapping_add(code_point(c)))
}

/// Sums the code points of the key, each weighted by its 1-based position.
#[must_use]
pub fn hash_function_2(key: &str) -> usize {
    key.chars()
        .zip(1_usize..)
        .fold(0_usize, |hash, (c, position)| {
            hash.wrapping_add(position.wrapping_mul(code_point(c)))
        })
}

/// Reduces a hash to a bucket index for a table of `capacity` buckets.
///
/// A zero capacity maps everything to index 0.
pub(crate) fn bucket_index<H: HashFunction + ?Sized>(
    hash_fn: &H,
    key: &str,
    capacity: usize,
) -> usize {
    hash_fn.hash(key).checked_rem(capacity).unwrap_or(0)
}

/// Widens a char to `usize` without a numeric cast.
fn code_point(c: char) -> usize {
    usize::try_from(u32::from(c)).unwrap_or(usize::MAX)
}
