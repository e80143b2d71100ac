//! Singly linked list used as a bucket by `ChainedMap`.

use std::{fmt, iter::FusedIterator, mem};

/// A key-value node owned by its chain
#[derive(Debug, Clone)]
struct Node<V> {
    /// The key stored in the node
    key: String,
    /// The value associated with the key
    value: V,
    /// The rest of the chain
    next: Option<Box<Node<V>>>,
}

/// A singly linked list of key-value pairs.
///
/// New nodes go to the front. Keys are not checked for uniqueness on `insert`;
/// the owning map searches the chain first.
#[derive(Clone)]
pub struct Chain<V> {
    /// First node of the list
    head: Option<Box<Node<V>>>,
    /// Number of nodes in the list
    len: usize,
}

impl<V> Default for Chain<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Chain<V> {
    /// Creates an empty chain
    #[must_use]
    pub const fn new() -> Self {
        Self { head: None, len: 0 }
    }

    /// Returns the number of nodes in the chain
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the chain has no nodes
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Pushes a new node to the front of the chain
    pub fn insert(&mut self, key: String, value: V) {
        let next = self.head.take();
        self.head = Some(Box::new(Node { key, value, next }));
        self.len = self.len.saturating_add(1);
    }

    /// Returns the value stored under `key`, if any
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&V> {
        self.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Returns a mutable reference to the value stored under `key`, if any
    pub fn find_mut(&mut self, key: &str) -> Option<&mut V> {
        self.iter_mut().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Unlinks the first node holding `key` and returns its value
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let mut cursor = &mut self.head;
        while cursor.as_ref().is_some_and(|node| node.key != key) {
            cursor = &mut cursor.as_mut()?.next;
        }

        let node = cursor.take()?;
        let Node { value, next, .. } = *node;
        *cursor = next;
        self.len = self.len.saturating_sub(1);
        Some(value)
    }

    /// Detaches the front node and returns its pair
    pub fn pop_front(&mut self) -> Option<(String, V)> {
        let node = self.head.take()?;
        let Node { key, value, next } = *node;
        self.head = next;
        self.len = self.len.saturating_sub(1);
        Some((key, value))
    }

    /// Iterates over the chain front to back
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { next: self.head.as_deref() }
    }

    /// Iterates mutably over the chain front to back
    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        IterMut { next: self.head.as_deref_mut() }
    }
}

impl<V> Drop for Chain<V> {
    fn drop(&mut self) {
        // Unlink iteratively so long chains don't overflow the stack.
        let mut link = self.head.take();
        while let Some(mut node) = link {
            link = mem::take(&mut node.next);
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for Chain<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V: fmt::Display> fmt::Display for Chain<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (key, value) in self {
            if !first {
                write!(f, " -> ")?;
            }
            write!(f, "({key}: {value})")?;
            first = false;
        }
        Ok(())
    }
}

impl<'a, V> IntoIterator for &'a Chain<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the pairs of a chain
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// Next node to yield
    next: Option<&'a Node<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            (node.key.as_str(), &node.value)
        })
    }
}

impl<V> FusedIterator for Iter<'_, V> {}

/// Mutable iterator over the pairs of a chain
#[derive(Debug)]
pub struct IterMut<'a, V> {
    /// Next node to yield
    next: Option<&'a mut Node<V>>,
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = (&'a str, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.next.take().map(|node| {
            self.next = node.next.as_deref_mut();
            (node.key.as_str(), &mut node.value)
        })
    }
}

impl<V> FusedIterator for IterMut<'_, V> {}
