//! Cost-ordered open set for best-first search.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// A frontier entry. Ordered so that `BinaryHeap` (a max-heap) yields the
/// smallest key first and, among equal keys, the earliest insertion.
#[derive(Debug)]
struct Entry<T, K> {
    key: K,
    seq: u64,
    item: T,
}

impl<T, K: Ord> PartialEq for Entry<T, K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T, K: Ord> Eq for Entry<T, K> {}

impl<T, K: Ord> PartialOrd for Entry<T, K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T, K: Ord> Ord for Entry<T, K> {
    fn cmp(&self, other: &Self) -> Ordering {
        (Reverse(&self.key), Reverse(self.seq)).cmp(&(Reverse(&other.key), Reverse(other.seq)))
    }
}

/// Min-priority queue keyed by a caller-supplied cost.
///
/// Items carry no ordering of their own: the key is given at push time, so the
/// same item type can be ordered by any cost function. Equal keys pop in
/// first-in-first-out order.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::frontier::Frontier;
/// let mut frontier = Frontier::new();
/// frontier.push("b", 3u32);
/// frontier.push("a", 1);
/// frontier.push("c", 3);
/// assert_eq!(frontier.pop(), Some(("a", 1)));
/// assert_eq!(frontier.pop(), Some(("b", 3)));
/// assert_eq!(frontier.pop(), Some(("c", 3)));
/// assert_eq!(frontier.pop(), None);
/// ```
#[derive(Debug)]
pub struct Frontier<T, K = u32> {
    heap: BinaryHeap<Entry<T, K>>,
    next_seq: u64,
}

impl<T, K: Ord> Frontier<T, K> {
    pub fn new() -> Self {
        Frontier {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    /// Inserts `item` with priority `key`. Lower keys pop first.
    pub fn push(&mut self, item: T, key: K) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { key, seq, item });
    }

    /// Removes and returns the item with the lowest key, with that key.
    pub fn pop(&mut self) -> Option<(T, K)> {
        self.heap.pop().map(|entry| (entry.item, entry.key))
    }

    /// Returns the lowest key without removing its item.
    pub fn peek_key(&self) -> Option<&K> {
        self.heap.peek().map(|entry| &entry.key)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<T, K: Ord> Default for Frontier<T, K> {
    fn default() -> Self {
        Self::new()
    }
}
