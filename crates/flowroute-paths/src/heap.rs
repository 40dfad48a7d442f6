//! A binary min-heap ordered by a comparator function.
//!
//! [`std::collections::BinaryHeap`] cannot re-order an element whose key
//! changed while it sits in the queue. The searches in this crate revise the
//! cost of already-queued cells, so they use [`Heap::update_item`] instead of
//! pushing stale duplicates.

use std::cmp::Ordering;
use std::fmt;

/// A binary min-heap: [`peek`](Heap::peek) and [`pop`](Heap::pop) yield the
/// smallest element under the comparator.
#[derive(Clone)]
pub struct Heap<T, F = fn(&T, &T) -> Ordering> {
    nodes: Vec<T>,
    cmp: F,
}

impl<T: Ord> Heap<T> {
    /// An empty heap ordered by `T`'s natural order.
    pub fn new() -> Self {
        Self::with_comparator(T::cmp)
    }
}

impl<T: Ord> Default for Heap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, F> Heap<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    /// An empty heap ordered by `cmp`.
    pub fn with_comparator(cmp: F) -> Self {
        Self {
            nodes: Vec::new(),
            cmp,
        }
    }

    /// Build a heap from arbitrary items in O(n).
    pub fn from_vec(nodes: Vec<T>, cmp: F) -> Self {
        let mut heap = Self { nodes, cmp };
        heap.heapify();
        heap
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// The smallest element, if any.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.nodes.first()
    }

    pub fn push(&mut self, item: T) {
        self.nodes.push(item);
        let last = self.nodes.len() - 1;
        self.sift_toward_root(0, last);
    }

    /// Remove and return the smallest element.
    pub fn pop(&mut self) -> Option<T> {
        let last = self.nodes.pop()?;
        if self.nodes.is_empty() {
            return Some(last);
        }
        let top = std::mem::replace(&mut self.nodes[0], last);
        self.sift_toward_leaves(0);
        Some(top)
    }

    /// Pop the smallest element and push `item` in a single sift.
    ///
    /// The returned element may be larger than `item`. On an empty heap
    /// `item` is pushed and `None` returned.
    pub fn replace(&mut self, item: T) -> Option<T> {
        if self.nodes.is_empty() {
            self.nodes.push(item);
            return None;
        }
        let top = std::mem::replace(&mut self.nodes[0], item);
        self.sift_toward_leaves(0);
        Some(top)
    }

    /// Push `item` then pop the smallest element, faster than the two calls.
    ///
    /// Returns `item` itself when it is not larger than the current minimum.
    pub fn pushpop(&mut self, mut item: T) -> T {
        let smaller_top = self
            .nodes
            .first()
            .is_some_and(|top| (self.cmp)(top, &item) == Ordering::Less);
        if smaller_top {
            std::mem::swap(&mut self.nodes[0], &mut item);
            self.sift_toward_leaves(0);
        }
        item
    }

    /// Restore heap order over the whole backing array in O(n).
    pub fn heapify(&mut self) {
        for i in (0..self.nodes.len() / 2).rev() {
            self.sift_toward_leaves(i);
        }
    }

    /// Whether an element equal to `item` is queued.
    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.nodes.contains(item)
    }

    /// Find the first element matching `pred`, apply `update` to it in place
    /// and re-sift it. Returns `false` if nothing matched.
    ///
    /// The key may move in either direction.
    pub fn update_item(&mut self, pred: impl Fn(&T) -> bool, update: impl FnOnce(&mut T)) -> bool {
        let Some(pos) = self.nodes.iter().position(pred) else {
            return false;
        };
        update(&mut self.nodes[pos]);
        self.sift_toward_root(0, pos);
        self.sift_toward_leaves(pos);
        true
    }

    /// Elements in heap-array order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.nodes.iter()
    }

    /// Copy of the backing array (heap order, not sorted).
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.nodes.clone()
    }

    /// Consume the heap, returning its elements smallest first.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.nodes.len());
        while let Some(item) = self.pop() {
            out.push(item);
        }
        out
    }

    /// Move the element at `pos` up while it is smaller than its parent,
    /// never past `start`.
    fn sift_toward_root(&mut self, start: usize, mut pos: usize) {
        while pos > start {
            let parent = (pos - 1) >> 1;
            if (self.cmp)(&self.nodes[pos], &self.nodes[parent]) != Ordering::Less {
                break;
            }
            self.nodes.swap(pos, parent);
            pos = parent;
        }
    }

    /// Walk the element at `pos` down to a leaf along the smaller children,
    /// then bubble it back up to its place.
    fn sift_toward_leaves(&mut self, mut pos: usize) {
        let end = self.nodes.len();
        let start = pos;
        let mut child = 2 * pos + 1;
        while child < end {
            let right = child + 1;
            if right < end && (self.cmp)(&self.nodes[child], &self.nodes[right]) != Ordering::Less
            {
                child = right;
            }
            self.nodes.swap(pos, child);
            pos = child;
            child = 2 * pos + 1;
        }
        self.sift_toward_root(start, pos);
    }
}

impl<T: fmt::Debug, F> fmt::Debug for Heap<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Heap").field("nodes", &self.nodes).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};

    fn is_heap<T, F: Fn(&T, &T) -> Ordering>(h: &Heap<T, F>) -> bool {
        (1..h.nodes.len()).all(|i| (h.cmp)(&h.nodes[i], &h.nodes[(i - 1) / 2]) != Ordering::Less)
    }

    #[test]
    fn pops_in_ascending_order() {
        let mut h = Heap::new();
        for v in [5, 3, 8, 1, 9, 2, 7] {
            h.push(v);
        }
        assert_eq!(h.len(), 7);
        assert_eq!(h.peek(), Some(&1));
        let mut out = Vec::new();
        while let Some(v) = h.pop() {
            out.push(v);
        }
        assert_eq!(out, vec![1, 2, 3, 5, 7, 8, 9]);
        assert!(h.is_empty());
        assert_eq!(h.pop(), None);
    }

    #[test]
    fn custom_comparator_makes_max_heap() {
        let mut h = Heap::with_comparator(|a: &i32, b: &i32| b.cmp(a));
        for v in [4, 10, 1] {
            h.push(v);
        }
        assert_eq!(h.pop(), Some(10));
        assert_eq!(h.pop(), Some(4));
    }

    #[test]
    fn replace_pops_before_pushing() {
        let mut h = Heap::from_vec(vec![3, 1, 2], i32::cmp);
        assert_eq!(h.replace(0), Some(1));
        assert_eq!(h.peek(), Some(&0));
        let mut empty: Heap<i32> = Heap::new();
        assert_eq!(empty.replace(4), None);
        assert_eq!(empty.peek(), Some(&4));
    }

    #[test]
    fn pushpop_returns_smaller_of_item_and_min() {
        let mut h = Heap::from_vec(vec![3, 5], i32::cmp);
        assert_eq!(h.pushpop(1), 1);
        assert_eq!(h.len(), 2);
        assert_eq!(h.pushpop(4), 3);
        assert_eq!(h.into_sorted_vec(), vec![4, 5]);
    }

    #[test]
    fn heapify_builds_valid_heap() {
        let h = Heap::from_vec(vec![9, 8, 7, 6, 5, 4, 3, 2, 1], i32::cmp);
        assert!(is_heap(&h));
        assert_eq!(h.peek(), Some(&1));
        assert!(h.contains(&6));
        assert!(!h.contains(&10));
    }

    #[test]
    fn update_item_moves_both_ways() {
        #[derive(Debug, Clone, Copy, PartialEq)]
        struct Entry {
            id: u32,
            key: i32,
        }
        let cmp = |a: &Entry, b: &Entry| a.key.cmp(&b.key);
        let mut h = Heap::with_comparator(cmp);
        for (id, key) in [(0, 10), (1, 20), (2, 30), (3, 40)] {
            h.push(Entry { id, key });
        }

        // Decrease a deep key to the front.
        assert!(h.update_item(|e| e.id == 3, |e| e.key = 5));
        assert!(is_heap(&h));
        assert_eq!(h.peek().map(|e| e.id), Some(3));

        // Increase the front key past everything.
        assert!(h.update_item(|e| e.id == 3, |e| e.key = 50));
        assert!(is_heap(&h));
        assert_eq!(h.peek().map(|e| e.id), Some(0));

        assert!(!h.update_item(|e| e.id == 9, |e| e.key = 0));
        let ids: Vec<u32> = h.into_sorted_vec().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }

    #[test]
    fn clear_and_clone() {
        let mut h = Heap::from_vec(vec![2, 1], i32::cmp);
        let c = h.clone();
        h.clear();
        assert!(h.is_empty());
        assert_eq!(c.to_vec().len(), 2);
        assert_eq!(c.iter().count(), 2);
    }

    #[test]
    fn random_operations_keep_min_on_top() {
        let mut rng = StdRng::seed_from_u64(7);
        let cmp = |a: &(u32, i32), b: &(u32, i32)| a.1.cmp(&b.1);
        let mut h = Heap::with_comparator(cmp);
        let mut next_id = 0u32;
        for _ in 0..2000 {
            match rng.random_range(0..5u32) {
                0 | 1 => {
                    h.push((next_id, rng.random_range(-100..100)));
                    next_id += 1;
                }
                2 => {
                    h.pop();
                }
                3 => {
                    h.replace((next_id, rng.random_range(-100..100)));
                    next_id += 1;
                }
                _ => {
                    if next_id > 0 {
                        let id = rng.random_range(0..next_id);
                        let key = rng.random_range(-100..100);
                        h.update_item(|e| e.0 == id, |e| e.1 = key);
                    }
                }
            }
            assert!(is_heap(&h));
            let min = h.iter().map(|e| e.1).min();
            assert_eq!(h.peek().map(|e| e.1), min);
        }
    }
}
