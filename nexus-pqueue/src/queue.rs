//! PriorityQueue - a growable binary min-heap with a pluggable comparator.

use core::fmt;
use core::hash::Hash;
use std::collections::HashSet;

use crate::{Compare, EmptyQueue, InvalidCapacity, Natural};

/// Capacity used by constructors that don't take one.
pub const DEFAULT_CAPACITY: usize = 11;

/// Below this capacity the buffer doubles on overflow; at or above it,
/// it grows by half.
const DOUBLING_LIMIT: usize = 64;

/// A growable binary min-heap ordered by a comparator.
///
/// Elements live in a contiguous buffer in heap order: the children of slot
/// `i` are `2i + 1` and `2i + 2`. The slot at index 0 always holds an
/// element that compares least under `C`.
///
/// # Example
///
/// ```
/// use nexus_pqueue::PriorityQueue;
///
/// let mut q: PriorityQueue<u64> = PriorityQueue::with_capacity(16).unwrap();
///
/// q.add(5);
/// q.add(1);
/// q.add(3);
///
/// assert_eq!(q.len(), 3);
/// assert_eq!(q.peek(), Some(&1));
///
/// assert_eq!(q.poll(), Some(1));
/// assert_eq!(q.poll(), Some(3));
/// assert_eq!(q.poll(), Some(5));
/// assert_eq!(q.poll(), None);
/// ```
///
/// # Custom ordering
///
/// ```
/// use nexus_pqueue::{PriorityQueue, Reverse};
///
/// let mut q = PriorityQueue::with_comparer(Reverse);
/// q.add_all([3, 9, 1]);
/// assert_eq!(q.poll(), Some(9)); // max first
/// ```
pub struct PriorityQueue<T, C = Natural> {
    buf: Vec<T>,
    capacity: usize,
    cmp: C,
}

impl<T: Ord> PriorityQueue<T, Natural> {
    /// Creates an empty queue ordered by `T`'s natural ordering, with
    /// [`DEFAULT_CAPACITY`].
    pub fn new() -> Self {
        Self::with_comparer(Natural)
    }

    /// Creates an empty queue ordered by `T`'s natural ordering.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCapacity`] if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self, InvalidCapacity> {
        Self::with_capacity_and_comparer(capacity, Natural)
    }

    /// Builds a queue from `items` in O(n), using the natural ordering.
    pub fn from_vec(items: Vec<T>) -> Self {
        Self::from_vec_with_comparer(items, Natural)
    }
}

impl<T, C: Compare<T>> PriorityQueue<T, C> {
    /// Creates an empty queue with [`DEFAULT_CAPACITY`] and the given comparator.
    pub fn with_comparer(cmp: C) -> Self {
        Self {
            buf: Vec::with_capacity(DEFAULT_CAPACITY),
            capacity: DEFAULT_CAPACITY,
            cmp,
        }
    }

    /// Creates an empty queue with the given initial capacity and comparator.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCapacity`] if `capacity` is zero.
    pub fn with_capacity_and_comparer(capacity: usize, cmp: C) -> Result<Self, InvalidCapacity> {
        if capacity < 1 {
            return Err(InvalidCapacity {
                requested: capacity,
            });
        }
        Ok(Self {
            buf: Vec::with_capacity(capacity),
            capacity,
            cmp,
        })
    }

    /// Builds a queue from `items` in O(n) using a bottom-up heapify pass.
    ///
    /// Capacity is `items.len()`, or 1 if `items` is empty.
    pub fn from_vec_with_comparer(items: Vec<T>, cmp: C) -> Self {
        let capacity = items.len().max(1);
        let mut buf = items;
        buf.reserve_exact(capacity - buf.len());
        let mut q = Self { buf, capacity, cmp };
        q.heapify();
        q
    }

    /// Returns the number of elements in the queue.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if the queue is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns the current capacity, as tracked by the growth policy.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the comparator.
    #[inline]
    pub fn comparer(&self) -> &C {
        &self.cmp
    }

    // ========================================================================
    // Insert operations
    // ========================================================================

    /// Inserts an element. Amortized O(log n).
    ///
    /// Grows the buffer first if it is full.
    pub fn add(&mut self, value: T) {
        if self.buf.len() == self.capacity {
            self.grow();
        }
        let pos = self.buf.len();
        self.buf.push(value);
        self.sift_up(pos);
    }

    /// Inserts an element. Always returns `true`; the queue is unbounded.
    #[inline]
    pub fn offer(&mut self, value: T) -> bool {
        self.add(value);
        true
    }

    /// Inserts every element of `items`, in iteration order.
    pub fn add_all<I: IntoIterator<Item = T>>(&mut self, items: I) {
        for item in items {
            self.add(item);
        }
    }

    // ========================================================================
    // Remove operations
    // ========================================================================

    /// Removes and returns the minimum element.
    ///
    /// Returns `None` if the queue is empty.
    pub fn poll(&mut self) -> Option<T> {
        if self.buf.is_empty() {
            return None;
        }
        let min = self.buf.swap_remove(0);
        self.sift_down(0);
        Some(min)
    }

    /// Removes the first element equal to `value`, found by linear scan.
    ///
    /// Equality is `PartialEq`, independent of the comparator. Returns
    /// `true` if an element was removed.
    pub fn remove(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        let Some(pos) = self.buf.iter().position(|x| x == value) else {
            return false;
        };
        self.remove_at(pos);
        true
    }

    /// Removes one matching element per item in `items`, in order.
    ///
    /// A value that appears twice in `items` removes up to two elements.
    pub fn remove_all<'a, I>(&mut self, items: I)
    where
        T: PartialEq + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        for item in items {
            self.remove(item);
        }
    }

    /// Keeps only the elements equal to some value in `items`.
    ///
    /// Survivors keep their relative storage order, then heap order is
    /// rebuilt in O(n).
    pub fn retain_all<'a, I>(&mut self, items: I)
    where
        T: Eq + Hash + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let keep: HashSet<&T> = items.into_iter().collect();
        let mut kept = Vec::with_capacity(self.capacity);
        for item in self.buf.drain(..) {
            if keep.contains(&item) {
                kept.push(item);
            }
        }
        self.buf = kept;
        self.heapify();
    }

    /// Removes all elements. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Removes elements while the predicate returns `true`.
    ///
    /// The predicate receives a reference to the current minimum, so
    /// elements come out in comparator order.
    ///
    /// ```
    /// use nexus_pqueue::PriorityQueue;
    ///
    /// let mut q = PriorityQueue::from_vec(vec![1u64, 5, 3, 7]);
    /// let due: Vec<_> = q.drain_while(|&x| x < 4).collect();
    /// assert_eq!(due, vec![1, 3]);
    /// assert_eq!(q.peek(), Some(&5));
    /// ```
    #[inline]
    pub fn drain_while<F>(&mut self, pred: F) -> DrainWhile<'_, T, C, F>
    where
        F: FnMut(&T) -> bool,
    {
        DrainWhile { queue: self, pred }
    }

    /// Consumes the queue, returning its elements in extraction order.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.len());
        while let Some(x) = self.poll() {
            out.push(x);
        }
        out
    }

    // ========================================================================
    // Access
    // ========================================================================

    /// Returns a reference to the minimum element, or `None` if empty.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.buf.first()
    }

    /// Returns a reference to the minimum element.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyQueue`] if the queue is empty.
    #[inline]
    pub fn element(&self) -> Result<&T, EmptyQueue> {
        self.buf.first().ok_or(EmptyQueue)
    }

    /// Returns `true` if some element equals `value`. O(n).
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.buf.iter().any(|x| x == value)
    }

    /// Returns `true` if every item in `items` is contained in the queue.
    pub fn contains_all<'a, I>(&self, items: I) -> bool
    where
        T: PartialEq + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        items.into_iter().all(|item| self.contains(item))
    }

    /// Copies the elements out in storage (heap) order, not sorted order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.buf.clone()
    }

    /// Copies the elements into `dest` in storage order.
    ///
    /// `dest` is cleared and reused if its capacity holds `len()` elements;
    /// otherwise a fresh buffer is returned and `dest` is dropped.
    pub fn to_vec_in(&self, mut dest: Vec<T>) -> Vec<T>
    where
        T: Clone,
    {
        if dest.capacity() < self.buf.len() {
            return self.to_vec();
        }
        dest.clear();
        dest.extend_from_slice(&self.buf);
        dest
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Grows the buffer: 2x while small, 1.5x after.
    fn grow(&mut self) {
        let new_capacity = if self.capacity < DOUBLING_LIMIT {
            self.capacity * 2
        } else {
            self.capacity + self.capacity / 2
        };
        self.buf.reserve_exact(new_capacity - self.buf.len());
        self.capacity = new_capacity;
    }

    /// Removes the element at `pos` and restores heap order around the slot.
    fn remove_at(&mut self, pos: usize) -> T {
        let removed = self.buf.swap_remove(pos);
        if pos < self.buf.len() {
            // The filler came from the last leaf and may belong above or below.
            if self.sift_down(pos) == pos {
                self.sift_up(pos);
            }
        }
        removed
    }

    /// Restores heap order over the whole buffer.
    fn heapify(&mut self) {
        let len = self.buf.len();
        for pos in (0..len / 2).rev() {
            self.sift_down(pos);
        }
    }

    /// Moves the element at `pos` toward the root. Returns its final slot.
    fn sift_up(&mut self, pos: usize) -> usize {
        let mut hole = pos;
        while hole > 0 {
            let parent = (hole - 1) / 2;
            if !self.cmp.less(&self.buf[hole], &self.buf[parent]) {
                break;
            }
            self.buf.swap(hole, parent);
            hole = parent;
        }
        hole
    }

    /// Moves the element at `pos` toward the leaves, following the smaller
    /// child. Returns its final slot.
    fn sift_down(&mut self, pos: usize) -> usize {
        let len = self.buf.len();
        let mut hole = pos;
        loop {
            let left = 2 * hole + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let smaller = if right < len && self.cmp.less(&self.buf[right], &self.buf[left]) {
                right
            } else {
                left
            };
            if !self.cmp.less(&self.buf[smaller], &self.buf[hole]) {
                break;
            }
            self.buf.swap(hole, smaller);
            hole = smaller;
        }
        hole
    }

    #[cfg(test)]
    pub(crate) fn is_heap(&self) -> bool {
        (1..self.buf.len()).all(|i| !self.cmp.less(&self.buf[i], &self.buf[(i - 1) / 2]))
    }
}

impl<T: Ord> Default for PriorityQueue<T, Natural> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, C: Clone> Clone for PriorityQueue<T, C> {
    fn clone(&self) -> Self {
        let mut buf = Vec::with_capacity(self.capacity);
        buf.extend_from_slice(&self.buf);
        Self {
            buf,
            capacity: self.capacity,
            cmp: self.cmp.clone(),
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for PriorityQueue<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("len", &self.buf.len())
            .field("capacity", &self.capacity)
            .field("storage", &self.buf)
            .finish()
    }
}

impl<T: Ord> From<Vec<T>> for PriorityQueue<T, Natural> {
    fn from(items: Vec<T>) -> Self {
        Self::from_vec(items)
    }
}

impl<T: Ord> FromIterator<T> for PriorityQueue<T, Natural> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T, C: Compare<T>> Extend<T> for PriorityQueue<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

/// An iterator that polls elements while a predicate holds.
///
/// Created by [`PriorityQueue::drain_while`].
pub struct DrainWhile<'a, T, C, F>
where
    F: FnMut(&T) -> bool,
{
    queue: &'a mut PriorityQueue<T, C>,
    pred: F,
}

impl<'a, T, C, F> Iterator for DrainWhile<'a, T, C, F>
where
    C: Compare<T>,
    F: FnMut(&T) -> bool,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let min = self.queue.peek()?;
        if (self.pred)(min) {
            self.queue.poll()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Reverse;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn new_is_empty() {
        let q: PriorityQueue<u64> = PriorityQueue::new();
        assert!(q.is_empty());
        assert_eq!(q.len(), 0);
        assert_eq!(q.capacity(), DEFAULT_CAPACITY);
        assert!(q.peek().is_none());
    }

    #[test]
    fn zero_capacity_rejected() {
        let err = PriorityQueue::<u64>::with_capacity(0).unwrap_err();
        assert_eq!(err, InvalidCapacity { requested: 0 });

        let err = PriorityQueue::with_capacity_and_comparer(0, Reverse)
            .map(|q: PriorityQueue<u64, Reverse>| q.len())
            .unwrap_err();
        assert_eq!(err.requested, 0);
    }

    #[test]
    fn add_poll_order() {
        let mut q: PriorityQueue<u64> = PriorityQueue::with_capacity(16).unwrap();

        q.add(5);
        q.add(1);
        q.add(3);
        q.add(2);
        q.add(4);

        assert_eq!(q.len(), 5);

        assert_eq!(q.poll(), Some(1));
        assert_eq!(q.poll(), Some(2));
        assert_eq!(q.poll(), Some(3));
        assert_eq!(q.poll(), Some(4));
        assert_eq!(q.poll(), Some(5));
        assert_eq!(q.poll(), None);
    }

    #[test]
    fn offer_always_accepts() {
        let mut q: PriorityQueue<u64> = PriorityQueue::with_capacity(1).unwrap();
        for i in 0..100 {
            assert!(q.offer(i));
        }
        assert_eq!(q.len(), 100);
    }

    #[test]
    fn empty_poll_and_peek_do_not_mutate() {
        let mut q: PriorityQueue<u64> = PriorityQueue::new();
        assert_eq!(q.poll(), None);
        assert_eq!(q.peek(), None);
        assert_eq!(q.poll(), None);
        assert_eq!(q.len(), 0);
        assert_eq!(q.element(), Err(EmptyQueue));
    }

    #[test]
    fn element_returns_min() {
        let mut q: PriorityQueue<i32> = PriorityQueue::new();
        q.add(7);
        q.add(-2);
        assert_eq!(q.element(), Ok(&-2));
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn growth_doubles_then_grows_by_half() {
        let mut q: PriorityQueue<u32> = PriorityQueue::with_capacity(1).unwrap();
        let mut seen = vec![q.capacity()];
        for i in 0..200 {
            q.add(i);
            if *seen.last().unwrap() != q.capacity() {
                seen.push(q.capacity());
            }
        }
        assert_eq!(seen, vec![1, 2, 4, 8, 16, 32, 64, 96, 144, 216]);
    }

    #[test]
    fn growth_preserves_membership() {
        let mut q: PriorityQueue<u32> = PriorityQueue::with_capacity(4).unwrap();
        for i in [9, 4, 7, 1] {
            q.add(i);
        }
        assert_eq!(q.capacity(), 4);
        q.add(3);
        assert_eq!(q.capacity(), 8);

        let mut all = q.to_vec();
        all.sort_unstable();
        assert_eq!(all, vec![1, 3, 4, 7, 9]);
        assert!(q.is_heap());
    }

    #[test]
    fn remove_by_value() {
        let mut q = PriorityQueue::from_vec(vec![5u64, 1, 3, 8, 2]);

        assert!(q.remove(&3));
        assert_eq!(q.len(), 4);
        assert!(!q.contains(&3));
        assert!(q.is_heap());

        assert!(!q.remove(&42));
        assert_eq!(q.len(), 4);

        assert!(q.remove(&1));
        assert_eq!(q.peek(), Some(&2));
    }

    #[test]
    fn remove_last_slot() {
        let mut q = PriorityQueue::from_vec(vec![1u64, 2, 3]);
        let last = *q.to_vec().last().unwrap();
        assert!(q.remove(&last));
        assert_eq!(q.len(), 2);
        assert!(q.is_heap());
    }

    #[test]
    fn remove_filler_moves_up() {
        // Layout after heapify: [1, 50, 2, 60, 70, 3, 4]. Removing 60 moves
        // the last leaf (4) under 50, where it must rise above its parent.
        let mut q = PriorityQueue::from_vec(vec![1u64, 50, 2, 60, 70, 3, 4]);
        assert_eq!(q.to_vec(), vec![1, 50, 2, 60, 70, 3, 4]);

        assert!(q.remove(&60));
        assert!(q.is_heap());
        assert_eq!(q.into_sorted_vec(), vec![1, 2, 3, 4, 50, 70]);
    }

    #[test]
    fn remove_only_first_duplicate() {
        let mut q = PriorityQueue::from_vec(vec![5u64, 5, 5]);
        assert!(q.remove(&5));
        assert_eq!(q.len(), 2);
        assert!(q.contains(&5));
    }

    #[test]
    fn remove_all_counts_occurrences() {
        let mut q = PriorityQueue::from_vec(vec![2u64, 2, 2, 3]);
        q.remove_all(&[2, 2, 9]);
        assert_eq!(q.len(), 2);
        assert_eq!(q.into_sorted_vec(), vec![2, 3]);
    }

    #[test]
    fn retain_all_keeps_listed_values() {
        let mut q = PriorityQueue::from_vec(vec![1u64, 2, 3, 4, 5]);
        q.retain_all(&[2, 4]);

        assert_eq!(q.len(), 2);
        assert!(q.is_heap());
        assert!(q.contains_all(&[2, 4]));
        assert!(!q.contains(&1));
        assert_eq!(q.capacity(), 5);
    }

    #[test]
    fn retain_all_keeps_duplicates() {
        let mut q = PriorityQueue::from_vec(vec![7u64, 1, 7, 3]);
        q.retain_all(&[7]);
        assert_eq!(q.into_sorted_vec(), vec![7, 7]);
    }

    #[test]
    fn retain_all_with_nothing_empties() {
        let mut q = PriorityQueue::from_vec(vec![1u64, 2]);
        q.retain_all(&[]);
        assert!(q.is_empty());
        q.add(3);
        assert_eq!(q.peek(), Some(&3));
    }

    #[test]
    fn from_vec_heapifies() {
        let q = PriorityQueue::from_vec(vec![9u64, 8, 7, 6, 5, 4, 3, 2, 1]);
        assert!(q.is_heap());
        assert_eq!(q.peek(), Some(&1));
        assert_eq!(q.capacity(), 9);
    }

    #[test]
    fn from_empty_vec_has_unit_capacity() {
        let mut q: PriorityQueue<u64> = PriorityQueue::from_vec(Vec::new());
        assert_eq!(q.capacity(), 1);
        q.add(1);
        q.add(2);
        assert_eq!(q.capacity(), 2);
    }

    #[test]
    fn clear_resets_len() {
        let mut q = PriorityQueue::from_vec(vec![1u64, 2, 3]);
        let cap = q.capacity();
        q.clear();
        assert!(q.is_empty());
        assert!(q.peek().is_none());
        assert_eq!(q.capacity(), cap);
    }

    #[test]
    fn to_vec_in_reuses_large_buffer() {
        let q = PriorityQueue::from_vec(vec![3u64, 1, 2]);

        let big = Vec::with_capacity(8);
        let ptr = big.as_ptr();
        let out = q.to_vec_in(big);
        assert_eq!(out.as_ptr(), ptr);
        assert_eq!(out, q.to_vec());

        let small = Vec::with_capacity(1);
        let out = q.to_vec_in(small);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn drain_while() {
        let mut q = PriorityQueue::from_vec(vec![1u64, 5, 3, 7, 2]);

        let removed: Vec<_> = q.drain_while(|&x| x < 4).collect();
        assert_eq!(removed, vec![1, 2, 3]);

        assert_eq!(q.len(), 2);
        assert_eq!(q.peek(), Some(&5));
    }

    #[test]
    fn clone_is_independent() {
        let mut a = PriorityQueue::from_vec(vec![4u64, 2]);
        let b = a.clone();
        a.poll();
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 2);
        assert_eq!(b.capacity(), a.capacity());
    }

    #[test]
    fn reverse_comparer_is_max_first() {
        let mut q = PriorityQueue::with_comparer(Reverse);
        q.add_all([3u64, 9, 1, 9]);
        assert_eq!(q.into_sorted_vec(), vec![9, 9, 3, 1]);
    }

    #[test]
    fn randomized_ops_keep_heap() {
        let mut rng = SmallRng::seed_from_u64(0x5eed);
        let mut q: PriorityQueue<u32> = PriorityQueue::with_capacity(1).unwrap();
        let mut model: Vec<u32> = Vec::new();

        for _ in 0..5_000 {
            match rng.gen_range(0..10) {
                0..=4 => {
                    let v = rng.gen_range(0..100);
                    q.add(v);
                    model.push(v);
                }
                5..=6 => {
                    let got = q.poll();
                    let want = model.iter().copied().min();
                    assert_eq!(got, want);
                    if let Some(v) = want {
                        let i = model.iter().position(|&x| x == v).unwrap();
                        model.swap_remove(i);
                    }
                }
                7..=8 => {
                    let v = rng.gen_range(0..100);
                    let expected = model.iter().position(|&x| x == v);
                    assert_eq!(q.remove(&v), expected.is_some());
                    if let Some(i) = expected {
                        model.swap_remove(i);
                    }
                }
                _ => {
                    let keep: Vec<u32> = (0..rng.gen_range(20..80)).map(|_| rng.gen_range(0..100)).collect();
                    q.retain_all(&keep);
                    model.retain(|x| keep.contains(x));
                }
            }
            assert!(q.is_heap());
            assert_eq!(q.len(), model.len());
        }

        model.sort_unstable();
        assert_eq!(q.into_sorted_vec(), model);
    }
}
