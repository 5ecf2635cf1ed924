//! Comparator trait used to order heap elements.
//!
//! The queue is always a min-heap: [`poll`](crate::PriorityQueue::poll)
//! returns the element that compares least. Anything else (max-first,
//! ordering by a field, inverted priorities) is expressed by the comparator.

use core::cmp::Ordering;

/// A total preorder over `T`.
///
/// Implementations must be consistent: if `compare(a, b)` is `Less` then
/// `compare(b, a)` is `Greater`, and the relation must be transitive. An
/// inconsistent comparator will not cause undefined behavior, but extraction
/// order is then unspecified.
///
/// Closures implement this trait directly:
///
/// ```
/// use nexus_pqueue::PriorityQueue;
///
/// // Order strings by length, shortest first.
/// let mut q = PriorityQueue::with_comparer(|a: &&str, b: &&str| a.len().cmp(&b.len()));
/// q.add("three");
/// q.add("a");
/// q.add("to");
/// assert_eq!(q.poll(), Some("a"));
/// ```
pub trait Compare<T: ?Sized> {
    /// Compares `a` with `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;

    /// Returns `true` if `a` sorts strictly before `b`.
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        self.compare(a, b).is_lt()
    }
}

/// The natural ordering of `T` via [`Ord`]. Smallest element first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Natural;

impl<T: Ord + ?Sized> Compare<T> for Natural {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// The reverse of the natural ordering. Largest element first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reverse;

impl<T: Ord + ?Sized> Compare<T> for Reverse {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        b.cmp(a)
    }
}

impl<T: ?Sized, F> Compare<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}
