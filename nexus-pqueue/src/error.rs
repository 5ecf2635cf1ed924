// nexus-pqueue/src/error.rs

//! Error types for queue construction and strict access.

use core::fmt;

/// Requested initial capacity was zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidCapacity {
    /// The capacity that was rejected.
    pub requested: usize,
}

impl fmt::Display for InvalidCapacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "initial capacity must be at least 1, got {}",
            self.requested
        )
    }
}

impl std::error::Error for InvalidCapacity {}

/// The queue held no element when one was required.
///
/// Returned by [`PriorityQueue::element`](crate::PriorityQueue::element).
/// The non-failing accessors (`peek`, `poll`) return `None` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyQueue;

impl fmt::Display for EmptyQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "queue is empty")
    }
}

impl std::error::Error for EmptyQueue {}
