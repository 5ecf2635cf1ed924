//! Growable binary min-heap with a pluggable comparator.
//!
//! [`PriorityQueue`] keeps its elements in one contiguous buffer laid out as
//! an implicit binary tree. The element at the root compares least under the
//! queue's comparator, so [`poll`](PriorityQueue::poll) always extracts the
//! minimum.
//!
//! # Quick Start
//!
//! ```
//! use nexus_pqueue::PriorityQueue;
//!
//! let mut q: PriorityQueue<u64> = PriorityQueue::new();
//! q.add(42);
//! q.add(7);
//!
//! assert_eq!(q.peek(), Some(&7));
//! assert_eq!(q.poll(), Some(7));
//! assert_eq!(q.poll(), Some(42));
//! assert_eq!(q.poll(), None); // empty is not an error
//! ```
//!
//! # Ordering
//!
//! The heap is always a min-heap. The comparator decides what "min" means:
//!
//! | Comparator | Extracts first |
//! |------------|----------------|
//! | [`Natural`] (default, `T: Ord`) | smallest |
//! | [`Reverse`] (`T: Ord`) | largest |
//! | `Fn(&T, &T) -> Ordering` | whatever the closure ranks least |
//!
//! A queue over a type without [`Ord`] must be given a comparator; the
//! constructors that default to [`Natural`] are not available for it.
//!
//! ```
//! use nexus_pqueue::PriorityQueue;
//!
//! #[derive(Debug, PartialEq)]
//! struct Job { priority: u8, name: &'static str }
//!
//! // Highest priority first.
//! let mut q = PriorityQueue::with_comparer(|a: &Job, b: &Job| b.priority.cmp(&a.priority));
//! q.add(Job { priority: 1, name: "log rotate" });
//! q.add(Job { priority: 9, name: "page oncall" });
//! assert_eq!(q.poll().unwrap().name, "page oncall");
//! ```
//!
//! # Complexity
//!
//! | Operation | Cost |
//! |-----------|------|
//! | `add` / `offer` | O(log n) amortized |
//! | `poll` | O(log n) |
//! | `peek` / `element` / `len` | O(1) |
//! | `remove` / `contains` | O(n) scan + O(log n) repair |
//! | `from_vec` / `retain_all` | O(n) heapify |
//!
//! # Capacity
//!
//! The buffer doubles while capacity is below 64 and grows by half after
//! that. Growth never reorders existing elements.
//!
//! # Threading
//!
//! The queue does no synchronization. Share it across threads only behind
//! an external lock.

#![warn(missing_docs)]

pub mod compare;
pub mod error;
pub mod queue;

pub use compare::{Compare, Natural, Reverse};
pub use error::{EmptyQueue, InvalidCapacity};
pub use queue::{DrainWhile, PriorityQueue, DEFAULT_CAPACITY};
