//! Requests flowing through the admission queue.

use std::cmp::Ordering;

use nexus_pqueue::Compare;

/// A request waiting for service.
///
/// Immutable once created. Serving it produces a separate [`Served`] record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Request {
    id: u64,
    priority: i32,
    step_added: u64,
}

impl Request {
    /// Creates a request that arrived at `step_added`.
    pub fn new(id: u64, priority: i32, step_added: u64) -> Self {
        Self {
            id,
            priority,
            step_added,
        }
    }

    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[inline]
    pub fn priority(&self) -> i32 {
        self.priority
    }

    #[inline]
    pub fn step_added(&self) -> u64 {
        self.step_added
    }

    /// Marks the request as served at `step`.
    pub fn serve(self, step: u64) -> Served {
        Served {
            request: self,
            step_removed: step,
        }
    }
}

/// A request paired with the step it left the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Served {
    pub request: Request,
    pub step_removed: u64,
}

impl Served {
    /// Steps spent in the queue.
    #[inline]
    pub fn wait_time(&self) -> u64 {
        self.step_removed.saturating_sub(self.request.step_added)
    }
}

/// Orders requests so the highest priority value is polled first.
///
/// Requests with equal priority compare equal; their relative order is
/// whatever the heap produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByPriority;

impl Compare<Request> for ByPriority {
    #[inline]
    fn compare(&self, a: &Request, b: &Request) -> Ordering {
        b.priority.cmp(&a.priority)
    }
}
