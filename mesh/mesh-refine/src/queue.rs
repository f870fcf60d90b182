//! Triangle work queue ordered by longest recorded edge.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A triangle waiting to be examined.
#[derive(Debug, Clone, Copy)]
pub struct TriangleWork {
    /// Offset of the triangle's first index in the index array.
    pub offset: usize,

    /// Squared edge lengths `(1,2)`, `(2,3)`, `(3,1)` when enqueued.
    pub edges: [f64; 3],
}

impl TriangleWork {
    /// A triangle that has never been measured.
    #[must_use]
    pub const fn unmeasured(offset: usize) -> Self {
        Self {
            offset,
            edges: [f64::INFINITY; 3],
        }
    }

    /// Longest recorded squared edge.
    #[must_use]
    pub fn priority(&self) -> f64 {
        self.edges[0].max(self.edges[1]).max(self.edges[2])
    }
}

impl PartialEq for TriangleWork {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TriangleWork {}

impl PartialOrd for TriangleWork {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TriangleWork {
    // Longer edge first; on ties the lower offset wins.
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority()
            .total_cmp(&other.priority())
            .then_with(|| other.offset.cmp(&self.offset))
    }
}

/// Max-priority queue of [`TriangleWork`].
#[derive(Debug, Default)]
pub struct RefineQueue {
    heap: BinaryHeap<TriangleWork>,
}

impl RefineQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty queue with room for `capacity` items.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
        }
    }

    /// Add a work item.
    pub fn push(&mut self, work: TriangleWork) {
        self.heap.push(work);
    }

    /// Remove the item with the longest recorded edge.
    pub fn pop(&mut self) -> Option<TriangleWork> {
        self.heap.pop()
    }

    /// Number of queued items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the queue is drained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
