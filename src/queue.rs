// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug, Clone)]
struct QueueItem<T> {
    element: T,
    priority: f64,
    seq: u64,
}

impl<T> PartialEq for QueueItem<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for QueueItem<T> {}

impl<T> PartialOrd for QueueItem<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for QueueItem<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // NOTE: We revert the order of comparison,
        // as lower priorities (and earlier insertions) are considered better ("higher"),
        // and Rust's BinaryHeap is a max-heap.
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-priority queue of elements.
///
/// Among elements with equal priorities, the one which was
/// [enqueued](PriorityQueue::enqueue) earlier is [dequeued](PriorityQueue::dequeue) first.
/// This makes route searches deterministic, regardless of the heap layout.
///
/// The queue never deduplicates elements - an element enqueued twice
/// will be dequeued twice. Consumers must discard stale entries themselves.
#[derive(Debug, Clone)]
pub struct PriorityQueue<T> {
    heap: BinaryHeap<QueueItem<T>>,
    counter: u64,
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::default(),
            counter: 0,
        }
    }
}

impl<T> PriorityQueue<T> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an element with the given priority. Lower numbers are dequeued first.
    pub fn enqueue(&mut self, element: T, priority: f64) {
        let seq = self.counter;
        self.counter += 1;
        self.heap.push(QueueItem {
            element,
            priority,
            seq,
        });
    }

    /// Removes and returns the element with the lowest priority,
    /// or [None] if the queue is empty.
    pub fn dequeue(&mut self) -> Option<T> {
        self.heap.pop().map(|item| item.element)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty() {
        let mut q: PriorityQueue<&str> = PriorityQueue::new();
        assert!(q.is_empty());
        assert_eq!(q.dequeue(), None);
    }

    #[test]
    fn ascending_priority() {
        let mut q = PriorityQueue::new();
        q.enqueue("c", 3.0);
        q.enqueue("a", 1.0);
        q.enqueue("b", 2.0);
        q.enqueue("z", -0.5);

        assert_eq!(q.len(), 4);
        assert_eq!(q.dequeue(), Some("z"));
        assert_eq!(q.dequeue(), Some("a"));
        assert_eq!(q.dequeue(), Some("b"));
        assert_eq!(q.dequeue(), Some("c"));
        assert!(q.is_empty());
    }

    #[test]
    fn ties_in_insertion_order() {
        let mut q = PriorityQueue::new();
        q.enqueue("x", 5.0);
        q.enqueue("y", 5.0);
        assert_eq!(q.dequeue(), Some("x"));
        assert_eq!(q.dequeue(), Some("y"));
    }

    #[test]
    fn ties_after_interleaved_dequeues() {
        let mut q = PriorityQueue::new();
        q.enqueue(1, 1.0);
        q.enqueue(2, 0.0);
        assert_eq!(q.dequeue(), Some(2));
        q.enqueue(3, 1.0);
        q.enqueue(4, 1.0);
        assert_eq!(q.dequeue(), Some(1));
        assert_eq!(q.dequeue(), Some(3));
        assert_eq!(q.dequeue(), Some(4));
        assert_eq!(q.dequeue(), None);
    }

    proptest! {
        #[test]
        fn dequeues_in_stable_priority_order(priorities in prop::collection::vec(0u8..8, 0..64)) {
            let mut q = PriorityQueue::new();
            for (idx, &p) in priorities.iter().enumerate() {
                q.enqueue(idx, p as f64);
            }

            let mut expected: Vec<usize> = (0..priorities.len()).collect();
            expected.sort_by_key(|&idx| priorities[idx]); // stable sort

            let mut got = Vec::with_capacity(priorities.len());
            while let Some(idx) = q.dequeue() {
                got.push(idx);
            }
            prop_assert_eq!(got, expected);
        }
    }
}
