//! `OrderedPriorityQueue`: append-only queue with a max-priority scan.
//!
//! This is not a heap.  `enqueue` is an O(1) append; `dequeue` and `peek`
//! scan every entry for the highest priority, the first occurrence winning
//! ties, so equal-priority items leave in arrival order (FIFO with
//! priority override).  O(n) per dequeue is acceptable at waiting-room
//! scale; swap in a heap if queues grow into the thousands.
//!
//! There is deliberately no removal or update by identifier.  Callers that
//! need it (the waiting room) layer a side cache on top and discard stale
//! items as they surface.

use std::collections::VecDeque;

/// Priority-ordered queue with FIFO tie-breaking.
#[derive(Clone, Debug)]
pub struct OrderedPriorityQueue<T> {
    inner: VecDeque<(f64, T)>,
}

impl<T> Default for OrderedPriorityQueue<T> {
    fn default() -> Self {
        Self { inner: VecDeque::new() }
    }
}

impl<T> OrderedPriorityQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `item`.  Higher `priority` leaves sooner.
    pub fn enqueue(&mut self, item: T, priority: f64) {
        self.inner.push_back((priority, item));
    }

    /// Remove and return the highest-priority item.
    pub fn dequeue(&mut self) -> Option<T> {
        let index = self.max_index()?;
        self.inner.remove(index).map(|(_, item)| item)
    }

    /// The item `dequeue` would return, without removing it.
    pub fn peek(&self) -> Option<&T> {
        let index = self.max_index()?;
        self.inner.get(index).map(|(_, item)| item)
    }

    /// Priority of the item `dequeue` would return.
    pub fn peek_priority(&self) -> Option<f64> {
        let index = self.max_index()?;
        self.inner.get(index).map(|(priority, _)| *priority)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Index of the first entry holding the maximum priority.
    fn max_index(&self) -> Option<usize> {
        let mut best_priority = self.inner.front()?.0;
        let mut best = 0;
        for (i, (priority, _)) in self.inner.iter().enumerate().skip(1) {
            if *priority > best_priority {
                best = i;
                best_priority = *priority;
            }
        }
        Some(best)
    }
}
