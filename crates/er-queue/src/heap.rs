//! `PriorityHeap`: array-backed binary max-heap with priority mutation.
//!
//! # Layout
//!
//! ```text
//! parent(i) = (i - 1) / 2
//! left(i)   = 2i + 1
//! right(i)  = 2i + 2
//! ```
//!
//! Entries are compared by `priority` alone.  Equal priorities are ordered
//! by wherever the sift operations happen to leave them, so the heap is not
//! stable.  Priorities must not be NaN.
//!
//! `std::collections::BinaryHeap` is not used because it cannot mutate an
//! entry in place; [`PriorityHeap::update_priority`] needs index access.

use std::borrow::Borrow;

/// One entry in a [`PriorityHeap`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeapEntry<I, P> {
    pub priority: f64,
    pub id:       I,
    pub payload:  P,
}

/// Binary max-heap of `(priority, id, payload)` triples.
#[derive(Clone, Debug)]
pub struct PriorityHeap<I, P> {
    entries: Vec<HeapEntry<I, P>>,
}

impl<I, P> Default for PriorityHeap<I, P> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<I, P> PriorityHeap<I, P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: Vec::with_capacity(capacity) }
    }

    /// Insert an entry.  O(log n).
    pub fn push(&mut self, priority: f64, id: I, payload: P) {
        self.entries.push(HeapEntry { priority, id, payload });
        self.sift_up(self.entries.len() - 1);
    }

    /// Remove and return the highest-priority entry.  O(log n).
    ///
    /// The last leaf is moved into the root and sifted down.
    pub fn pop(&mut self) -> Option<HeapEntry<I, P>> {
        if self.entries.is_empty() {
            return None;
        }
        let root = self.entries.swap_remove(0);
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        Some(root)
    }

    /// The highest-priority entry, without removing it.
    pub fn peek(&self) -> Option<&HeapEntry<I, P>> {
        self.entries.first()
    }

    /// Change the priority of the FIRST entry (in array order) whose id
    /// equals `id`, optionally replacing its payload.
    ///
    /// The entry is sifted in both directions because the new priority may
    /// be higher or lower than the old one.  Returns `false` if no entry
    /// matches.  O(n) scan + O(log n) repair.
    pub fn update_priority<Q>(&mut self, id: &Q, new_priority: f64, new_payload: Option<P>) -> bool
    where
        I: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        let Some(index) = self
            .entries
            .iter()
            .position(|e| Borrow::<Q>::borrow(&e.id) == id)
        else {
            return false;
        };
        let entry = &mut self.entries[index];
        entry.priority = new_priority;
        if let Some(payload) = new_payload {
            entry.payload = payload;
        }
        let index = self.sift_up(index);
        self.sift_down(index);
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries in internal array order (NOT priority order).
    pub fn iter(&self) -> impl Iterator<Item = &HeapEntry<I, P>> + '_ {
        self.entries.iter()
    }

    /// `true` if every child's priority is `<=` its parent's.
    pub fn is_valid_heap(&self) -> bool {
        (1..self.entries.len())
            .all(|i| self.entries[i].priority <= self.entries[parent(i)].priority)
    }

    // ── Sift internals ────────────────────────────────────────────────────

    /// Move the entry at `index` up until its parent is not smaller.
    /// Returns the entry's final index.
    fn sift_up(&mut self, mut index: usize) -> usize {
        while index > 0 {
            let p = parent(index);
            if self.entries[index].priority > self.entries[p].priority {
                self.entries.swap(index, p);
                index = p;
            } else {
                break;
            }
        }
        index
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut largest = index;

            if left < len && self.entries[left].priority > self.entries[largest].priority {
                largest = left;
            }
            if right < len && self.entries[right].priority > self.entries[largest].priority {
                largest = right;
            }
            if largest == index {
                break;
            }
            self.entries.swap(index, largest);
            index = largest;
        }
    }
}

#[inline]
fn parent(index: usize) -> usize {
    (index - 1) / 2
}
