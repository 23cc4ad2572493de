//! `er-queue`: ordering primitives for patient flow.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`heap`]      | `PriorityHeap` (array-backed binary max-heap), `HeapEntry` |
//! | [`ordered`]   | `OrderedPriorityQueue` (append + linear max scan)          |
//! | [`stack`]     | `UndoStack` (LIFO)                                         |
//!
//! None of these types know about patients.  Identifier-based removal and
//! membership live one layer up, in `er-triage`, behind side caches.
//!
//! # Thread safety
//!
//! No internal locking.  Each instance is meant to have exactly one owner
//! (or sit behind one `Mutex`); all operations are synchronous.

pub mod heap;
pub mod ordered;
pub mod stack;


pub use heap::{HeapEntry, PriorityHeap};
pub use ordered::OrderedPriorityQueue;
pub use stack::UndoStack;
