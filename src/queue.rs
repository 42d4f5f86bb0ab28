//! Ordered, destructively consumed queue of owned values.
//!
//! All three work lists of a run (pending directories, file candidates and
//! confirmed duplicate pairs) are FIFO queues that are filled by one phase
//! and drained by the next. [`Queue`] is the single container behind them.
//!
//! # Example
//!
//! ```
//! use dupelink::queue::Queue;
//!
//! let mut queue = Queue::new();
//! queue.push("first");
//! queue.push("second");
//!
//! // Non-destructive cursor read
//! assert_eq!(queue.iter().count(), 2);
//!
//! // Destructive consumption in insertion order
//! assert_eq!(queue.pop(), Some("first"));
//! assert_eq!(queue.len(), 1);
//! ```

use std::collections::vec_deque::{self, VecDeque};

/// FIFO queue of owned values.
///
/// Values are appended at the back with [`push`](Self::push) and removed
/// from the front with [`pop`](Self::pop). [`iter`](Self::iter) reads the
/// remaining values in order without consuming them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Queue<T> {
    items: VecDeque<T>,
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Queue<T> {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    /// Append a value at the back of the queue.
    pub fn push(&mut self, item: T) {
        self.items.push_back(item);
    }

    /// Remove and return the value at the front of the queue.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    /// Iterate over the remaining values, front to back.
    pub fn iter(&self) -> vec_deque::Iter<'_, T> {
        self.items.iter()
    }

    /// Number of values still queued.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for Queue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<'a, T> IntoIterator for &'a Queue<T> {
    type Item = &'a T;
    type IntoIter = vec_deque::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Draining iterator: yields values front to back, consuming the queue.
impl<T> IntoIterator for Queue<T> {
    type Item = T;
    type IntoIter = vec_deque::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
