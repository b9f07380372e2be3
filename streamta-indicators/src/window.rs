//! Fixed-capacity FIFO window.

use std::collections::VecDeque;

/// Ring buffer holding at most `capacity` of the most recent values.
#[derive(Debug, Clone)]
pub struct RingWindow<T> {
    capacity: usize,
    values: VecDeque<T>,
}

impl<T> RingWindow<T> {
    /// Creates an empty window. `capacity` must be non-zero.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            values: VecDeque::with_capacity(capacity),
        }
    }

    /// Appends `value`, returning the evicted oldest value once the window is full.
    pub fn push(&mut self, value: T) -> Option<T> {
        let evicted = if self.values.len() == self.capacity {
            self.values.pop_front()
        } else {
            None
        };
        self.values.push_back(value);
        evicted
    }

    /// Maximum number of retained values.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of retained values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true when nothing is retained.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns true once `capacity` values are retained.
    pub fn is_full(&self) -> bool {
        self.values.len() == self.capacity
    }

    /// Most recently pushed value.
    pub fn newest(&self) -> Option<&T> {
        self.values.back()
    }

    /// Retained values, oldest first.
    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, T> {
        self.values.iter()
    }

    /// Drops every retained value.
    pub fn clear(&mut self) {
        self.values.clear();
    }
}
