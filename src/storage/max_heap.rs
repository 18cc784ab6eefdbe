//! Binary max-heap used for the ranking queries

use crate::core::error::{Result, TimefsError};

/// Array-backed binary max-heap
///
/// Ties between equal elements come out in an order that depends on the
/// insertion sequence; there is no stability guarantee.
#[derive(Debug, Clone)]
pub struct MaxHeap<T> {
    heap: Vec<T>,
}

impl<T: Ord> MaxHeap<T> {
    pub fn new() -> Self {
        Self { heap: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Largest element without removing it
    pub fn peek(&self) -> Option<&T> {
        self.heap.first()
    }

    pub fn insert(&mut self, value: T) {
        self.heap.push(value);
        self.sift_up(self.heap.len() - 1);
    }

    /// Remove and return the largest element
    pub fn extract_max(&mut self) -> Result<T> {
        if self.heap.is_empty() {
            return Err(TimefsError::HeapEmpty);
        }
        let max = self.heap.swap_remove(0);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Ok(max)
    }

    /// Drain up to `limit` elements in descending order
    pub fn drain_top(mut self, limit: usize) -> Vec<T> {
        let mut out = Vec::with_capacity(limit.min(self.heap.len()));
        while out.len() < limit {
            match self.extract_max() {
                Ok(value) => out.push(value),
                Err(_) => break,
            }
        }
        out
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.heap[parent] >= self.heap[index] {
                break;
            }
            self.heap.swap(parent, index);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut largest = index;

            if left < len && self.heap[left] > self.heap[largest] {
                largest = left;
            }
            if right < len && self.heap[right] > self.heap[largest] {
                largest = right;
            }
            if largest == index {
                break;
            }
            self.heap.swap(index, largest);
            index = largest;
        }
    }
}

impl<T: Ord> Default for MaxHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for MaxHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut heap = MaxHeap::new();
        for value in iter {
            heap.insert(value);
        }
        heap
    }
}
