//! Array-backed max-heap model
//!
//! This module provides the building blocks the step generators are made of:
//! - [`item`]: the [`HeapItem`] value type and the [`ItemFactory`] that hands out ids
//! - [`sift`]: single-step sift-up / sift-down primitives
//! - [`sample`]: the built-in sample data set
//!
//! # Index Arithmetic
//!
//! The heap is a plain slice read as an implicit complete binary tree:
//! ```text
//! parent(i) = (i - 1) / 2
//! left(i)   = 2i + 1
//! right(i)  = 2i + 2
//! ```
//!
//! None of the index helpers bounds-check; callers compare against the heap
//! length before indexing.

pub mod item;
pub mod sample;
pub mod sift;

pub use item::{HeapItem, ItemFactory, ItemId};

/// Index of the parent of `i`. The root is its own parent.
pub fn parent(i: usize) -> usize {
    i.saturating_sub(1) / 2
}

/// Index of the left child of `i`
pub fn left(i: usize) -> usize {
    2 * i + 1
}

/// Index of the right child of `i`
pub fn right(i: usize) -> usize {
    2 * i + 2
}

/// Check the max-heap property: no element outweighs its parent
pub fn is_max_heap(heap: &[HeapItem]) -> bool {
    (1..heap.len()).all(|i| heap[i].weight <= heap[parent(i)].weight)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_arithmetic() {
        assert_eq!(left(0), 1);
        assert_eq!(right(0), 2);
        assert_eq!(parent(1), 0);
        assert_eq!(parent(2), 0);
        assert_eq!(parent(5), 2);
        assert_eq!(parent(6), 2);
        for i in 0..64 {
            assert_eq!(parent(left(i)), i);
            assert_eq!(parent(right(i)), i);
        }
    }

    #[test]
    fn test_is_max_heap() {
        let mut factory = ItemFactory::new(1);
        let valid: Vec<_> = [8.0, 3.0, 5.0]
            .iter()
            .map(|&w| factory.create(w))
            .collect();
        assert!(is_max_heap(&valid));

        let invalid: Vec<_> = [3.0, 8.0, 5.0]
            .iter()
            .map(|&w| factory.create(w))
            .collect();
        assert!(!is_max_heap(&invalid));
        assert!(is_max_heap(&[]));
    }
}
