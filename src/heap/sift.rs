//! Single-step sift primitives
//!
//! Each call performs exactly one comparison level and at most one swap, so
//! a full sift is a sequence of calls driven by [`SiftOutcome::next_index`].
//! That granularity is what lets the step generators narrate every move.
//!
//! # Tie Policy
//!
//! Ties never swap. Sift-up only moves an element past a strictly lighter
//! parent; sift-down prefers the parent over the left child and the left
//! child over the right child when weights are equal.

use super::{left, parent, right, HeapItem};

/// Result of one sift step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiftOutcome {
    /// Whether two elements were exchanged
    pub swapped: bool,
    /// Where the sifted element now sits, if the sift should continue
    pub next_index: Option<usize>,
    /// The other index taking part in the comparison
    pub target_index: Option<usize>,
}

impl SiftOutcome {
    fn halted(target_index: Option<usize>) -> Self {
        SiftOutcome {
            swapped: false,
            next_index: None,
            target_index,
        }
    }

    fn moved(to: usize) -> Self {
        SiftOutcome {
            swapped: true,
            next_index: Some(to),
            target_index: Some(to),
        }
    }
}

/// Compare `heap[i]` with its parent and swap if the child is heavier.
///
/// `i` must be in bounds. Index 0 halts immediately.
pub fn sift_up_step(heap: &mut [HeapItem], i: usize) -> SiftOutcome {
    if i == 0 {
        return SiftOutcome::halted(None);
    }

    let p = parent(i);
    if heap[i].weight > heap[p].weight {
        heap.swap(i, p);
        SiftOutcome::moved(p)
    } else {
        SiftOutcome::halted(Some(p))
    }
}

/// Compare `heap[i]` with its in-bounds children and swap it with the
/// heaviest one if that child outweighs it.
pub fn sift_down_step(heap: &mut [HeapItem], i: usize) -> SiftOutcome {
    let len = heap.len();
    let (l, r) = (left(i), right(i));
    let mut largest = i;

    if l < len && heap[l].weight > heap[largest].weight {
        largest = l;
    }
    if r < len && heap[r].weight > heap[largest].weight {
        largest = r;
    }

    if largest == i {
        return SiftOutcome::halted(None);
    }

    heap.swap(i, largest);
    SiftOutcome::moved(largest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heap::ItemFactory;

    fn heap_of(weights: &[f64]) -> Vec<HeapItem> {
        let mut factory = ItemFactory::new(1);
        weights.iter().map(|&w| factory.create(w)).collect()
    }

    fn weights(heap: &[HeapItem]) -> Vec<f64> {
        heap.iter().map(|item| item.weight).collect()
    }

    #[test]
    fn test_sift_up_swaps_heavier_child() {
        let mut heap = heap_of(&[5.0, 3.0, 8.0]);
        let outcome = sift_up_step(&mut heap, 2);
        assert_eq!(
            outcome,
            SiftOutcome {
                swapped: true,
                next_index: Some(0),
                target_index: Some(0),
            }
        );
        assert_eq!(weights(&heap), vec![8.0, 3.0, 5.0]);
    }

    #[test]
    fn test_sift_up_halts_on_lighter_child() {
        let mut heap = heap_of(&[5.0, 3.0]);
        let outcome = sift_up_step(&mut heap, 1);
        assert!(!outcome.swapped);
        assert_eq!(outcome.next_index, None);
        assert_eq!(outcome.target_index, Some(0));
        assert_eq!(weights(&heap), vec![5.0, 3.0]);
    }

    #[test]
    fn test_sift_up_at_root() {
        let mut heap = heap_of(&[5.0]);
        let outcome = sift_up_step(&mut heap, 0);
        assert!(!outcome.swapped);
        assert_eq!(outcome.next_index, None);
    }

    #[test]
    fn test_sift_up_equal_weights_do_not_swap() {
        let mut heap = heap_of(&[5.0, 5.0]);
        assert!(!sift_up_step(&mut heap, 1).swapped);
    }

    #[test]
    fn test_sift_down_picks_heaviest_child() {
        let mut heap = heap_of(&[1.0, 4.0, 9.0]);
        let outcome = sift_down_step(&mut heap, 0);
        assert_eq!(outcome.next_index, Some(2));
        assert_eq!(weights(&heap), vec![9.0, 4.0, 1.0]);
    }

    #[test]
    fn test_sift_down_tie_prefers_left_child() {
        let mut heap = heap_of(&[1.0, 7.0, 7.0]);
        let person_left = heap[1].person_id;
        let outcome = sift_down_step(&mut heap, 0);
        assert_eq!(outcome.next_index, Some(1));
        assert_eq!(heap[0].person_id, person_left);
    }

    #[test]
    fn test_sift_down_tie_with_parent_halts() {
        let mut heap = heap_of(&[7.0, 7.0, 3.0]);
        let outcome = sift_down_step(&mut heap, 0);
        assert_eq!(outcome, SiftOutcome::halted(None));
    }

    #[test]
    fn test_sift_down_leaf_halts() {
        let mut heap = heap_of(&[9.0, 4.0]);
        assert!(!sift_down_step(&mut heap, 1).swapped);
    }
}
