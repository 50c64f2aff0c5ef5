//! Extraction steps: max-heap → sorted list
//!
//! Each round highlights the root, moves it to the end of the sorted list,
//! moves the last heap element into the root and sifts it down. The input
//! queue is carried through untouched.

use super::{Phase, Resume, Step, Tracer};
use crate::heap::sift::sift_down_step;
use crate::snapshot::Snapshot;

/// Steps that drain `start.heap` into `start.sorted`, heaviest first
pub fn extraction_steps(start: &Snapshot) -> Vec<Step> {
    continue_extraction(start, Resume::Extract)
}

/// Steps that follow a step whose snapshot is `start` and whose
/// continuation is `resume`
pub fn continue_extraction(start: &Snapshot, resume: Resume) -> Vec<Step> {
    let steps = Tracer::new(start).run(resume, advance);
    tracing::debug!(steps = steps.len(), ?resume, "generated extraction steps");
    steps
}

fn advance(tracer: &mut Tracer, resume: Resume) -> Option<Resume> {
    match resume {
        Resume::Extract => extract(tracer),
        Resume::Detach => detach(tracer),
        Resume::SiftDown(i) => sift_down(tracer, i),
        Resume::SwapDown(i) => swap_down(tracer, i),
        // Anything left over from a build starts a fresh round.
        Resume::Dequeue | Resume::SiftUp(_) | Resume::SwapUp(_) => extract(tracer),
    }
}

fn extract(tracer: &mut Tracer) -> Option<Resume> {
    let root = *tracer.state.heap.first()?;
    tracer.emit(
        &[0],
        Phase::Extracting,
        format!(
            "Extracting max element Person {} (weight: {}) from root",
            root.person_id, root.weight
        ),
        Resume::Detach,
    )
}

fn detach(tracer: &mut Tracer) -> Option<Resume> {
    if tracer.state.heap.is_empty() {
        return None;
    }

    // swap_remove moves the last element into the vacated root
    let extracted = tracer.state.heap.swap_remove(0);
    tracer.state.sorted.push(extracted);

    match tracer.state.heap.first().copied() {
        None => tracer.emit(
            &[],
            Phase::Extracting,
            format!(
                "Person {} added to sorted list. Heap is now empty!",
                extracted.person_id
            ),
            Resume::Extract,
        ),
        Some(moved) => tracer.emit(
            &[0],
            Phase::HeapifyDown,
            format!(
                "Moved Person {} ({}) to root. Person {} added to sorted list.",
                moved.person_id, moved.weight, extracted.person_id
            ),
            Resume::SiftDown(0),
        ),
    }
}

fn sift_down(tracer: &mut Tracer, i: usize) -> Option<Resume> {
    if i >= tracer.state.heap.len() {
        return Some(Resume::Extract);
    }

    let mut probe = tracer.state.heap.clone();
    let outcome = sift_down_step(&mut probe, i);
    let current = tracer.state.heap[i];

    match outcome.next_index {
        Some(to) => {
            let child = tracer.state.heap[to];
            tracer.emit(
                &[i, to],
                Phase::HeapifyDown,
                format!(
                    "Comparing Person {} ({}) with Person {} ({}) — swapping!",
                    current.person_id, current.weight, child.person_id, child.weight
                ),
                Resume::SwapDown(i),
            );
            tracer.state.heap = probe;
            confirm(tracer, to)
        }
        None => tracer.emit(
            &[i],
            Phase::HeapifyDown,
            format!(
                "Person {} is in correct position — heap property restored",
                current.person_id
            ),
            Resume::Extract,
        ),
    }
}

fn swap_down(tracer: &mut Tracer, i: usize) -> Option<Resume> {
    if i >= tracer.state.heap.len() {
        return Some(Resume::Extract);
    }

    match sift_down_step(&mut tracer.state.heap, i).next_index {
        Some(to) => confirm(tracer, to),
        None => sift_down(tracer, i),
    }
}

fn confirm(tracer: &mut Tracer, to: usize) -> Option<Resume> {
    let moved = tracer.state.heap[to];
    tracer.emit(
        &[to],
        Phase::HeapifyDown,
        format!("Swapped! Person {} moved to position {}", moved.person_id, to),
        Resume::SiftDown(to),
    )
}
