//! Insertion steps: input queue → max-heap
//!
//! Items leave the queue front first. Each one is appended to the heap and
//! sifted up; a swap is narrated as a comparison step (pre-swap heap) followed
//! by a confirmation step (post-swap heap). A sift that stops below the root
//! ends with a "no swap needed" step; one that reaches the root ends silently.

use super::{Phase, Resume, Step, Tracer};
use crate::heap::sift::sift_up_step;
use crate::snapshot::Snapshot;

/// Steps that drain `start.input` into `start.heap`
pub fn insertion_steps(start: &Snapshot) -> Vec<Step> {
    continue_insertion(start, Resume::Dequeue)
}

/// Steps that follow a step whose snapshot is `start` and whose
/// continuation is `resume`
pub fn continue_insertion(start: &Snapshot, resume: Resume) -> Vec<Step> {
    let steps = Tracer::new(start).run(resume, advance);
    tracing::debug!(steps = steps.len(), ?resume, "generated insertion steps");
    steps
}

fn advance(tracer: &mut Tracer, resume: Resume) -> Option<Resume> {
    match resume {
        Resume::Dequeue => dequeue(tracer),
        Resume::SiftUp(i) => sift_up(tracer, i),
        Resume::SwapUp(i) => swap_up(tracer, i),
        // An extraction continuation: the build is over.
        Resume::Extract | Resume::Detach | Resume::SiftDown(_) | Resume::SwapDown(_) => None,
    }
}

fn dequeue(tracer: &mut Tracer) -> Option<Resume> {
    if tracer.state.input.is_empty() {
        return None;
    }

    let item = tracer.state.input.remove(0);
    tracer.state.heap.push(item);
    let index = tracer.state.heap.len() - 1;

    tracer.emit(
        &[index],
        Phase::Inserting,
        format!(
            "Inserting Person {} (weight: {}) into heap at position {}",
            item.person_id, item.weight, index
        ),
        Resume::SiftUp(index),
    )
}

fn sift_up(tracer: &mut Tracer, i: usize) -> Option<Resume> {
    if i == 0 || i >= tracer.state.heap.len() {
        return Some(Resume::Dequeue);
    }

    let mut probe = tracer.state.heap.clone();
    let outcome = sift_up_step(&mut probe, i);
    let current = tracer.state.heap[i];

    match (outcome.swapped, outcome.target_index) {
        (true, Some(p)) => {
            let parent = tracer.state.heap[p];
            tracer.emit(
                &[i, p],
                Phase::HeapifyUp,
                format!(
                    "Comparing Person {} ({}) with parent Person {} ({}) — swapping!",
                    current.person_id, current.weight, parent.person_id, parent.weight
                ),
                Resume::SwapUp(i),
            );
            tracer.state.heap = probe;
            confirm(tracer, p)
        }
        _ => tracer.emit(
            &[i],
            Phase::HeapifyUp,
            format!(
                "Person {} ({}) is in correct position — no swap needed",
                current.person_id, current.weight
            ),
            Resume::Dequeue,
        ),
    }
}

fn swap_up(tracer: &mut Tracer, i: usize) -> Option<Resume> {
    if i == 0 || i >= tracer.state.heap.len() {
        return Some(Resume::Dequeue);
    }

    match sift_up_step(&mut tracer.state.heap, i).next_index {
        Some(p) => confirm(tracer, p),
        None => sift_up(tracer, i),
    }
}

fn confirm(tracer: &mut Tracer, to: usize) -> Option<Resume> {
    let moved = tracer.state.heap[to];
    tracer.emit(
        &[to],
        Phase::HeapifyUp,
        format!("Swapped! Person {} moved to position {}", moved.person_id, to),
        Resume::SiftUp(to),
    )
}
