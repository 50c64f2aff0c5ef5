//! Step-sequence generation
//!
//! This module turns a [`Snapshot`] into the full, ordered list of [`Step`]s
//! that narrate an algorithm run:
//! - [`insertion`]: drain the input queue into a max-heap (insert + sift-up)
//! - [`extraction`]: drain the heap into the sorted list (extract-max + sift-down)
//!
//! # Purity
//!
//! Generators work on a private copy of the snapshot they are handed and
//! return new steps; the caller's collections are never touched. Generating
//! twice from the same snapshot yields identical lists.
//!
//! # Resuming
//!
//! Each step records a [`Resume`] continuation. Feeding a step's snapshot and
//! continuation back into [`continue_insertion`] or [`continue_extraction`]
//! reproduces every step that originally followed it. The player relies on
//! this to splice newly queued items into a half-played run.

pub mod extraction;
pub mod insertion;

pub use extraction::{continue_extraction, extraction_steps};
pub use insertion::{continue_insertion, insertion_steps};

use crate::snapshot::Snapshot;
use serde::Serialize;
use std::fmt;

/// What a step is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    Idle,
    Inserting,
    HeapifyUp,
    Extracting,
    HeapifyDown,
    Done,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Inserting => "inserting",
            Phase::HeapifyUp => "heapify-up",
            Phase::Extracting => "extracting",
            Phase::HeapifyDown => "heapify-down",
            Phase::Done => "done",
        };
        f.write_str(name)
    }
}

/// Where generation picks up after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resume {
    /// Take the next item from the input queue
    Dequeue,
    /// Compare the element at this index with its parent
    SiftUp(usize),
    /// The comparison at this index was shown; perform the swap with its parent
    SwapUp(usize),
    /// Highlight the current maximum
    Extract,
    /// Move the root to the sorted list and the last element to the root
    Detach,
    /// Compare the element at this index with its children
    SiftDown(usize),
    /// The comparison at this index was shown; perform the swap with the heavier child
    SwapDown(usize),
}

impl Resume {
    /// Whether this continuation belongs to the build phase
    pub fn is_insertion(self) -> bool {
        matches!(self, Resume::Dequeue | Resume::SiftUp(_) | Resume::SwapUp(_))
    }

    /// Whether an element is partway up the tree, so the heap may not yet
    /// satisfy the max-heap property
    pub fn is_mid_sift_up(self) -> bool {
        matches!(self, Resume::SiftUp(i) if i > 0) || matches!(self, Resume::SwapUp(_))
    }
}

/// One atomic, fully described unit of progress
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    #[serde(flatten)]
    pub snapshot: Snapshot,
    /// Zero to two heap indices, in comparison order
    pub highlighted: Vec<usize>,
    pub phase: Phase,
    pub message: String,
    #[serde(skip)]
    pub resume: Resume,
}

/// Accumulates steps over a private working copy of the state
pub(crate) struct Tracer {
    state: Snapshot,
    steps: Vec<Step>,
}

impl Tracer {
    pub(crate) fn new(start: &Snapshot) -> Self {
        Tracer {
            state: start.clone(),
            steps: Vec::new(),
        }
    }

    /// Record a step over the current working state and hand back its
    /// continuation
    pub(crate) fn emit(
        &mut self,
        highlighted: &[usize],
        phase: Phase,
        message: String,
        resume: Resume,
    ) -> Option<Resume> {
        self.steps.push(Step {
            snapshot: self.state.clone(),
            highlighted: highlighted.to_vec(),
            phase,
            message,
            resume,
        });
        Some(resume)
    }

    /// Drive `advance` from `resume` until it reports there is nothing left
    pub(crate) fn run(
        mut self,
        resume: Resume,
        advance: impl Fn(&mut Tracer, Resume) -> Option<Resume>,
    ) -> Vec<Step> {
        let mut next = Some(resume);
        while let Some(resume) = next {
            next = advance(&mut self, resume);
        }
        self.steps
    }
}

/// Steps that carry an in-flight sift-up to its end, and no further.
///
/// Empty unless `resume` is partway through a sift-up.
pub fn finish_sift_up(start: &Snapshot, resume: Resume) -> Vec<Step> {
    if !resume.is_mid_sift_up() {
        return Vec::new();
    }

    let mut steps = continue_insertion(start, resume);
    if let Some(end) = steps.iter().position(|step| !step.resume.is_mid_sift_up()) {
        steps.truncate(end + 1);
    }
    steps
}

/// Build the heap from the input queue, then sort it out again
pub fn full_trace(start: &Snapshot) -> Vec<Step> {
    let mut steps = insertion_steps(start);
    let built = steps
        .last()
        .map(|step| step.snapshot.clone())
        .unwrap_or_else(|| start.clone());
    steps.extend(extraction_steps(&built));
    steps
}
