//! # Introduction
//!
//! heaptty animates heap-sort one comparison at a time. People waiting in an
//! input queue are inserted into a max-heap by weight, then extracted again
//! into a list sorted heaviest first. Every intermediate state is captured as
//! a step and replayed through a terminal UI built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Input queue → Step generators → Steps → Player → TUI
//! ```
//!
//! 1. [`heap`]: index arithmetic, [`heap::HeapItem`], and the single-step
//!    sift-up / sift-down primitives.
//! 2. [`snapshot`]: the heap / input queue / sorted list triple copied into
//!    every step.
//! 3. [`steps`]: pure generators that turn a snapshot into the complete list
//!    of insertion or extraction [`steps::Step`]s.
//! 4. [`player`]: playback controller: cursor, cadence, pause/resume, and
//!    splicing newly added items into a run that is already playing.
//! 5. [`config`]: command-line flags and data-file loading.
//! 6. [`ui`]: ratatui-based TUI; not part of the stable library API.

pub mod config;
pub mod heap;
pub mod player;
pub mod snapshot;
pub mod steps;
pub mod ui;
