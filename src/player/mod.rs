//! Playback controller
//!
//! The [`Player`] owns the observed state (the current [`Snapshot`], its
//! highlights and narration) together with the generated step list and a
//! cursor into it. Steps are only ever applied in order, one per tick:
//! - [`ticker`]: cadence and cancellation
//! - [`errors`]: reasons a control request is turned down
//!
//! # Modes
//!
//! ```text
//! Idle ──play/step──▶ Inserting ──exhausted──▶ Done ──extract──▶ Extracting ──exhausted──▶ Done
//!   ▲                                           │
//!   └───────────────────── add item ────────────┘
//! ```
//!
//! Time never comes from a clock inside the player; every operation that
//! schedules work takes the current [`Instant`] from the caller.

pub mod errors;
pub mod ticker;

pub use errors::{parse_weight, PlayerError};
pub use ticker::{TickToken, Ticker};

use crate::heap::sample::{self, SAMPLE_PEOPLE};
use crate::heap::{HeapItem, ItemFactory};
use crate::snapshot::Snapshot;
use crate::steps::{
    continue_extraction, continue_insertion, extraction_steps, finish_sift_up, insertion_steps,
    Phase, Resume, Step,
};
use std::time::{Duration, Instant};

/// Default delay between steps, in milliseconds
pub const DEFAULT_SPEED_MS: u64 = 800;

/// Bounds on the delay between steps, in milliseconds
pub const MIN_SPEED_MS: u64 = 100;
pub const MAX_SPEED_MS: u64 = 2000;

/// Selectable delays: 0.5x, 1x, 2x, 5x
pub const SPEED_PRESETS_MS: [u64; 4] = [2000, 1000, 500, 200];

/// What the player is currently working through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Inserting,
    Extracting,
    Done,
}

pub struct Player {
    /// State after the last applied step
    state: Snapshot,
    highlighted: Vec<usize>,
    phase: Phase,
    message: String,
    /// Continuation recorded by the last applied step
    resume: Resume,

    mode: Mode,
    steps: Vec<Step>,
    /// Index of the next step to apply
    cursor: usize,

    ticker: Ticker,
    items: ItemFactory,
    /// Data set restored on reset
    people: Vec<(u32, f64)>,
}

impl Player {
    /// Create a player whose input queue holds `people` in order.
    ///
    /// Ad-hoc additions continue numbering after the largest loaded person id.
    pub fn new(people: Vec<(u32, f64)>, speed_ms: u64) -> Self {
        let first_free = people
            .iter()
            .map(|&(id, _)| id)
            .max()
            .map_or(1, |id| id.saturating_add(1));
        let mut items = ItemFactory::new(first_free);
        let input = sample::load(&people, &mut items);

        Player {
            state: Snapshot::from_input(input),
            highlighted: Vec::new(),
            phase: Phase::Idle,
            message: String::new(),
            resume: Resume::Dequeue,
            mode: Mode::Idle,
            steps: Vec::new(),
            cursor: 0,
            ticker: Ticker::new(Duration::from_millis(clamp_speed(speed_ms))),
            items,
            people,
        }
    }

    // ========== Controls ==========

    /// Start or resume automatic playback.
    ///
    /// Unplayed steps are resumed where they left off. Otherwise a fresh
    /// insertion run is generated from the queued input.
    pub fn play(&mut self, now: Instant) -> Result<(), PlayerError> {
        if self.is_playing() {
            return Ok(());
        }
        if !self.has_pending() {
            self.begin_insertion()?;
        }

        self.ticker.start(now);
        tracing::debug!(
            mode = ?self.mode,
            cursor = self.cursor,
            total = self.steps.len(),
            "playing"
        );
        Ok(())
    }

    /// Stop automatic playback, keeping the cursor and step list
    pub fn pause(&mut self) {
        if self.is_playing() {
            tracing::debug!(cursor = self.cursor, "paused");
        }
        self.ticker.cancel();
    }

    /// Flip between playing and paused; returns whether the player is now playing
    pub fn toggle(&mut self, now: Instant) -> Result<bool, PlayerError> {
        if self.is_playing() {
            self.pause();
            Ok(false)
        } else {
            self.play(now).map(|()| true)
        }
    }

    /// Apply exactly one step, generating an insertion run first if nothing is
    /// pending. Stops automatic playback.
    pub fn step_forward(&mut self) -> Result<(), PlayerError> {
        self.pause();
        if !self.has_pending() {
            if self.mode == Mode::Extracting {
                return Err(PlayerError::NothingToStep);
            }
            self.begin_insertion()
                .map_err(|_| PlayerError::NothingToStep)?;
        }

        self.apply_next();
        Ok(())
    }

    /// Sort everything in the heap into the output list, playing automatically.
    ///
    /// An element still partway up the tree finishes its sift first; any other
    /// unplayed insertion steps are dropped and the queue is left as it is.
    pub fn extract_all(&mut self, now: Instant) -> Result<(), PlayerError> {
        if self.mode == Mode::Extracting && self.has_pending() {
            return Err(PlayerError::AlreadyExtracting);
        }
        if self.state.heap.is_empty() {
            return Err(PlayerError::EmptyHeap);
        }

        let suffix = self.plan(Mode::Extracting);
        self.mode = Mode::Extracting;
        self.splice(suffix);
        self.ticker.start(now);
        tracing::info!(
            heap = self.state.heap.len(),
            steps = self.steps.len() - self.cursor,
            "extracting"
        );
        Ok(())
    }

    /// Parse `input` as a weight and queue a new item for it
    pub fn add_item(&mut self, input: &str) -> Result<HeapItem, PlayerError> {
        let weight = parse_weight(input).inspect_err(|_| {
            tracing::debug!(input, "rejected weight");
        })?;
        self.add_weight(weight)
    }

    /// Queue a new item with the given weight.
    ///
    /// If a run is partway through, its unplayed steps are regenerated from
    /// the current state so they account for the longer queue. Steps already
    /// shown are kept.
    pub fn add_weight(&mut self, weight: f64) -> Result<HeapItem, PlayerError> {
        if !(weight.is_finite() && weight > 0.0) {
            return Err(PlayerError::InvalidWeight {
                input: weight.to_string(),
            });
        }

        let item = self.items.create(weight);
        self.state.input.push(item);

        if self.has_pending() {
            let suffix = self.plan(self.mode);
            self.splice(suffix);
        } else if self.mode == Mode::Done {
            self.mode = Mode::Idle;
        }

        tracing::debug!(
            person = item.person_id,
            weight,
            queued = self.state.input.len(),
            "added item"
        );
        Ok(item)
    }

    /// Throw everything away and reload the original data set
    pub fn reset(&mut self) {
        self.ticker.cancel();
        self.items.reset();
        self.state = Snapshot::from_input(sample::load(&self.people, &mut self.items));
        self.highlighted.clear();
        self.phase = Phase::Idle;
        self.message.clear();
        self.resume = Resume::Dequeue;
        self.mode = Mode::Idle;
        self.steps.clear();
        self.cursor = 0;
        tracing::info!(queued = self.state.input.len(), "reset");
    }

    /// Set the delay between steps, clamped to the supported range
    pub fn set_speed(&mut self, speed_ms: u64) {
        self.ticker
            .set_interval(Duration::from_millis(clamp_speed(speed_ms)));
    }

    // ========== Scheduling ==========

    /// Apply the next step if a tick is due at `now`
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.ticker.poll(now) {
            Some(token) => self.apply_tick(token),
            None => false,
        }
    }

    /// Apply the next step on behalf of `token`, unless playback has been
    /// paused or reset since it was issued
    fn apply_tick(&mut self, token: TickToken) -> bool {
        if !self.ticker.is_live(token) {
            tracing::trace!("dropped stale tick");
            return false;
        }
        self.apply_next()
    }

    /// Time left until the next step is due, if playing
    pub fn time_until_next_tick(&self, now: Instant) -> Option<Duration> {
        self.ticker.time_until_due(now)
    }

    // ========== Getters for UI ==========

    pub fn snapshot(&self) -> &Snapshot {
        &self.state
    }

    pub fn highlighted(&self) -> &[usize] {
        &self.highlighted
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Number of steps applied so far
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Number of steps generated so far, applied or not
    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn is_playing(&self) -> bool {
        self.ticker.is_running()
    }

    pub fn speed_ms(&self) -> u64 {
        self.ticker.interval().as_millis() as u64
    }

    /// Person id the next added item will get
    pub fn next_person_id(&self) -> u32 {
        self.items.next_person_id()
    }

    pub fn can_extract(&self) -> bool {
        !self.state.heap.is_empty() && !(self.mode == Mode::Extracting && self.has_pending())
    }

    // ========== Internals ==========

    fn has_pending(&self) -> bool {
        self.cursor < self.steps.len()
    }

    fn begin_insertion(&mut self) -> Result<(), PlayerError> {
        let suffix = self.plan(Mode::Inserting);
        if suffix.is_empty() {
            return Err(PlayerError::NothingToPlay);
        }
        self.mode = Mode::Inserting;
        self.splice(suffix);
        Ok(())
    }

    /// Every step from the current state to the end of a run in `mode`
    fn plan(&self, mode: Mode) -> Vec<Step> {
        match mode {
            Mode::Extracting if self.resume.is_insertion() => {
                let mut steps = finish_sift_up(&self.state, self.resume);
                let built = steps
                    .last()
                    .map(|step| step.snapshot.clone())
                    .unwrap_or_else(|| self.state.clone());
                steps.extend(extraction_steps(&built));
                steps
            }
            Mode::Extracting => continue_extraction(&self.state, self.resume),
            _ if self.resume.is_insertion() => continue_insertion(&self.state, self.resume),
            _ => insertion_steps(&self.state),
        }
    }

    /// Replace the unplayed steps with `suffix`
    fn splice(&mut self, suffix: Vec<Step>) {
        self.steps.truncate(self.cursor);
        self.steps.extend(suffix);
    }

    fn apply_next(&mut self) -> bool {
        let Some(step) = self.steps.get(self.cursor) else {
            return false;
        };

        self.state = step.snapshot.clone();
        self.highlighted = step.highlighted.clone();
        self.phase = step.phase;
        self.message = step.message.clone();
        self.resume = step.resume;
        self.cursor += 1;
        tracing::trace!(cursor = self.cursor, phase = %self.phase, "applied step");

        if !self.has_pending() {
            self.finish();
        }
        true
    }

    fn finish(&mut self) {
        self.ticker.cancel();
        self.mode = Mode::Done;
        self.phase = Phase::Done;
        self.highlighted.clear();
        tracing::debug!(
            heap = self.state.heap.len(),
            sorted = self.state.sorted.len(),
            "run complete"
        );
    }
}

impl Default for Player {
    fn default() -> Self {
        Player::new(SAMPLE_PEOPLE.to_vec(), DEFAULT_SPEED_MS)
    }
}

/// Clamp a step delay to the supported range
pub fn clamp_speed(speed_ms: u64) -> u64 {
    speed_ms.clamp(MIN_SPEED_MS, MAX_SPEED_MS)
}
