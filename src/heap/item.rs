//! Heap items and the counters that identify them

use serde::Serialize;
use std::fmt;

/// Opaque unique identifier, never reused within a process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ItemId(u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item-{}", self.0)
    }
}

/// A person waiting to be sorted by weight
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeapItem {
    pub id: ItemId,
    pub person_id: u32,
    pub weight: f64,
}

/// Issues item ids and person ids.
///
/// Owned by whoever holds the current state; nothing here is global.
#[derive(Debug, Clone)]
pub struct ItemFactory {
    next_id: u64,
    next_person_id: u32,
    first_person_id: u32,
}

impl ItemFactory {
    /// Create a factory whose next person id is `first_person_id`
    pub fn new(first_person_id: u32) -> Self {
        ItemFactory {
            next_id: 1,
            next_person_id: first_person_id,
            first_person_id,
        }
    }

    /// Create an item with a fresh id and the next person id
    pub fn create(&mut self, weight: f64) -> HeapItem {
        let person_id = self.next_person_id;
        self.next_person_id = self.next_person_id.saturating_add(1);
        self.with_person(person_id, weight)
    }

    /// Create an item for a known person id (used when loading data sets).
    /// The person counter is not touched.
    pub fn with_person(&mut self, person_id: u32, weight: f64) -> HeapItem {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        HeapItem {
            id,
            person_id,
            weight,
        }
    }

    /// Person id the next [`create`](Self::create) call will use
    pub fn next_person_id(&self) -> u32 {
        self.next_person_id
    }

    /// Rewind the person counter. Item ids keep counting.
    pub fn reset(&mut self) {
        self.next_person_id = self.first_person_id;
    }
}
