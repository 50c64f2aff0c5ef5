// Snapshot of the three collections a step displays

use crate::heap::HeapItem;
use serde::Serialize;

/// The heap, the input queue and the sorted output at one point in time.
///
/// Every [`Step`](crate::steps::Step) owns its own copy, so holding on to an
/// old step never observes later changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    pub heap: Vec<HeapItem>,
    pub input: Vec<HeapItem>,
    pub sorted: Vec<HeapItem>,
}

impl Snapshot {
    /// A snapshot with everything still waiting in the input queue
    pub fn from_input(input: Vec<HeapItem>) -> Self {
        Snapshot {
            input,
            ..Snapshot::default()
        }
    }
}
