use std::collections::VecDeque;

use crate::error::{DrawError, DrawResult};
use crate::participant::Participant;
use crate::pool::Pool;
use crate::time::Millis;

/// Copy of the pool contents taken right before a draw
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    all: Vec<Participant>,
    remaining: Vec<Participant>,
    history: Vec<Participant>,
    /// When the snapshot was taken
    pub timestamp: Millis,
}

impl Snapshot {
    /// Captures the current contents of `pool`
    pub fn capture(pool: &Pool, timestamp: Millis) -> Self {
        Self {
            all: pool.all().to_vec(),
            remaining: pool.remaining().to_vec(),
            history: pool.history().to_vec(),
            timestamp,
        }
    }

    pub fn all(&self) -> &[Participant] {
        &self.all
    }

    pub fn remaining(&self) -> &[Participant] {
        &self.remaining
    }

    pub fn history(&self) -> &[Participant] {
        &self.history
    }
}

/// Bounded stack of pre-draw snapshots.
///
/// Pushing past the capacity evicts the oldest entry, popping returns the
/// newest.
#[derive(Debug, Clone)]
pub struct UndoStack {
    snapshots: VecDeque<Snapshot>,
    capacity: usize,
}

impl UndoStack {
    /// Creates an empty stack. A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            snapshots: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        self.snapshots.push_back(snapshot);
        if self.snapshots.len() > self.capacity {
            if let Some(evicted) = self.snapshots.pop_front() {
                log::debug!("Undo capacity reached, dropped snapshot from {}ms", evicted.timestamp);
            }
        }
    }

    pub fn pop(&mut self) -> DrawResult<Snapshot> {
        self.snapshots.pop_back().ok_or(DrawError::NothingToUndo)
    }

    /// Replaces the pool contents with those recorded in `snapshot`
    pub fn restore(snapshot: Snapshot, pool: &mut Pool) {
        pool.replace_contents(snapshot.all, snapshot.remaining, snapshot.history);
    }

    pub fn can_undo(&self) -> bool {
        !self.snapshots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}
