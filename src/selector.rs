use crate::error::{DrawError, DrawResult};
use crate::participant::Participant;
use crate::pool::Pool;
use crate::random::RandomSource;
use crate::time::Millis;
use crate::undo::{Snapshot, UndoStack};

/// Performs the single authoritative draw that ends a reveal
pub struct Selector;

impl Selector {
    /// Snapshots the pool onto `undo_stack`, then moves one uniformly chosen
    /// participant from `remaining` to `history`.
    ///
    /// The snapshot is taken before any mutation, so popping it restores the
    /// exact pre-draw contents.
    pub fn commit(
        pool: &mut Pool,
        undo_stack: &mut UndoStack,
        rng: &mut dyn RandomSource,
        now: Millis,
    ) -> DrawResult<Participant> {
        if pool.is_exhausted() {
            return Err(DrawError::PoolExhausted);
        }

        undo_stack.push(Snapshot::capture(pool, now));
        pool.draw(rng)
    }
}
