//! The orchestrator of a draw session.
//!
//! `SessionController` exclusively owns the pool, the undo stack and the
//! reveal animation, and is the only place where they are mutated. Every
//! public operation either applies fully or fails with a [`DrawError`]; in
//! the failure case an `OperationFailed` notification is emitted and the
//! session is left untouched.
//!
//! Time and randomness are injected, so a session can be driven
//! deterministically:
//!
//! ```rust,no_run
//! use vims_randomizer::{DrawConfig, ManualClock, SequenceRandom, SessionController};
//!
//! let clock = ManualClock::new();
//! let mut session = SessionController::new(
//!     DrawConfig::default(),
//!     Box::new(clock.clone()),
//!     Box::new(SequenceRandom::constant(0.5)),
//! );
//! session.add_participants(10).unwrap();
//! session.start_draw().unwrap();
//! clock.advance(2_000);
//! session.poll();
//! assert_eq!(session.pool().history().len(), 1);
//! ```

use uuid::Uuid;

use crate::animation::{AnimationController, AnimationState, TickOutcome};
use crate::config::DrawConfig;
use crate::error::{DrawError, DrawResult};
use crate::event::{EventBus, EventHandler, SessionEvent, StatusLevel};
use crate::participant::{Participant, ParticipantId};
use crate::pool::Pool;
use crate::random::RandomSource;
use crate::time::{Clock, Deadline, Millis, TimerHandle};
use crate::undo::UndoStack;

/// Observable scheduling state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionState {
    /// A reveal currently owns the display
    pub is_drawing: bool,
    /// The live tick timer, if any
    pub active_timer: Option<TimerHandle>,
}

pub struct SessionController {
    id: Uuid,
    config: DrawConfig,
    pool: Pool,
    undo_stack: UndoStack,
    animation: AnimationController,
    winner_highlight: Option<Deadline>,
    clock: Box<dyn Clock>,
    rng: Box<dyn RandomSource>,
    event_bus: EventBus,
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("id", &self.id)
            .field("pool", &self.pool)
            .field("undo_depth", &self.undo_stack.len())
            .field("animation", &self.animation.state().name())
            .field("event_bus", &self.event_bus)
            .finish()
    }
}

impl SessionController {
    pub fn new(config: DrawConfig, clock: Box<dyn Clock>, rng: Box<dyn RandomSource>) -> Self {
        let id = Uuid::new_v4();
        log::info!("Draw session {} created", id);
        Self {
            id,
            pool: Pool::new(&config),
            undo_stack: UndoStack::new(config.undo_capacity),
            animation: AnimationController::new(&config),
            winner_highlight: None,
            clock,
            rng,
            event_bus: EventBus::new(),
            config,
        }
    }

    /// Registers an observer for all notifications of this session
    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.event_bus.subscribe(handler);
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &DrawConfig {
        &self.config
    }

    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    /// The participant shown in the "current" slot: the last drawn one
    pub fn current(&self) -> Option<&Participant> {
        self.pool.last_drawn()
    }

    pub fn has_participants(&self) -> bool {
        !self.pool.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.undo_stack.can_undo()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn animation_state(&self) -> &AnimationState {
        self.animation.state()
    }

    pub fn session_state(&self) -> SessionState {
        SessionState {
            is_drawing: self.animation.is_running(),
            active_timer: self.animation.active_timer(),
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.animation.is_running()
    }

    /// Whether the winner reveal highlight is still showing
    pub fn is_highlighting_winner(&self) -> bool {
        self.winner_highlight.is_some()
    }

    pub fn is_emphasized(&self) -> bool {
        self.animation.is_emphasized()
    }

    /// Replaces the pool with `count` fresh participants, forgetting history
    /// and all undo snapshots
    pub fn add_participants(&mut self, count: u32) -> DrawResult<()> {
        let result = self.try_add_participants(count);
        self.report(result)
    }

    fn try_add_participants(&mut self, count: u32) -> DrawResult<()> {
        if self.animation.is_running() {
            return Err(DrawError::DrawInProgress);
        }
        self.pool.reset(count)?;
        self.undo_stack.clear();
        self.drop_winner_highlight();

        log::info!("Pool reset with {} participants", count);
        self.emit_participants_changed();
        self.emit_current_changed();
        self.emit_status(
            StatusLevel::Success,
            format!("Added {} participants. Start the draw when ready", count),
        );
        Ok(())
    }

    /// Appends `count` participants numbered after the current highest id
    pub fn add_more(&mut self, count: u32) -> DrawResult<Vec<Participant>> {
        let result = self.try_add_more(count);
        self.report(result)
    }

    fn try_add_more(&mut self, count: u32) -> DrawResult<Vec<Participant>> {
        if self.animation.is_running() {
            return Err(DrawError::DrawInProgress);
        }
        let added = self.pool.append_more(count)?;

        log::info!(
            "Appended {} participants, {} total",
            added.len(),
            self.pool.all().len()
        );
        self.emit_participants_changed();
        self.emit_status(
            StatusLevel::Success,
            format!(
                "Added {} participants. Total: {}, remaining: {}",
                added.len(),
                self.pool.all().len(),
                self.pool.remaining().len()
            ),
        );
        Ok(added)
    }

    /// Arms the reveal. The winner is announced later by `WinnerRevealed`,
    /// once enough ticks have been driven through [`Self::poll`].
    pub fn start_draw(&mut self) -> DrawResult<u32> {
        let result = self.try_start_draw();
        self.report(result)
    }

    fn try_start_draw(&mut self) -> DrawResult<u32> {
        if self.pool.is_exhausted() {
            return Err(DrawError::PoolExhausted);
        }
        if !self.animation.is_idle() {
            return Err(DrawError::DrawInProgress);
        }

        let now = self.clock.now_ms();
        let total_ticks = self.animation.start(&self.pool, self.rng.as_mut(), now)?;
        self.drop_winner_highlight();

        log::info!(
            "Draw started over {} remaining participants",
            self.pool.remaining().len()
        );
        self.event_bus.emit(SessionEvent::DrawStarted { total_ticks });
        self.emit_status(StatusLevel::Warning, "Drawing...".to_owned());
        Ok(total_ticks)
    }

    /// Rolls back the most recent committed draw
    pub fn undo_last(&mut self) -> DrawResult<()> {
        let result = self.try_undo_last();
        self.report(result)
    }

    fn try_undo_last(&mut self) -> DrawResult<()> {
        let snapshot = self.undo_stack.pop()?;
        log::info!("Undoing draw recorded at {}ms", snapshot.timestamp);
        UndoStack::restore(snapshot, &mut self.pool);
        self.drop_winner_highlight();

        self.emit_participants_changed();
        self.emit_current_changed();
        self.emit_status(StatusLevel::Success, "Last draw undone".to_owned());
        Ok(())
    }

    /// Stops any reveal and empties the pool and the undo stack. Never fails.
    pub fn reset_all(&mut self) {
        // the timer must be gone before the pool changes under it
        if self.animation.cancel() {
            self.event_bus.emit(SessionEvent::DrawCancelled);
        }
        if self.animation.clear_emphasis() {
            self.event_bus.emit(SessionEvent::EmphasisCleared);
        }
        self.drop_winner_highlight();
        self.pool.clear();
        self.undo_stack.clear();

        log::info!("Session {} reset", self.id);
        self.emit_participants_changed();
        self.emit_current_changed();
        self.emit_status(
            StatusLevel::Success,
            "Session reset. Enter a participant count to begin".to_owned(),
        );
    }

    /// Moves a drawn participant back into the remaining pool
    pub fn return_to_pool(&mut self, id: ParticipantId) -> DrawResult<Participant> {
        let result = self.try_return_to_pool(id);
        self.report(result)
    }

    fn try_return_to_pool(&mut self, id: ParticipantId) -> DrawResult<Participant> {
        let participant = self.pool.return_to_pool(id)?;

        log::info!("Participant {} returned to pool", participant.name());
        self.emit_participants_changed();
        self.emit_current_changed();
        self.emit_status(
            StatusLevel::Success,
            format!(
                "{} returned to the draw. Available: {}",
                participant.name(),
                self.pool.remaining().len()
            ),
        );
        Ok(participant)
    }

    /// Fires every timer that is due at the current clock reading, in order.
    ///
    /// Hosts call this from their event loop; it never blocks.
    pub fn poll(&mut self) {
        let now = self.clock.now_ms();

        while let Some(outcome) = self.animation.on_tick(
            now,
            &mut self.pool,
            &mut self.undo_stack,
            self.rng.as_mut(),
        ) {
            match outcome {
                TickOutcome::Preview(frame) => {
                    self.emit_preview(&frame.participant, frame.emphasis);
                }
                TickOutcome::Revealed { last_frame, winner } => {
                    self.emit_preview(&last_frame.participant, last_frame.emphasis);
                    self.on_winner(winner, now);
                    break;
                }
                TickOutcome::Cancelled => {
                    self.event_bus.emit(SessionEvent::DrawCancelled);
                    break;
                }
            }
        }

        if self.animation.take_expired_emphasis(now) {
            self.event_bus.emit(SessionEvent::EmphasisCleared);
        }
        if self.winner_highlight.is_some_and(|d| d.is_due(now)) {
            self.drop_winner_highlight();
        }
    }

    /// Earliest time at which [`Self::poll`] has something to do
    pub fn next_deadline(&self) -> Option<Millis> {
        let highlight = self.winner_highlight.map(|d| d.at());
        match (self.animation.next_deadline(), highlight) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Current reading of the injected clock
    pub fn now_ms(&self) -> Millis {
        self.clock.now_ms()
    }

    fn on_winner(&mut self, winner: Participant, now: Millis) {
        log::info!(
            "Winner: {} ({} remaining)",
            winner.name(),
            self.pool.remaining().len()
        );
        self.winner_highlight = Some(Deadline::after(now, self.config.winner_highlight_ms));

        self.emit_participants_changed();
        self.event_bus.emit(SessionEvent::WinnerRevealed {
            participant: winner.clone(),
        });
        self.emit_current_changed();

        let remaining = self.pool.remaining().len();
        if remaining > 0 {
            self.emit_status(
                StatusLevel::Success,
                format!("Selected: {}. Remaining: {}", winner.name(), remaining),
            );
        } else {
            self.emit_status(
                StatusLevel::Warning,
                format!("Last one: {}. Everyone has been drawn!", winner.name()),
            );
        }
    }

    /// Ends a live winner highlight, expired or not
    fn drop_winner_highlight(&mut self) {
        if self.winner_highlight.take().is_some() {
            self.event_bus.emit(SessionEvent::WinnerHighlightCleared);
        }
    }

    /// Turns a failed operation into an `OperationFailed` notification
    fn report<T>(&self, result: DrawResult<T>) -> DrawResult<T> {
        if let Err(err) = &result {
            log::warn!("Operation rejected: {}", err);
            self.event_bus.emit(SessionEvent::OperationFailed {
                kind: err.kind(),
                message: err.to_string(),
            });
        }
        result
    }

    fn emit_preview(&self, participant: &Participant, emphasis: bool) {
        self.event_bus.emit(SessionEvent::PreviewTick {
            name: participant.name().to_owned(),
        });
        if emphasis {
            self.event_bus.emit(SessionEvent::EmphasisPulse);
        }
    }

    fn emit_participants_changed(&self) {
        self.event_bus.emit(SessionEvent::ParticipantsChanged {
            all: self.pool.all().to_vec(),
            remaining: self.pool.remaining().to_vec(),
            history: self.pool.history().to_vec(),
        });
    }

    fn emit_current_changed(&self) {
        self.event_bus.emit(SessionEvent::CurrentChanged {
            current: self.current().cloned(),
        });
    }

    fn emit_status(&self, level: StatusLevel, message: String) {
        self.event_bus.emit(SessionEvent::Status { level, message });
    }
}
