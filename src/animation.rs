//! The timed reveal that precedes every committed draw.
//!
//! A reveal is a run of cosmetic preview ticks followed by one commit:
//!
//! ```text
//!            start()              last tick
//! ┌──────┐ ─────────► ┌─────────┐ ─────────► ┌────────────┐
//! │ Idle │            │ Running │            │ Completing │ ──► Idle
//! └──────┘ ◄───────── └─────────┘            └────────────┘
//!             cancel() / pool emptied
//!            (via Cancelled)
//! ```
//!
//! Preview ticks only ever see the pool through a shared reference. The
//! commit goes through [`Selector::commit`] and happens exactly once per
//! completed reveal.

use crate::config::DrawConfig;
use crate::error::{DrawError, DrawResult};
use crate::participant::Participant;
use crate::pool::Pool;
use crate::random::{self, RandomSource};
use crate::selector::Selector;
use crate::time::{Deadline, Millis, RepeatingTimer, TimerHandle, TimerIds};
use crate::undo::UndoStack;

/// Phase of the reveal animation
#[derive(Debug, Clone, Default)]
pub enum AnimationState {
    /// No reveal in progress
    #[default]
    Idle,
    /// Preview ticks are firing
    Running {
        ticks_elapsed: u32,
        total_ticks: u32,
        timer: RepeatingTimer,
    },
    /// The timer is stopped and the real draw is being committed
    Completing,
    /// The reveal was stopped without committing
    Cancelled,
}

impl AnimationState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Running { .. } => "Running",
            Self::Completing => "Completing",
            Self::Cancelled => "Cancelled",
        }
    }
}

/// One cosmetic frame of the reveal
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewFrame {
    /// Zero-based tick index within the reveal
    pub tick: u32,
    pub participant: Participant,
    /// Whether this tick also pulses the emphasis cue
    pub emphasis: bool,
}

/// What a fired tick produced
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// A preview frame; more ticks follow
    Preview(PreviewFrame),
    /// The final preview frame followed by the committed draw
    Revealed {
        last_frame: PreviewFrame,
        winner: Participant,
    },
    /// The pool was empty when the tick fired; nothing was committed
    Cancelled,
}

/// Drives the cancellable preview sequence and triggers the commit
#[derive(Debug)]
pub struct AnimationController {
    state: AnimationState,
    timer_ids: TimerIds,
    emphasis_clear: Option<Deadline>,
    tick_interval_ms: Millis,
    min_ticks: u32,
    max_ticks: u32,
    duration_scale: f64,
    emphasis_frequency: u32,
    emphasis_duration_ms: Millis,
}

impl AnimationController {
    pub fn new(config: &DrawConfig) -> Self {
        Self {
            state: AnimationState::Idle,
            timer_ids: TimerIds::default(),
            emphasis_clear: None,
            tick_interval_ms: config.tick_interval_ms,
            min_ticks: config.min_ticks,
            max_ticks: config.max_ticks,
            duration_scale: config.duration_scale,
            emphasis_frequency: config.emphasis_frequency.max(1),
            emphasis_duration_ms: config.emphasis_duration_ms,
        }
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, AnimationState::Idle)
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, AnimationState::Running { .. })
    }

    /// Handle of the live repeating timer, if any
    pub fn active_timer(&self) -> Option<TimerHandle> {
        match &self.state {
            AnimationState::Running { timer, .. } => Some(timer.handle()),
            _ => None,
        }
    }

    /// Whether an emphasis pulse is currently showing
    pub fn is_emphasized(&self) -> bool {
        self.emphasis_clear.is_some()
    }

    /// Earliest moment at which [`Self::on_tick`] or
    /// [`Self::take_expired_emphasis`] has work to do
    pub fn next_deadline(&self) -> Option<Millis> {
        let tick = match &self.state {
            AnimationState::Running { timer, .. } => Some(timer.next_due()),
            _ => None,
        };
        let emphasis = self.emphasis_clear.map(|d| d.at());
        match (tick, emphasis) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// `floor((min_ticks + r) * duration_scale)` with `r` uniform in
    /// `[0, max_ticks - min_ticks)`, never less than one tick
    pub fn roll_total_ticks(&self, rng: &mut dyn RandomSource) -> u32 {
        let extra = random::uniform_int(rng, 0, self.max_ticks.saturating_sub(self.min_ticks));
        let scaled = (f64::from(self.min_ticks + extra) * self.duration_scale).floor();
        (scaled as u32).max(1)
    }

    /// Arms the tick timer. Returns the number of ticks the reveal will run.
    pub fn start(&mut self, pool: &Pool, rng: &mut dyn RandomSource, now: Millis) -> DrawResult<u32> {
        if !self.is_idle() {
            return Err(DrawError::AlreadyRunning);
        }
        if pool.is_exhausted() {
            return Err(DrawError::PoolExhausted);
        }

        let total_ticks = self.roll_total_ticks(rng);
        let timer = RepeatingTimer::arm(self.timer_ids.allocate(), self.tick_interval_ms, now);
        log::debug!(
            "Reveal armed: {} ticks every {}ms ({:?})",
            total_ticks,
            self.tick_interval_ms,
            timer.handle()
        );
        self.state = AnimationState::Running {
            ticks_elapsed: 0,
            total_ticks,
            timer,
        };
        Ok(total_ticks)
    }

    /// Stops a running reveal without committing. Returns whether a reveal
    /// was actually stopped.
    pub fn cancel(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        // dropping the Running state drops its timer
        self.state = AnimationState::Cancelled;
        log::debug!("Reveal cancelled");
        self.state = AnimationState::Idle;
        true
    }

    /// Drops a pending emphasis pulse. Returns whether one was showing.
    pub fn clear_emphasis(&mut self) -> bool {
        self.emphasis_clear.take().is_some()
    }

    /// Returns true once, when the current emphasis pulse has expired
    pub fn take_expired_emphasis(&mut self, now: Millis) -> bool {
        match self.emphasis_clear {
            Some(deadline) if deadline.is_due(now) => {
                self.emphasis_clear = None;
                true
            }
            _ => false,
        }
    }

    /// Fires the next tick if it is due at `now`.
    ///
    /// Call repeatedly until it returns `None` to catch up on every elapsed
    /// interval in order.
    pub fn on_tick(
        &mut self,
        now: Millis,
        pool: &mut Pool,
        undo_stack: &mut UndoStack,
        rng: &mut dyn RandomSource,
    ) -> Option<TickOutcome> {
        let (tick, due) = match &mut self.state {
            AnimationState::Running {
                ticks_elapsed,
                timer,
                ..
            } => (*ticks_elapsed, timer.fire_if_due(now)?),
            _ => return None,
        };

        let Some(frame) = self.preview(tick, pool, rng) else {
            self.state = AnimationState::Cancelled;
            log::info!("Pool emptied during reveal, nothing committed");
            self.state = AnimationState::Idle;
            return Some(TickOutcome::Cancelled);
        };
        // measured from when the tick was due, not from a late poll
        if frame.emphasis {
            self.emphasis_clear = Some(Deadline::after(due, self.emphasis_duration_ms));
        }

        let finished = match &mut self.state {
            AnimationState::Running {
                ticks_elapsed,
                total_ticks,
                ..
            } => {
                *ticks_elapsed += 1;
                *ticks_elapsed >= *total_ticks
            }
            _ => false,
        };
        if !finished {
            return Some(TickOutcome::Preview(frame));
        }

        match self.complete(pool, undo_stack, rng, now) {
            Ok(winner) => Some(TickOutcome::Revealed {
                last_frame: frame,
                winner,
            }),
            Err(err) => {
                log::warn!("Reveal finished without a winner: {}", err);
                Some(TickOutcome::Cancelled)
            }
        }
    }

    /// Picks a random remaining participant to show. Read-only by construction.
    fn preview(&self, tick: u32, pool: &Pool, rng: &mut dyn RandomSource) -> Option<PreviewFrame> {
        let remaining = pool.remaining();
        if remaining.is_empty() {
            return None;
        }
        let participant = remaining[random::uniform_index(rng, remaining.len())].clone();
        Some(PreviewFrame {
            tick,
            participant,
            emphasis: tick % self.emphasis_frequency == 0,
        })
    }

    /// Stops the timer and commits the real draw
    fn complete(
        &mut self,
        pool: &mut Pool,
        undo_stack: &mut UndoStack,
        rng: &mut dyn RandomSource,
        now: Millis,
    ) -> DrawResult<Participant> {
        self.state = AnimationState::Completing;
        let result = Selector::commit(pool, undo_stack, rng, now);
        self.state = AnimationState::Idle;
        result
    }
}
