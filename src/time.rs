//! Clocks and the cooperative timer primitives driven by [`crate::SessionController::poll`].
//!
//! Nothing here sleeps or spawns: a timer only records when it is next due and
//! the owner asks it whether that moment has passed.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Milliseconds on a monotonic timeline
pub type Millis = u64;

/// A monotonic time source
pub trait Clock {
    fn now_ms(&self) -> Millis;
}

/// Wall clock of the host platform, counted from construction
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: std::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Clock for SystemClock {
    fn now_ms(&self) -> Millis {
        self.origin.elapsed().as_millis() as Millis
    }
}

/// Wall clock of the host platform, read from `performance.now()`
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct SystemClock;

#[cfg(target_arch = "wasm32")]
impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(target_arch = "wasm32")]
impl Clock for SystemClock {
    fn now_ms(&self) -> Millis {
        web_sys::window()
            .and_then(|window| window.performance())
            .map(|perf| perf.now() as Millis)
            .unwrap_or(0)
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

/// A clock that only moves when told to. Clones share the same timeline.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(now: Millis) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(now)),
        }
    }

    pub fn advance(&self, delta: Millis) {
        self.now.fetch_add(delta, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> Millis {
        self.now.load(Ordering::SeqCst)
    }
}

/// Opaque identity of an armed timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// Hands out timer handles that are never reused
#[derive(Debug, Default)]
pub struct TimerIds {
    next: u64,
}

impl TimerIds {
    pub fn allocate(&mut self) -> TimerHandle {
        self.next += 1;
        TimerHandle(self.next)
    }
}

/// Fires once per `interval`, first at `armed_at + interval`
#[derive(Debug, Clone)]
pub struct RepeatingTimer {
    handle: TimerHandle,
    interval: Millis,
    next_due: Millis,
}

impl RepeatingTimer {
    pub fn arm(handle: TimerHandle, interval: Millis, now: Millis) -> Self {
        Self {
            handle,
            interval: interval.max(1),
            next_due: now + interval.max(1),
        }
    }

    pub fn handle(&self) -> TimerHandle {
        self.handle
    }

    pub fn next_due(&self) -> Millis {
        self.next_due
    }

    /// Consumes one firing if it is due and returns the time it was
    /// scheduled for. Call repeatedly to catch up on several elapsed
    /// intervals, one firing at a time.
    pub fn fire_if_due(&mut self, now: Millis) -> Option<Millis> {
        if now < self.next_due {
            return None;
        }
        let due = self.next_due;
        self.next_due += self.interval;
        Some(due)
    }
}

/// A single point in time after which something expires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    at: Millis,
}

impl Deadline {
    pub fn after(now: Millis, delay: Millis) -> Self {
        Self { at: now + delay }
    }

    pub fn at(&self) -> Millis {
        self.at
    }

    pub fn is_due(&self, now: Millis) -> bool {
        now >= self.at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeating_timer_catches_up_one_firing_at_a_time() {
        let mut ids = TimerIds::default();
        let mut timer = RepeatingTimer::arm(ids.allocate(), 80, 1000);
        assert_eq!(timer.fire_if_due(1079), None);
        assert_eq!(timer.fire_if_due(1250), Some(1080));
        assert_eq!(timer.fire_if_due(1250), Some(1160));
        assert_eq!(timer.fire_if_due(1250), Some(1240));
        assert_eq!(timer.fire_if_due(1250), None);
        assert_eq!(timer.next_due(), 1320);
    }

    #[test]
    fn timer_handles_are_unique() {
        let mut ids = TimerIds::default();
        assert_ne!(ids.allocate(), ids.allocate());
    }

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::starting_at(5);
        let other = clock.clone();
        clock.advance(10);
        assert_eq!(other.now_ms(), 15);
    }
}
