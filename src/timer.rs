//! Owned scheduling resources for the session.
//!
//! The controller never asks the runtime for a timer. It holds an [`Interval`]
//! while the countdown runs and a [`Deadline`] while the restart prompt is
//! pending, and checks both against a [`Clock`] whenever it is polled. Dropping
//! or cancelling the value is the same as clearing the timer: nothing can fire
//! afterwards.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of "now" for the controller
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Production clock backed by [`Instant::now`]
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Hand-driven clock for tests. Clones share the same instant.
#[derive(Clone, Debug)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// Periodic schedule anchored at a start instant.
///
/// Due times are `anchor + n * period`, so late polling never drifts the
/// schedule; it just reports several elapsed periods at once.
#[derive(Debug)]
pub struct Interval {
    period: Duration,
    next_due: Instant,
}

impl Interval {
    pub fn new(anchor: Instant, period: Duration) -> Self {
        Self {
            period,
            next_due: anchor + period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn next_due(&self) -> Instant {
        self.next_due
    }

    /// Scheduled instants of every period that elapsed by `now`, oldest first.
    /// Advances the schedule past them.
    pub fn take_due(&mut self, now: Instant) -> Vec<Instant> {
        let mut fired = Vec::new();
        while self.next_due <= now {
            fired.push(self.next_due);
            self.next_due += self.period;
        }
        fired
    }

    /// Release the schedule.
    pub fn cancel(self) {
        tracing::trace!(next_due = ?self.next_due, "interval cancelled");
    }
}

/// One-shot schedule.
#[derive(Debug)]
pub struct Deadline {
    due: Instant,
}

impl Deadline {
    pub fn after(anchor: Instant, delay: Duration) -> Self {
        Self {
            due: anchor + delay,
        }
    }

    pub fn due(&self) -> Instant {
        self.due
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.due
    }

    pub fn cancel(self) {
        tracing::trace!(due = ?self.due, "deadline cancelled");
    }
}
