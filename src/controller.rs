//! Session controller: the only stateful logic in the game.
//!
//! Every operation runs to completion on the caller's thread. After each
//! transition a fresh [`SessionState`] snapshot goes out to every subscriber.

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Instant;

use tracing::{debug, info, trace};

use crate::session::{
    BorderState, Outcome, SessionConfig, SessionState, TICK_PERIOD, WRONG_PASSWORD_MESSAGE,
};
use crate::timer::{Clock, Deadline, Interval, SystemClock};

/// Result of a password submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Accepted,
    Rejected,
    /// No running session to submit to
    Ignored,
}

pub struct SessionController<C: Clock = SystemClock> {
    config: SessionConfig,
    clock: C,
    state: SessionState,
    countdown: Option<Interval>,
    restart_timer: Option<Deadline>,
    subscribers: Vec<Sender<SessionState>>,
}

impl SessionController<SystemClock> {
    pub fn new(config: SessionConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> SessionController<C> {
    pub fn with_clock(config: SessionConfig, clock: C) -> Self {
        Self {
            config,
            clock,
            state: SessionState::default(),
            countdown: None,
            restart_timer: None,
            subscribers: Vec::new(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Whether the countdown interval is held
    pub fn is_ticking(&self) -> bool {
        self.countdown.is_some()
    }

    /// Whether the restart prompt is scheduled but not yet shown
    pub fn restart_pending(&self) -> bool {
        self.restart_timer.is_some()
    }

    /// Receive the current snapshot now and one per transition afterwards.
    pub fn subscribe(&mut self) -> Receiver<SessionState> {
        let (tx, rx) = mpsc::channel();
        let _ = tx.send(self.state.clone());
        self.subscribers.push(tx);
        rx
    }

    /// Begin a fresh session regardless of the current one.
    pub fn start(&mut self) {
        let now = self.clock.now();
        self.cancel_timers();

        self.state = SessionState {
            remaining_seconds: Some(self.config.duration_secs),
            running: true,
            ..SessionState::default()
        };
        info!(duration_secs = self.config.duration_secs, "session started");

        if self.config.duration_secs == 0 {
            self.expire(now);
        } else {
            self.countdown = Some(Interval::new(now, TICK_PERIOD));
        }
        self.emit();
    }

    /// Count down one second. No effect unless the session is running.
    pub fn tick(&mut self) {
        let now = self.clock.now();
        self.tick_at(now);
    }

    fn tick_at(&mut self, at: Instant) {
        if !self.state.running {
            trace!("tick ignored, session not running");
            return;
        }
        let remaining = match self.state.remaining_seconds {
            Some(r) if r > 0 => r - 1,
            _ => return,
        };

        self.state.remaining_seconds = Some(remaining);
        trace!(remaining, "tick");

        if remaining == 0 {
            self.expire(at);
        }
        self.emit();
    }

    /// Fire whatever the owned schedules say is due by now.
    pub fn poll(&mut self) {
        let now = self.clock.now();

        let due = match self.countdown.as_mut() {
            Some(interval) => interval.take_due(now),
            None => Vec::new(),
        };
        for at in due {
            if !self.state.running {
                break;
            }
            self.tick_at(at);
        }

        if self.restart_timer.as_ref().is_some_and(|d| d.is_due(now)) {
            self.restart_timer = None;
            self.state.show_restart = true;
            debug!("restart available");
            self.emit();
        }
    }

    /// Replace the typed password. Clears any wrong password signal.
    pub fn set_password_input(&mut self, text: impl Into<String>) {
        self.poll();
        if self.state.is_terminal() {
            debug!(outcome = %self.state.outcome, "input ignored after session end");
            return;
        }

        self.state.password_input = text.into();
        self.state.error_message = None;
        self.state.border = BorderState::Neutral;
        self.emit();
    }

    /// Check the typed password. Schedules that fell due since the last
    /// poll are applied first, so a late submit never beats the deadline.
    pub fn submit_password(&mut self) -> Submission {
        self.poll();
        if !self.state.accepts_input() {
            debug!(
                running = self.state.running,
                outcome = %self.state.outcome,
                "submission ignored"
            );
            return Submission::Ignored;
        }

        if self.state.password_input == self.config.secret {
            let now = self.clock.now();
            self.state.outcome = Outcome::Success;
            self.state.running = false;
            self.state.frozen_seconds = self.state.remaining_seconds;
            self.state.border = BorderState::Success;
            self.state.error_message = None;
            if let Some(interval) = self.countdown.take() {
                interval.cancel();
            }
            self.schedule_restart(now);

            info!(remaining = ?self.state.frozen_seconds, "password accepted");
            self.emit();
            Submission::Accepted
        } else {
            self.state.error_message = Some(WRONG_PASSWORD_MESSAGE);
            self.state.border = BorderState::Failure;

            debug!(
                length = self.state.password_input.chars().count(),
                "password rejected"
            );
            self.emit();
            Submission::Rejected
        }
    }

    /// Full reload: back to the pristine pre-start state.
    pub fn restart(&mut self) {
        self.cancel_timers();
        self.state = SessionState::default();
        info!("session reset");
        self.emit();
    }

    /// Release every schedule. Nothing fires after this.
    pub fn teardown(&mut self) {
        self.cancel_timers();
        debug!("controller torn down");
    }

    fn expire(&mut self, at: Instant) {
        self.state.running = false;
        self.state.outcome = Outcome::Expired;
        if let Some(interval) = self.countdown.take() {
            interval.cancel();
        }
        self.schedule_restart(at);
        info!("session expired");
    }

    fn schedule_restart(&mut self, at: Instant) {
        if let Some(previous) = self.restart_timer.take() {
            previous.cancel();
        }
        self.restart_timer = Some(Deadline::after(at, self.config.restart_delay));
    }

    fn cancel_timers(&mut self) {
        if let Some(interval) = self.countdown.take() {
            interval.cancel();
        }
        if let Some(deadline) = self.restart_timer.take() {
            deadline.cancel();
        }
    }

    fn emit(&mut self) {
        let snapshot = self.state.clone();
        self.subscribers
            .retain(|tx| tx.send(snapshot.clone()).is_ok());
    }
}

impl<C: Clock> Drop for SessionController<C> {
    fn drop(&mut self) {
        self.cancel_timers();
    }
}
