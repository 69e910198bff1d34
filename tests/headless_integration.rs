use std::sync::mpsc::{self, Sender};
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use escaperoom::{
    controller::{SessionController, Submission},
    runtime::{AppEvent, FixedTicker, Runner, TestEventSource},
    session::{BorderState, Outcome, SessionConfig, SESSION_DURATION_SECS, WRONG_PASSWORD_MESSAGE},
    timer::ManualClock,
};

const UI_TICK: Duration = Duration::from_millis(100);
const TICKS_PER_SECOND: u64 = 10;

fn key(c: char) -> AppEvent {
    AppEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

fn enter() -> AppEvent {
    AppEvent::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
}

/// Minimal event loop: ticks advance the manual clock, keys go to the controller.
struct Harness {
    runner: Runner<TestEventSource, FixedTicker>,
    ctl: SessionController<ManualClock>,
    clock: ManualClock,
    tx: Sender<AppEvent>,
    ticks: u64,
}

impl Harness {
    fn new(config: SessionConfig) -> Self {
        let clock = ManualClock::new();
        let ctl = SessionController::with_clock(config, clock.clone());
        let (tx, rx) = mpsc::channel();
        let runner = Runner::new(
            TestEventSource::new(rx),
            FixedTicker::new(Duration::from_millis(1)),
        );
        Self {
            runner,
            ctl,
            clock,
            tx,
            ticks: 0,
        }
    }

    fn send(&self, ev: AppEvent) {
        self.tx.send(ev).unwrap();
    }

    /// One runner step. Returns whether a key was handled and any submission.
    fn step(&mut self) -> (bool, Option<Submission>) {
        match self.runner.step() {
            AppEvent::Tick => {
                self.ticks += 1;
                self.clock.advance(UI_TICK);
                self.ctl.poll();
                (false, None)
            }
            AppEvent::Resize | AppEvent::Closed => (false, None),
            AppEvent::Key(k) => {
                let submission = match k.code {
                    KeyCode::Enter if !self.ctl.state().has_started() => {
                        self.ctl.start();
                        None
                    }
                    KeyCode::Enter => Some(self.ctl.submit_password()),
                    KeyCode::Char(c) => {
                        let mut text = self.ctl.state().password_input.clone();
                        text.push(c);
                        self.ctl.set_password_input(text);
                        None
                    }
                    _ => None,
                };
                (true, submission)
            }
        }
    }

    /// Step until `n` keys were handled, interleaved ticks included.
    fn handle_keys(&mut self, n: usize) -> Option<Submission> {
        let mut handled = 0;
        let mut last = None;
        while handled < n {
            let (was_key, submission) = self.step();
            if was_key {
                handled += 1;
            }
            last = submission.or(last);
        }
        last
    }

    fn run_ticks(&mut self, n: u64) {
        let target = self.ticks + n;
        while self.ticks < target {
            self.step();
        }
    }

    fn type_and_submit(&mut self, text: &str) -> Option<Submission> {
        for c in text.chars() {
            self.send(key(c));
        }
        self.send(enter());
        self.handle_keys(text.chars().count() + 1)
    }
}

#[test]
fn headless_win_freezes_clock() {
    let mut h = Harness::new(SessionConfig::default());
    let snapshots = h.ctl.subscribe();

    h.send(enter());
    h.handle_keys(1);
    assert!(h.ctl.state().running);
    let ticks_before_start = h.ticks;

    // Wrong guess first
    assert_eq!(h.type_and_submit("XMAS"), Some(Submission::Rejected));
    assert_eq!(h.ctl.state().error_message, Some(WRONG_PASSWORD_MESSAGE));
    assert_eq!(h.ctl.state().border, BorderState::Failure);

    h.run_ticks(30);
    let elapsed_secs = (h.ticks - ticks_before_start) / TICKS_PER_SECOND;
    assert!(elapsed_secs >= 3);
    assert_eq!(
        h.ctl.state().remaining_seconds,
        Some(SESSION_DURATION_SECS - elapsed_secs)
    );

    h.ctl.set_password_input("");
    assert_eq!(h.type_and_submit("CMPY"), Some(Submission::Accepted));
    assert_eq!(h.ctl.state().outcome, Outcome::Success);
    let frozen = h.ctl.state().frozen_seconds;
    let elapsed_secs = (h.ticks - ticks_before_start) / TICKS_PER_SECOND;
    assert_eq!(frozen, Some(SESSION_DURATION_SECS - elapsed_secs));

    // Clock keeps going, display does not
    h.run_ticks(50);
    assert_eq!(h.ctl.state().display_seconds(), frozen);
    assert!(h.ctl.state().show_restart);

    let seen: Vec<_> = snapshots.try_iter().collect();
    assert!(seen.iter().any(|s| s.border == BorderState::Failure));
    assert_eq!(seen.last().map(|s| s.show_restart), Some(true));
}

#[test]
fn headless_expiry_then_restart_prompt() {
    let config = SessionConfig {
        duration_secs: 3,
        ..SessionConfig::default()
    };
    let mut h = Harness::new(config);
    h.send(enter());
    h.handle_keys(1);
    let started_at = h.ticks;

    let mut expired_at = None;
    let mut restart_at = None;
    while h.ticks < started_at + 100 {
        h.run_ticks(1);
        if expired_at.is_none() && h.ctl.state().outcome == Outcome::Expired {
            expired_at = Some(h.ticks);
        }
        if h.ctl.state().show_restart {
            restart_at = Some(h.ticks);
            break;
        }
    }

    let expired_at = expired_at.expect("session should expire");
    let restart_at = restart_at.expect("restart prompt should appear");
    assert_eq!(expired_at - started_at, 3 * TICKS_PER_SECOND);
    assert_eq!(h.ctl.state().remaining_seconds, Some(0));
    assert!(!h.ctl.state().running);
    // 2 s at 100 ms per tick
    assert_eq!(restart_at - expired_at, 20);
}

#[test]
fn headless_typing_cannot_outlast_the_deadline() {
    let config = SessionConfig {
        duration_secs: 1,
        ..SessionConfig::default()
    };
    let mut h = Harness::new(config);
    h.send(enter());
    h.handle_keys(1);

    // Deadline passes between polls, then the right password arrives
    h.clock.advance(Duration::from_secs(2));
    assert_eq!(h.type_and_submit("CMPY"), Some(Submission::Ignored));
    assert_eq!(h.ctl.state().outcome, Outcome::Expired);
    assert_eq!(h.ctl.state().frozen_seconds, None);
}

#[test]
fn headless_teardown_stops_countdown() {
    let mut h = Harness::new(SessionConfig::default());

    h.ctl.start();
    h.run_ticks(10);
    assert_eq!(h.ctl.state().remaining_seconds, Some(5399));

    h.ctl.teardown();
    h.run_ticks(100);
    assert_eq!(h.ctl.state().remaining_seconds, Some(5399));
}
