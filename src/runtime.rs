use std::cell::Cell;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

/// UI refresh period. The session countdown runs on its own 1 s schedule and
/// is checked on every one of these.
pub const TICK_RATE_MS: u64 = 100;

/// Everything the event loop reacts to, in arrival order
#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Tick,
    /// The event source hung up; nothing more will arrive.
    Closed,
}

/// Source of terminal events (keyboard, resize)
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError>;
}

/// Reads crossterm events on a background thread and forwards them. The
/// thread exits once the receiving side is gone.
pub struct CrosstermEventSource {
    rx: Receiver<AppEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let forwarded = match event::read() {
                // Release/repeat events would double every keystroke on Windows
                Ok(CtEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                    Some(AppEvent::Key(key))
                }
                Ok(CtEvent::Resize(_, _)) => Some(AppEvent::Resize),
                Ok(_) => None,
                Err(err) => {
                    tracing::warn!(error = %err, "terminal event reader stopped");
                    break;
                }
            };

            if let Some(ev) = forwarded {
                if tx.send(ev).is_err() {
                    break;
                }
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Default for FixedTicker {
    fn default() -> Self {
        Self::new(Duration::from_millis(TICK_RATE_MS))
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Event source fed from a channel, for tests
pub struct TestEventSource {
    rx: Receiver<AppEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<AppEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Serializes input and ticks into a single stream, one event per step.
/// A tick is emitted once per interval no matter how busy the input is.
pub struct Runner<E: EventSource, T: Ticker> {
    event_source: E,
    ticker: T,
    last_tick: Cell<Instant>,
}

impl<E: EventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
            last_tick: Cell::new(Instant::now()),
        }
    }

    /// Returns Tick when one is due, otherwise waits for input until the next
    /// tick is due. Closed once the source is gone.
    pub fn step(&self) -> AppEvent {
        let interval = self.ticker.interval();
        let elapsed = self.last_tick.get().elapsed();
        if elapsed >= interval {
            return self.tick();
        }

        match self.event_source.recv_timeout(interval - elapsed) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) => self.tick(),
            Err(RecvTimeoutError::Disconnected) => AppEvent::Closed,
        }
    }

    fn tick(&self) -> AppEvent {
        self.last_tick.set(Instant::now());
        AppEvent::Tick
    }
}
