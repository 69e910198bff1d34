use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

pub const REFRESH_WARNING: &str = "You cannot refresh the page while the timer is running.";

/// Best-effort block on the refresh gesture (F5 or Ctrl+R) while a session
/// is running. It only sees keys routed through the app; it cannot stop the
/// process from being killed.
#[derive(Debug, Default)]
pub struct RefreshGuard {
    registered: bool,
}

impl RefreshGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }

    /// Register while `running`, unregister otherwise.
    pub fn sync(&mut self, running: bool) {
        if running != self.registered {
            self.registered = running;
            debug!(registered = running, "refresh guard");
        }
    }

    /// True if `key` was a refresh attempt that must be suppressed.
    pub fn intercepts(&self, key: &KeyEvent) -> bool {
        self.registered && is_refresh_key(key)
    }
}

pub fn is_refresh_key(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::F(5) => true,
        KeyCode::Char('r') | KeyCode::Char('R') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
