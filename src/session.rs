use std::time::Duration;

use crate::util::format_duration;

/// 1 hour 30 mins
pub const SESSION_DURATION_SECS: u64 = 90 * 60;
pub const SECRET_PASSWORD: &str = "CMPY";
pub const RESTART_DELAY: Duration = Duration::from_secs(2);
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

pub const WRONG_PASSWORD_MESSAGE: &str = "Sorry, but you can't save Xmas with that password";
pub const SUCCESS_MESSAGE: &str = "Congratulations! You saved Xmas!!";
pub const EXPIRED_MESSAGE: &str = "Time's up! You failed!";

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub duration_secs: u64,
    pub secret: String,
    pub restart_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            duration_secs: SESSION_DURATION_SECS,
            secret: SECRET_PASSWORD.to_string(),
            restart_delay: RESTART_DELAY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Outcome {
    Pending,
    Success,
    Expired,
}

/// Visual state of the content frame. `Failure` is the transient wrong
/// password signal and is reset by the next keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum BorderState {
    #[default]
    Neutral,
    Failure,
    Success,
}

/// One play-through. Subscribers receive clones of this as snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    /// `None` until the first start
    pub remaining_seconds: Option<u64>,
    pub running: bool,
    pub password_input: String,
    pub outcome: Outcome,
    /// Time on the clock when the password was accepted
    pub frozen_seconds: Option<u64>,
    pub show_restart: bool,
    pub error_message: Option<&'static str>,
    pub border: BorderState,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            remaining_seconds: None,
            running: false,
            password_input: String::new(),
            outcome: Outcome::Pending,
            frozen_seconds: None,
            show_restart: false,
            error_message: None,
            border: BorderState::Neutral,
        }
    }
}

impl SessionState {
    pub fn has_started(&self) -> bool {
        self.remaining_seconds.is_some()
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.outcome, Outcome::Success | Outcome::Expired)
    }

    /// Whether the password field is live
    pub fn accepts_input(&self) -> bool {
        self.running && self.outcome == Outcome::Pending
    }

    /// Seconds shown on the clock: frozen after a win, remaining otherwise
    pub fn display_seconds(&self) -> Option<u64> {
        match self.outcome {
            Outcome::Success => self.frozen_seconds.or(self.remaining_seconds),
            _ => self.remaining_seconds,
        }
    }

    pub fn formatted_time(&self) -> Option<String> {
        self.display_seconds().map(format_duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_has_no_session() {
        let state = SessionState::default();

        assert!(!state.has_started());
        assert!(!state.running);
        assert!(!state.is_terminal());
        assert_eq!(state.outcome, Outcome::Pending);
        assert_eq!(state.formatted_time(), None);
    }

    #[test]
    fn display_seconds_prefers_frozen_after_success() {
        let state = SessionState {
            remaining_seconds: Some(100),
            frozen_seconds: Some(120),
            outcome: Outcome::Success,
            ..SessionState::default()
        };

        assert_eq!(state.display_seconds(), Some(120));
        assert_eq!(state.formatted_time().as_deref(), Some("00:02:00"));
    }

    #[test]
    fn display_seconds_uses_remaining_while_pending() {
        let state = SessionState {
            remaining_seconds: Some(5400),
            running: true,
            ..SessionState::default()
        };

        assert_eq!(state.formatted_time().as_deref(), Some("01:30:00"));
        assert!(state.accepts_input());
    }

    #[test]
    fn outcome_display_is_lowercase() {
        assert_eq!(Outcome::Pending.to_string(), "pending");
        assert_eq!(Outcome::Expired.to_string(), "expired");
        assert_eq!(BorderState::Failure.to_string(), "failure");
    }

    #[test]
    fn default_session_config_matches_constants() {
        let cfg = SessionConfig::default();
        assert_eq!(cfg.duration_secs, 5400);
        assert_eq!(cfg.secret, "CMPY");
        assert_eq!(cfg.restart_delay, Duration::from_secs(2));
    }
}
