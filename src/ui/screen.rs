use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};

use escaperoom::session::{Outcome, SessionState, EXPIRED_MESSAGE, SUCCESS_MESSAGE};

use crate::{
    ui::{button, password_field, render_lines, restart_lines, timer_line},
    App,
};

/// A UI Screen boundary: renders the content box for one phase of the session
pub trait Screen {
    fn render(&self, app: &App, f: &mut Frame, area: Rect);
}

/// Before the first start
pub struct StartScreen;

impl Screen for StartScreen {
    fn render(&self, _app: &App, f: &mut Frame, area: Rect) {
        let title = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);
        let lines = vec![
            Line::from(Span::styled("Escape Room App", title)),
            Line::default(),
            button("Start Timer", Color::Blue),
            Line::from(Span::styled(
                "press enter",
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::ITALIC),
            )),
        ];
        render_lines(f, area, lines);
    }
}

/// Countdown running, password field live
pub struct ActiveScreen;

impl Screen for ActiveScreen {
    fn render(&self, app: &App, f: &mut Frame, area: Rect) {
        let state = &app.snapshot;
        let mut lines = vec![
            timer_line(state),
            Line::default(),
            password_field(&state.password_input, area.width),
            button("Submit", Color::Blue),
        ];
        if let Some(message) = state.error_message {
            lines.push(Line::from(Span::styled(
                message,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
        }
        render_lines(f, area, lines);
    }
}

pub struct SuccessScreen;

impl Screen for SuccessScreen {
    fn render(&self, app: &App, f: &mut Frame, area: Rect) {
        let state = &app.snapshot;
        let mut lines = vec![
            timer_line(state),
            Line::default(),
            Line::from(Span::styled(
                SUCCESS_MESSAGE,
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
        ];
        lines.extend(restart_lines(state));
        render_lines(f, area, lines);
    }
}

pub struct ExpiredScreen;

impl Screen for ExpiredScreen {
    fn render(&self, app: &App, f: &mut Frame, area: Rect) {
        let state = &app.snapshot;
        let mut lines = vec![
            timer_line(state),
            Line::default(),
            Line::from(Span::styled(
                EXPIRED_MESSAGE,
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ];
        lines.extend(restart_lines(state));
        render_lines(f, area, lines);
    }
}

/// Helper to construct the appropriate screen for the current snapshot
pub fn current_screen(state: &SessionState) -> Box<dyn Screen> {
    if !state.has_started() {
        return Box::new(StartScreen);
    }
    match state.outcome {
        Outcome::Pending => Box::new(ActiveScreen),
        Outcome::Success => Box::new(SuccessScreen),
        Outcome::Expired => Box::new(ExpiredScreen),
    }
}
