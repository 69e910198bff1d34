pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use escaperoom::{
    decoration::{Decorations, Particle},
    runtime::TICK_RATE_MS,
    session::{BorderState, SessionState},
};

use crate::App;

const CONTENT_WIDTH: u16 = 60;
const CONTENT_HEIGHT: u16 = 12;
const POPUP_WIDTH: u16 = 64;
const POPUP_HEIGHT: u16 = 5;
/// Full period of the success glow
const GLOW_PERIOD_MS: u64 = 2000;

pub fn draw(app: &App, f: &mut Frame) {
    let area = f.area();
    render_decorations(&app.decorations, area, f.buffer_mut());

    let content = centered_rect(CONTENT_WIDTH, CONTENT_HEIGHT, area);
    f.render_widget(Clear, content);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style(app.snapshot.border, app.frame));
    let inner = block.inner(content);
    f.render_widget(block, content);

    screen::current_screen(&app.snapshot).render(app, f, inner);

    if let Some(warning) = app.warning {
        render_warning(f, area, warning);
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Lines centered both ways inside `area`
pub(crate) fn render_lines(f: &mut Frame, area: Rect, lines: Vec<Line<'_>>) {
    let used = (lines.len() as u16).min(area.height);
    let top = (area.height - used) / 2;
    let target = Rect {
        y: area.y + top,
        height: area.height - top,
        ..area
    };

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, target);
}

pub(crate) fn timer_line(state: &SessionState) -> Line<'static> {
    let time = state
        .formatted_time()
        .unwrap_or_else(|| "--:--:--".to_string());
    Line::from(vec![
        Span::styled("✦ ", Style::default().fg(Color::Red)),
        Span::styled(
            time,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ✦", Style::default().fg(Color::Green)),
    ])
}

pub(crate) fn button(label: &str, color: Color) -> Line<'static> {
    Line::from(Span::styled(
        format!("[ {label} ]"),
        Style::default()
            .fg(Color::White)
            .bg(color)
            .add_modifier(Modifier::BOLD),
    ))
}

pub(crate) fn password_field(input: &str, width: u16) -> Line<'static> {
    let prompt = Span::styled("> ", Style::default().fg(Color::Gray));
    if input.is_empty() {
        return Line::from(vec![
            prompt,
            Span::styled(
                "Enter password",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ),
        ]);
    }

    // room for the prompt and cursor
    let visible = tail_fitting(input, width.saturating_sub(4) as usize);
    Line::from(vec![
        prompt,
        Span::styled(
            visible.to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        ),
        Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
    ])
}

/// Longest suffix of `text` no wider than `max_width` columns
fn tail_fitting(text: &str, max_width: usize) -> &str {
    let mut used = 0;
    let mut start = text.len();
    for (idx, ch) in text.char_indices().rev() {
        used += ch.width().unwrap_or(0);
        if used > max_width {
            break;
        }
        start = idx;
    }
    &text[start..]
}

pub(crate) fn restart_lines(state: &SessionState) -> Vec<Line<'static>> {
    if !state.show_restart {
        return Vec::new();
    }
    vec![
        Line::default(),
        button("Restart", Color::Green),
        Line::from(Span::styled(
            "(r)estart / (esc)ape",
            Style::default().add_modifier(Modifier::ITALIC),
        )),
    ]
}

fn border_style(border: BorderState, frame: u64) -> Style {
    match border {
        BorderState::Neutral => Style::default().fg(Color::Gray),
        BorderState::Failure => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        BorderState::Success if glow_bright(frame) => {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        }
        BorderState::Success => Style::default().fg(Color::LightGreen),
    }
}

fn glow_bright(frame: u64) -> bool {
    let cycle = (GLOW_PERIOD_MS / TICK_RATE_MS).max(2);
    frame % cycle < cycle / 2
}

fn render_warning(f: &mut Frame, area: Rect, warning: &str) {
    let popup = centered_rect(POPUP_WIDTH, POPUP_HEIGHT, area);
    f.render_widget(Clear, popup);

    let text = vec![
        Line::from(Span::styled(
            warning.to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "press any key",
            Style::default().add_modifier(Modifier::ITALIC),
        )),
    ];
    let widget = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .title("Warning"),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(widget, popup);
}

/// Ambient field and snowfall, drawn straight into the buffer behind the content box
fn render_decorations(decorations: &Decorations, area: Rect, buf: &mut Buffer) {
    if let Some(field) = &decorations.field {
        for particle in &field.particles {
            let style = if particle.brightness > 0.8 {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else if particle.brightness > 0.5 {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::Gray).add_modifier(Modifier::DIM)
            };
            put_particle(particle, style, area, buf);
        }
    }

    for flake in &decorations.snow.flakes {
        let style = if flake.brightness > 0.8 {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::LightCyan)
        };
        put_particle(flake, style, area, buf);
    }
}

fn put_particle(particle: &Particle, style: Style, area: Rect, buf: &mut Buffer) {
    if particle.x < 0.0 || particle.y < 0.0 {
        return;
    }
    let x = particle.x as u16;
    let y = particle.y as u16;

    if x < area.width && y < area.height {
        if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
            cell.set_char(particle.symbol);
            cell.set_style(style);
        }
    }
}
