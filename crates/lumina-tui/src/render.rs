//! Pure view/render functions for the TUI.
//!
//! This module contains all rendering logic. Functions here:
//! - Take `&AppState` by immutable reference
//! - Draw to a ratatui Frame
//! - Never mutate state or return effects

use chrono::{Local, TimeZone};
use lumina_core::assistant::Role;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::state::{AppState, Focus, Overlay, TuiState};

/// Minimum terminal width for the three-column layout.
/// Below this, history and assistant are reachable as overlays only.
const WIDE_MIN_WIDTH: u16 = 96;

/// Height of status line at the bottom.
const STATUS_HEIGHT: u16 = 1;

/// Spinner frames for status line animation.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Renders the entire TUI to the frame.
///
/// This is a pure render function - it only reads state and draws to frame.
/// No mutations, no side effects.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let state = &app.tui;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(STATUS_HEIGHT)])
        .split(area);
    let body = chunks[0];

    if area.width >= WIDE_MIN_WIDTH {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(28),
                Constraint::Percentage(40),
                Constraint::Percentage(32),
            ])
            .split(body);
        render_history(state, frame, columns[0]);
        render_calculator(state, frame, columns[1]);
        render_assistant(state, frame, columns[2]);
    } else {
        render_calculator(state, frame, body);

        match app.overlay {
            Some(Overlay::History) => {
                let popup = centered_rect(body, 80, 70);
                frame.render_widget(Clear, popup);
                render_history(state, frame, popup);
            }
            Some(Overlay::Assistant) => {
                let popup = centered_rect(body, 90, 80);
                frame.render_widget(Clear, popup);
                render_assistant(state, frame, popup);
            }
            None => {}
        }
    }

    render_status_line(app, frame, chunks[1]);
}

// ============================================================================
// Calculator panel
// ============================================================================

fn render_calculator(state: &TuiState, frame: &mut Frame, area: Rect) {
    let focused = state.focus == Focus::Keypad;
    let title = format!(" Lumina · {} ", state.mode.label());
    let block = panel_block(&title, focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 {
        return;
    }

    let display_style = if state.keypad.has_error() {
        Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let mut lines = vec![
        Line::from(Span::styled(
            state.keypad.expression().to_string(),
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Right),
        Line::from(Span::styled(state.keypad.display().to_string(), display_style))
            .alignment(Alignment::Right),
        Line::default(),
    ];
    lines.extend(keypad_legend(state));

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Key legend shown under the display, matching the active mode.
fn keypad_legend(state: &TuiState) -> Vec<Line<'static>> {
    let dim = Style::default().fg(Color::DarkGray);
    let mut lines = vec![
        Line::from(Span::styled("0-9 .      digits", dim)),
        Line::from(Span::styled("+ - * / %  operators", dim)),
        Line::from(Span::styled("Enter/=    evaluate", dim)),
        Line::from(Span::styled("Backspace  delete · Del clear", dim)),
    ];
    if state.mode == lumina_core::keypad::Mode::Scientific {
        lines.push(Line::from(Span::styled(
            "s/c/t      sin cos tan", dim,
        )));
        lines.push(Line::from(Span::styled(
            "r/l/e/q    sqrt log exp x²", dim,
        )));
    } else {
        lines.push(Line::from(Span::styled("c          clear", dim)));
    }
    lines
}

// ============================================================================
// History panel
// ============================================================================

fn render_history(state: &TuiState, frame: &mut Frame, area: Rect) {
    let block = panel_block(" History ", false);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if state.history.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No calculations yet",
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    let width = inner.width as usize;
    let mut lines = Vec::new();
    for entry in state.history.entries() {
        let time = Local
            .timestamp_millis_opt(entry.timestamp)
            .single()
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_default();
        lines.push(Line::from(vec![
            Span::styled(
                truncate_with_ellipsis(&entry.expression, width.saturating_sub(6)),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(format!("  {time}"), Style::default().fg(Color::DarkGray)),
        ]));
        lines.push(Line::from(Span::styled(
            format!("= {}", entry.result),
            Style::default().add_modifier(Modifier::BOLD),
        )));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

// ============================================================================
// Assistant panel
// ============================================================================

fn render_assistant(state: &TuiState, frame: &mut Frame, area: Rect) {
    let focused = state.focus == Focus::Assistant;
    let block = panel_block(" Assistant ", focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 2 {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let mut lines = Vec::new();
    for message in &state.assistant.messages {
        let (label, style) = match message.role {
            Role::User => ("You", Style::default().fg(Color::Cyan)),
            Role::Assistant => ("Lumina", Style::default().fg(Color::Green)),
        };
        lines.push(Line::from(Span::styled(
            format!("{label}:"),
            style.add_modifier(Modifier::BOLD),
        )));
        for text_line in message.content.lines() {
            lines.push(Line::from(text_line.to_string()));
        }
        lines.push(Line::default());
    }
    if state.assistant.is_thinking() {
        let spinner = SPINNER_FRAMES[state.spinner_frame as usize % SPINNER_FRAMES.len()];
        lines.push(Line::from(Span::styled(
            format!("{spinner} Thinking..."),
            Style::default().fg(Color::Yellow),
        )));
    }

    // Keep the tail of the transcript in view.
    let transcript_height = chunks[0].height as usize;
    let scroll = lines.len().saturating_sub(transcript_height) as u16;
    let transcript = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(transcript, chunks[0]);

    let prompt = Line::from(vec![
        Span::styled("> ", Style::default().fg(Color::Cyan)),
        Span::raw(state.assistant.input.clone()),
    ]);
    frame.render_widget(Paragraph::new(prompt), chunks[1]);
}

// ============================================================================
// Status line
// ============================================================================

fn render_status_line(app: &AppState, frame: &mut Frame, area: Rect) {
    let state = &app.tui;
    let mut spans = vec![Span::styled(
        format!(" {} ", state.mode.label()),
        Style::default().fg(Color::Black).bg(Color::Cyan),
    )];

    if state.assistant.is_thinking() {
        let spinner = SPINNER_FRAMES[state.spinner_frame as usize % SPINNER_FRAMES.len()];
        spans.push(Span::styled(
            format!(" {spinner} asking "),
            Style::default().fg(Color::Yellow),
        ));
    }

    spans.push(Span::styled(
        " Tab focus · F2 mode · ^H history · ^A assistant · ^L clear history · ^C quit",
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

// ============================================================================
// Helpers
// ============================================================================

fn panel_block(title: &str, focused: bool) -> Block<'static> {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title.to_string())
}

/// Truncates `text` to `max_width` display columns, appending an ellipsis.
fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    let limit = max_width.saturating_sub(1);
    let mut used = 0;
    for c in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > limit {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

/// Centers a rect of the given percentage size within `area`.
fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}
