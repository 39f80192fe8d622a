//! Layout components (content area, status bar)

use crate::app::App;
use crate::state::SessionState;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split off the bottom line for the status bar and return the content area
pub fn create_layout(area: Rect) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    chunks[0]
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let session = &app.state.session;
    let mut spans = vec![];

    // Session state
    let indicator = match session.state() {
        SessionState::Submitted => Span::styled(" ✓ ", Style::default().fg(Color::Green)),
        SessionState::Editing if session.errors().is_empty() => {
            Span::styled(" ● ", Style::default().fg(Color::Cyan))
        }
        SessionState::Editing => Span::styled(" ● ", Style::default().fg(Color::Red)),
    };
    spans.push(indicator);

    let content_type = match session.content_type() {
        "" => "(no content type)",
        other => other,
    };
    spans.push(Span::styled(
        content_type.to_string(),
        Style::default().fg(Color::White),
    ));

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        let color = if session.is_submitted() {
            Color::Green
        } else {
            Color::Yellow
        };
        spans.push(Span::styled(msg.clone(), Style::default().fg(color)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    // Sink on the right
    let sink_hint = format!(" → {} ", app.sink_description());
    let width = sink_hint.chars().count() as u16;
    let sink_area = Rect {
        x: area.width.saturating_sub(width),
        y: area.height.saturating_sub(1),
        width: width.min(area.width),
        height: 1,
    };
    let sink_widget =
        Paragraph::new(sink_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(sink_widget, sink_area);
}
