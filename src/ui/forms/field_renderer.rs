//! Field rendering utilities for forms

use crate::state::{FieldKind, FieldSpec};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows taken by the bordered input box
pub fn input_height(spec: &FieldSpec) -> u16 {
    if spec.is_multiline() {
        5
    } else {
        3
    }
}

/// Rows taken by a field including its error line
pub fn field_height(spec: &FieldSpec, has_error: bool) -> u16 {
    input_height(spec) + u16::from(has_error)
}

/// Draw a form field described by a `FieldSpec`, with its error underneath
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    spec: &FieldSpec,
    value: &str,
    is_active: bool,
    error: Option<&str>,
) {
    let border_style = if error.is_some() {
        Style::default().fg(Color::Red)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::White)
    };
    let placeholder = Style::default().fg(Color::DarkGray);

    let display_str = spec.display_value(value);
    let cursor = if is_active && !spec.is_select() {
        "▌"
    } else {
        ""
    };

    let content = if spec.is_multiline() {
        let mut lines: Vec<Line> = value
            .split('\n')
            .map(|l| Line::from(Span::styled(l.to_string(), style)))
            .collect();
        if value.is_empty() && !is_active {
            lines = vec![Line::from(Span::styled("(empty)", placeholder))];
        }
        if let Some(last) = lines.last_mut() {
            last.spans
                .push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
        }
        Paragraph::new(lines)
    } else {
        let span = match spec.kind {
            FieldKind::Date if value.is_empty() => Span::styled(display_str, placeholder),
            FieldKind::Text if value.is_empty() && !is_active => {
                Span::styled("(empty)", placeholder)
            }
            FieldKind::Select(_) if is_active => {
                Span::styled(display_str, style.add_modifier(Modifier::BOLD))
            }
            _ => Span::styled(display_str, style),
        };
        Paragraph::new(Line::from(vec![
            span,
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ]))
    };

    let block = Block::default()
        .title(format!(" {} ", spec.label))
        .borders(Borders::ALL)
        .border_style(border_style);

    let input_area = Rect {
        height: input_height(spec).min(area.height),
        ..area
    };
    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), input_area);

    if let Some(message) = error {
        if area.height > input_area.height {
            let error_area = Rect {
                y: input_area.y + input_area.height,
                height: 1,
                ..area
            };
            draw_error_line(frame, error_area, message);
        }
    }
}

/// Draw a single red validation message
pub fn draw_error_line(frame: &mut Frame, area: Rect, message: &str) {
    let line = Line::from(vec![
        Span::styled(" ✗ ", Style::default().fg(Color::Red)),
        Span::styled(message.to_string(), Style::default().fg(Color::Red)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Draw the key hint line shown under a form
pub fn draw_help_text(frame: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, action) in hints {
        spans.push(Span::styled(key.to_string(), Style::default().fg(Color::Cyan)));
        spans.push(Span::raw(format!(": {action}  ")));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
