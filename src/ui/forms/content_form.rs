//! Content form rendering (editing and submitted views)

use super::field_renderer::{draw_error_line, draw_field, draw_help_text, field_height};
use crate::app::App;
use crate::platform::{ADD_ENTRY_SHORTCUT, COPY_SHORTCUT, REMOVE_ENTRY_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::{
    BaseField, ContentType, FieldPath, FieldSpec, FocusTarget, FormSession, MAX_ENTRIES,
};
use crate::ui::components::{render_action_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// One vertically stacked piece of the form
enum Row<'a> {
    Field {
        target: FocusTarget,
        spec: FieldSpec,
        value: &'a str,
        error: Option<String>,
    },
    Heading {
        text: String,
        error: Option<String>,
    },
    Button {
        target: FocusTarget,
        label: &'static str,
        shortcut: &'static str,
    },
}

impl Row<'_> {
    fn height(&self) -> u16 {
        match self {
            Row::Field { spec, error, .. } => field_height(spec, error.is_some()),
            Row::Heading { error, .. } => 2 + u16::from(error.is_some()),
            Row::Button { .. } => BUTTON_HEIGHT,
        }
    }

    fn target(&self) -> Option<FocusTarget> {
        match self {
            Row::Field { target, .. } | Row::Button { target, .. } => Some(*target),
            Row::Heading { .. } => None,
        }
    }
}

/// Everything shown for the current session, in display order
fn build_rows(session: &FormSession) -> Vec<Row<'_>> {
    let mut rows = Vec::new();

    for field in BaseField::ALL {
        rows.push(Row::Field {
            target: FocusTarget::Base(field),
            spec: field.spec(),
            value: session.base(field),
            error: session.error_for(&FieldPath::Base(field.name())),
        });
    }

    if let Some(content_type) = session.active_content_type() {
        push_group_rows(session, content_type, &mut rows);
    }

    rows.push(Row::Button {
        target: FocusTarget::Submit,
        label: "Submit",
        shortcut: SUBMIT_SHORTCUT,
    });

    rows
}

/// Heading, entries and add button for the active group
fn push_group_rows<'a>(session: &'a FormSession, content_type: ContentType, rows: &mut Vec<Row<'a>>) {
    let group = FormSession::group_key(content_type);
    rows.push(Row::Heading {
        text: format!(
            "{}s ({}/{})",
            content_type.label(),
            session.entry_count(content_type),
            MAX_ENTRIES
        ),
        error: session.error_for(&FieldPath::Group(group)),
    });

    let can_remove = session.can_remove(content_type);
    for (index, key) in session.entry_keys(content_type).into_iter().enumerate() {
        rows.push(Row::Heading {
            text: format!("{} {}", content_type.label(), index + 1),
            error: None,
        });
        for spec in FormSession::fields(content_type) {
            rows.push(Row::Field {
                target: FocusTarget::EntryField {
                    key,
                    field: spec.name,
                },
                spec: *spec,
                value: session
                    .entry_value(content_type, key, spec.name)
                    .unwrap_or_default(),
                error: session.entry_error(content_type, key, spec.name),
            });
        }
        if can_remove {
            rows.push(Row::Button {
                target: FocusTarget::RemoveEntry(key),
                label: "Remove",
                shortcut: REMOVE_ENTRY_SHORTCUT,
            });
        }
    }

    if session.can_append(content_type) {
        rows.push(Row::Button {
            target: FocusTarget::AddEntry,
            label: add_label(content_type),
            shortcut: ADD_ENTRY_SHORTCUT,
        });
    }
}

fn add_label(content_type: ContentType) -> &'static str {
    match content_type {
        ContentType::BlogPost => "Add Blog Post",
        ContentType::ProductListing => "Add Product Listing",
        ContentType::Event => "Add Event",
    }
}

/// First row to draw so the focused row is fully visible
fn scroll_offset(rows: &[Row], focused: FocusTarget, viewport: u16) -> u16 {
    let mut y = 0u16;
    for row in rows {
        let height = row.height();
        if row.target() == Some(focused) {
            let bottom = y.saturating_add(height);
            return bottom.saturating_sub(viewport).min(y);
        }
        y = y.saturating_add(height);
    }
    0
}

/// Draw the editing form
pub fn draw_content_form(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" New Content ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Fields
            Constraint::Length(1), // Help text
        ])
        .margin(1)
        .split(area);
    let body = chunks[0];

    let session = &app.state.session;
    let focus = &app.state.focus;
    let rows = build_rows(session);
    let offset = scroll_offset(&rows, focus.target(), body.height);

    let mut y = 0u16;
    for row in &rows {
        let height = row.height();
        let top = y;
        y = y.saturating_add(height);
        if top < offset || y > offset.saturating_add(body.height) {
            continue;
        }
        let row_area = Rect {
            x: body.x,
            y: body.y + (top - offset),
            width: body.width,
            height,
        };
        match row {
            Row::Field {
                target,
                spec,
                value,
                error,
            } => draw_field(
                frame,
                row_area,
                spec,
                value,
                focus.is_focused(target),
                error.as_deref(),
            ),
            Row::Heading { text, error } => draw_heading(frame, row_area, text, error.as_deref()),
            Row::Button {
                target,
                label,
                shortcut,
            } => {
                let button_area = Rect {
                    width: row_area.width.min(32),
                    ..row_area
                };
                render_action_button(
                    frame,
                    button_area,
                    label,
                    shortcut,
                    focus.is_focused(target),
                    true,
                );
            }
        }
    }

    let select_focused = rows.iter().any(|row| {
        matches!(row, Row::Field { target, spec, .. } if focus.is_focused(target) && spec.is_select())
    });
    let mut hints = vec![("Tab", "next field")];
    if select_focused {
        hints.push(("←/→", "change option"));
    }
    hints.extend([
        (ADD_ENTRY_SHORTCUT, "add entry"),
        (REMOVE_ENTRY_SHORTCUT, "remove entry"),
        (SUBMIT_SHORTCUT, "submit"),
        ("Esc", "quit"),
    ]);
    draw_help_text(frame, chunks[1], &hints);
}

fn draw_heading(frame: &mut Frame, area: Rect, text: &str, error: Option<&str>) {
    // Leave the first row blank as spacing
    let heading_area = Rect {
        y: area.y + 1,
        height: 1,
        ..area
    };
    let line = Line::from(Span::styled(
        text.to_string(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(line), heading_area);

    if let Some(message) = error {
        let error_area = Rect {
            y: area.y + 2,
            height: 1,
            ..area
        };
        draw_error_line(frame, error_area, message);
    }
}

/// Draw the read-only view shown after a successful submission
pub fn draw_submitted(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Submitted ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Record
            Constraint::Length(1), // Help text
        ])
        .margin(1)
        .split(area);

    let json = match &app.state.last_record {
        Some(record) => serde_json::to_string_pretty(record)
            .unwrap_or_else(|e| format!("Failed to render record: {e}")),
        None => String::new(),
    };
    let lines: Vec<Line> = json
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(Color::White))))
        .collect();
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), chunks[0]);

    draw_help_text(
        frame,
        chunks[1],
        &[("n", "new form"), (COPY_SHORTCUT, "copy JSON"), ("q", "quit")],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FormFocus;

    #[test]
    fn test_rows_follow_focus_order() {
        let mut session = FormSession::new(ContentType::ProductListing);
        session.append_entry(ContentType::ProductListing);
        let targets: Vec<FocusTarget> = build_rows(&session)
            .iter()
            .filter_map(Row::target)
            .collect();
        assert_eq!(targets, crate::state::focus_order(&session));
    }

    #[test]
    fn test_unknown_content_type_has_no_group_rows() {
        let mut session = FormSession::default();
        session.set_content_type("Podcast");
        let targets: Vec<FocusTarget> = build_rows(&session)
            .iter()
            .filter_map(Row::target)
            .collect();
        assert_eq!(targets.len(), BaseField::ALL.len() + 1);
        assert_eq!(targets.last(), Some(&FocusTarget::Submit));
    }

    #[test]
    fn test_scroll_keeps_focused_row_visible() {
        let session = FormSession::new(ContentType::Event);
        let rows = build_rows(&session);
        let mut focus = FormFocus::default();
        assert_eq!(scroll_offset(&rows, focus.target(), 10), 0);

        focus.focus(&session, FocusTarget::Submit);
        let total: u16 = rows.iter().map(Row::height).sum();
        assert_eq!(scroll_offset(&rows, focus.target(), 10), total - 10);
    }
}
