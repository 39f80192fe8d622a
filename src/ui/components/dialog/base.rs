//! Base dialog component

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Configuration for rendering a dialog
pub struct DialogConfig<'a> {
    pub title: &'a str,
    /// Colour shared by the title and the border
    pub accent: Color,
    /// Message content (can be multi-line with \n)
    pub message: &'a str,
    /// Hint text shown at the bottom (e.g., "Press Enter to dismiss")
    pub hint: Vec<Span<'a>>,
    pub max_width: u16,
}

/// Render a centered dialog overlay
pub fn render_dialog(frame: &mut Frame, config: DialogConfig) {
    let area = frame.area();
    let padding = 4u16;
    let max_width = config.max_width.min(area.width);
    let wrapped_lines = wrap_text(
        config.message,
        usize::from(max_width.saturating_sub(padding + 2)),
    );

    let content_width = wrapped_lines
        .iter()
        .map(|l| l.chars().count())
        .chain(std::iter::once(config.title.chars().count()))
        .chain(std::iter::once(
            config.hint.iter().map(|s| s.content.chars().count()).sum(),
        ))
        .max()
        .unwrap_or(0) as u16;
    let dialog_width = content_width.saturating_add(padding + 2).min(max_width);

    // title + blank + message + (blank + hint) + borders
    let hint_lines = if config.hint.is_empty() { 0 } else { 2 };
    let dialog_height = (wrapped_lines.len() as u16)
        .saturating_add(4 + hint_lines)
        .min(area.height);

    let dialog_area = Rect {
        x: area.x + area.width.saturating_sub(dialog_width) / 2,
        y: area.y + area.height.saturating_sub(dialog_height) / 2,
        width: dialog_width,
        height: dialog_height,
    };

    frame.render_widget(Clear, dialog_area);

    let mut content = vec![
        Line::from(Span::styled(
            format!(" {}", config.title),
            Style::default()
                .fg(config.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    content.extend(wrapped_lines.into_iter().map(|l| Line::from(format!(" {l}"))));
    if !config.hint.is_empty() {
        content.push(Line::from(""));
        let mut hint = vec![Span::raw(" ")];
        hint.extend(config.hint);
        content.push(Line::from(hint));
    }

    let dialog = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(config.accent)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(dialog, dialog_area);
}

/// Wrap text to fit within a maximum width, counted in characters.
/// Words longer than the width are split.
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let max_width = max_width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_len = 0;
        for word in paragraph.split_whitespace() {
            let mut chars: Vec<char> = word.chars().collect();
            while chars.len() > max_width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                lines.push(chars.drain(..max_width).collect());
            }
            if chars.is_empty() {
                continue;
            }
            if current_len > 0 && current_len + 1 + chars.len() > max_width {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current_len += chars.len();
            current.extend(chars);
        }
        lines.push(current);
    }

    lines
}
