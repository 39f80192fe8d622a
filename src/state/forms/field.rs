//! Form field descriptors and edit operations

use super::options::{label_for, SelectOption};

/// How a field is edited and displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Multiline,
    /// Free text expected in `YYYY-MM-DD` form
    Date,
    Select(&'static [SelectOption]),
}

/// Static description of a single form field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Wire name, also used as the last segment of error paths
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn text(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Text,
        }
    }

    pub const fn multiline(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Multiline,
        }
    }

    pub const fn date(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Date,
        }
    }

    pub const fn select(
        name: &'static str,
        label: &'static str,
        options: &'static [SelectOption],
    ) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Select(options),
        }
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self.kind, FieldKind::Multiline)
    }

    pub fn is_select(&self) -> bool {
        matches!(self.kind, FieldKind::Select(_))
    }

    /// Apply an edit to the current value and return the new value.
    ///
    /// Returns `None` when the edit does not apply to this kind of field
    /// (typing into a select, cycling a text field, newline in a single-line
    /// field).
    pub fn apply(&self, current: &str, edit: FieldEdit) -> Option<String> {
        match (self.kind, edit) {
            (FieldKind::Select(options), FieldEdit::NextOption) => {
                Some(cycle(options, current, true).to_string())
            }
            (FieldKind::Select(options), FieldEdit::PrevOption) => {
                Some(cycle(options, current, false).to_string())
            }
            (FieldKind::Select(_), FieldEdit::Clear) => Some(String::new()),
            (FieldKind::Select(_), _) => None,
            (_, FieldEdit::Insert(c)) => {
                let mut value = current.to_string();
                value.push(c);
                Some(value)
            }
            (_, FieldEdit::Backspace) => {
                let mut value = current.to_string();
                value.pop();
                Some(value)
            }
            (_, FieldEdit::Clear) => Some(String::new()),
            (FieldKind::Multiline, FieldEdit::Newline) => {
                let mut value = current.to_string();
                value.push('\n');
                Some(value)
            }
            _ => None,
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self, value: &str) -> String {
        match self.kind {
            FieldKind::Select(options) => match label_for(options, value) {
                Some(label) => format!("◂ {label} ▸"),
                None if value.is_empty() => "◂ (select) ▸".to_string(),
                None => format!("◂ {value} ▸"),
            },
            FieldKind::Date if value.is_empty() => "YYYY-MM-DD".to_string(),
            _ => value.to_string(),
        }
    }
}

/// A single user edit delivered by the rendering layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEdit {
    Insert(char),
    Backspace,
    Newline,
    Clear,
    NextOption,
    PrevOption,
}

/// Move to the next/previous option; an unknown or empty value starts at the ends
fn cycle(options: &'static [SelectOption], current: &str, forward: bool) -> &'static str {
    if options.is_empty() {
        return "";
    }
    let last = options.len() - 1;
    let next = match options.iter().position(|o| o.value == current) {
        Some(i) if forward => (i + 1) % options.len(),
        Some(0) => last,
        Some(i) => i - 1,
        None if forward => 0,
        None => last,
    };
    options[next].value
}
